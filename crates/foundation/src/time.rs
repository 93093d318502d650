/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct TimeMs(pub f64); // milliseconds since page load (or any fixed epoch)

impl TimeMs {
    pub fn after(self, duration_ms: u32) -> TimeMs {
        TimeMs(self.0 + f64::from(duration_ms))
    }

    pub fn elapsed_since(self, earlier: TimeMs) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

/// Half-open visibility window `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: TimeMs,
    pub end: TimeMs,
}

impl TimeSpan {
    pub fn starting_at(start: TimeMs, duration_ms: u32) -> Self {
        Self {
            start,
            end: start.after(duration_ms),
        }
    }

    pub fn contains(&self, t: TimeMs) -> bool {
        t >= self.start && t < self.end
    }
}
