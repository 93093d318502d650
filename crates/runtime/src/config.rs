use crate::carousel::CarouselGeometry;

/// Client behaviour knobs. Defaults are pinned by the tests below; the
/// browser shell may override individual fields from page globals.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Backend origin for `/adapt` and `/ingest`. Empty = same origin.
    pub backend_base_url: String,
    /// How long a toast stays visible after its own `toast()` call.
    pub toast_duration_ms: u32,

    // ── Carousel ─────────────────────────────────────────────
    pub carousel: CarouselGeometry,
    /// Hover time before a side card slides to center. 0 = immediate.
    pub hover_delay_ms: u32,
    /// First card fade-in delay on page load.
    pub card_fade_in_base_ms: u32,
    /// Added per card index to the fade-in delay.
    pub card_fade_in_step_ms: u32,

    // ── Grids and lists (animation-delay only) ───────────────
    pub grade_stagger_ms: u32,
    pub subject_stagger_ms: u32,
    pub chapter_reveal_step_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            backend_base_url: String::new(),
            toast_duration_ms: 3000,

            carousel: CarouselGeometry::default(),
            hover_delay_ms: 0,
            card_fade_in_base_ms: 200,
            card_fade_in_step_ms: 110,

            grade_stagger_ms: 40,
            subject_stagger_ms: 60,
            chapter_reveal_step_ms: 55,
        }
    }
}

impl UiConfig {
    pub fn with_backend_base_url(mut self, url: impl Into<String>) -> Self {
        self.backend_base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let c = UiConfig::default();
        assert_eq!(c.backend_base_url, "");
        assert_eq!(c.toast_duration_ms, 3000);
        assert_eq!(c.hover_delay_ms, 0);
        assert_eq!(c.card_fade_in_base_ms, 200);
        assert_eq!(c.card_fade_in_step_ms, 110);
        assert_eq!(c.chapter_reveal_step_ms, 55);
        assert_eq!(c.carousel.side_x_px, 310.0);
        assert_eq!(c.carousel.far_scale, 0.58);
    }

    #[test]
    fn backend_url_is_normalized() {
        let c = UiConfig::default().with_backend_base_url(" http://localhost:8000/ ");
        assert_eq!(c.backend_base_url, "http://localhost:8000");
    }
}
