//! Coverflow-style profile picker on the home screen.
//!
//! Every card's transform is a pure function of its offset from the centered
//! card, so the layout can be recomputed from `current` alone.

use foundation::{RequestToken, TokenSequence};

/// Visual transform for one card.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardTransform {
    pub translate_x_px: f64,
    pub rotate_y_deg: f64,
    pub scale: f64,
    pub opacity: f64,
    /// `None` renders as `filter: none`.
    pub brightness: Option<f64>,
    pub z_index: i32,
}

impl CardTransform {
    pub fn css_transform(&self) -> String {
        format!(
            "translateX(calc(-50% + {}px)) translateY(-50%) rotateY({}deg) scale({})",
            self.translate_x_px, self.rotate_y_deg, self.scale
        )
    }

    pub fn css_filter(&self) -> String {
        match self.brightness {
            Some(b) => format!("brightness({b})"),
            None => "none".to_string(),
        }
    }
}

/// Arc shape of the carousel. Side = offset ±1, far = offset ±2, anything
/// further is pushed off stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CarouselGeometry {
    pub side_x_px: f64,
    pub side_rotate_deg: f64,
    pub side_scale: f64,
    pub side_opacity: f64,
    pub side_brightness: f64,
    pub far_x_px: f64,
    pub far_rotate_deg: f64,
    pub far_scale: f64,
    pub far_opacity: f64,
    pub far_brightness: f64,
    pub offstage_x_px: f64,
    pub offstage_rotate_deg: f64,
    pub offstage_scale: f64,
}

impl Default for CarouselGeometry {
    fn default() -> Self {
        Self {
            side_x_px: 310.0,
            side_rotate_deg: 46.0,
            side_scale: 0.80,
            side_opacity: 0.62,
            side_brightness: 0.65,
            far_x_px: 560.0,
            far_rotate_deg: 68.0,
            far_scale: 0.58,
            far_opacity: 0.30,
            far_brightness: 0.45,
            offstage_x_px: 900.0,
            offstage_rotate_deg: 90.0,
            offstage_scale: 0.3,
        }
    }
}

impl CarouselGeometry {
    /// Shift follows the sign of `offset`; rotation opposes it.
    pub fn transform_for_offset(&self, offset: isize) -> CardTransform {
        let dir = offset.signum() as f64;
        match offset.unsigned_abs() {
            0 => CardTransform {
                translate_x_px: 0.0,
                rotate_y_deg: 0.0,
                scale: 1.0,
                opacity: 1.0,
                brightness: None,
                z_index: 10,
            },
            1 => CardTransform {
                translate_x_px: dir * self.side_x_px,
                rotate_y_deg: -dir * self.side_rotate_deg,
                scale: self.side_scale,
                opacity: self.side_opacity,
                brightness: Some(self.side_brightness),
                z_index: 8,
            },
            2 => CardTransform {
                translate_x_px: dir * self.far_x_px,
                rotate_y_deg: -dir * self.far_rotate_deg,
                scale: self.far_scale,
                opacity: self.far_opacity,
                brightness: Some(self.far_brightness),
                z_index: 6,
            },
            _ => CardTransform {
                translate_x_px: dir * self.offstage_x_px,
                rotate_y_deg: -dir * self.offstage_rotate_deg,
                scale: self.offstage_scale,
                opacity: 0.0,
                brightness: None,
                z_index: 0,
            },
        }
    }
}

/// Outcome of clicking a card.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CardClick {
    /// The centered card was clicked: choose it.
    Select(usize),
    /// Another card was clicked and is now centered.
    Recentered(usize),
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    current: usize,
    pending_hover: Option<(usize, RequestToken)>,
    hover_tokens: TokenSequence,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: 0,
            pending_hover: None,
            hover_tokens: TokenSequence::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Transforms for every card with `center` as offset 0.
    pub fn positions(&self, geometry: &CarouselGeometry) -> Vec<CardTransform> {
        positions_around(self.len, self.current, geometry)
    }

    pub fn click(&mut self, index: usize) -> CardClick {
        if index >= self.len {
            return CardClick::Ignored;
        }
        if index == self.current {
            return CardClick::Select(index);
        }
        self.cancel_hover();
        self.current = index;
        CardClick::Recentered(index)
    }

    /// Pointer entered a card. Returns a ticket to fire after the hover delay
    /// when the card is not already centered.
    pub fn hover_enter(&mut self, index: usize) -> Option<RequestToken> {
        if index >= self.len || index == self.current {
            return None;
        }
        let token = self.hover_tokens.issue();
        self.pending_hover = Some((index, token));
        Some(token)
    }

    pub fn hover_leave(&mut self) {
        self.cancel_hover();
    }

    /// Hover delay elapsed. Re-centers when the ticket is still pending.
    pub fn hover_elapsed(&mut self, token: RequestToken) -> bool {
        match self.pending_hover {
            Some((index, pending)) if pending == token => {
                self.pending_hover = None;
                self.current = index;
                true
            }
            _ => false,
        }
    }

    pub fn has_pending_hover(&self) -> bool {
        self.pending_hover.is_some()
    }

    fn cancel_hover(&mut self) {
        self.pending_hover = None;
        self.hover_tokens.invalidate();
    }
}

pub fn positions_around(
    len: usize,
    center: usize,
    geometry: &CarouselGeometry,
) -> Vec<CardTransform> {
    (0..len)
        .map(|i| geometry.transform_for_offset(i as isize - center as isize))
        .collect()
}

/// Delay before card `index` fades in on first load.
pub fn fade_in_delay_ms(index: usize, base_ms: u32, step_ms: u32) -> u32 {
    base_ms.saturating_add(step_ms.saturating_mul(index as u32))
}
