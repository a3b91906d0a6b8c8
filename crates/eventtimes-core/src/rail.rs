use crate::constants::RAIL_PIN_PADDING_PX;
use crate::geometry::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    ScrollRail,
    PagedCarousel,
}

impl Presentation {
    pub fn for_viewport(viewport: Viewport) -> Self {
        if viewport.is_desktop() {
            Presentation::ScrollRail
        } else {
            Presentation::PagedCarousel
        }
    }
}

/// Measured widths of the rail track and the viewport, in CSS pixels.
///
/// Content width is responsive, so a fresh value must be measured on every
/// resize before the pin distance is used.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RailGeometry {
    pub content_width: f64,
    pub viewport_width: f64,
}

impl RailGeometry {
    pub fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            content_width,
            viewport_width,
        }
    }

    /// Horizontal distance the track travels.
    pub fn travel(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Scroll distance the rail stays pinned for.
    pub fn pin_distance(&self) -> f64 {
        self.travel() + RAIL_PIN_PADDING_PX
    }

    /// Track translation at `progress`; linear and never positive.
    pub fn translate_x(&self, progress: f32) -> f64 {
        -(progress.clamp(0.0, 1.0) as f64) * self.travel()
    }
}

/// Paged carousel used below the desktop breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    active: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.active = (self.active + 1) % self.len;
        }
        self.active
    }

    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.active = (self.active + self.len - 1) % self.len;
        }
        self.active
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        self.active = index.min(self.len.saturating_sub(1));
        self.active
    }

    /// Track offset as a percentage of one slide width.
    pub fn offset_percent(&self) -> f64 {
        -(self.active as f64) * 100.0
    }
}
