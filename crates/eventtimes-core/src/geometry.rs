use crate::constants::DESKTOP_MIN_WIDTH_PX;

/// CSS pixel size of the layout viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The desktop breakpoint: pinning, the scroll rail and snapping are
    /// only used at or above it.
    #[inline]
    pub fn is_desktop(&self) -> bool {
        self.width >= DESKTOP_MIN_WIDTH_PX
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn vw(&self, v: f32) -> f64 {
        self.width * v as f64 / 100.0
    }

    #[inline]
    pub fn vh(&self, v: f32) -> f64 {
        self.height * v as f64 / 100.0
    }
}

/// Document-space vertical extent of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

/// Resting placement of a collage element in viewport units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub left_vw: f32,
    pub top_vh: f32,
    pub width_vw: f32,
    /// `None` lets the content decide (text blocks, chip rows).
    pub height_vh: Option<f32>,
}

impl Frame {
    pub const fn new(left_vw: f32, top_vh: f32, width_vw: f32, height_vh: Option<f32>) -> Self {
        Self {
            left_vw,
            top_vh,
            width_vw,
            height_vh,
        }
    }

    /// Inline style for absolute placement inside a full-viewport section.
    pub fn css(&self) -> String {
        let mut css = format!(
            "left:{}vw;top:{}vh;width:{}vw;",
            self.left_vw, self.top_vh, self.width_vw
        );
        if let Some(h) = self.height_vh {
            css.push_str(&format!("height:{}vh;", h));
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_breakpoint_is_inclusive() {
        assert!(Viewport::new(1024.0, 700.0).is_desktop());
        assert!(!Viewport::new(1023.0, 700.0).is_desktop());
    }

    #[test]
    fn frame_css_omits_auto_height() {
        let f = Frame::new(8.0, 62.0, 40.0, None);
        assert_eq!(f.css(), "left:8vw;top:62vh;width:40vw;");
        let g = Frame::new(6.0, 10.0, 44.0, Some(80.0));
        assert!(g.css().ends_with("height:80vh;"));
    }
}
