use glam::Vec2;

/// Pointer position in CSS pixels relative to the viewport.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub seen: bool,
}

// ---------------- Pointer helpers ----------------
/// Map a viewport pixel position to normalized device coordinates:
/// x right and y up, both in \[-1, 1\]. A degenerate viewport maps to the center.
#[inline]
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = -((y / height) * 2.0 - 1.0);
    Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
}

#[inline]
pub fn pointer_ndc(pointer: &PointerState, width: f32, height: f32) -> Vec2 {
    if !pointer.seen {
        return Vec2::ZERO;
    }
    client_to_ndc(pointer.x, pointer.y, width, height)
}

/// Wheel, touch and keyboard scrolling count as user input; programmatic
/// scrolls do not.
#[inline]
pub fn is_user_scroll_event(event_type: &str) -> bool {
    matches!(event_type, "wheel" | "touchstart" | "touchmove" | "keydown")
}

/// Index of the carousel dot under a click, from its `data-index` attribute.
#[inline]
pub fn parse_dot_index(attr: Option<&str>) -> Option<usize> {
    attr.and_then(|s| s.trim().parse::<usize>().ok())
}
