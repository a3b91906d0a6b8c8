use crate::constants::{NAV_SCROLLED_PX, SCROLL_TOP_VISIBLE_PX};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub label: &'static str,
    pub id: &'static str,
}

/// In-page scroll targets, in menu order.
pub const ANCHORS: [Anchor; 5] = [
    Anchor { label: "Destinations", id: "destinations" },
    Anchor { label: "Packages", id: "packages" },
    Anchor { label: "Services", id: "services" },
    Anchor { label: "Gallery", id: "gallery" },
    Anchor { label: "Contact", id: "contact" },
];

pub fn anchor(id: &str) -> Option<&'static Anchor> {
    ANCHORS.iter().find(|a| a.id == id)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    pub show_scroll_top: bool,
    pub menu_open: bool,
}

impl NavState {
    /// Returns true when anything visible changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > NAV_SCROLLED_PX;
        let show_scroll_top = scroll_y > SCROLL_TOP_VISIBLE_PX;
        let changed = scrolled != self.scrolled || show_scroll_top != self.show_scroll_top;
        self.scrolled = scrolled;
        self.show_scroll_top = show_scroll_top;
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Following a link always closes the mobile menu.
    pub fn follow_link(&mut self) {
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_strict() {
        let mut nav = NavState::default();
        assert!(!nav.on_scroll(50.0));
        assert!(nav.on_scroll(51.0));
        assert!(nav.scrolled && !nav.show_scroll_top);
        assert!(!nav.on_scroll(500.0));
        assert!(nav.on_scroll(501.0));
        assert!(nav.show_scroll_top);
        assert!(nav.on_scroll(0.0));
        assert_eq!(nav, NavState::default());
    }

    #[test]
    fn following_a_link_closes_the_menu() {
        let mut nav = NavState::default();
        nav.toggle_menu();
        assert!(nav.menu_open);
        nav.follow_link();
        assert!(!nav.menu_open);
    }

    #[test]
    fn anchors_resolve_by_id() {
        assert_eq!(anchor("gallery").map(|a| a.label), Some("Gallery"));
        assert!(anchor("footer").is_none());
    }
}
