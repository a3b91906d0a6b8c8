use crate::constants::PACKAGE_FEATURE_PREVIEW;
use crate::rail::Carousel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub couple: &'static str,
    pub location: &'static str,
    pub image: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "They didn't just plan our wedding, they protected the feeling of it.",
        couple: "Priya & James",
        location: "Portugal",
        image: "/couple_closeup.jpg",
    },
    Testimonial {
        quote: "Every detail was perfect. The team understood our vision from day one.",
        couple: "Sarah & Michael",
        location: "Galle, Sri Lanka",
        image: "/couple_portrait_left.jpg",
    },
    Testimonial {
        quote: "Our guests are still talking about how magical everything was.",
        couple: "Emma & David",
        location: "Mirissa, Sri Lanka",
        image: "/hero_couple_main.jpg",
    },
];

/// One testimonial at a time; wraps both ways like the destination carousel.
#[derive(Clone, Copy, Debug)]
pub struct TestimonialPager {
    pages: Carousel,
}

impl Default for TestimonialPager {
    fn default() -> Self {
        Self {
            pages: Carousel::new(TESTIMONIALS.len()),
        }
    }
}

impl TestimonialPager {
    pub fn active(&self) -> usize {
        self.pages.active()
    }

    pub fn current(&self) -> &'static Testimonial {
        &TESTIMONIALS[self.pages.active()]
    }

    pub fn next(&mut self) -> &'static Testimonial {
        self.pages.next();
        self.current()
    }

    pub fn prev(&mut self) -> &'static Testimonial {
        self.pages.prev();
        self.current()
    }

    pub fn go_to(&mut self, index: usize) -> &'static Testimonial {
        self.pages.go_to(index);
        self.current()
    }
}

/// Full-screen view of one gallery image. Any click on the overlay closes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lightbox {
    images: usize,
    open: Option<usize>,
}

impl Lightbox {
    pub fn new(images: usize) -> Self {
        Self { images, open: None }
    }

    pub fn showing(&self) -> Option<usize> {
        self.open
    }

    /// Returns false (and stays as it was) for an index outside the gallery.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.images {
            return false;
        }
        self.open = Some(index);
        true
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Package {
    pub id: &'static str,
    pub features: &'static [&'static str],
}

pub const PACKAGES: [Package; 3] = [
    Package {
        id: "intimate",
        features: &[
            "Dedicated wedding coordinator",
            "Ceremony timeline planning",
            "Hand-picked ceremony venue",
            "Basic venue styling with arch",
            "Fresh floral arrangements",
            "Bridal bouquet & boutonnière",
            "Professional photographer",
            "Basic sound system",
        ],
    },
    Package {
        id: "elegant",
        features: &[
            "Full planning support",
            "Ceremony, Reception & Pre-wedding",
            "Custom theme décor & lighting",
            "Airport transfers & transportation",
            "Hotel/villa selection",
            "Hair & makeup coordination",
            "Traditional dancers or live music",
            "Full-day photography & videography",
        ],
    },
    Package {
        id: "grand",
        features: &[
            "Senior wedding manager",
            "Multiple event coordinators",
            "Premium venues for all events",
            "Bespoke décor & floral installations",
            "4★/5★ hotels & luxury villas",
            "Luxury coaches & bridal car",
            "Multi-cuisine catering",
            "DJs, live bands & fireworks",
        ],
    },
];

pub fn package(id: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.id == id)
}

/// At most one package card shows its full feature list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackageExpansion {
    expanded: Option<&'static str>,
}

impl PackageExpansion {
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded == Some(id)
    }

    /// Expand `id`, collapsing whichever card was open; collapse it if it
    /// already was.
    pub fn toggle(&mut self, id: &'static str) {
        self.expanded = if self.is_expanded(id) { None } else { Some(id) };
    }

    pub fn visible_features(&self, id: &str, total: usize) -> usize {
        if self.is_expanded(id) {
            total
        } else {
            total.min(PACKAGE_FEATURE_PREVIEW)
        }
    }

    /// Cards with no hidden features get no toggle.
    pub fn has_toggle(total: usize) -> bool {
        total > PACKAGE_FEATURE_PREVIEW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pager_wraps_and_clamps() {
        let mut p = TestimonialPager::default();
        assert_eq!(p.prev().couple, "Emma & David");
        assert_eq!(p.next().couple, "Priya & James");
        assert_eq!(p.go_to(7).couple, "Emma & David");
        assert_eq!(p.active(), 2);
    }

    #[test]
    fn lightbox_ignores_unknown_images() {
        let mut lb = Lightbox::new(6);
        assert!(!lb.open(6));
        assert_eq!(lb.showing(), None);
        assert!(lb.open(3));
        assert_eq!(lb.showing(), Some(3));
        lb.close();
        assert_eq!(lb.showing(), None);
    }

    #[test]
    fn one_package_expanded_at_a_time() {
        let mut pe = PackageExpansion::default();
        assert_eq!(pe.visible_features("grand", 8), 5);
        pe.toggle("intimate");
        pe.toggle("grand");
        assert!(!pe.is_expanded("intimate"));
        assert_eq!(pe.visible_features("grand", 8), 8);
        pe.toggle("grand");
        assert_eq!(pe, PackageExpansion::default());
        assert!(!PackageExpansion::has_toggle(5));
        assert!(PackageExpansion::has_toggle(8));
    }

    #[test]
    fn every_package_has_hidden_features() {
        for p in &PACKAGES {
            assert!(PackageExpansion::has_toggle(p.features.len()), "{}", p.id);
        }
        assert_eq!(package("elegant").map(|p| p.features.len()), Some(8));
        assert!(package("budget").is_none());
    }
}
