//! Collage content, top of the page first; z-index rises with each section.

use crate::geometry::Frame;
use crate::section::{Chips, CinematicSection, CollageImage, CollageSide, TextBlock};

const TALL_LEFT: Frame = Frame::new(6.0, 10.0, 44.0, Some(80.0));
const SHORT_LEFT: Frame = Frame::new(6.0, 10.0, 44.0, Some(62.0));
const TOP_RIGHT: Frame = Frame::new(52.0, 10.0, 42.0, Some(34.0));
const BOTTOM_RIGHT: Frame = Frame::new(52.0, 48.0, 42.0, Some(42.0));
const TOP_LEFT: Frame = Frame::new(6.0, 10.0, 44.0, Some(34.0));
const BOTTOM_LEFT: Frame = Frame::new(6.0, 48.0, 44.0, Some(42.0));
const TALL_RIGHT: Frame = Frame::new(52.0, 10.0, 42.0, Some(80.0));

const TEXT_LEFT_HIGH: Frame = Frame::new(8.0, 58.0, 40.0, None);
const TEXT_LEFT_LOW: Frame = Frame::new(8.0, 62.0, 40.0, None);
const TEXT_RIGHT: Frame = Frame::new(54.0, 62.0, 38.0, None);

const fn image(src: &'static str, alt: &'static str, frame: Frame) -> CollageImage {
    CollageImage { src, alt, frame }
}

pub static SECTIONS: &[CinematicSection] = &[
    CinematicSection {
        id: "signature",
        z_index: 40,
        side: CollageSide::MainLeft,
        images: [
            image("/ceremony_wide.jpg", "Wedding ceremony", SHORT_LEFT),
            image("/table_detail.jpg", "Table details", TOP_RIGHT),
            image("/hero_guests_candid.jpg", "Wedding guests", BOTTOM_RIGHT),
        ],
        text: TextBlock {
            heading: "Signature",
            accent: "celebrations",
            body: "From sunrise ceremonies to midnight toasts, every chapter designed around your story.",
            frame: TEXT_LEFT_HIGH,
        },
        chips: Chips::Row {
            labels: &["Ceremony", "Styling", "Reception"],
            frame: Frame::new(8.0, 78.0, 40.0, None),
        },
    },
    CinematicSection {
        id: "planning",
        z_index: 50,
        side: CollageSide::MainRight,
        images: [
            image("/venue_wide_right.jpg", "Wedding venue", TALL_RIGHT),
            image("/detail_rings_stationery.jpg", "Wedding details", TOP_LEFT),
            image("/couple_portrait_left.jpg", "Couple portrait", BOTTOM_LEFT),
        ],
        text: TextBlock {
            heading: "Seamless",
            accent: "planning",
            body: "Budgeting, timelines, vendor curation: handled quietly so the day feels effortless.",
            frame: TEXT_RIGHT,
        },
        chips: Chips::Inline(&["Timeline design", "Vendor curation", "On-the-day coordination"]),
    },
    CinematicSection {
        id: "vision",
        z_index: 60,
        side: CollageSide::MainLeft,
        images: [
            image("/couple_closeup.jpg", "Couple closeup", TALL_LEFT),
            image("/table_detail.jpg", "Table details", TOP_RIGHT),
            image("/reception_dancing.jpg", "Reception dancing", BOTTOM_RIGHT),
        ],
        text: TextBlock {
            heading: "Your vision,",
            accent: "our craft",
            body: "We translate personality into palettes, florals, and flowing timelines, cohesive from invitation to last dance.",
            frame: TEXT_LEFT_LOW,
        },
        chips: Chips::Row {
            labels: &["Palette", "Florals", "Paper"],
            frame: Frame::new(8.0, 84.0, 40.0, None),
        },
    },
    CinematicSection {
        id: "real-weddings",
        z_index: 90,
        side: CollageSide::MainLeft,
        images: [
            image("/couple_closeup.jpg", "Couple closeup", TALL_LEFT),
            image("/ceremony_wide.jpg", "Wedding ceremony", TOP_RIGHT),
            image("/hero_guests_candid.jpg", "Wedding guests", BOTTOM_RIGHT),
        ],
        text: TextBlock {
            heading: "Real",
            accent: "weddings",
            body: "Every couple writes a new atmosphere. See how we shape each setting into a story.",
            frame: TEXT_RIGHT,
        },
        chips: Chips::None,
    },
    CinematicSection {
        id: "heart",
        z_index: 100,
        side: CollageSide::MainLeft,
        images: [
            image("/hero_couple_main.jpg", "Wedding couple", TALL_LEFT),
            image("/hero_guests_candid.jpg", "Wedding guests", TOP_RIGHT),
            image("/detail_rings_stationery.jpg", "Wedding details", BOTTOM_RIGHT),
        ],
        text: TextBlock {
            heading: "Heart &",
            accent: "detail",
            body: "We notice the small things, so you can stay present for the big ones.",
            frame: TEXT_RIGHT,
        },
        chips: Chips::None,
    },
    CinematicSection {
        id: "vows",
        z_index: 110,
        side: CollageSide::MainLeft,
        images: [
            image("/ceremony_wide.jpg", "Wedding ceremony", SHORT_LEFT),
            image("/table_detail.jpg", "Table details", TOP_RIGHT),
            image("/reception_dancing.jpg", "Reception dancing", BOTTOM_RIGHT),
        ],
        text: TextBlock {
            heading: "From vows",
            accent: "to party",
            body: "One cohesive design language across every chapter: quiet elegance, then joyful energy.",
            frame: TEXT_LEFT_HIGH,
        },
        chips: Chips::Row {
            labels: &["Ceremony", "Dinner", "Dancing"],
            frame: Frame::new(8.0, 78.0, 40.0, None),
        },
    },
    CinematicSection {
        id: "team",
        z_index: 120,
        side: CollageSide::MainLeft,
        images: [
            image("/couple_portrait_left.jpg", "Couple portrait", TALL_LEFT),
            image("/team_planner.jpg", "Wedding planner", TOP_RIGHT),
            image("/venue_wide_right.jpg", "Wedding venue", BOTTOM_RIGHT),
        ],
        text: TextBlock {
            heading: "Curated",
            accent: "team",
            body: "Planners, stylists, and on-the-day leads, aligned to your vibe and your venue.",
            frame: TEXT_RIGHT,
        },
        chips: Chips::Row {
            labels: &["Planner", "Stylist", "Coordinator"],
            frame: Frame::new(54.0, 82.0, 38.0, None),
        },
    },
];

pub fn find(id: &str) -> Option<&'static CinematicSection> {
    SECTIONS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_ids_are_unique() {
        let mut ids: Vec<_> = SECTIONS.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SECTIONS.len());
    }

    #[test]
    fn z_order_rises_down_the_page() {
        for pair in SECTIONS.windows(2) {
            assert!(pair[0].z_index < pair[1].z_index, "{} / {}", pair[0].id, pair[1].id);
        }
    }

    #[test]
    fn page_slots_follow_the_catalog() {
        let page = include_str!("../../../index.html");
        let slots: Vec<_> = page
            .split("data-collage=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        let ids: Vec<_> = SECTIONS.iter().map(|s| s.id).collect();
        assert_eq!(slots, ids);
    }

    #[test]
    fn images_stay_inside_the_viewport() {
        for s in SECTIONS {
            for img in &s.images {
                let f = img.frame;
                assert!(f.left_vw + f.width_vw <= 100.0, "{} {}", s.id, img.src);
                assert!(f.top_vh + f.height_vh.unwrap_or(0.0) <= 100.0, "{} {}", s.id, img.src);
            }
        }
    }
}
