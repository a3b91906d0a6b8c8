// DOM contract and browser-side tuning.
//
// Element ids and classes the host page provides, plus timings that only
// matter on the web side. Choreography numbers live in the core crate.

// Particle layer
pub const PARTICLE_CANVAS_ID: &str = "particle-canvas";

// Pinned collage sections are mounted into `<div data-collage="{id}">` slots
pub const COLLAGE_SLOT_ATTR: &str = "data-collage";
pub const COLLAGE_CLASS: &str = "collage";

// Hero
pub const HERO_ID: &str = "hero";
pub const HERO_CONTENT_ID: &str = "hero-content";
pub const HERO_IMAGES_ID: &str = "hero-images";

// Flowing sections: children carrying this class rise in when the section enters
pub const REVEAL_ITEM_CLASS: &str = "reveal-item";

// Destination rail
pub const RAIL_SECTION_ID: &str = "destinations";
pub const RAIL_TRACK_ID: &str = "destinations-track";
pub const CAROUSEL_TRACK_ID: &str = "destinations-carousel";
pub const CAROUSEL_PREV_ID: &str = "carousel-prev";
pub const CAROUSEL_NEXT_ID: &str = "carousel-next";
pub const CAROUSEL_DOT_CLASS: &str = "carousel-dot";
pub const RAIL_LABEL: &str = "destinations-rail";

// Navigation
pub const NAV_ID: &str = "site-nav";
pub const NAV_LOGO_ID: &str = "nav-logo";
pub const NAV_MENU_TOGGLE_ID: &str = "nav-menu-toggle";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const SCROLL_TOP_ID: &str = "scroll-top";
pub const ANCHOR_LINK_ATTR: &str = "data-anchor";
pub const SCROLLED_CLASS: &str = "is-scrolled";
pub const VISIBLE_CLASS: &str = "is-visible";
pub const OPEN_CLASS: &str = "is-open";
pub const ACTIVE_CLASS: &str = "is-active";

// Testimonials
pub const TESTIMONIAL_QUOTE_ID: &str = "testimonial-quote";
pub const TESTIMONIAL_COUPLE_ID: &str = "testimonial-couple";
pub const TESTIMONIAL_LOCATION_ID: &str = "testimonial-location";
pub const TESTIMONIAL_IMAGE_ID: &str = "testimonial-image";
pub const TESTIMONIAL_PREV_ID: &str = "testimonial-prev";
pub const TESTIMONIAL_NEXT_ID: &str = "testimonial-next";
pub const TESTIMONIAL_DOT_CLASS: &str = "testimonial-dot";

// Gallery
pub const GALLERY_ITEM_CLASS: &str = "gallery-item";
pub const LIGHTBOX_ID: &str = "lightbox";
pub const LIGHTBOX_IMAGE_ID: &str = "lightbox-image";

// Packages: `<article class="package-card" data-package="{id}">`
pub const PACKAGE_ATTR: &str = "data-package";
pub const PACKAGE_FEATURES_CLASS: &str = "package-features";
pub const PACKAGE_TOGGLE_CLASS: &str = "package-toggle";

// Footer
pub const FOOTER_BRAND_ID: &str = "footer-brand";
pub const FOOTER_YEAR_ID: &str = "footer-year";

// Contact form
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_CONFIRMATION_ID: &str = "contact-confirmation";
pub const CONTACT_ERROR_ID: &str = "contact-error";
pub const CONTACT_SUBMIT_ID: &str = "contact-submit";
pub const HIDDEN_CLASS: &str = "is-hidden";
pub const RELAY_ENDPOINT: &str = "https://formsubmit.co/ajax/hello@theeventtimes.studio";

// Breakpoint media query (kept in sync with DESKTOP_MIN_WIDTH_PX)
pub const DESKTOP_MEDIA_QUERY: &str = "(min-width: 1024px)";

// Longest frame step fed to the followers; covers tab switches
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Seed mixed with the page load time for the particle field
pub const PARTICLE_SEED_SALT: u64 = 0x5eed_0f_e7e7;
