// Host-side tests for the DOM contract constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use eventtimes_core::constants::DESKTOP_MIN_WIDTH_PX;
use eventtimes_core::nav::ANCHORS;

#[test]
fn media_query_matches_core_breakpoint() {
    assert_eq!(
        DESKTOP_MEDIA_QUERY,
        format!("(min-width: {}px)", DESKTOP_MIN_WIDTH_PX as u32)
    );
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        PARTICLE_CANVAS_ID,
        HERO_ID,
        HERO_CONTENT_ID,
        RAIL_SECTION_ID,
        RAIL_TRACK_ID,
        CAROUSEL_TRACK_ID,
        CAROUSEL_PREV_ID,
        CAROUSEL_NEXT_ID,
        NAV_ID,
        NAV_LOGO_ID,
        NAV_MENU_TOGGLE_ID,
        NAV_MENU_ID,
        SCROLL_TOP_ID,
        CONTACT_FORM_ID,
        CONTACT_CONFIRMATION_ID,
        CONTACT_ERROR_ID,
        CONTACT_SUBMIT_ID,
    ];
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}

#[test]
fn rail_section_is_a_nav_anchor() {
    assert!(ANCHORS.iter().any(|a| a.id == RAIL_SECTION_ID));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn relay_endpoint_is_https_ajax() {
    assert!(RELAY_ENDPOINT.starts_with("https://"));
    assert!(RELAY_ENDPOINT.contains("/ajax/"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_step_cap_is_sane() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
}
