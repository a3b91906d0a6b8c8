#![cfg(target_arch = "wasm32")]

use eventtimes_core::catalog;
use eventtimes_web::collage;
use eventtimes_web::constants::{COLLAGE_SLOT_ATTR, HIDDEN_CLASS, LIGHTBOX_ID, PACKAGE_ATTR};
use eventtimes_web::listener::Listener;
use eventtimes_web::showcase;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append_div(attr: Option<(&str, &str)>) -> web_sys::HtmlElement {
    let doc = document();
    let el = doc
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    if let Some((k, v)) = attr {
        el.set_attribute(k, v).unwrap();
    }
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn dropped_listener_stops_firing() {
    let el = append_div(None);
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let listener = Listener::new(&el, "click", move |_| counter.set(counter.get() + 1)).unwrap();
    el.click();
    assert_eq!(clicks.get(), 1);
    drop(listener);
    el.click();
    assert_eq!(clicks.get(), 1);
    el.remove();
}

#[wasm_bindgen_test]
fn collage_mounts_into_its_slot() {
    let entry = catalog::find("vision").unwrap();
    let slot = append_div(Some((COLLAGE_SLOT_ATTR, entry.id)));
    let mounted = collage::mount(&document(), entry).expect("mounted");
    assert_eq!(mounted.id(), "vision");
    assert_eq!(slot.child_element_count(), 1);
    assert_eq!(mounted.bound.handles().len(), entry.timeline().targets());
    mounted.reset();
    slot.remove();
}

#[wasm_bindgen_test]
fn collage_without_slot_is_skipped() {
    let entry = catalog::find("signature").unwrap();
    assert!(collage::mount(&document(), entry).is_none());
}

fn html(el: Option<web_sys::Element>) -> web_sys::HtmlElement {
    el.unwrap().dyn_into::<web_sys::HtmlElement>().unwrap()
}

#[wasm_bindgen_test]
fn package_card_expands_past_the_preview() {
    let card = append_div(Some((PACKAGE_ATTR, "grand")));
    card.set_inner_html(r#"<ul class="package-features"></ul><button class="package-toggle"></button>"#);
    let cards = showcase::PackageCards::attach(&document()).expect("cards");
    assert_eq!(card.query_selector_all("li").unwrap().length(), 8);
    assert_eq!(card.query_selector_all("li.is-hidden").unwrap().length(), 3);

    let toggle = html(card.query_selector(".package-toggle").unwrap());
    assert_eq!(toggle.text_content().as_deref(), Some("Show more"));
    toggle.click();
    assert_eq!(card.query_selector_all("li.is-hidden").unwrap().length(), 0);
    assert_eq!(toggle.text_content().as_deref(), Some("Show less"));
    toggle.click();
    assert_eq!(card.query_selector_all("li.is-hidden").unwrap().length(), 3);
    drop(cards);
    card.remove();
}

#[wasm_bindgen_test]
fn lightbox_opens_on_tile_and_closes_on_overlay() {
    let wrap = append_div(None);
    wrap.set_inner_html(
        r#"<figure class="gallery-item"><img src="/tile.jpg" alt="Tile"></figure>
           <div id="lightbox" class="is-hidden"><img id="lightbox-image"></div>"#,
    );
    let lightbox = showcase::GalleryLightbox::attach(&document()).expect("lightbox");
    let overlay = html(document().get_element_by_id(LIGHTBOX_ID));

    html(wrap.query_selector(".gallery-item").unwrap()).click();
    assert!(!overlay.class_list().contains(HIDDEN_CLASS));
    let shown = document()
        .get_element_by_id("lightbox-image")
        .unwrap()
        .dyn_into::<web_sys::HtmlImageElement>()
        .unwrap();
    assert!(shown.src().ends_with("/tile.jpg"));

    overlay.click();
    assert!(overlay.class_list().contains(HIDDEN_CLASS));
    drop(lightbox);
    wrap.remove();
}
