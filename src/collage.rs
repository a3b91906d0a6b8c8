use crate::constants::*;
use crate::dom;
use eventtimes_core::section::{Chips, CollageImage, TextBlock};
use eventtimes_core::{BoundSection, CinematicSection, SectionHandles};
use wasm_bindgen::JsCast;
use web_sys as web;

/// A collage in the page: the spacer slot that reserves pin distance, the
/// section box that gets held in place, and its bound timeline.
pub struct MountedCollage {
    pub slot: web::HtmlElement,
    pub section: web::HtmlElement,
    pub bound: BoundSection<web::HtmlElement>,
    /// Main image; its load marks the section's geometry as settled.
    pub main_image: web::HtmlImageElement,
}

fn slot_for(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(&format!("[{}=\"{}\"]", COLLAGE_SLOT_ATTR, id))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

fn build_image(
    document: &web::Document,
    image: &CollageImage,
    class: &str,
) -> Option<(web::HtmlElement, web::HtmlImageElement)> {
    let figure = dom::create_html(document, "figure", class).ok()?;
    figure.set_attribute("style", &image.frame.css()).ok()?;
    let img = document
        .create_element("img")
        .ok()?
        .dyn_into::<web::HtmlImageElement>()
        .ok()?;
    img.set_src(image.src);
    img.set_alt(image.alt);
    figure.append_child(&img).ok()?;
    Some((figure, img))
}

fn build_text(document: &web::Document, text: &TextBlock, chips: Chips) -> Option<web::HtmlElement> {
    let block = dom::create_html(document, "div", "collage-text").ok()?;
    block.set_attribute("style", &text.frame.css()).ok()?;

    let heading = dom::create_html(document, "h2", "collage-heading").ok()?;
    heading.set_text_content(Some(&format!("{} ", text.heading)));
    let accent = dom::create_html(document, "em", "accent").ok()?;
    accent.set_text_content(Some(text.accent));
    heading.append_child(&accent).ok()?;
    block.append_child(&heading).ok()?;

    let body = dom::create_html(document, "p", "collage-body").ok()?;
    body.set_text_content(Some(text.body));
    block.append_child(&body).ok()?;

    if let Chips::Inline(labels) = chips {
        let row = dom::create_html(document, "div", "chip-inline").ok()?;
        for label in labels {
            let chip = dom::create_html(document, "span", "chip").ok()?;
            chip.set_text_content(Some(*label));
            row.append_child(&chip).ok()?;
        }
        block.append_child(&row).ok()?;
    }
    Some(block)
}

fn build_chip_row(
    document: &web::Document,
    labels: &[&str],
    frame_css: &str,
) -> Option<(web::HtmlElement, Vec<web::HtmlElement>)> {
    let row = dom::create_html(document, "div", "chip-row").ok()?;
    row.set_attribute("style", frame_css).ok()?;
    let mut chips = Vec::with_capacity(labels.len());
    for label in labels {
        let chip = dom::create_html(document, "span", "chip").ok()?;
        chip.set_text_content(Some(*label));
        row.append_child(&chip).ok()?;
        chips.push(chip);
    }
    Some((row, chips))
}

/// Build one collage inside its slot. `None` when the section must be skipped.
pub fn mount(document: &web::Document, entry: &CinematicSection) -> Option<MountedCollage> {
    let Some(slot) = slot_for(document, entry.id) else {
        log::warn!("[collage] no slot for '{}'; skipping", entry.id);
        return None;
    };
    let section = match dom::create_html(document, "section", COLLAGE_CLASS) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[collage] '{}': {:?}", entry.id, e);
            return None;
        }
    };
    dom::set_style(&section, "z-index", &entry.z_index.to_string());

    let [main, top, bottom] = &entry.images;
    let main = build_image(document, main, "collage-image collage-main");
    let top = build_image(document, top, "collage-image collage-stack-top");
    let bottom = build_image(document, bottom, "collage-image collage-stack-bottom");
    let text = build_text(document, &entry.text, entry.chips);
    let row = match entry.chips {
        Chips::Row { labels, frame } => build_chip_row(document, labels, &frame.css()),
        _ => None,
    };

    let main_image = main.as_ref().map(|(_, img)| img.clone());
    let (chip_row, chips) = match row {
        Some((row, chips)) => (Some(row), chips),
        None => (None, Vec::new()),
    };
    let handles = SectionHandles {
        main: main.map(|(fig, _)| fig),
        stack_top: top.map(|(fig, _)| fig),
        stack_bottom: bottom.map(|(fig, _)| fig),
        text,
        chip_row,
        chips,
    };
    // Attach before binding consumes the handles.
    for el in [&handles.main, &handles.stack_top, &handles.stack_bottom, &handles.text, &handles.chip_row]
        .into_iter()
        .flatten()
    {
        _ = section.append_child(el);
    }

    let bound = match handles.bind(entry) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("[collage] '{}' not animated: {}", entry.id, e);
            return None;
        }
    };
    let main_image = main_image?;
    slot.set_inner_html("");
    if slot.append_child(&section).is_err() {
        return None;
    }
    log::info!("[collage] mounted '{}' ({} handles)", entry.id, bound.handles().len());
    Some(MountedCollage {
        slot,
        section,
        bound,
        main_image,
    })
}

impl MountedCollage {
    pub fn id(&self) -> &'static str {
        self.bound.id
    }

    /// Drop every inline pose so the static layout shows through.
    pub fn reset(&self) {
        for el in self.bound.handles() {
            dom::set_style(el, "transform", "");
            dom::set_style(el, "opacity", "");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.main_image.complete()
    }
}
