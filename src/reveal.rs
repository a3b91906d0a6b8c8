use crate::constants::REVEAL_ITEM_CLASS;
use crate::dom;
use eventtimes_core::reveal::{RevealTrigger, REVEALS};
use web_sys as web;

struct RevealSection {
    section: web::HtmlElement,
    items: Vec<web::HtmlElement>,
    trigger: RevealTrigger,
}

impl RevealSection {
    fn apply(&self) {
        for (i, el) in self.items.iter().enumerate() {
            let (opacity, y) = self.trigger.sample(i);
            dom::set_style(el, "opacity", &format!("{:.3}", opacity));
            dom::set_style(el, "transform", &format!("translate3d(0, {:.1}px, 0)", y));
        }
    }
}

/// Shared entrance for every free-flowing section.
#[derive(Default)]
pub struct Reveals {
    sections: Vec<RevealSection>,
}

impl Reveals {
    pub fn find(document: &web::Document) -> Self {
        let mut sections = Vec::new();
        for timing in &REVEALS {
            let Some(section) = dom::html_by_id(document, timing.section) else {
                log::warn!("[reveal] no section '#{}'", timing.section);
                continue;
            };
            let items = dom::html_in(&section, &format!(".{}", REVEAL_ITEM_CLASS));
            if items.is_empty() {
                continue;
            }
            let s = RevealSection {
                trigger: RevealTrigger::new(*timing, items.len()),
                section,
                items,
            };
            s.apply();
            sections.push(s);
        }
        log::info!("[reveal] {} sections", sections.len());
        Self { sections }
    }

    pub fn on_scroll(&mut self) {
        let height = dom::viewport().height;
        for s in &mut self.sections {
            let top = s.section.get_bounding_client_rect().top();
            s.trigger.on_scroll(top, height);
        }
    }

    pub fn frame(&mut self, dt_sec: f32) {
        for s in self.sections.iter_mut().filter(|s| s.trigger.is_moving()) {
            s.trigger.step(dt_sec);
            s.apply();
        }
    }
}
