use crate::constants::*;
use crate::dom;
use crate::input;
use crate::listener::{Listener, ListenerSet};
use eventtimes_core::constants::RAIL_SCRUB_SEC;
use eventtimes_core::rail::{Carousel, RailGeometry};
use eventtimes_core::scrub::ScrubFollower;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct DestinationRail {
    pub slot: web::HtmlElement,
    pub section: web::HtmlElement,
    track: web::HtmlElement,
    geometry: RailGeometry,
    follower: ScrubFollower,
}

impl DestinationRail {
    pub fn find(document: &web::Document) -> Option<Self> {
        let section = dom::html_by_id(document, RAIL_SECTION_ID)?;
        let track = dom::html_by_id(document, RAIL_TRACK_ID)?;
        let slot = section
            .parent_element()
            .and_then(|p| p.dyn_into::<web::HtmlElement>().ok())?;
        Some(Self {
            slot,
            section,
            track,
            geometry: RailGeometry::default(),
            follower: ScrubFollower::new(RAIL_SCRUB_SEC),
        })
    }

    /// Re-measure the track; its width follows the viewport.
    pub fn measure(&mut self, viewport_width: f64) -> RailGeometry {
        self.geometry = RailGeometry::new(self.track.scroll_width() as f64, viewport_width);
        log::info!(
            "[rail] content {:.0}px, viewport {:.0}px, pin distance {:.0}px",
            self.geometry.content_width,
            self.geometry.viewport_width,
            self.geometry.pin_distance()
        );
        self.geometry
    }

    pub fn apply(&mut self, progress: f32, dt_sec: f32) {
        let p = self.follower.step(progress, dt_sec);
        let x = self.geometry.translate_x(p);
        dom::set_style(&self.track, "transform", &format!("translate3d({:.2}px, 0, 0)", x));
    }

    pub fn reset(&mut self) {
        self.follower = ScrubFollower::new(RAIL_SCRUB_SEC);
        dom::set_style(&self.track, "transform", "");
    }
}

/// Manually paged variant with prev/next buttons and dot indicators.
pub struct PagedCarousel {
    state: Rc<RefCell<Carousel>>,
    track: web::HtmlElement,
    dots: Vec<web::Element>,
    listeners: ListenerSet,
}

impl PagedCarousel {
    pub fn find(document: &web::Document) -> Option<Self> {
        let track = dom::html_by_id(document, CAROUSEL_TRACK_ID)?;
        let slides = track.child_element_count() as usize;
        let mut dots = Vec::new();
        if let Ok(list) = document.query_selector_all(&format!(".{}", CAROUSEL_DOT_CLASS)) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                    dots.push(el);
                }
            }
        }
        Some(Self {
            state: Rc::new(RefCell::new(Carousel::new(slides))),
            track,
            dots,
            listeners: ListenerSet::default(),
        })
    }

    fn render(state: &Carousel, track: &web::HtmlElement, dots: &[web::Element]) {
        dom::set_style(
            track,
            "transform",
            &format!("translateX({:.0}%)", state.offset_percent()),
        );
        for (i, dot) in dots.iter().enumerate() {
            dom::toggle_class(dot, ACTIVE_CLASS, i == state.active());
        }
    }

    /// Wire the buttons and dots. Listeners drop with [`PagedCarousel::deactivate`].
    pub fn activate(&mut self, document: &web::Document) {
        if self.listeners.len() > 0 {
            return;
        }
        let wire = |id: &str, step: fn(&mut Carousel) -> usize| {
            let el = document.get_element_by_id(id)?;
            let state = self.state.clone();
            let track = self.track.clone();
            let dots = self.dots.clone();
            Some(Listener::new(&el, "click", move |_| {
                let mut s = state.borrow_mut();
                step(&mut s);
                Self::render(&s, &track, &dots);
            }))
        };
        let prev = wire(CAROUSEL_PREV_ID, Carousel::prev);
        let next = wire(CAROUSEL_NEXT_ID, Carousel::next);
        for l in [prev, next].into_iter().flatten() {
            self.listeners.push(l);
        }
        for dot in &self.dots {
            let state = self.state.clone();
            let track = self.track.clone();
            let dots = self.dots.clone();
            let index = input::parse_dot_index(dot.get_attribute("data-index").as_deref());
            self.listeners.push(Listener::new(dot, "click", move |_| {
                if let Some(i) = index {
                    let mut s = state.borrow_mut();
                    s.go_to(i);
                    Self::render(&s, &track, &dots);
                }
            }));
        }
        Self::render(&self.state.borrow(), &self.track, &self.dots);
        log::info!("[rail] paged carousel active ({} slides)", self.state.borrow().len());
    }

    pub fn deactivate(&mut self) {
        self.listeners.clear();
    }
}
