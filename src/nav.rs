use crate::constants::*;
use crate::dom;
use crate::listener::{Listener, ListenerSet};
use eventtimes_core::hero::NAV_INTRO;
use eventtimes_core::nav::{anchor, NavState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct NavView {
    bar: Option<web::HtmlElement>,
    scroll_top: Option<web::HtmlElement>,
    menu: Option<web::HtmlElement>,
    toggle: Option<web::HtmlElement>,
}

impl NavView {
    fn render_scroll(&self, state: &NavState) {
        if let Some(bar) = &self.bar {
            dom::toggle_class(bar, SCROLLED_CLASS, state.scrolled);
        }
        if let Some(button) = &self.scroll_top {
            dom::toggle_class(button, VISIBLE_CLASS, state.show_scroll_top);
        }
    }

    fn render_menu(&self, state: &NavState) {
        for el in [&self.menu, &self.toggle].into_iter().flatten() {
            dom::toggle_class(el, OPEN_CLASS, state.menu_open);
        }
    }
}

/// Fixed navigation bar, mobile menu and scroll-to-top button.
pub struct NavBar {
    state: Rc<RefCell<NavState>>,
    view: Rc<NavView>,
    intro_done: Cell<bool>,
    _listeners: ListenerSet,
}

impl NavBar {
    /// `guide` runs right before every smooth scroll the bar starts.
    pub fn attach(document: &web::Document, guide: Rc<dyn Fn()>) -> Self {
        let view = Rc::new(NavView {
            bar: dom::html_by_id(document, NAV_ID),
            scroll_top: dom::html_by_id(document, SCROLL_TOP_ID),
            menu: dom::html_by_id(document, NAV_MENU_ID),
            toggle: dom::html_by_id(document, NAV_MENU_TOGGLE_ID),
        });
        let state = Rc::new(RefCell::new(NavState::default()));
        let mut listeners = ListenerSet::default();

        for id in [NAV_LOGO_ID, SCROLL_TOP_ID, FOOTER_BRAND_ID] {
            if let Some(el) = document.get_element_by_id(id) {
                let guide = guide.clone();
                listeners.push(Listener::new(&el, "click", move |ev| {
                    ev.prevent_default();
                    guide();
                    dom::scroll_to(0.0, true);
                }));
            }
        }

        if let Some(toggle) = &view.toggle {
            let state = state.clone();
            let v = view.clone();
            listeners.push(Listener::new(toggle, "click", move |_| {
                let mut s = state.borrow_mut();
                s.toggle_menu();
                v.render_menu(&s);
            }));
        }

        if let Ok(links) = document.query_selector_all(&format!("[{}]", ANCHOR_LINK_ATTR)) {
            for i in 0..links.length() {
                let Some(link) = links.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
                    continue;
                };
                let Some(target) = link.get_attribute(ANCHOR_LINK_ATTR) else {
                    continue;
                };
                if anchor(&target).is_none() {
                    log::warn!("[nav] link to unknown anchor '#{}'", target);
                }
                let state = state.clone();
                let v = view.clone();
                let guide = guide.clone();
                listeners.push(Listener::new(&link, "click", move |ev| {
                    ev.prevent_default();
                    if let Some(el) = dom::window_document().and_then(|d| d.get_element_by_id(&target)) {
                        guide();
                        dom::scroll_into_view(&el);
                    }
                    let mut s = state.borrow_mut();
                    s.follow_link();
                    v.render_menu(&s);
                }));
            }
        }

        log::info!("[nav] wired {} listeners", listeners.len());
        Self {
            state,
            view,
            intro_done: Cell::new(false),
            _listeners: listeners,
        }
    }

    /// Slide the bar down on first load.
    pub fn intro(&self, elapsed_sec: f32) {
        if self.intro_done.get() {
            return;
        }
        let Some(bar) = &self.view.bar else {
            return;
        };
        if NAV_INTRO.is_done(1, elapsed_sec) {
            self.intro_done.set(true);
            dom::set_style(bar, "transform", "");
            dom::set_style(bar, "opacity", "");
            return;
        }
        let pose = NAV_INTRO.sample(0, elapsed_sec);
        dom::set_style(bar, "transform", &format!("translate3d(0, {:.1}px, 0)", pose.y_px));
        dom::set_style(bar, "opacity", &format!("{:.3}", pose.opacity));
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        let mut state = self.state.borrow_mut();
        if state.on_scroll(scroll_y) {
            self.view.render_scroll(&state);
        }
    }
}
