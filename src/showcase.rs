use crate::constants::*;
use crate::dom;
use crate::input;
use crate::listener::{Listener, ListenerSet};
use eventtimes_core::showcase::{package, Lightbox, Package, PackageExpansion, TestimonialPager};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn image_by_id(document: &web::Document, id: &str) -> Option<web::HtmlImageElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
}

struct TestimonialView {
    quote: web::HtmlElement,
    couple: Option<web::HtmlElement>,
    location: Option<web::HtmlElement>,
    image: Option<web::HtmlImageElement>,
    dots: Vec<web::HtmlElement>,
}

impl TestimonialView {
    fn render(&self, pager: &TestimonialPager) {
        let t = pager.current();
        self.quote.set_text_content(Some(&format!("\u{201c}{}\u{201d}", t.quote)));
        if let Some(el) = &self.couple {
            el.set_text_content(Some(t.couple));
        }
        if let Some(el) = &self.location {
            el.set_text_content(Some(t.location));
        }
        if let Some(img) = &self.image {
            img.set_src(t.image);
            img.set_alt(t.couple);
        }
        for (i, dot) in self.dots.iter().enumerate() {
            dom::toggle_class(dot, ACTIVE_CLASS, i == pager.active());
        }
    }
}

pub struct Testimonials {
    _listeners: ListenerSet,
}

impl Testimonials {
    pub fn attach(document: &web::Document) -> Option<Self> {
        let root = document.document_element()?;
        let view = Rc::new(TestimonialView {
            quote: dom::html_by_id(document, TESTIMONIAL_QUOTE_ID)?,
            couple: dom::html_by_id(document, TESTIMONIAL_COUPLE_ID),
            location: dom::html_by_id(document, TESTIMONIAL_LOCATION_ID),
            image: image_by_id(document, TESTIMONIAL_IMAGE_ID),
            dots: dom::html_in(&root, &format!(".{}", TESTIMONIAL_DOT_CLASS)),
        });
        let pager = Rc::new(RefCell::new(TestimonialPager::default()));
        let mut listeners = ListenerSet::default();

        let step_buttons: [(&str, fn(&mut TestimonialPager)); 2] = [
            (TESTIMONIAL_PREV_ID, |p| {
                p.prev();
            }),
            (TESTIMONIAL_NEXT_ID, |p| {
                p.next();
            }),
        ];
        for (id, step) in step_buttons {
            let Some(button) = document.get_element_by_id(id) else {
                continue;
            };
            let pager = pager.clone();
            let view = view.clone();
            listeners.push(Listener::new(&button, "click", move |_| {
                let mut p = pager.borrow_mut();
                step(&mut p);
                view.render(&p);
            }));
        }
        for dot in &view.dots {
            let Some(index) = input::parse_dot_index(dot.get_attribute("data-index").as_deref()) else {
                continue;
            };
            let pager = pager.clone();
            let v = view.clone();
            listeners.push(Listener::new(dot, "click", move |_| {
                let mut p = pager.borrow_mut();
                p.go_to(index);
                v.render(&p);
            }));
        }
        view.render(&pager.borrow());
        Some(Self {
            _listeners: listeners,
        })
    }
}

/// Click a gallery tile to see it full screen; click anywhere to close.
pub struct GalleryLightbox {
    _listeners: ListenerSet,
}

impl GalleryLightbox {
    pub fn attach(document: &web::Document) -> Option<Self> {
        let root = document.document_element()?;
        let overlay = dom::html_by_id(document, LIGHTBOX_ID)?;
        let image = image_by_id(document, LIGHTBOX_IMAGE_ID)?;
        let items = dom::html_in(&root, &format!(".{}", GALLERY_ITEM_CLASS));
        let state = Rc::new(RefCell::new(Lightbox::new(items.len())));
        let mut listeners = ListenerSet::default();

        for (i, item) in items.iter().enumerate() {
            let Some(thumb) = item
                .query_selector("img")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
            else {
                continue;
            };
            let state = state.clone();
            let overlay = overlay.clone();
            let image = image.clone();
            listeners.push(Listener::new(item, "click", move |_| {
                if state.borrow_mut().open(i) {
                    image.set_src(&thumb.src());
                    image.set_alt(&thumb.alt());
                    dom::toggle_class(&overlay, HIDDEN_CLASS, false);
                }
            }));
        }
        {
            let target = overlay.clone();
            listeners.push(Listener::new(&target, "click", move |_| {
                state.borrow_mut().close();
                dom::toggle_class(&overlay, HIDDEN_CLASS, true);
            }));
        }
        log::info!("[gallery] {} tiles", items.len());
        Some(Self {
            _listeners: listeners,
        })
    }
}

struct PackageCard {
    package: &'static Package,
    features: Vec<web::HtmlElement>,
    toggle: Option<web::HtmlElement>,
}

fn render_packages(state: &PackageExpansion, cards: &[PackageCard]) {
    for card in cards {
        let visible = state.visible_features(card.package.id, card.features.len());
        for (i, li) in card.features.iter().enumerate() {
            dom::toggle_class(li, HIDDEN_CLASS, i >= visible);
        }
        if let Some(toggle) = &card.toggle {
            let label = if state.is_expanded(card.package.id) {
                "Show less"
            } else {
                "Show more"
            };
            toggle.set_text_content(Some(label));
            dom::toggle_class(
                toggle,
                HIDDEN_CLASS,
                !PackageExpansion::has_toggle(card.features.len()),
            );
        }
    }
}

/// Package cards: feature lists built from data, one card expanded at a time.
pub struct PackageCards {
    _listeners: ListenerSet,
}

impl PackageCards {
    fn mount(document: &web::Document, el: &web::HtmlElement) -> Option<PackageCard> {
        let id = el.get_attribute(PACKAGE_ATTR)?;
        let Some(package) = package(&id) else {
            log::warn!("[packages] unknown package '{}'", id);
            return None;
        };
        let list = dom::html_in(el, &format!(".{}", PACKAGE_FEATURES_CLASS))
            .into_iter()
            .next()?;
        list.set_inner_html("");
        let mut features = Vec::with_capacity(package.features.len());
        for text in package.features {
            let Ok(li) = dom::create_html(document, "li", "package-feature") else {
                continue;
            };
            li.set_text_content(Some(*text));
            if list.append_child(&li).is_ok() {
                features.push(li);
            }
        }
        let toggle = dom::html_in(el, &format!(".{}", PACKAGE_TOGGLE_CLASS))
            .into_iter()
            .next();
        Some(PackageCard {
            package,
            features,
            toggle,
        })
    }

    pub fn attach(document: &web::Document) -> Option<Self> {
        let root = document.document_element()?;
        let cards: Vec<_> = dom::html_in(&root, &format!("[{}]", PACKAGE_ATTR))
            .iter()
            .filter_map(|el| Self::mount(document, el))
            .collect();
        if cards.is_empty() {
            return None;
        }
        let cards = Rc::new(cards);
        let state = Rc::new(RefCell::new(PackageExpansion::default()));
        let mut listeners = ListenerSet::default();
        for card in cards.iter() {
            let Some(toggle) = &card.toggle else {
                continue;
            };
            let id = card.package.id;
            let state = state.clone();
            let all = cards.clone();
            listeners.push(Listener::new(toggle, "click", move |_| {
                let mut s = state.borrow_mut();
                s.toggle(id);
                render_packages(&s, &all);
            }));
        }
        render_packages(&state.borrow(), &cards);
        log::info!("[packages] {} cards", cards.len());
        Some(Self {
            _listeners: listeners,
        })
    }
}
