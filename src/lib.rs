#![cfg(target_arch = "wasm32")]
use crate::choreography::Stage;
use crate::constants::*;
use crate::listener::{Listener, ListenerSet};
use crate::media::BreakpointWatcher;
use crate::rail::{DestinationRail, PagedCarousel};
use crate::reveal::Reveals;
use crate::showcase::{GalleryLightbox, PackageCards, Testimonials};
use eventtimes_core::catalog;
use eventtimes_core::constants::MAX_DEVICE_PIXEL_RATIO;
use eventtimes_core::particles::{FieldParams, ParticleField};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod choreography;
pub mod collage;
pub mod constants;
mod contact;
pub mod dom;
mod frame;
mod hero;
mod input;
pub mod listener;
mod media;
mod nav;
mod rail;
mod render;
mod reveal;
pub mod showcase;

/// Listeners that live as long as the page.
struct PageWiring {
    _listeners: ListenerSet,
    _breakpoint: Option<BreakpointWatcher>,
    _testimonials: Option<Testimonials>,
    _gallery: Option<GalleryLightbox>,
    _packages: Option<PackageCards>,
}

/// Each collage reports ready once its main image has loaded (or failed to).
fn wire_readiness(stage: &Rc<RefCell<Stage>>) {
    let pending = stage.borrow().pending_images();
    let mut listeners = ListenerSet::default();
    for (label, img) in pending {
        for event in ["load", "error"] {
            let stage = stage.clone();
            listeners.push(Listener::new(&img, event, move |_| {
                stage.borrow_mut().report_ready(label);
            }));
        }
    }
    log::info!("[collage] waiting on {} images", listeners.len() / 2);
    stage.borrow_mut().readiness = listeners;
}

fn apply_layout(
    stage: &Rc<RefCell<Stage>>,
    carousel: &Rc<RefCell<Option<PagedCarousel>>>,
    desktop: bool,
) {
    log::info!("[layout] {}", if desktop { "desktop" } else { "compact" });
    let mut carousel = carousel.borrow_mut();
    if desktop {
        if let Some(c) = carousel.as_mut() {
            c.deactivate();
        }
        stage.borrow_mut().activate_desktop();
    } else {
        stage.borrow_mut().deactivate();
        if let (Some(c), Some(document)) = (carousel.as_mut(), dom::window_document()) {
            c.activate(&document);
        }
    }
}

fn wire_page(
    window: &web::Window,
    stage: &Rc<RefCell<Stage>>,
    nav: &Rc<nav::NavBar>,
    reveals: &Rc<RefCell<Reveals>>,
    pointer: &Rc<RefCell<input::PointerState>>,
    canvas: Option<web::HtmlCanvasElement>,
) -> ListenerSet {
    let mut listeners = ListenerSet::default();
    {
        let stage = stage.clone();
        let nav = nav.clone();
        let reveals = reveals.clone();
        listeners.push(Listener::passive(window, "scroll", move |_| {
            let y = dom::scroll_y();
            stage.borrow_mut().on_scroll_event(Instant::now(), y);
            nav.on_scroll(y);
            reveals.borrow_mut().on_scroll();
        }));
    }
    {
        let stage = stage.clone();
        let reveals = reveals.clone();
        listeners.push(Listener::passive(window, "resize", move |_| {
            if let Some(c) = &canvas {
                dom::sync_canvas_backing_size(c, MAX_DEVICE_PIXEL_RATIO);
            }
            stage.borrow_mut().on_resize(Instant::now());
            reveals.borrow_mut().on_scroll();
        }));
    }
    {
        let pointer = pointer.clone();
        listeners.push(Listener::passive(window, "pointermove", move |ev| {
            if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
                let mut p = pointer.borrow_mut();
                p.x = m.client_x() as f32;
                p.y = m.client_y() as f32;
                p.seen = true;
            }
        }));
    }
    for event in ["wheel", "touchstart", "touchmove", "keydown"] {
        let stage = stage.clone();
        listeners.push(Listener::passive(window, event, move |ev| {
            if input::is_user_scroll_event(&ev.type_()) {
                stage.borrow_mut().on_user_input(Instant::now());
            }
        }));
    }
    listeners
}

fn particle_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    let canvas = document
        .get_element_by_id(PARTICLE_CANVAS_ID)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    dom::sync_canvas_backing_size(&canvas, MAX_DEVICE_PIXEL_RATIO);
    Some(canvas)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("eventtimes-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let collages: Vec<_> = catalog::SECTIONS
        .iter()
        .filter_map(|section| collage::mount(&document, section))
        .collect();
    log::info!("[collage] {}/{} sections mounted", collages.len(), catalog::SECTIONS.len());
    let stage = Rc::new(RefCell::new(Stage::new(
        collages,
        DestinationRail::find(&document),
    )));
    wire_readiness(&stage);

    let carousel = Rc::new(RefCell::new(PagedCarousel::find(&document)));
    let breakpoint = {
        let stage = stage.clone();
        let carousel = carousel.clone();
        BreakpointWatcher::new(DESKTOP_MEDIA_QUERY, move |desktop| {
            apply_layout(&stage, &carousel, desktop)
        })
    };
    let breakpoint = match breakpoint {
        Ok(b) => {
            apply_layout(&stage, &carousel, b.matches());
            Some(b)
        }
        Err(e) => {
            log::warn!("[layout] breakpoint watcher unavailable: {:?}", e);
            apply_layout(&stage, &carousel, dom::viewport().is_desktop());
            None
        }
    };

    let guide: Rc<dyn Fn()> = {
        let stage = stage.clone();
        Rc::new(move || stage.borrow_mut().on_guided_scroll(Instant::now()))
    };
    let nav = Rc::new(nav::NavBar::attach(&document, guide));
    nav.on_scroll(dom::scroll_y());
    let contact = contact::ContactForm::attach(&document);
    if contact.is_none() {
        log::warn!("[inquiry] no contact form on this page");
    }
    if let Some(year) = dom::html_by_id(&document, FOOTER_YEAR_ID) {
        year.set_text_content(Some(&js_sys::Date::new_0().get_full_year().to_string()));
    }

    let reveals = Rc::new(RefCell::new(Reveals::find(&document)));
    reveals.borrow_mut().on_scroll();
    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    let canvas = particle_canvas(&document);
    let listeners = wire_page(&window, &stage, &nav, &reveals, &pointer, canvas.clone());
    // page-lifetime listeners
    Box::leak(Box::new(PageWiring {
        _listeners: listeners,
        _breakpoint: breakpoint,
        _testimonials: Testimonials::attach(&document),
        _gallery: GalleryLightbox::attach(&document),
        _packages: PackageCards::attach(&document),
    }));

    let seed = (js_sys::Date::now() as u64) ^ PARTICLE_SEED_SALT;
    let field = ParticleField::new(FieldParams::default(), &mut StdRng::seed_from_u64(seed));
    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        stage,
        nav,
        hero: hero::Hero::find(&document),
        reveals,
        contact,
        field,
        pointer,
        canvas: canvas.clone(),
        gpu: None,
        start: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx.clone());

    // The page never waits on the particle layer.
    if let Some(canvas) = canvas {
        spawn_local(async move {
            match frame::init_gpu(&canvas).await {
                Some(gpu) => frame_ctx.borrow_mut().gpu = Some(gpu),
                None => dom::set_style(&canvas, "display", "none"),
            }
        });
    }
    Ok(())
}
