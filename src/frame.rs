use crate::choreography::Stage;
use crate::constants::*;
use crate::contact::ContactForm;
use crate::dom;
use crate::hero::Hero;
use crate::input::{self, PointerState};
use crate::nav::NavBar;
use crate::render;
use crate::reveal::Reveals;
use eventtimes_core::constants::{ORB_COUNT, PARTICLE_COUNT};
use eventtimes_core::particles::ParticleField;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub stage: Rc<RefCell<Stage>>,
    pub nav: Rc<NavBar>,
    pub hero: Option<Hero>,
    pub reveals: Rc<RefCell<Reveals>>,
    pub contact: Option<ContactForm>,

    pub field: ParticleField,
    pub pointer: Rc<RefCell<PointerState>>,
    pub canvas: Option<web::HtmlCanvasElement>,
    pub gpu: Option<render::GpuState<'a>>,

    pub start: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let elapsed_sec = (now - self.start).as_secs_f32();

        self.stage.borrow_mut().frame(now, dt_sec);
        self.nav.intro(elapsed_sec);
        if let Some(hero) = &mut self.hero {
            let desktop = self.stage.borrow().is_desktop();
            hero.frame(elapsed_sec, dt_sec, &self.pointer.borrow(), desktop);
        }
        self.reveals.borrow_mut().frame(dt_sec);
        if let Some(contact) = &self.contact {
            contact.tick(now);
        }

        let (Some(gpu), Some(canvas)) = (&mut self.gpu, &self.canvas) else {
            return;
        };
        let viewport = dom::viewport();
        let ndc = input::pointer_ndc(
            &self.pointer.borrow(),
            viewport.width as f32,
            viewport.height as f32,
        );
        self.field.set_pointer(ndc);
        self.field.step(elapsed_sec);

        gpu.resize_if_needed(canvas.width(), canvas.height());
        match gpu.render(&self.field) {
            Ok(()) => {}
            // reconfigured on the next resize check
            Err(wgpu::SurfaceError::Outdated) | Err(wgpu::SurfaceError::Lost) => {
                log::debug!("[render] surface outdated");
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, PARTICLE_COUNT + ORB_COUNT).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("[render] WebGPU unavailable, particle layer disabled: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone())) else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
