use crate::constants::*;
use crate::dom;
use crate::input::PointerState;
use eventtimes_core::constants::HERO_FADE_SCRUB_SEC;
use eventtimes_core::hero::{self, HeroPose, Tilt, TiltTween, CONTENT_INTRO, IMAGE_INTRO};
use eventtimes_core::scrub::ScrubFollower;
use glam::Vec2;
use web_sys as web;

pub struct Hero {
    section: web::HtmlElement,
    content: Vec<web::HtmlElement>,
    images: Vec<web::HtmlElement>,
    tilts: Vec<TiltTween>,
    fade: ScrubFollower,
}

fn apply(el: &web::HtmlElement, pose: &HeroPose) {
    dom::set_style(el, "transform", &pose.css_transform());
    dom::set_style(el, "opacity", &pose.css_opacity());
}

impl Hero {
    pub fn find(document: &web::Document) -> Option<Self> {
        let section = dom::html_by_id(document, HERO_ID)?;
        let content = dom::html_by_id(document, HERO_CONTENT_ID)
            .map(|c| dom::html_in(&c, ":scope > *"))
            .unwrap_or_default();
        let images = dom::html_by_id(document, HERO_IMAGES_ID)
            .map(|c| dom::html_in(&c, ":scope > *"))
            .unwrap_or_default();
        log::info!("[hero] {} content blocks, {} images", content.len(), images.len());
        Some(Self {
            section,
            tilts: vec![TiltTween::default(); images.len()],
            content,
            images,
            fade: ScrubFollower::new(HERO_FADE_SCRUB_SEC),
        })
    }

    /// Nothing left to draw once the hero has scrolled away and every
    /// tween has landed.
    fn is_idle(&self, fade_target: f32, elapsed_sec: f32) -> bool {
        fade_target >= 1.0
            && self.fade.is_settled(1.0)
            && CONTENT_INTRO.is_done(self.content.len(), elapsed_sec)
            && IMAGE_INTRO.is_done(self.images.len(), elapsed_sec)
    }

    /// Load-in, scroll fade, float and (on desktop) pointer parallax.
    pub fn frame(&mut self, elapsed_sec: f32, dt_sec: f32, pointer: &PointerState, desktop: bool) {
        let target = hero::fade_progress(
            dom::scroll_y(),
            dom::document_top(&self.section),
            self.section.offset_height() as f64,
        );
        if self.is_idle(target, elapsed_sec) {
            return;
        }
        let fade = hero::hero_fade(self.fade.step(target, dt_sec));

        for (i, el) in self.content.iter().enumerate() {
            apply(el, &HeroPose::content(CONTENT_INTRO.sample(i, elapsed_sec), fade));
        }

        let viewport = dom::viewport();
        let pointer_px = pointer.seen.then(|| Vec2::new(pointer.x, pointer.y));
        for (i, (el, tilt)) in self.images.iter().zip(self.tilts.iter_mut()).enumerate() {
            let goal = match pointer_px {
                Some(p) if desktop => hero::hero_parallax(p, viewport, i),
                _ => Tilt::default(),
            };
            tilt.retarget(goal);
            let pose = HeroPose::image(
                IMAGE_INTRO.sample(i, elapsed_sec),
                hero::float_offset(i, elapsed_sec),
                tilt.step(dt_sec),
                fade,
            );
            apply(el, &pose);
        }
    }
}
