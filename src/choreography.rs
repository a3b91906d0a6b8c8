use crate::collage::MountedCollage;
use crate::constants::RAIL_LABEL;
use crate::dom;
use crate::listener::ListenerSet;
use crate::rail::DestinationRail;
use eventtimes_core::constants::{COLLAGE_PIN_RATIO, COLLAGE_SCRUB_SEC};
use eventtimes_core::scrub::ScrubFollower;
use eventtimes_core::snap::{SnapAggregator, SnapConfig, SnapSettler};
use eventtimes_core::{
    Extent, LayoutProbe, PinDuration, PinEvent, PinPlacement, PinRegistry, RegionId, Viewport,
};
use instant::Instant;
use std::collections::HashMap;
use web_sys as web;

/// Spacer slot plus the box held in place inside it.
struct PinBox {
    slot: web::HtmlElement,
    held: web::HtmlElement,
    placement: Option<PinPlacement>,
}

#[derive(Default)]
pub struct DomProbe {
    boxes: HashMap<RegionId, PinBox>,
}

impl DomProbe {
    fn insert(&mut self, id: RegionId, slot: web::HtmlElement, held: web::HtmlElement) {
        self.boxes.insert(
            id,
            PinBox {
                slot,
                held,
                placement: None,
            },
        );
    }

    fn remove(&mut self, id: RegionId) {
        if let Some(b) = self.boxes.remove(&id) {
            dom::set_style(&b.slot, "height", "");
            for prop in ["position", "top", "left", "width"] {
                dom::set_style(&b.held, prop, "");
            }
        }
    }

    /// Switch the held box between flowing in its slot and fixed to the
    /// viewport. Only written on pin transitions.
    fn place(&mut self, id: RegionId, placement: PinPlacement) {
        let Some(b) = self.boxes.get_mut(&id) else {
            return;
        };
        if b.placement == Some(placement) {
            return;
        }
        b.placement = Some(placement);
        let (position, top) = match placement {
            PinPlacement::Before => ("absolute", 0.0),
            PinPlacement::Fixed => ("fixed", 0.0),
            PinPlacement::After { offset } => ("absolute", offset),
        };
        dom::set_style(&b.held, "position", position);
        dom::set_style(&b.held, "top", &format!("{:.0}px", top));
        dom::set_style(&b.held, "left", "0");
        dom::set_style(&b.held, "width", "100%");
    }
}

impl LayoutProbe for DomProbe {
    fn viewport(&self) -> Viewport {
        dom::viewport()
    }

    // The slot keeps the held box's height plus the pin distance, so the
    // page below does not move when the box leaves the flow.
    fn reserve(&mut self, id: RegionId, px: f64) {
        if let Some(b) = self.boxes.get(&id) {
            let height = b.held.offset_height() as f64 + px;
            dom::set_style(&b.slot, "height", &format!("{:.0}px", height));
        }
    }

    fn measure(&self, id: RegionId) -> Option<Extent> {
        let b = self.boxes.get(&id)?;
        Some(Extent {
            top: dom::document_top(&b.slot),
            height: b.held.offset_height() as f64,
        })
    }
}

fn release(registry: &mut PinRegistry, probe: &mut DomProbe, id: RegionId) {
    if let Err(e) = registry.deregister(id) {
        log::warn!("[pin] {}", e);
    }
    probe.remove(id);
}

struct CollageRun {
    collage: MountedCollage,
    region: Option<RegionId>,
    follower: ScrubFollower,
}

pub struct Stage {
    registry: PinRegistry,
    probe: DomProbe,
    collages: Vec<CollageRun>,
    rail: Option<DestinationRail>,
    rail_region: Option<RegionId>,
    aggregator: SnapAggregator,
    settler: SnapSettler,
    desktop: bool,
    /// Image load listeners feeding the readiness barrier.
    pub(crate) readiness: ListenerSet,
}

impl Stage {
    pub fn new(collages: Vec<MountedCollage>, rail: Option<DestinationRail>) -> Self {
        let mut aggregator = SnapAggregator::new(SnapConfig::default());
        for c in &collages {
            aggregator.barrier_mut().expect(c.id());
        }
        let collages = collages
            .into_iter()
            .map(|collage| CollageRun {
                collage,
                region: None,
                follower: ScrubFollower::new(COLLAGE_SCRUB_SEC),
            })
            .collect();
        Self {
            registry: PinRegistry::new(),
            probe: DomProbe::default(),
            collages,
            rail,
            rail_region: None,
            aggregator,
            settler: SnapSettler::default(),
            desktop: false,
            readiness: ListenerSet::default(),
        }
    }

    pub fn is_desktop(&self) -> bool {
        self.desktop
    }

    pub fn pending_images(&self) -> Vec<(&'static str, web::HtmlImageElement)> {
        self.collages
            .iter()
            .filter(|c| !c.collage.is_ready())
            .map(|c| (c.collage.id(), c.collage.main_image.clone()))
            .collect()
    }

    /// A section's content has settled; its geometry can be trusted.
    pub fn report_ready(&mut self, label: &str) {
        self.aggregator.barrier_mut().report_ready(label);
        if self.desktop {
            self.refresh();
        }
    }

    /// Pin every section and the rail; used when entering the desktop layout.
    pub fn activate_desktop(&mut self) {
        if self.desktop {
            return;
        }
        self.desktop = true;
        for run in &mut self.collages {
            let id = self
                .registry
                .register(run.collage.id(), PinDuration::OwnHeight(COLLAGE_PIN_RATIO));
            self.probe
                .insert(id, run.collage.slot.clone(), run.collage.section.clone());
            run.region = Some(id);
            run.follower = ScrubFollower::new(COLLAGE_SCRUB_SEC);
            if run.collage.is_ready() {
                self.aggregator.barrier_mut().report_ready(run.collage.id());
            }
        }
        if let Some(rail) = &mut self.rail {
            let geometry = rail.measure(dom::viewport().width);
            let id = self
                .registry
                .register(RAIL_LABEL, PinDuration::Pixels(geometry.pin_distance()));
            self.probe.insert(id, rail.slot.clone(), rail.section.clone());
            self.rail_region = Some(id);
        }
        self.refresh();
        self.on_scroll(dom::scroll_y());
    }

    pub fn deactivate(&mut self) {
        if !self.desktop {
            return;
        }
        self.desktop = false;
        for run in &mut self.collages {
            if let Some(id) = run.region.take() {
                release(&mut self.registry, &mut self.probe, id);
            }
            run.collage.reset();
        }
        if let Some(id) = self.rail_region.take() {
            release(&mut self.registry, &mut self.probe, id);
        }
        if let Some(rail) = &mut self.rail {
            rail.reset();
        }
        self.aggregator.clear();
        self.settler = SnapSettler::default();
    }

    pub fn refresh(&mut self) {
        if !self.desktop {
            return;
        }
        if let (Some(rail), Some(id)) = (&mut self.rail, self.rail_region) {
            let geometry = rail.measure(dom::viewport().width);
            if let Err(e) = self
                .registry
                .set_duration(id, PinDuration::Pixels(geometry.pin_distance()))
            {
                log::warn!("[rail] {}", e);
            }
        }
        if let Err(e) = self.registry.refresh(&mut self.probe) {
            log::warn!("[pin] refresh skipped: {}", e);
            return;
        }
        let scroll = dom::scroll_y();
        for region in self.registry.iter() {
            self.probe.place(region.id, region.placement(scroll));
        }
    }

    pub fn on_resize(&mut self, now: Instant) {
        self.refresh();
        self.aggregator.invalidate(now);
        self.on_scroll(dom::scroll_y());
    }

    pub fn on_user_input(&mut self, now: Instant) {
        self.settler.on_user_scroll(now);
    }

    /// The page is about to smooth-scroll somewhere itself.
    pub fn on_guided_scroll(&mut self, now: Instant) {
        self.settler.on_guided_scroll(now);
    }

    pub fn on_scroll_event(&mut self, now: Instant, scroll: f64) {
        if self.desktop {
            self.settler.on_scroll_observed(now, scroll);
        }
        self.on_scroll(scroll);
    }

    /// Pin transitions move held boxes in and out of the flow.
    pub fn on_scroll(&mut self, scroll: f64) {
        if !self.desktop {
            return;
        }
        for ev in self.registry.on_scroll(scroll) {
            let (PinEvent::Pinned { id, .. } | PinEvent::Unpinned { id, .. }) = ev;
            if let Some(region) = self.registry.get(id) {
                self.probe.place(id, region.placement(scroll));
            }
        }
    }

    /// Per-frame work: snap bookkeeping, settles and scrubbed timelines.
    pub fn frame(&mut self, now: Instant, dt_sec: f32) {
        if !self.desktop {
            return;
        }
        let max_scroll = dom::max_scroll();
        self.aggregator.poll(now, &self.registry, max_scroll);

        let mut scroll = dom::scroll_y();
        if let Some(px) = self.settler.step(dt_sec as f64) {
            dom::scroll_to(px, false);
            scroll = px;
        } else {
            self.settler
                .poll(now, scroll, max_scroll, self.aggregator.resolver());
        }

        let viewport = dom::viewport();
        for run in &mut self.collages {
            let Some(target) = run.region.and_then(|id| self.registry.progress(id, scroll)) else {
                continue;
            };
            let p = run.follower.step(target, dt_sec);
            run.collage.bound.apply(p, viewport, |el, pose| {
                dom::set_style(el, "transform", &pose.css_transform());
                dom::set_style(el, "opacity", &pose.css_opacity());
            });
        }
        if let (Some(rail), Some(id)) = (&mut self.rail, self.rail_region) {
            if let Some(target) = self.registry.progress(id, scroll) {
                rail.apply(target, dt_sec);
            }
        }
    }
}
