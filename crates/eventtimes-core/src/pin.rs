//! Pinned-region registry. Bounds only change on an explicit [`PinRegistry::refresh`].

use crate::error::ChoreoError;
use crate::geometry::{Extent, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u32);

impl RegionId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// How much extra scrolling a region stays pinned for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinDuration {
    /// Multiple of the pinned element's own height.
    OwnHeight(f64),
    /// Fixed pixel distance, e.g. a rail whose length depends on its content.
    Pixels(f64),
}

impl PinDuration {
    pub fn resolve(self, height: f64) -> f64 {
        match self {
            PinDuration::OwnHeight(ratio) => (height * ratio).max(0.0),
            PinDuration::Pixels(px) => px.max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinState {
    Registered,
    Pinned,
    Unpinned,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PinnedRegion {
    pub id: RegionId,
    pub label: String,
    pub scroll_start: f64,
    pub scroll_end: f64,
    pub state: PinState,
    duration: PinDuration,
    measured: bool,
}

impl PinnedRegion {
    pub fn length(&self) -> f64 {
        self.scroll_end - self.scroll_start
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn contains(&self, scroll: f64) -> bool {
        scroll >= self.scroll_start && scroll < self.scroll_end
    }

    /// Timeline progress for a document scroll offset, linear in \[0, 1\].
    pub fn progress(&self, scroll: f64) -> f32 {
        let len = self.length();
        if len <= 0.0 {
            return if scroll >= self.scroll_start { 1.0 } else { 0.0 };
        }
        ((scroll - self.scroll_start) / len).clamp(0.0, 1.0) as f32
    }

    /// Vertical offset that keeps the section visually fixed while pinned.
    pub fn pin_offset(&self, scroll: f64) -> f64 {
        (scroll - self.scroll_start).clamp(0.0, self.length().max(0.0))
    }

    pub fn placement(&self, scroll: f64) -> PinPlacement {
        if !self.measured || scroll < self.scroll_start {
            PinPlacement::Before
        } else if self.contains(scroll) {
            PinPlacement::Fixed
        } else {
            PinPlacement::After {
                offset: self.pin_offset(scroll),
            }
        }
    }
}

/// Where the held box sits inside its spacer slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinPlacement {
    Before,
    Fixed,
    /// At the bottom of the pin distance, where the pin released.
    After { offset: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinEvent {
    Pinned { id: RegionId, from_above: bool },
    Unpinned { id: RegionId, forward: bool },
}

pub trait LayoutProbe {
    fn viewport(&self) -> Viewport;
    /// Reserve `px` of pin spacing after the region so following content
    /// starts where the pin releases.
    fn reserve(&mut self, id: RegionId, px: f64);
    fn measure(&self, id: RegionId) -> Option<Extent>;
}

#[derive(Debug, Default)]
pub struct PinRegistry {
    regions: Vec<PinnedRegion>,
    next_id: u32,
    generation: u64,
    last_scroll: Option<f64>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, label: impl Into<String>, duration: PinDuration) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        let label = label.into();
        log::info!("[pin] register {:?} '{}'", id, label);
        self.regions.push(PinnedRegion {
            id,
            label,
            scroll_start: 0.0,
            scroll_end: 0.0,
            state: PinState::Registered,
            duration,
            measured: false,
        });
        self.generation += 1;
        id
    }

    pub fn deregister(&mut self, id: RegionId) -> Result<PinnedRegion, ChoreoError> {
        let idx = self.index_of(id)?;
        let region = self.regions.remove(idx);
        log::info!("[pin] deregister {:?} '{}'", id, region.label);
        self.generation += 1;
        Ok(region)
    }

    pub fn set_duration(&mut self, id: RegionId, duration: PinDuration) -> Result<(), ChoreoError> {
        let idx = self.index_of(id)?;
        self.regions[idx].duration = duration;
        Ok(())
    }

    /// Bumped on every register, deregister and refresh.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: RegionId) -> Option<&PinnedRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinnedRegion> {
        self.regions.iter()
    }

    pub fn progress(&self, id: RegionId, scroll: f64) -> Option<f32> {
        self.get(id).map(|r| r.progress(scroll))
    }

    /// Recompute every region's bounds from the current layout.
    ///
    /// Spacing is reserved for every region before any offset is measured,
    /// since each reservation shifts everything below it.
    pub fn refresh(&mut self, probe: &mut impl LayoutProbe) -> Result<(), ChoreoError> {
        if probe.viewport().is_empty() {
            return Err(ChoreoError::EmptyLayout);
        }
        let mut lengths = Vec::with_capacity(self.regions.len());
        for r in &self.regions {
            let extent = probe.measure(r.id).ok_or(ChoreoError::UnknownRegion(r.id))?;
            let len = r.duration.resolve(extent.height);
            probe.reserve(r.id, len);
            lengths.push(len);
        }
        for (r, len) in self.regions.iter_mut().zip(lengths) {
            let extent = probe.measure(r.id).ok_or(ChoreoError::UnknownRegion(r.id))?;
            r.scroll_start = extent.top;
            r.scroll_end = extent.top + len;
            r.measured = true;
        }
        // Stable: equal starts keep registration order.
        self.regions
            .sort_by(|a, b| a.scroll_start.total_cmp(&b.scroll_start));
        self.generation += 1;
        if let Some(scroll) = self.last_scroll {
            self.on_scroll(scroll);
        }
        Ok(())
    }

    /// Advance every measured region's state machine for a scroll offset.
    pub fn on_scroll(&mut self, scroll: f64) -> Vec<PinEvent> {
        let forward = self.last_scroll.map_or(true, |prev| scroll >= prev);
        self.last_scroll = Some(scroll);
        let mut events = Vec::new();
        for r in self.regions.iter_mut().filter(|r| r.measured) {
            let inside = r.contains(scroll);
            match (r.state, inside) {
                (PinState::Registered | PinState::Unpinned, true) => {
                    r.state = PinState::Pinned;
                    log::debug!("[pin] pinned '{}' at {:.0}", r.label, scroll);
                    events.push(PinEvent::Pinned {
                        id: r.id,
                        from_above: forward,
                    });
                }
                (PinState::Pinned, false) => {
                    r.state = PinState::Unpinned;
                    log::debug!("[pin] unpinned '{}' at {:.0}", r.label, scroll);
                    events.push(PinEvent::Unpinned { id: r.id, forward });
                }
                _ => {}
            }
        }
        events
    }

    fn index_of(&self, id: RegionId) -> Result<usize, ChoreoError> {
        self.regions
            .iter()
            .position(|r| r.id == id)
            .ok_or(ChoreoError::UnknownRegion(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Sections stacked top to bottom; reserved spacing pushes later ones down.
    struct Stack {
        viewport: Viewport,
        order: Vec<RegionId>,
        heights: HashMap<RegionId, f64>,
        spacing: HashMap<RegionId, f64>,
        gap: f64,
    }

    impl LayoutProbe for Stack {
        fn viewport(&self) -> Viewport {
            self.viewport
        }
        fn reserve(&mut self, id: RegionId, px: f64) {
            self.spacing.insert(id, px);
        }
        fn measure(&self, id: RegionId) -> Option<Extent> {
            let mut top = 0.0;
            for rid in &self.order {
                let h = *self.heights.get(rid)?;
                if *rid == id {
                    return Some(Extent { top, height: h });
                }
                top += h + self.spacing.get(rid).copied().unwrap_or(0.0) + self.gap;
            }
            None
        }
    }

    fn stacked(n: usize) -> (PinRegistry, Stack) {
        let mut reg = PinRegistry::new();
        let mut stack = Stack {
            viewport: Viewport::new(1440.0, 900.0),
            order: Vec::new(),
            heights: HashMap::new(),
            spacing: HashMap::new(),
            gap: 100.0,
        };
        for i in 0..n {
            let id = reg.register(format!("s{i}"), PinDuration::OwnHeight(1.3));
            stack.order.push(id);
            stack.heights.insert(id, 900.0);
        }
        (reg, stack)
    }

    #[test]
    fn refresh_accounts_for_pin_spacing() {
        let (mut reg, mut stack) = stacked(2);
        reg.refresh(&mut stack).expect("refresh");
        let r: Vec<_> = reg.iter().cloned().collect();
        assert_eq!(r[0].scroll_start, 0.0);
        assert!((r[0].scroll_end - 1170.0).abs() < 1e-9);
        // 900 height + 1170 spacing + 100 gap
        assert!((r[1].scroll_start - 2170.0).abs() < 1e-9);
        assert!(r[0].scroll_end <= r[1].scroll_start);
    }

    #[test]
    fn state_machine_follows_scroll_both_ways() {
        let (mut reg, mut stack) = stacked(1);
        reg.refresh(&mut stack).expect("refresh");
        let id = reg.iter().next().map(|r| r.id).expect("region");
        assert_eq!(reg.get(id).map(|r| r.state), Some(PinState::Registered));

        let ev = reg.on_scroll(10.0);
        assert_eq!(ev, vec![PinEvent::Pinned { id, from_above: true }]);
        let ev = reg.on_scroll(2000.0);
        assert_eq!(ev, vec![PinEvent::Unpinned { id, forward: true }]);
        let ev = reg.on_scroll(500.0);
        assert_eq!(ev, vec![PinEvent::Pinned { id, from_above: false }]);
        assert!(reg.on_scroll(600.0).is_empty());
    }

    #[test]
    fn end_bound_is_exclusive() {
        let (mut reg, mut stack) = stacked(1);
        reg.refresh(&mut stack).expect("refresh");
        let r = reg.iter().next().cloned().expect("region");
        assert!(r.contains(r.scroll_start));
        assert!(!r.contains(r.scroll_end));
        assert_eq!(r.progress(r.scroll_end), 1.0);
        assert_eq!(r.pin_offset(r.scroll_end + 50.0), r.length());
    }

    #[test]
    fn placement_tracks_each_transition() {
        let (mut reg, mut stack) = stacked(1);
        let id = reg.iter().next().map(|r| r.id).expect("region");
        let place = |reg: &PinRegistry, scroll| reg.get(id).map(|r| r.placement(scroll));
        assert_eq!(place(&reg, 10.0), Some(PinPlacement::Before));

        reg.refresh(&mut stack).expect("refresh");
        assert_eq!(place(&reg, 0.0), Some(PinPlacement::Fixed));
        assert_eq!(place(&reg, 1169.0), Some(PinPlacement::Fixed));
        let after = place(&reg, 1170.0);
        assert!(matches!(after, Some(PinPlacement::After { offset }) if (offset - 1170.0).abs() < 1e-9));
    }

    #[test]
    fn unmeasured_regions_never_pin() {
        let mut reg = PinRegistry::new();
        reg.register("late", PinDuration::Pixels(300.0));
        assert!(reg.on_scroll(0.0).is_empty());
    }

    #[test]
    fn deregister_unknown_region_errors() {
        let (mut reg, _) = stacked(1);
        let id = reg.iter().next().map(|r| r.id).expect("region");
        reg.deregister(id).expect("first deregister");
        assert_eq!(reg.deregister(id), Err(ChoreoError::UnknownRegion(id)));
        assert!(reg.is_empty());
    }

    #[test]
    fn refresh_rejects_empty_viewport() {
        let (mut reg, mut stack) = stacked(1);
        stack.viewport = Viewport::default();
        assert_eq!(reg.refresh(&mut stack), Err(ChoreoError::EmptyLayout));
    }

    #[test]
    fn refresh_picks_up_new_durations() {
        let (mut reg, mut stack) = stacked(1);
        let id = reg.iter().next().map(|r| r.id).expect("region");
        reg.set_duration(id, PinDuration::Pixels(3100.0)).expect("set");
        reg.refresh(&mut stack).expect("refresh");
        assert_eq!(reg.get(id).map(|r| r.length()), Some(3100.0));
    }
}
