//! Page-wide snap policy derived from the pinned regions.
//!
//! The [`SnapAggregator`] waits until every expected section has reported
//! ready, builds a [`SnapResolver`] from the registry, and rebuilds it
//! (debounced) whenever the registry changes or the page is resized. The
//! [`SnapSettler`] decides when a released scroll gesture should settle and
//! produces the [`SnapAnimation`] that gets it there.

use crate::constants::*;
use crate::ease::Ease;
use crate::pin::{PinRegistry, PinnedRegion};
use instant::{Duration, Instant};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapConfig {
    /// Band around each region, as a fraction of total scroll.
    pub tolerance: f64,
    pub min_duration_sec: f64,
    pub max_duration_sec: f64,
    pub ease: Ease,
    /// Quiet time after a registry change or resize before re-aggregating.
    pub debounce: Duration,
    /// Quiet time after user scrolling before settling.
    pub idle: Duration,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance: SNAP_TOLERANCE,
            min_duration_sec: SNAP_MIN_DURATION_SEC,
            max_duration_sec: SNAP_MAX_DURATION_SEC,
            ease: Ease::Power2Out,
            debounce: Duration::from_millis(SNAP_REAGGREGATE_DEBOUNCE_MS),
            idle: Duration::from_millis(SNAP_IDLE_MS),
        }
    }
}

/// A pinned region expressed as fractions of the total scroll distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTarget {
    pub range_start: f64,
    pub range_end: f64,
    pub center: f64,
}

impl SnapTarget {
    pub fn from_region(region: &PinnedRegion, max_scroll: f64) -> Self {
        let start = region.scroll_start;
        let end = region.scroll_end.max(start);
        Self {
            range_start: start / max_scroll,
            range_end: end / max_scroll,
            center: (start + (end - start) * 0.5) / max_scroll,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnapResolver {
    targets: Vec<SnapTarget>,
    config: SnapConfig,
}

impl SnapResolver {
    /// `None` when there is nothing to scroll or nothing pinned; free
    /// scrolling then continues untouched.
    pub fn from_regions<'a>(
        regions: impl IntoIterator<Item = &'a PinnedRegion>,
        max_scroll: f64,
        config: SnapConfig,
    ) -> Option<Self> {
        if !(max_scroll > 0.0) {
            return None;
        }
        let mut pinned: Vec<&PinnedRegion> =
            regions.into_iter().filter(|r| r.is_measured()).collect();
        if pinned.is_empty() {
            return None;
        }
        pinned.sort_by(|a, b| a.scroll_start.total_cmp(&b.scroll_start));
        let targets = pinned
            .into_iter()
            .map(|r| SnapTarget::from_region(r, max_scroll))
            .collect();
        Some(Self { targets, config })
    }

    pub fn from_targets(targets: Vec<SnapTarget>, config: SnapConfig) -> Option<Self> {
        (!targets.is_empty()).then_some(Self { targets, config })
    }

    pub fn targets(&self) -> &[SnapTarget] {
        &self.targets
    }

    /// Inside any region's tolerance band the nearest center wins (first one
    /// on ties); elsewhere `value` comes back unchanged.
    pub fn resolve(&self, value: f64) -> f64 {
        let tol = self.config.tolerance;
        let in_band = self
            .targets
            .iter()
            .any(|t| value >= t.range_start - tol && value <= t.range_end + tol);
        if !in_band {
            return value;
        }
        let mut best = self.targets[0].center;
        for t in &self.targets[1..] {
            if (t.center - value).abs() < (best - value).abs() {
                best = t.center;
            }
        }
        best
    }

    pub fn duration_for(&self, from: f64, to: f64) -> f64 {
        let c = &self.config;
        let t = ((to - from).abs() / SNAP_FULL_DURATION_DISTANCE).clamp(0.0, 1.0);
        c.min_duration_sec + (c.max_duration_sec - c.min_duration_sec) * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapAnimation {
    from_px: f64,
    to_px: f64,
    duration_sec: f64,
    elapsed_sec: f64,
    ease: Ease,
}

impl SnapAnimation {
    pub fn new(from_px: f64, to_px: f64, duration_sec: f64, ease: Ease) -> Self {
        Self {
            from_px,
            to_px,
            duration_sec,
            elapsed_sec: 0.0,
            ease,
        }
    }

    pub fn target(&self) -> f64 {
        self.to_px
    }

    pub fn duration_sec(&self) -> f64 {
        self.duration_sec
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_sec >= self.duration_sec
    }

    pub fn step(&mut self, dt_sec: f64) -> f64 {
        self.elapsed_sec = (self.elapsed_sec + dt_sec.max(0.0)).min(self.duration_sec);
        if self.duration_sec <= 0.0 {
            self.elapsed_sec = 0.0;
            return self.to_px;
        }
        let t = self.ease.apply_f64(self.elapsed_sec / self.duration_sec);
        self.from_px + (self.to_px - self.from_px) * t
    }
}

/// Readiness barrier: satisfied once every expected section has reported.
#[derive(Clone, Debug, Default)]
pub struct ReadinessBarrier {
    expected: BTreeSet<String>,
    ready: BTreeSet<String>,
}

impl ReadinessBarrier {
    pub fn expect(&mut self, label: impl Into<String>) {
        self.expected.insert(label.into());
    }

    /// Drop a section that will never report (e.g. skipped on mount).
    pub fn withdraw(&mut self, label: &str) {
        self.expected.remove(label);
        self.ready.remove(label);
    }

    pub fn report_ready(&mut self, label: &str) {
        if self.expected.contains(label) {
            self.ready.insert(label.to_string());
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.expected.iter().all(|l| self.ready.contains(l))
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.expected
            .iter()
            .filter(|l| !self.ready.contains(*l))
            .map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct SnapAggregator {
    config: SnapConfig,
    barrier: ReadinessBarrier,
    resolver: Option<SnapResolver>,
    seen_generation: Option<u64>,
    observed_generation: Option<u64>,
    dirty_since: Option<Instant>,
}

impl SnapAggregator {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn barrier_mut(&mut self) -> &mut ReadinessBarrier {
        &mut self.barrier
    }

    pub fn resolver(&self) -> Option<&SnapResolver> {
        self.resolver.as_ref()
    }

    /// Layout changed (resize, reflow); schedule a debounced rebuild.
    pub fn invalidate(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    pub fn clear(&mut self) {
        self.resolver = None;
        self.seen_generation = None;
        self.observed_generation = None;
        self.dirty_since = None;
    }

    /// Rebuild the resolver if due. Returns `true` when it was rebuilt.
    ///
    /// The first build happens as soon as the barrier is satisfied. After
    /// that, every observed registry change restarts the debounce window.
    pub fn poll(&mut self, now: Instant, registry: &PinRegistry, max_scroll: f64) -> bool {
        if !self.barrier.is_satisfied() {
            return false;
        }
        let generation = registry.generation();
        if self.seen_generation.is_some() && self.observed_generation != Some(generation) {
            self.observed_generation = Some(generation);
            self.dirty_since = Some(now);
        }
        let due = match (self.seen_generation, self.dirty_since) {
            (None, _) => true,
            (Some(_), Some(since)) => now.duration_since(since) >= self.config.debounce,
            (Some(_), None) => false,
        };
        if !due {
            return false;
        }
        self.resolver = SnapResolver::from_regions(registry.iter(), max_scroll, self.config);
        self.seen_generation = Some(generation);
        self.observed_generation = Some(generation);
        self.dirty_since = None;
        match &self.resolver {
            Some(r) => log::info!(
                "[snap] resolver installed for {} pinned regions (max scroll {:.0})",
                r.targets().len(),
                max_scroll
            ),
            None => log::info!("[snap] no pinned regions or no scroll range; snapping disabled"),
        }
        true
    }
}

/// Decides when a released gesture should settle onto a snap target.
///
/// Any scroll the page did not cause itself arms the settle, including
/// scrollbar drags and find-in-page jumps that never raise an input event.
#[derive(Debug, Default)]
pub struct SnapSettler {
    last_user_scroll: Option<Instant>,
    animation: Option<SnapAnimation>,
    /// Last position a settle wrote; its scroll echo is ignored.
    written_px: Option<f64>,
    /// A smooth scroll to an anchor is in flight; last seen at this time.
    guided_since: Option<Instant>,
}

impl SnapSettler {
    /// User input moved the page; cancels any settle in progress.
    pub fn on_user_scroll(&mut self, now: Instant) {
        self.last_user_scroll = Some(now);
        self.animation = None;
        self.written_px = None;
        self.guided_since = None;
    }

    pub fn on_scroll_observed(&mut self, now: Instant, scroll_px: f64) {
        if let Some(px) = self.written_px {
            if (px - scroll_px).abs() <= SNAP_SETTLED_EPSILON_PX {
                return;
            }
        }
        if self.guided_since.is_some() {
            self.guided_since = Some(now);
            return;
        }
        self.on_user_scroll(now);
    }

    /// The page started a smooth scroll of its own (anchor links, back to
    /// top). It is left alone until it has been quiet for the idle window.
    pub fn on_guided_scroll(&mut self, now: Instant) {
        self.animation = None;
        self.last_user_scroll = None;
        self.written_px = None;
        self.guided_since = Some(now);
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Start a settle if the gesture has been idle long enough and the
    /// resolver moves the current position.
    pub fn poll(
        &mut self,
        now: Instant,
        scroll_px: f64,
        max_scroll: f64,
        resolver: Option<&SnapResolver>,
    ) -> Option<&SnapAnimation> {
        if let Some(since) = self.guided_since {
            if now.duration_since(since) >= Duration::from_millis(SNAP_IDLE_MS) {
                self.guided_since = None;
            }
            return None;
        }
        let resolver = resolver?;
        if self.animation.is_some() || max_scroll <= 0.0 {
            return self.animation.as_ref();
        }
        let since = self.last_user_scroll?;
        if now.duration_since(since) < resolver.config.idle {
            return None;
        }
        // One settle per gesture.
        self.last_user_scroll = None;
        let value = scroll_px / max_scroll;
        let target = resolver.resolve(value);
        let target_px = target * max_scroll;
        if (target_px - scroll_px).abs() <= SNAP_SETTLED_EPSILON_PX {
            return None;
        }
        let duration = resolver.duration_for(value, target);
        log::debug!(
            "[snap] settle {:.0}px -> {:.0}px over {:.2}s",
            scroll_px,
            target_px,
            duration
        );
        self.animation = Some(SnapAnimation::new(
            scroll_px,
            target_px,
            duration,
            resolver.config.ease,
        ));
        self.animation.as_ref()
    }

    /// Advance the active settle; `Some(px)` is where to scroll this frame.
    pub fn step(&mut self, dt_sec: f64) -> Option<f64> {
        let anim = self.animation.as_mut()?;
        let px = anim.step(dt_sec);
        if anim.is_done() {
            self.animation = None;
        }
        self.written_px = Some(px);
        Some(px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(targets: &[(f64, f64)]) -> SnapResolver {
        let targets = targets
            .iter()
            .map(|&(s, e)| SnapTarget {
                range_start: s,
                range_end: e,
                center: s + (e - s) * 0.5,
            })
            .collect();
        SnapResolver::from_targets(targets, SnapConfig::default()).expect("targets")
    }

    #[test]
    fn snaps_to_center_inside_band() {
        let r = resolver(&[(0.40, 0.55)]);
        assert!((r.resolve(0.41) - 0.475).abs() < 1e-12);
        assert!((r.resolve(0.385) - 0.475).abs() < 1e-12);
        assert_eq!(r.resolve(0.10), 0.10);
        assert_eq!(r.resolve(0.60), 0.60);
    }

    #[test]
    fn nearest_center_wins_across_regions() {
        let r = resolver(&[(0.10, 0.20), (0.22, 0.30)]);
        assert!((r.resolve(0.21) - 0.26).abs() < 1e-12);
        assert!((r.resolve(0.19) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn duration_is_bounded() {
        let r = resolver(&[(0.4, 0.5)]);
        assert!((r.duration_for(0.45, 0.45) - 0.15).abs() < 1e-12);
        assert!((r.duration_for(0.0, 1.0) - 0.35).abs() < 1e-12);
        let mid = r.duration_for(0.40, 0.45);
        assert!(mid > 0.15 && mid < 0.35);
    }

    #[test]
    fn animation_eases_out_and_lands() {
        let mut a = SnapAnimation::new(0.0, 100.0, 0.2, Ease::Power2Out);
        let first = a.step(0.1);
        assert!(first > 50.0);
        assert_eq!(a.step(1.0), 100.0);
        assert!(a.is_done());
    }

    #[test]
    fn barrier_waits_for_every_section() {
        let mut b = ReadinessBarrier::default();
        b.expect("vision");
        b.expect("heart");
        b.report_ready("vision");
        b.report_ready("unknown");
        assert!(!b.is_satisfied());
        assert_eq!(b.pending().collect::<Vec<_>>(), ["heart"]);
        b.withdraw("heart");
        assert!(b.is_satisfied());
    }

    #[test]
    fn settler_waits_for_idle_and_cancels_on_input() {
        let r = resolver(&[(0.40, 0.55)]);
        let mut s = SnapSettler::default();
        let t0 = Instant::now();
        s.on_user_scroll(t0);
        assert!(s.poll(t0, 410.0, 1000.0, Some(&r)).is_none());
        let later = t0 + Duration::from_millis(200);
        let target = s
            .poll(later, 410.0, 1000.0, Some(&r))
            .map(SnapAnimation::target)
            .expect("settle");
        assert!((target - 475.0).abs() < 1e-9);
        s.on_user_scroll(later);
        assert!(!s.is_animating());
        assert!(s.step(0.016).is_none());
    }

    #[test]
    fn plain_scroll_events_arm_the_settle() {
        // e.g. a scrollbar drag released inside a band: no wheel, touch or key
        let r = resolver(&[(0.40, 0.55)]);
        let mut s = SnapSettler::default();
        let t0 = Instant::now();
        s.on_scroll_observed(t0, 4100.0);
        let target = s
            .poll(t0 + Duration::from_secs(2), 4100.0, 10_000.0, Some(&r))
            .map(SnapAnimation::target)
            .expect("settle");
        assert!((target - 4750.0).abs() < 1e-6);
    }

    #[test]
    fn settle_ignores_its_own_scroll_echo() {
        let r = resolver(&[(0.40, 0.55)]);
        let mut s = SnapSettler::default();
        let t0 = Instant::now();
        s.on_scroll_observed(t0, 4100.0);
        let t1 = t0 + Duration::from_millis(200);
        assert!(s.poll(t1, 4100.0, 10_000.0, Some(&r)).is_some());
        let px = s.step(0.016).expect("first frame");
        s.on_scroll_observed(t1, px + 0.4);
        assert!(s.is_animating());

        // anything else is the user taking over
        s.on_scroll_observed(t1, px + 200.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn guided_scrolls_are_not_settled() {
        let r = resolver(&[(0.40, 0.55)]);
        let mut s = SnapSettler::default();
        let t0 = Instant::now();
        s.on_guided_scroll(t0);
        for ms in [16, 32, 300, 600] {
            s.on_scroll_observed(t0 + Duration::from_millis(ms), 4000.0 + ms as f64);
        }
        let quiet = t0 + Duration::from_millis(800);
        assert!(s.poll(quiet, 4600.0, 10_000.0, Some(&r)).is_none());
        assert!(s.poll(quiet + Duration::from_secs(1), 4600.0, 10_000.0, Some(&r)).is_none());

        // the next real gesture settles again
        let t2 = quiet + Duration::from_secs(2);
        s.on_scroll_observed(t2, 4100.0);
        assert!(s.poll(t2 + Duration::from_millis(200), 4100.0, 10_000.0, Some(&r)).is_some());
    }

    struct OneScreen;

    impl crate::pin::LayoutProbe for OneScreen {
        fn viewport(&self) -> crate::Viewport {
            crate::Viewport::new(1440.0, 900.0)
        }
        fn reserve(&mut self, _id: crate::RegionId, _px: f64) {}
        fn measure(&self, id: crate::RegionId) -> Option<crate::Extent> {
            Some(crate::Extent {
                top: 2000.0 * id.raw() as f64,
                height: 900.0,
            })
        }
    }

    #[test]
    fn aggregator_builds_once_barrier_is_satisfied() {
        let mut reg = PinRegistry::new();
        reg.register("vision", crate::PinDuration::OwnHeight(1.3));
        reg.refresh(&mut OneScreen).expect("refresh");
        let mut agg = SnapAggregator::new(SnapConfig::default());
        agg.barrier_mut().expect("vision");
        let now = Instant::now();
        assert!(!agg.poll(now, &reg, 10_000.0));
        agg.barrier_mut().report_ready("vision");
        assert!(agg.poll(now, &reg, 10_000.0));
        let t = agg.resolver().map(|r| r.targets()[0]).expect("resolver");
        assert!((t.center - 0.0585).abs() < 1e-12);
        assert!(!agg.poll(now, &reg, 10_000.0));
    }

    #[test]
    fn aggregator_debounces_registry_changes() {
        let mut reg = PinRegistry::new();
        reg.register("a", crate::PinDuration::OwnHeight(1.3));
        reg.refresh(&mut OneScreen).expect("refresh");
        let mut agg = SnapAggregator::new(SnapConfig::default());
        let t0 = Instant::now();
        assert!(agg.poll(t0, &reg, 10_000.0));

        reg.register("b", crate::PinDuration::OwnHeight(1.3));
        reg.refresh(&mut OneScreen).expect("refresh");
        assert!(!agg.poll(t0 + Duration::from_millis(10), &reg, 10_000.0));
        assert!(!agg.poll(t0 + Duration::from_millis(150), &reg, 10_000.0));
        assert!(agg.poll(t0 + Duration::from_millis(260), &reg, 10_000.0));
        assert_eq!(agg.resolver().map(|r| r.targets().len()), Some(2));
    }

    #[test]
    fn no_regions_or_no_scroll_means_no_resolver() {
        let reg = PinRegistry::new();
        assert!(SnapResolver::from_regions(reg.iter(), 5000.0, SnapConfig::default()).is_none());
        let mut reg = PinRegistry::new();
        reg.register("a", crate::PinDuration::OwnHeight(1.3));
        reg.refresh(&mut OneScreen).expect("refresh");
        assert!(SnapResolver::from_regions(reg.iter(), 0.0, SnapConfig::default()).is_none());
    }
}
