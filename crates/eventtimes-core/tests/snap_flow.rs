// Host tests for the page-wide snap pipeline: registry -> aggregator ->
// settler -> per-frame scroll positions.

use eventtimes_core::snap::{SnapAggregator, SnapConfig, SnapResolver, SnapSettler, SnapTarget};
use eventtimes_core::{Extent, LayoutProbe, PinDuration, PinRegistry, RegionId, Viewport};
use instant::{Duration, Instant};

/// Regions at fixed document offsets; `tops[i]` belongs to the i-th registered id.
struct FixedLayout {
    tops: Vec<f64>,
    height: f64,
}

impl LayoutProbe for FixedLayout {
    fn viewport(&self) -> Viewport {
        Viewport::new(1440.0, 900.0)
    }

    fn reserve(&mut self, _id: RegionId, _px: f64) {}

    fn measure(&self, id: RegionId) -> Option<Extent> {
        self.tops.get(id.raw() as usize).map(|&top| Extent {
            top,
            height: self.height,
        })
    }
}

#[test]
fn resolver_picks_nearest_point_ahead() {
    let resolver = SnapResolver::from_targets(
        vec![SnapTarget {
            range_start: 0.40,
            range_end: 0.55,
            center: 0.475,
        }],
        SnapConfig::default(),
    )
    .expect("resolver");
    assert!((resolver.resolve(0.41) - 0.475).abs() < 1e-12);
    assert_eq!(resolver.resolve(0.10), 0.10);
}

#[test]
fn registry_regions_become_fractional_targets() {
    let mut registry = PinRegistry::new();
    registry.register("a", PinDuration::Pixels(1500.0));
    let mut layout = FixedLayout {
        tops: vec![4000.0],
        height: 900.0,
    };
    registry.refresh(&mut layout).expect("refresh");
    let resolver = SnapResolver::from_regions(registry.iter(), 10_000.0, SnapConfig::default())
        .expect("resolver");
    let t = resolver.targets()[0];
    assert!((t.range_start - 0.40).abs() < 1e-12);
    assert!((t.range_end - 0.55).abs() < 1e-12);
    assert!((t.center - 0.475).abs() < 1e-12);
}

#[test]
fn released_gesture_settles_on_region_center() {
    let mut registry = PinRegistry::new();
    registry.register("vision", PinDuration::Pixels(1500.0));
    let mut layout = FixedLayout {
        tops: vec![4000.0],
        height: 900.0,
    };
    registry.refresh(&mut layout).expect("refresh");

    let max_scroll = 10_000.0;
    let mut aggregator = SnapAggregator::new(SnapConfig::default());
    aggregator.barrier_mut().expect("vision");
    let t0 = Instant::now();
    assert!(!aggregator.poll(t0, &registry, max_scroll));
    aggregator.barrier_mut().report_ready("vision");
    assert!(aggregator.poll(t0, &registry, max_scroll));

    let mut settler = SnapSettler::default();
    settler.on_user_scroll(t0);
    // Still scrolling: nothing happens.
    assert!(settler
        .poll(t0 + Duration::from_millis(50), 4100.0, max_scroll, aggregator.resolver())
        .is_none());
    let anim = settler
        .poll(t0 + Duration::from_millis(200), 4100.0, max_scroll, aggregator.resolver())
        .copied()
        .expect("settle");
    assert!((anim.target() - 4750.0).abs() < 1e-6);
    assert!(anim.duration_sec() >= 0.15 && anim.duration_sec() <= 0.35);

    let mut last = 4100.0;
    let mut frames = 0;
    while let Some(px) = settler.step(1.0 / 60.0) {
        assert!(px >= last - 1e-9, "settle must not overshoot backwards");
        last = px;
        frames += 1;
        assert!(frames < 60);
    }
    assert!((last - 4750.0).abs() < 1e-6);
}

#[test]
fn user_input_cancels_a_settle() {
    let resolver = SnapResolver::from_targets(
        vec![SnapTarget {
            range_start: 0.40,
            range_end: 0.55,
            center: 0.475,
        }],
        SnapConfig::default(),
    );
    let mut settler = SnapSettler::default();
    let t0 = Instant::now();
    settler.on_user_scroll(t0);
    assert!(settler
        .poll(t0 + Duration::from_millis(300), 4100.0, 10_000.0, resolver.as_ref())
        .is_some());
    settler.step(0.05);
    settler.on_user_scroll(t0 + Duration::from_millis(350));
    assert!(!settler.is_animating());
    assert_eq!(settler.step(0.05), None);
}

#[test]
fn free_scroll_outside_bands_never_animates() {
    let resolver = SnapResolver::from_targets(
        vec![SnapTarget {
            range_start: 0.40,
            range_end: 0.55,
            center: 0.475,
        }],
        SnapConfig::default(),
    );
    let mut settler = SnapSettler::default();
    let t0 = Instant::now();
    settler.on_user_scroll(t0);
    assert!(settler
        .poll(t0 + Duration::from_secs(1), 1000.0, 10_000.0, resolver.as_ref())
        .is_none());
    assert!(!settler.is_animating());
}

#[test]
fn late_sections_are_picked_up_after_debounce() {
    let mut registry = PinRegistry::new();
    registry.register("first", PinDuration::Pixels(1000.0));
    let mut layout = FixedLayout {
        tops: vec![1000.0, 5000.0],
        height: 900.0,
    };
    registry.refresh(&mut layout).expect("refresh");

    let mut aggregator = SnapAggregator::new(SnapConfig::default());
    let t0 = Instant::now();
    assert!(aggregator.poll(t0, &registry, 10_000.0));
    assert_eq!(aggregator.resolver().map(|r| r.targets().len()), Some(1));

    registry.register("second", PinDuration::Pixels(1000.0));
    registry.refresh(&mut layout).expect("refresh");
    assert!(!aggregator.poll(t0 + Duration::from_millis(20), &registry, 10_000.0));
    assert!(aggregator.poll(t0 + Duration::from_millis(240), &registry, 10_000.0));
    assert_eq!(aggregator.resolver().map(|r| r.targets().len()), Some(2));
}

#[test]
fn resize_invalidation_rebuilds_with_new_scroll_range() {
    let mut registry = PinRegistry::new();
    registry.register("only", PinDuration::Pixels(1000.0));
    let mut layout = FixedLayout {
        tops: vec![2000.0],
        height: 900.0,
    };
    registry.refresh(&mut layout).expect("refresh");

    let mut aggregator = SnapAggregator::new(SnapConfig::default());
    let t0 = Instant::now();
    aggregator.poll(t0, &registry, 10_000.0);
    aggregator.invalidate(t0 + Duration::from_millis(10));
    assert!(!aggregator.poll(t0 + Duration::from_millis(100), &registry, 8_000.0));
    assert!(aggregator.poll(t0 + Duration::from_millis(250), &registry, 8_000.0));
    let center = aggregator.resolver().map(|r| r.targets()[0].center);
    assert_eq!(center, Some(2500.0 / 8000.0));
}
