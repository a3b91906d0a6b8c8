//! Lagged following of scroll-determined progress.

#[derive(Clone, Copy, Debug)]
pub struct ScrubFollower {
    lag_sec: f32,
    current: Option<f32>,
}

impl ScrubFollower {
    const SETTLE_EPSILON: f32 = 1e-4;

    pub fn new(lag_sec: f32) -> Self {
        Self {
            lag_sec: lag_sec.max(0.0),
            current: None,
        }
    }

    pub fn value(&self) -> Option<f32> {
        self.current
    }

    /// Jump straight to `target`, dropping any in-flight smoothing.
    pub fn snap_to(&mut self, target: f32) {
        self.current = Some(target);
    }

    pub fn is_settled(&self, target: f32) -> bool {
        self.current
            .map_or(false, |c| (c - target).abs() <= Self::SETTLE_EPSILON)
    }

    /// Move toward `target` over `dt_sec`; returns the new value.
    ///
    /// `lag_sec` is roughly the time to cover 95% of a jump.
    pub fn step(&mut self, target: f32, dt_sec: f32) -> f32 {
        let next = match self.current {
            None => target,
            Some(_) if self.lag_sec <= 0.0 => target,
            Some(c) => {
                let tau = self.lag_sec / 3.0;
                let alpha = 1.0 - (-dt_sec.max(0.0) / tau).exp();
                let v = c + (target - c) * alpha;
                if (v - target).abs() <= Self::SETTLE_EPSILON {
                    target
                } else {
                    v
                }
            }
        };
        self.current = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_lands_on_target() {
        let mut s = ScrubFollower::new(0.6);
        assert_eq!(s.step(0.4, 0.016), 0.4);
    }

    #[test]
    fn converges_within_lag() {
        let mut s = ScrubFollower::new(0.6);
        s.snap_to(0.0);
        let mut v = 0.0;
        for _ in 0..36 {
            v = s.step(1.0, 1.0 / 60.0);
        }
        assert!(v > 0.94 && v <= 1.0, "v={v}");
        for _ in 0..600 {
            v = s.step(1.0, 1.0 / 60.0);
        }
        assert_eq!(v, 1.0);
        assert!(s.is_settled(1.0));
    }

    #[test]
    fn zero_lag_follows_exactly() {
        let mut s = ScrubFollower::new(0.0);
        s.snap_to(0.2);
        assert_eq!(s.step(0.9, 0.001), 0.9);
    }
}
