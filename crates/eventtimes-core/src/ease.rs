/// Easing curves used by scroll-scrubbed tweens and snap settling.
///
/// `Power2*` follow the usual animation-library naming where "power2" is a
/// cubic curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    Power2In,
    Power2Out,
    SineInOut,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t * t,
            Ease::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Ease::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) * 0.5,
        }
    }

    #[inline]
    pub fn apply_f64(self, t: f64) -> f64 {
        self.apply(t as f32) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for ease in [Ease::Linear, Ease::Power2In, Ease::Power2Out, Ease::SineInOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        assert!(Ease::Power2In.apply(0.5) < 0.5);
        assert!(Ease::Power2Out.apply(0.5) > 0.5);
        assert_eq!(Ease::Linear.apply(1.7), 1.0);
    }

    #[test]
    fn sine_in_out_is_symmetric() {
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
        let a = Ease::SineInOut.apply(0.2);
        let b = Ease::SineInOut.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-6);
    }
}
