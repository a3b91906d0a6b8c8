//! Scroll-scrubbed keyframe timelines.
//!
//! A [`Timeline`] is a set of from/to tweens placed at fixed positions on a
//! normalized axis. It never advances by itself: callers ask for the pose of
//! each target at a given progress, so the same progress always yields the
//! same poses regardless of which direction the user scrolled to get there.

use crate::constants::{EXIT_START, HOLD_START};
use crate::ease::Ease;
use crate::geometry::Viewport;

/// Visual state of one animated element, relative to its resting layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x_vw: f32,
    pub y_vh: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Pose {
    pub const REST: Pose = Pose {
        x_vw: 0.0,
        y_vh: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Offset pose, fully transparent. Entrance tweens start here.
    pub const fn hidden(x_vw: f32, y_vh: f32) -> Self {
        Pose {
            x_vw,
            y_vh,
            scale: 1.0,
            opacity: 0.0,
        }
    }

    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn lerp(a: Pose, b: Pose, t: f32) -> Pose {
        Pose {
            x_vw: a.x_vw + (b.x_vw - a.x_vw) * t,
            y_vh: a.y_vh + (b.y_vh - a.y_vh) * t,
            scale: a.scale + (b.scale - a.scale) * t,
            opacity: a.opacity + (b.opacity - a.opacity) * t,
        }
    }

    pub fn resolve(&self, viewport: Viewport) -> ResolvedPose {
        ResolvedPose {
            x_px: viewport.vw(self.x_vw),
            y_px: viewport.vh(self.y_vh),
            scale: self.scale,
            opacity: self.opacity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPose {
    pub x_px: f64,
    pub y_px: f64,
    pub scale: f32,
    pub opacity: f32,
}

impl ResolvedPose {
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0) scale({:.4})",
            self.x_px, self.y_px, self.scale
        )
    }

    pub fn css_opacity(&self) -> String {
        format!("{:.4}", self.opacity.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entrance,
    Hold,
    Exit,
}

impl Phase {
    pub fn at(progress: f32) -> Phase {
        if progress < HOLD_START {
            Phase::Entrance
        } else if progress < EXIT_START {
            Phase::Hold
        } else {
            Phase::Exit
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub target: usize,
    pub from: Pose,
    pub to: Pose,
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Tween {
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    pub fn sample(&self, time: f32) -> Pose {
        let t = if self.duration <= 0.0 {
            if time >= self.start {
                1.0
            } else {
                0.0
            }
        } else {
            (time - self.start) / self.duration
        };
        Pose::lerp(self.from, self.to, self.ease.apply(t))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    targets: usize,
    // Sorted by (target, start); insertion order breaks ties.
    tweens: Vec<Tween>,
    duration: f32,
}

impl Timeline {
    pub fn builder(targets: usize) -> TimelineBuilder {
        TimelineBuilder {
            targets,
            tweens: Vec::new(),
        }
    }

    pub fn targets(&self) -> usize {
        self.targets
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Pose of `target` at normalized `progress` (clamped to \[0, 1\]).
    ///
    /// The latest tween that has started owns the target. Before any tween
    /// has started the target holds the first tween's `from` pose, so
    /// entrance offsets are applied before the section is ever reached.
    pub fn pose_at(&self, target: usize, progress: f32) -> Pose {
        let time = progress.clamp(0.0, 1.0) * self.duration;
        let mut first = None;
        let mut active = None;
        for tw in self.tweens.iter().filter(|tw| tw.target == target) {
            if first.is_none() {
                first = Some(tw);
            }
            if tw.start <= time {
                active = Some(tw);
            }
        }
        match (active, first) {
            (Some(tw), _) => tw.sample(time),
            (None, Some(tw)) => tw.from,
            (None, None) => Pose::REST,
        }
    }
}

pub struct TimelineBuilder {
    targets: usize,
    tweens: Vec<Tween>,
}

impl TimelineBuilder {
    pub fn tween(mut self, tween: Tween) -> Self {
        debug_assert!(tween.target < self.targets, "tween target out of range");
        self.tweens.push(tween);
        self
    }

    /// Linear entrance from `from` to rest.
    pub fn enter(self, target: usize, from: Pose, at: f32, duration: f32) -> Self {
        self.tween(Tween {
            target,
            from,
            to: Pose::REST,
            start: at,
            duration,
            ease: Ease::Linear,
        })
    }

    /// Ease-in exit from rest to `to`.
    pub fn exit(self, target: usize, to: Pose, at: f32, duration: f32) -> Self {
        self.tween(Tween {
            target,
            from: Pose::REST,
            to,
            start: at,
            duration,
            ease: Ease::Power2In,
        })
    }

    pub fn build(mut self) -> Timeline {
        self.tweens.retain(|tw| tw.target < self.targets);
        // Stable sort keeps authoring order for tweens starting together.
        self.tweens.sort_by(|a, b| {
            a.target
                .cmp(&b.target)
                .then(a.start.total_cmp(&b.start))
        });
        let duration = self
            .tweens
            .iter()
            .map(Tween::end)
            .fold(0.0_f32, f32::max);
        Timeline {
            targets: self.targets,
            tweens: self.tweens,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_phase() -> Timeline {
        Timeline::builder(1)
            .enter(0, Pose::hidden(-60.0, 0.0), 0.0, 0.3)
            .exit(0, Pose::hidden(-18.0, 0.0), 0.7, 0.3)
            .build()
    }

    #[test]
    fn holds_rest_between_entrance_and_exit() {
        let tl = two_phase();
        assert_eq!(tl.duration(), 1.0);
        assert_eq!(tl.pose_at(0, 0.5), Pose::REST);
        assert_eq!(tl.pose_at(0, 0.3), Pose::REST);
    }

    #[test]
    fn before_first_tween_uses_from_pose() {
        let tl = Timeline::builder(1)
            .enter(0, Pose::hidden(0.0, 18.0), 0.12, 0.14)
            .build();
        let p = tl.pose_at(0, 0.0);
        assert_eq!(p.opacity, 0.0);
        assert_eq!(p.y_vh, 18.0);
    }

    #[test]
    fn untargeted_slot_stays_at_rest() {
        let tl = Timeline::builder(2)
            .enter(0, Pose::hidden(10.0, 0.0), 0.0, 0.5)
            .build();
        assert_eq!(tl.pose_at(1, 0.25), Pose::REST);
    }

    #[test]
    fn exit_is_eased_in() {
        let tl = two_phase();
        let mid = tl.pose_at(0, 0.85);
        // Cubic ease-in covers well under half the distance at the midpoint.
        assert!(mid.x_vw > -9.0 && mid.x_vw < 0.0);
        assert!(mid.opacity > 0.5);
        let end = tl.pose_at(0, 1.0);
        assert!((end.x_vw + 18.0).abs() < 1e-4);
        assert_eq!(end.opacity, 0.0);
    }

    #[test]
    fn resolved_pose_formats_css() {
        let pose = Pose::hidden(-60.0, 10.0).with_scale(0.92);
        let r = pose.resolve(Viewport::new(1000.0, 800.0));
        assert_eq!(r.x_px, -600.0);
        assert_eq!(r.y_px, 80.0);
        assert_eq!(r.css_transform(), "translate3d(-600.00px, 80.00px, 0) scale(0.9200)");
        assert_eq!(r.css_opacity(), "0.0000");
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(Phase::at(0.0), Phase::Entrance);
        assert_eq!(Phase::at(0.3), Phase::Hold);
        assert_eq!(Phase::at(0.69), Phase::Hold);
        assert_eq!(Phase::at(0.7), Phase::Exit);
    }
}
