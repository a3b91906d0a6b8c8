//! Sixty drifting points and four slow orbs. Orbs ignore the pointer.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub particle_count: usize,
    pub orb_count: usize,
    pub half_extent_xy: f32,
    pub half_extent_z: f32,
    pub velocity_xy_span: f32,
    pub velocity_z_span: f32,
    pub wobble_amplitude: f32,
    pub pointer_scale: f32,
    pub attraction_radius: f32,
    pub attraction_gain: f32,
    pub spin_rate: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            orb_count: ORB_COUNT,
            half_extent_xy: FIELD_HALF_EXTENT_XY,
            half_extent_z: FIELD_HALF_EXTENT_Z,
            velocity_xy_span: PARTICLE_VELOCITY_XY_SPAN,
            velocity_z_span: PARTICLE_VELOCITY_Z_SPAN,
            wobble_amplitude: WOBBLE_AMPLITUDE,
            pointer_scale: POINTER_SCALE,
            attraction_radius: ATTRACTION_RADIUS,
            attraction_gain: ATTRACTION_GAIN,
            spin_rate: FIELD_SPIN_RATE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePoint {
    pub position: Vec3,
    /// Assigned once; never re-randomized.
    pub velocity: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingOrb {
    pub base_position: Vec3,
    pub scale: f32,
    pub speed: f32,
}

/// Orb placement for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbPose {
    pub position: Vec3,
    pub radius: f32,
}

impl FloatingOrb {
    pub fn pose(&self, elapsed_sec: f32) -> OrbPose {
        let mut position = self.base_position;
        position.y += (elapsed_sec * self.speed).sin() * ORB_BOB_AMPLITUDE;
        OrbPose {
            position,
            radius: self.scale,
        }
    }
}

/// Wrap a coordinate that left `[-bound, bound]` to the opposite edge.
#[inline]
pub fn wrap_axis(v: f32, bound: f32) -> f32 {
    if v > bound {
        -bound
    } else if v < -bound {
        bound
    } else {
        v
    }
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    params: FieldParams,
    points: Vec<ParticlePoint>,
    orbs: Vec<FloatingOrb>,
    pointer: Vec2,
    elapsed_sec: f32,
}

impl ParticleField {
    pub fn new(params: FieldParams, rng: &mut impl Rng) -> Self {
        let mut centered = |span: f32| (rng.gen::<f32>() - 0.5) * span;
        let points = (0..params.particle_count)
            .map(|_| ParticlePoint {
                position: Vec3::new(
                    centered(params.half_extent_xy * 2.0),
                    centered(params.half_extent_xy * 2.0),
                    centered(params.half_extent_z * 2.0),
                ),
                velocity: Vec3::new(
                    centered(params.velocity_xy_span),
                    centered(params.velocity_xy_span),
                    centered(params.velocity_z_span),
                ),
            })
            .collect();
        let orbs = (0..params.orb_count)
            .map(|_| FloatingOrb {
                base_position: Vec3::new(
                    centered(ORB_SPREAD[0]),
                    centered(ORB_SPREAD[1]),
                    centered(ORB_SPREAD[2]),
                ),
                scale: ORB_SCALE_MIN + (centered(1.0) + 0.5) * ORB_SCALE_SPAN,
                speed: ORB_SPEED_MIN + (centered(1.0) + 0.5) * ORB_SPEED_SPAN,
            })
            .collect();
        log::info!(
            "[particles] field ready: {} points, {} orbs",
            params.particle_count,
            params.orb_count
        );
        Self::from_parts(params, points, orbs)
    }

    pub fn from_parts(params: FieldParams, points: Vec<ParticlePoint>, orbs: Vec<FloatingOrb>) -> Self {
        Self {
            params,
            points,
            orbs,
            pointer: Vec2::ZERO,
            elapsed_sec: 0.0,
        }
    }

    pub fn points(&self) -> &[ParticlePoint] {
        &self.points
    }

    pub fn orbs(&self) -> &[FloatingOrb] {
        &self.orbs
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    /// Last known pointer position in normalized device coordinates
    /// (x right, y up, both in \[-1, 1\]).
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    pub fn pointer_in_field(&self) -> Vec2 {
        self.pointer * self.params.pointer_scale
    }

    /// Advance one rendered frame at `elapsed_sec` since the field started.
    pub fn step(&mut self, elapsed_sec: f32) {
        self.elapsed_sec = elapsed_sec;
        let p = self.params;
        let target = self.pointer_in_field();
        for (i, pt) in self.points.iter_mut().enumerate() {
            let phase = i as f32;
            let mut pos = pt.position + pt.velocity;
            pos.x += (elapsed_sec * WOBBLE_X_RATE + phase).sin() * p.wobble_amplitude;
            pos.y += (elapsed_sec * WOBBLE_Y_RATE + phase).cos() * p.wobble_amplitude;

            let delta = target - pos.truncate();
            if delta.length() < p.attraction_radius {
                pos.x += delta.x * p.attraction_gain;
                pos.y += delta.y * p.attraction_gain;
            }

            pos.x = wrap_axis(pos.x, p.half_extent_xy);
            pos.y = wrap_axis(pos.y, p.half_extent_xy);
            pt.position = pos;
        }
    }

    /// Rotation of the whole point cloud around +Y.
    pub fn spin(&self) -> f32 {
        self.elapsed_sec * self.params.spin_rate
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin())
    }

    pub fn orb_poses(&self) -> impl Iterator<Item = OrbPose> + '_ {
        self.orbs.iter().map(|o| o.pose(self.elapsed_sec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single(position: Vec3, velocity: Vec3) -> ParticleField {
        ParticleField::from_parts(
            FieldParams::default(),
            vec![ParticlePoint { position, velocity }],
            Vec::new(),
        )
    }

    #[test]
    fn seeded_field_is_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::new(FieldParams::default(), &mut rng);
        assert_eq!(field.points().len(), 60);
        assert_eq!(field.orbs().len(), 4);
        for p in field.points() {
            assert!(p.position.x.abs() <= 10.0 && p.position.y.abs() <= 10.0);
            assert!(p.position.z.abs() <= 5.0);
            assert!(p.velocity.x.abs() <= 0.0025 && p.velocity.z.abs() <= 0.001);
        }
        for o in field.orbs() {
            assert!(o.scale >= 0.15 && o.scale <= 0.40);
            assert!(o.speed >= 0.5 && o.speed <= 1.0);
        }
    }

    #[test]
    fn wrap_axis_teleports_to_opposite_edge() {
        assert_eq!(wrap_axis(10.001, 10.0), -10.0);
        assert_eq!(wrap_axis(-10.2, 10.0), 10.0);
        assert_eq!(wrap_axis(3.0, 10.0), 3.0);
    }

    #[test]
    fn step_wraps_particle_past_the_edge() {
        let mut field = single(Vec3::new(10.001, 0.0, 0.0), Vec3::new(0.002, 0.0, 0.0));
        // Pointer far away so only drift and wobble apply.
        field.set_pointer(Vec2::new(-1.0, -1.0));
        field.step(0.0);
        let p = field.points()[0].position;
        assert_eq!(p.x, -10.0);
        assert!(p.y.abs() <= 10.0);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let start = Vec3::new(8.0, 8.0, 0.0);
        let mut near = single(start, Vec3::ZERO);
        let mut far = single(start, Vec3::ZERO);
        // Mapped pointer (-5, -5) is ~18 units away.
        near.set_pointer(Vec2::new(-1.0, -1.0));
        far.set_pointer(Vec2::new(-0.9, -1.0));
        near.step(1.25);
        far.step(1.25);
        assert_eq!(near.points()[0].position, far.points()[0].position);
    }

    #[test]
    fn pointer_inside_radius_nudges_toward_it() {
        let start = Vec3::new(1.0, 0.0, 0.0);
        let mut attracted = single(start, Vec3::ZERO);
        let mut baseline = single(start, Vec3::ZERO);
        attracted.set_pointer(Vec2::new(0.6, 0.0)); // mapped to (3, 0)
        baseline.set_pointer(Vec2::new(-1.0, 1.0)); // mapped to (-5, 5), out of range
        attracted.step(0.5);
        baseline.step(0.5);
        let dx = attracted.points()[0].position.x - baseline.points()[0].position.x;
        assert!(dx > 0.0 && dx < 0.002, "dx={dx}");
    }

    #[test]
    fn orbs_bob_but_keep_their_column() {
        let orb = FloatingOrb {
            base_position: Vec3::new(2.0, 1.0, -1.0),
            scale: 0.2,
            speed: 1.0,
        };
        let pose = orb.pose(std::f32::consts::FRAC_PI_2);
        assert_eq!(pose.position.x, 2.0);
        assert!((pose.position.y - 1.5).abs() < 1e-5);
        assert_eq!(pose.radius, 0.2);
    }

    #[test]
    fn spin_tracks_elapsed_time() {
        let mut field = single(Vec3::ZERO, Vec3::ZERO);
        field.step(50.0);
        assert!((field.spin() - 1.0).abs() < 1e-6);
    }
}
