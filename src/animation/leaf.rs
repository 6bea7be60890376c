//! Procedural falling-leaf motion
//!
//! Each leaf follows closed-form functions of its own elapsed time: a linear
//! wind drift plus a circular sway in the ground plane, a quadratic descent
//! with a small vertical flutter, and an oscillating tumble. Once the leaf
//! reaches the ground its flutter and tumble are damped out until it settles.

use cgmath::{Matrix4, Quaternion, Rad, Rotation3, Vector2, Vector3};
use rand::Rng;

use super::damping::{almost_zero, damp, GROUND_DAMPING_RATE};
use crate::scene::{ModelHandle, Transform};

/// Height of the flat ground plane
pub const GROUND_LEVEL: f32 = 0.0;

/// Parameters of an oscillation `base + amplitude * sin(frequency * t + phase)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Oscillation {
    pub const fn new(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self {
            base,
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    pub fn sample(&self, t: f32) -> f32 {
        self.base + self.amplitude * (self.frequency * t + self.phase).sin()
    }
}

/// Tunable motion parameters for a single leaf
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafParams {
    /// Drift direction in the XZ plane (x → world X, y → world Z)
    pub wind_direction: Vector2<f32>,
    pub wind_speed: f32,

    /// Horizontal sway; `base` is unused
    pub sway: Oscillation,

    pub fall_speed: f32,
    pub fall_acceleration: f32,

    /// Vertical flutter superimposed on the fall; `base` is unused
    pub lift: Oscillation,

    pub yaw_base: f32,
    pub spin_rate: f32,
    pub pitch: Oscillation,
    pub roll: Oscillation,
}

impl Default for LeafParams {
    fn default() -> Self {
        Self {
            wind_direction: Vector2::new(1.5, 0.3),
            wind_speed: 0.1,
            sway: Oscillation::new(0.0, 0.9, 2.0),
            fall_speed: 0.1,
            fall_acceleration: 0.1,
            lift: Oscillation::new(0.0, 0.01, 7.0),
            yaw_base: 0.0,
            spin_rate: 0.8,
            pitch: Oscillation::new(0.4, 0.6, 5.0),
            roll: Oscillation::new(0.1, 0.4, 3.2),
        }
    }
}

impl LeafParams {
    /// Draws the lift, pitch, sway and roll phases (in that order) uniformly from [-1, 1]
    pub fn randomize_phases<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.lift.phase = rng.random_range(-1.0..=1.0);
        self.pitch.phase = rng.random_range(-1.0..=1.0);
        self.sway.phase = rng.random_range(-1.0..=1.0);
        self.roll.phase = rng.random_range(-1.0..=1.0);
        self
    }
}

/// Per-instance animation state for one falling leaf
///
/// The model writes into a [`Transform`] owned by the scene; it only keeps a
/// [`ModelHandle`] to it.
#[derive(Debug, Clone)]
pub struct LeafMotionModel {
    target: ModelHandle,
    start_position: Vector3<f32>,
    params: LeafParams,
    elapsed: f32,
    settled: bool,
}

impl LeafMotionModel {
    /// Creates a leaf starting at `start_position` with phases drawn from `rng`
    pub fn new<R: Rng + ?Sized>(
        target: ModelHandle,
        start_position: Vector3<f32>,
        params: LeafParams,
        rng: &mut R,
    ) -> Self {
        Self {
            target,
            start_position,
            params: params.randomize_phases(rng),
            elapsed: 0.0,
            settled: false,
        }
    }

    pub fn target(&self) -> ModelHandle {
        self.target
    }

    pub fn start_position(&self) -> Vector3<f32> {
        self.start_position
    }

    pub fn params(&self) -> &LeafParams {
        &self.params
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advances the leaf by `delta_time` seconds and writes the new pose into `transform`.
    ///
    /// A zero step, or any step after the leaf has settled, leaves both the
    /// model and the transform untouched.
    pub fn advance(&mut self, delta_time: f32, transform: &mut Transform) {
        if self.settled || delta_time <= 0.0 {
            return;
        }

        self.elapsed += delta_time;
        let t = self.elapsed;
        let p = &mut self.params;

        let sway_angle = p.sway.frequency * t + p.sway.phase;
        let x = self.start_position.x
            + p.wind_speed * t * p.wind_direction.x
            + p.sway.amplitude * sway_angle.sin();
        let z = self.start_position.z
            + p.wind_speed * t * p.wind_direction.y
            + p.sway.amplitude * sway_angle.cos();

        let mut y = self.start_position.y
            - p.fall_speed * t
            - 0.5 * p.fall_acceleration * t * t
            + p.lift.amplitude * (p.lift.frequency * t + p.lift.phase).sin();

        if y <= GROUND_LEVEL {
            y = GROUND_LEVEL;

            p.lift.amplitude = damp(p.lift.amplitude, 0.0, GROUND_DAMPING_RATE, delta_time);
            p.spin_rate = damp(p.spin_rate, 0.0, GROUND_DAMPING_RATE, delta_time);
            p.pitch.amplitude = damp(p.pitch.amplitude, 0.0, GROUND_DAMPING_RATE, delta_time);
            p.roll.amplitude = damp(p.roll.amplitude, 0.0, GROUND_DAMPING_RATE, delta_time);

            let still = almost_zero(p.spin_rate) && almost_zero(p.pitch.amplitude);
            if still && almost_zero(p.roll.amplitude) {
                self.settled = true;
            }
        }

        let yaw = p.yaw_base + p.spin_rate * t;
        let pitch = p.pitch.sample(t);
        let roll = p.roll.sample(t);

        // yaw outermost, roll innermost
        let orientation = Quaternion::from_angle_y(Rad(yaw))
            * Quaternion::from_angle_x(Rad(pitch))
            * Quaternion::from_angle_z(Rad(roll));

        // Freeze the landing position so grounded leaves don't jitter
        if !almost_zero(y - GROUND_LEVEL) {
            transform.position = Vector3::new(x, y, z);
        }
        transform.rotation = Matrix4::from(orientation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ModelKind, Scene, SceneModel};
    use rand::{rngs::StdRng, SeedableRng};

    fn leaf_at(
        start: Vector3<f32>,
        params: LeafParams,
        seed: u64,
    ) -> (LeafMotionModel, Transform) {
        let mut scene = Scene::new();
        let handle = scene.add_model(SceneModel::new(ModelKind::Leaf(1), start, 0.1));
        let mut rng = StdRng::seed_from_u64(seed);
        let leaf = LeafMotionModel::new(handle, start, params, &mut rng);
        (leaf, Transform::new(start, 0.1))
    }

    fn scenario_params() -> LeafParams {
        LeafParams {
            fall_speed: 0.1,
            fall_acceleration: 0.1,
            ..LeafParams::default()
        }
    }

    #[test]
    fn test_phases_are_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let params = LeafParams::default().randomize_phases(&mut rng);
            for phase in [
                params.lift.phase,
                params.pitch.phase,
                params.sway.phase,
                params.roll.phase,
            ] {
                assert!((-1.0..=1.0).contains(&phase));
            }
        }
    }

    #[test]
    fn test_same_rng_gives_different_phases() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Vector3::new(0.0, 5.0, 0.0);
        let handle = Scene::new().add_model(SceneModel::new(ModelKind::Leaf(1), start, 0.1));

        let first = LeafMotionModel::new(handle, start, LeafParams::default(), &mut rng);
        let second = LeafMotionModel::new(handle, start, LeafParams::default(), &mut rng);

        assert_ne!(first.params().sway.phase, second.params().sway.phase);
        assert_ne!(first.params().lift.phase, second.params().lift.phase);
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let (mut leaf, mut transform) = leaf_at(Vector3::new(0.0, 5.0, 0.0), scenario_params(), 1);
        let before = transform;

        leaf.advance(0.0, &mut transform);
        assert_eq!(transform, before);
        assert_eq!(leaf.elapsed(), 0.0);

        leaf.advance(0.1, &mut transform);
        let after_step = transform;
        let elapsed = leaf.elapsed();
        leaf.advance(0.0, &mut transform);
        assert_eq!(transform, after_step);
        assert_eq!(leaf.elapsed(), elapsed);
    }

    #[test]
    fn test_airborne_leaf_follows_closed_form() {
        let start = Vector3::new(1.0, 5.0, -2.0);
        let (mut leaf, mut transform) = leaf_at(start, scenario_params(), 3);
        leaf.advance(0.5, &mut transform);

        let p = *leaf.params();
        let t = 0.5f32;
        let drift = p.wind_speed * t;
        let sway = p.sway.frequency * t + p.sway.phase;
        let lift = p.lift.amplitude * (p.lift.frequency * t + p.lift.phase).sin();
        let expected_x = start.x + drift * p.wind_direction.x + p.sway.amplitude * sway.sin();
        let expected_z = start.z + drift * p.wind_direction.y + p.sway.amplitude * sway.cos();
        let expected_y = start.y - p.fall_speed * t - 0.5 * p.fall_acceleration * t * t + lift;

        assert!((transform.position.x - expected_x).abs() < 1e-5);
        assert!((transform.position.y - expected_y).abs() < 1e-5);
        assert!((transform.position.z - expected_z).abs() < 1e-5);
    }

    #[test]
    fn test_orientation_is_yaw_pitch_roll() {
        let (mut leaf, mut transform) = leaf_at(Vector3::new(0.0, 5.0, 0.0), scenario_params(), 9);
        leaf.advance(0.25, &mut transform);

        let p = *leaf.params();
        let t = 0.25f32;
        let expected = Matrix4::from_angle_y(Rad(p.yaw_base + p.spin_rate * t))
            * Matrix4::from_angle_x(Rad(p.pitch.sample(t)))
            * Matrix4::from_angle_z(Rad(p.roll.sample(t)));

        for col in 0..4 {
            for row in 0..4 {
                let diff = transform.rotation[col][row] - expected[col][row];
                assert!(diff.abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_scenario_lands_then_settles() {
        let (mut leaf, mut transform) = leaf_at(Vector3::new(0.0, 5.0, 0.0), scenario_params(), 42);

        let mut landed_at = None;
        let mut frozen_position = None;
        for step in 1..=200 {
            leaf.advance(0.1, &mut transform);
            assert!(transform.position.y >= GROUND_LEVEL);

            if landed_at.is_none() && leaf.params().spin_rate < 0.8 {
                landed_at = Some(step as f32 * 0.1);
                frozen_position = Some(transform.position);
            }
            if let Some(frozen) = frozen_position {
                assert_eq!(transform.position, frozen);
            }
            if leaf.is_settled() {
                break;
            }
        }

        // 5 - 0.1t - 0.05t² crosses zero at t ≈ 9.05
        let landed_at = landed_at.expect("leaf never reached the ground");
        assert!(landed_at > 8.5 && landed_at < 9.6, "landed at {landed_at}");
        assert!(leaf.is_settled());
        assert!(leaf.elapsed() - landed_at < 10.0);
    }

    #[test]
    fn test_damping_strictly_decreases_after_landing() {
        let (mut leaf, mut transform) = leaf_at(Vector3::new(0.0, 0.5, 0.0), scenario_params(), 5);

        while leaf.params().spin_rate == 0.8 {
            leaf.advance(0.05, &mut transform);
        }

        let mut previous = *leaf.params();
        while !leaf.is_settled() {
            leaf.advance(0.05, &mut transform);
            let current = *leaf.params();
            assert!(current.spin_rate < previous.spin_rate);
            assert!(current.pitch.amplitude < previous.pitch.amplitude);
            assert!(current.roll.amplitude < previous.roll.amplitude);
            assert!(leaf.elapsed() < 20.0);
            previous = current;
        }
    }

    #[test]
    fn test_settled_leaf_stops_updating() {
        let (mut leaf, mut transform) = leaf_at(Vector3::new(0.0, 0.2, 0.0), scenario_params(), 11);
        for _ in 0..500 {
            leaf.advance(0.05, &mut transform);
            if leaf.is_settled() {
                break;
            }
        }
        assert!(leaf.is_settled());

        let frozen = transform;
        let elapsed = leaf.elapsed();
        for _ in 0..10 {
            leaf.advance(0.1, &mut transform);
            assert!(leaf.is_settled());
        }
        assert_eq!(transform, frozen);
        assert_eq!(leaf.elapsed(), elapsed);
    }

    #[test]
    fn test_weightless_leaf_never_settles() {
        let params = LeafParams {
            fall_speed: 0.0,
            fall_acceleration: 0.0,
            ..LeafParams::default()
        };
        let (mut leaf, mut transform) = leaf_at(Vector3::new(0.0, 3.0, 0.0), params, 2);
        for _ in 0..1000 {
            leaf.advance(0.1, &mut transform);
        }
        assert!(!leaf.is_settled());
        assert_eq!(leaf.params().spin_rate, 0.8);
        assert!(transform.position.y > 2.9);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let run = |seed| {
            let start = Vector3::new(0.5, 4.0, 0.5);
            let (mut leaf, mut transform) = leaf_at(start, scenario_params(), seed);
            let mut poses = Vec::new();
            for step in 0..150 {
                leaf.advance(0.016 + (step % 3) as f32 * 0.01, &mut transform);
                poses.push(transform);
            }
            poses
        };

        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }
}
