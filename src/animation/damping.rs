//! Frame-rate independent damping helpers
//!
//! Used by the leaf motion model to bleed off flutter and spin once a leaf
//! has come to rest on the ground.

/// Decay rate (per second) applied to grounded leaves.
pub const GROUND_DAMPING_RATE: f32 = 2.5;

/// Magnitude below which a damped quantity counts as zero.
pub const NEAR_ZERO_EPSILON: f32 = 0.01;

/// Moves `value` toward `target` following `v += (target - v) * (1 - e^(-k*dt))`.
///
/// Two steps of `dt` give the same result as one step of `2*dt`, so the decay
/// looks the same regardless of frame rate.
///
/// # Arguments
/// * `value` - Current value
/// * `target` - Value being approached
/// * `rate` - Decay rate `k` in 1/s
/// * `delta_time` - Time step in seconds
pub fn damp(value: f32, target: f32, rate: f32, delta_time: f32) -> f32 {
    let dv = target - value;
    value + dv * (1.0 - (-rate * delta_time).exp())
}

/// Returns true when `value` is within [`NEAR_ZERO_EPSILON`] of zero.
pub fn almost_zero(value: f32) -> bool {
    value.abs() < NEAR_ZERO_EPSILON
}
