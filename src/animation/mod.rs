//! Falling-leaf animation
//!
//! [`LeafMotionModel`] computes one leaf's pose from closed-form functions of
//! time; [`AnimationScheduler`] advances every registered leaf once per frame.

pub mod clock;
pub mod damping;
pub mod leaf;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use leaf::{LeafMotionModel, LeafParams, Oscillation, GROUND_LEVEL};
pub use scheduler::AnimationScheduler;
