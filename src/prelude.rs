//! # Leaf Fall Prelude
//!
//! Commonly used types in one import:
//!
//! ```
//! use leaffall::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut scene = Scene::new();
//! let position = Vector3::new(0.0, 5.0, 0.0);
//! let leaf = scene.add_model(SceneModel::new(ModelKind::Leaf(1), position, 0.1));
//!
//! let clock = ManualClock::new();
//! let mut animation = AnimationScheduler::with_clock(clock.clone());
//! animation.register_leaf(&scene, leaf, &mut StdRng::seed_from_u64(7));
//! animation.initialize();
//!
//! clock.advance(0.5);
//! animation.update(&mut scene);
//! assert!(scene.transform(leaf).map_or(false, |t| t.position.y < 5.0));
//! ```

pub use crate::animation::{
    AnimationScheduler, Clock, LeafMotionModel, LeafParams, ManualClock, SystemClock,
};
pub use crate::config::{DemoConfig, PopulationConfig};
pub use crate::demo::LeafFallDemo;
pub use crate::gfx::{FlyCamera, InputState};
pub use crate::scene::{
    population::ScenePopulator, ModelHandle, ModelKind, Scene, SceneModel, Transform,
};
pub use crate::{run, LeafFallApp};

pub use cgmath::Vector3;
