//! # Scene Management Module
//!
//! Owns every placed model and light. Animation code reaches model
//! transforms through [`ModelHandle`]s and never owns them.

pub mod light;
pub mod model;
pub mod population;
pub mod scene;

pub use light::{DirectionalLight, LightAttenuation, PointLight};
pub use model::{ModelKind, SceneModel, Transform};
pub use scene::{LightHandle, ModelHandle, Scene};
