//! # Graphics Module
//!
//! Window-facing half of the demo: the fly camera and input state, the box
//! geometry every model is drawn with, per-instance and per-frame GPU data,
//! and the wgpu [`RenderEngine`].
//!
//! Everything except [`RenderEngine`] and [`uniform_buffer`] is plain data and
//! can be used without a GPU.

pub mod camera;
pub mod geometry;
pub mod globals;
pub mod input;
pub mod instances;
pub mod render_engine;
pub mod texture;
pub mod uniform_buffer;
pub mod vertex;

pub use camera::{CameraMovement, FlyCamera};
pub use input::InputState;
pub use render_engine::RenderEngine;
