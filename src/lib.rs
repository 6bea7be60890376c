//! Leaf Fall
//!
//! A small evening forest scene with procedurally animated falling leaves,
//! rendered with wgpu and winit. The animation core ([`animation`]) and the
//! scene model ([`scene`]) do not touch the GPU and can be driven by any
//! [`animation::Clock`].

pub mod animation;
pub mod app;
pub mod config;
pub mod demo;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod scene;

pub use app::LeafFallApp;
pub use config::DemoConfig;
pub use error::{LeafFallError, Result};

/// Opens the demo window and runs until it is closed
pub fn run(config: DemoConfig) -> Result<()> {
    LeafFallApp::new(config)?.run()
}
