//! Orbital camera and rotation interpolation for frame-stepped renderers.
//!
//! The crate produces matrices only; windowing, shaders and drawing stay
//! with the host, which uploads [`uniforms::FrameUniforms`] each frame.

pub mod animation;
pub mod camera;
pub mod error;
pub mod scene;
pub mod settings;
pub mod uniforms;

pub const CONFY_APP_NAME: &str = "orbit-lab";

pub use error::LabError;
pub use scene::Scene;
pub use settings::Settings;
