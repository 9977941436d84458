pub mod controller;
pub mod state;

pub use controller::{CameraController, CameraLimits, OrbitKeys};
pub use state::OrbitCamera;
