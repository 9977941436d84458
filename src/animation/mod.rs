// Rotation algebra and the animated rotation state built on it

pub mod clock;
pub mod interpolation;
pub mod system;
pub mod types;

pub use clock::{AnimationClock, ClockState};
pub use interpolation::*;
pub use system::RotationSystem;
pub use types::*;
