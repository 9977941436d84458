// Rotation representations shared by the interpolation code and the
// rotation system.

use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

use super::interpolation::{
    axis_angle_to_euler, euler_to_axis_angle, euler_to_matrix, euler_to_quaternion,
    quaternion_to_mat4,
};

/// Axes shorter than this are treated as zero and replaced by [`default_axis`].
pub const AXIS_EPSILON: f32 = 1e-5;

/// Fallback rotation axis (+Z).
pub fn default_axis() -> glm::Vec3 {
    glm::vec3(0.0, 0.0, 1.0)
}

/// Normalize `axis`, substituting +Z for a zero-length (or non-finite) input.
pub fn sanitize_axis(axis: &glm::Vec3) -> glm::Vec3 {
    let length = glm::length(axis);
    if !length.is_finite() || length < AXIS_EPSILON {
        log::trace!("degenerate rotation axis {axis:?}, using +Z");
        return default_axis();
    }
    axis / length
}

/// Rotation as a unit axis plus an angle in radians.
///
/// The axis is private so it cannot be set without going through
/// [`sanitize_axis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    axis: glm::Vec3,
    pub angle: f32,
}

impl AxisAngle {
    pub fn new(axis: glm::Vec3, angle: f32) -> Self {
        Self {
            axis: sanitize_axis(&axis),
            angle,
        }
    }

    pub fn from_degrees(axis: glm::Vec3, degrees: f32) -> Self {
        Self::new(axis, degrees.to_radians())
    }

    pub fn axis(&self) -> glm::Vec3 {
        self.axis
    }

    pub fn set_axis(&mut self, axis: glm::Vec3) {
        self.axis = sanitize_axis(&axis);
    }

    pub fn to_quaternion(&self) -> glm::Quat {
        glm::quat_angle_axis(self.angle, &self.axis)
    }

    pub fn to_matrix(&self) -> glm::Mat4 {
        quaternion_to_mat4(&self.to_quaternion())
    }

    pub fn to_euler(&self) -> glm::Vec3 {
        axis_angle_to_euler(&self.axis, self.angle)
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self {
            axis: default_axis(),
            angle: 0.0,
        }
    }
}

/// An orientation held either as XYZ Euler angles (radians) or axis-angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationState {
    Euler(glm::Vec3),
    AxisAngle(AxisAngle),
}

impl RotationState {
    pub fn to_quaternion(&self) -> glm::Quat {
        match self {
            RotationState::Euler(angles) => euler_to_quaternion(angles),
            RotationState::AxisAngle(aa) => aa.to_quaternion(),
        }
    }

    pub fn to_matrix(&self) -> glm::Mat4 {
        match self {
            RotationState::Euler(angles) => euler_to_matrix(angles.x, angles.y, angles.z),
            RotationState::AxisAngle(aa) => aa.to_matrix(),
        }
    }

    pub fn to_euler(&self) -> glm::Vec3 {
        match self {
            RotationState::Euler(angles) => *angles,
            RotationState::AxisAngle(aa) => aa.to_euler(),
        }
    }

    pub fn to_axis_angle(&self) -> AxisAngle {
        match self {
            RotationState::Euler(angles) => euler_to_axis_angle(angles.x, angles.y, angles.z),
            RotationState::AxisAngle(aa) => *aa,
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        RotationState::Euler(glm::vec3(0.0, 0.0, 0.0))
    }
}

/// Which orientation drives the model matrix.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationMode {
    /// First Euler triple, no blending
    #[default]
    Euler,
    /// First axis-angle pair, no blending
    Quaternion,
    /// Componentwise blend of both Euler triples
    EulerInterpolated,
    /// Lerp or Slerp between both axis-angle quaternions
    QuaternionInterpolated,
}

impl InterpolationMode {
    pub fn is_interpolated(self) -> bool {
        matches!(
            self,
            InterpolationMode::EulerInterpolated | InterpolationMode::QuaternionInterpolated
        )
    }
}

/// Quaternion blend used by [`InterpolationMode::QuaternionInterpolated`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Linear,
    Spherical,
}

/// How translation (T), rotation (R) and scale (S) are combined into the
/// model matrix. Variants read left to right as the matrix product, so
/// `RotateTranslate` is `R * T`: the object is moved first, then rotated
/// about the origin.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Composition {
    Translate,
    Rotate,
    Scale,
    RotateTranslate,
    TranslateRotate,
    #[default]
    TranslateRotateScale,
}

impl Composition {
    pub fn compose(self, translate: &glm::Mat4, rotate: &glm::Mat4, scale: &glm::Mat4) -> glm::Mat4 {
        match self {
            Composition::Translate => *translate,
            Composition::Rotate => *rotate,
            Composition::Scale => *scale,
            Composition::RotateTranslate => rotate * translate,
            Composition::TranslateRotate => translate * rotate,
            Composition::TranslateRotateScale => translate * rotate * scale,
        }
    }
}

/// Selects one of the two key orientations of a [`super::RotationSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRotation {
    First,
    Second,
}

/// Direction of a "copy configuration" between the Euler and axis-angle keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDirection {
    /// Overwrite the axis-angle keys from the Euler keys
    FromEuler,
    /// Overwrite the Euler keys from the axis-angle keys
    ToEuler,
}
