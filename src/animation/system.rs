// Rotation system: two key orientations, a mode selector, the clock that
// blends between them, and the translate/scale around the blended rotation.

use nalgebra_glm as glm;

use super::clock::AnimationClock;
use super::interpolation::{
    euler_to_matrix, lerp_euler, lerp_quaternion, normal_matrix, quaternion_to_mat4,
    slerp_quaternion,
};
use super::types::{
    AxisAngle, BlendMode, Composition, CopyDirection, InterpolationMode, KeyRotation,
};

/// Owns the orientation state of one animated object.
#[derive(Debug, Clone)]
pub struct RotationSystem {
    mode: InterpolationMode,
    blend: BlendMode,
    rot1: glm::Vec3,
    rot2: glm::Vec3,
    quat1: AxisAngle,
    quat2: AxisAngle,
    translation: glm::Vec3,
    scale: glm::Vec3,
    composition: Composition,
    clock: AnimationClock,
}

impl RotationSystem {
    pub fn new(clock: AnimationClock) -> Self {
        Self {
            mode: InterpolationMode::default(),
            blend: BlendMode::default(),
            rot1: glm::vec3(0.0, 0.0, 0.0),
            rot2: glm::vec3(0.0, 0.0, 0.0),
            quat1: AxisAngle::default(),
            quat2: AxisAngle::default(),
            translation: glm::vec3(0.0, 0.0, 0.0),
            scale: glm::vec3(1.0, 1.0, 1.0),
            composition: Composition::default(),
            clock,
        }
    }

    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InterpolationMode) {
        if mode != self.mode {
            log::debug!("rotation mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut AnimationClock {
        &mut self.clock
    }

    /// Euler angles in radians
    pub fn euler(&self, key: KeyRotation) -> glm::Vec3 {
        match key {
            KeyRotation::First => self.rot1,
            KeyRotation::Second => self.rot2,
        }
    }

    pub fn set_euler(&mut self, key: KeyRotation, angles: glm::Vec3) {
        match key {
            KeyRotation::First => self.rot1 = angles,
            KeyRotation::Second => self.rot2 = angles,
        }
    }

    pub fn axis_angle(&self, key: KeyRotation) -> AxisAngle {
        match key {
            KeyRotation::First => self.quat1,
            KeyRotation::Second => self.quat2,
        }
    }

    fn axis_angle_mut(&mut self, key: KeyRotation) -> &mut AxisAngle {
        match key {
            KeyRotation::First => &mut self.quat1,
            KeyRotation::Second => &mut self.quat2,
        }
    }

    pub fn set_axis_angle(&mut self, key: KeyRotation, value: AxisAngle) {
        *self.axis_angle_mut(key) = value;
    }

    /// Replace the axis of `key`; a zero axis becomes +Z.
    pub fn set_axis(&mut self, key: KeyRotation, axis: glm::Vec3) {
        self.axis_angle_mut(key).set_axis(axis);
    }

    pub fn set_angle_degrees(&mut self, key: KeyRotation, degrees: f32) {
        self.axis_angle_mut(key).angle = degrees.to_radians();
    }

    pub fn translation(&self) -> glm::Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: glm::Vec3) {
        self.translation = translation;
    }

    pub fn scale(&self) -> glm::Vec3 {
        self.scale
    }

    /// Per-axis factors; zero or negative components are allowed.
    pub fn set_scale(&mut self, scale: glm::Vec3) {
        self.scale = scale;
    }

    pub fn composition(&self) -> Composition {
        self.composition
    }

    pub fn set_composition(&mut self, composition: Composition) {
        if composition != self.composition {
            log::debug!("composition {:?} -> {:?}", self.composition, composition);
            self.composition = composition;
        }
    }

    /// Advance the clock by `dt` seconds and return the interpolation parameter.
    pub fn update(&mut self, dt: f32) -> f32 {
        self.clock.advance(dt)
    }

    /// Blend of the two axis-angle keys at the current `t`.
    pub fn blended_quaternion(&self) -> glm::Quat {
        let q1 = self.quat1.to_quaternion();
        let q2 = self.quat2.to_quaternion();
        let t = self.clock.t();
        match self.blend {
            BlendMode::Linear => lerp_quaternion(&q1, &q2, t),
            BlendMode::Spherical => slerp_quaternion(&q1, &q2, t),
        }
    }

    /// Rotation part only, selected by the interpolation mode.
    pub fn rotation_matrix(&self) -> glm::Mat4 {
        match self.mode {
            InterpolationMode::Euler => euler_to_matrix(self.rot1.x, self.rot1.y, self.rot1.z),
            InterpolationMode::Quaternion => self.quat1.to_matrix(),
            InterpolationMode::EulerInterpolated => {
                let angles = lerp_euler(&self.rot1, &self.rot2, self.clock.t());
                euler_to_matrix(angles.x, angles.y, angles.z)
            }
            InterpolationMode::QuaternionInterpolated => {
                quaternion_to_mat4(&self.blended_quaternion())
            }
        }
    }

    pub fn model_matrix(&self) -> glm::Mat4 {
        self.composition.compose(
            &glm::translation(&self.translation),
            &self.rotation_matrix(),
            &glm::scaling(&self.scale),
        )
    }

    pub fn normal_matrix(&self) -> glm::Mat3 {
        normal_matrix(&self.model_matrix())
    }

    /// Zero both key orientations and the translation, unit scale. The clock
    /// and the composition are left alone.
    pub fn reset(&mut self) {
        self.rot1 = glm::vec3(0.0, 0.0, 0.0);
        self.rot2 = glm::vec3(0.0, 0.0, 0.0);
        self.quat1 = AxisAngle::default();
        self.quat2 = AxisAngle::default();
        self.translation = glm::vec3(0.0, 0.0, 0.0);
        self.scale = glm::vec3(1.0, 1.0, 1.0);
    }

    /// Make the Euler and axis-angle keys describe the same rotations.
    pub fn copy_configuration(&mut self, direction: CopyDirection) {
        match direction {
            CopyDirection::FromEuler => {
                self.quat1 = super::euler_to_axis_angle(self.rot1.x, self.rot1.y, self.rot1.z);
                self.quat2 = super::euler_to_axis_angle(self.rot2.x, self.rot2.y, self.rot2.z);
            }
            CopyDirection::ToEuler => {
                self.rot1 = self.quat1.to_euler();
                self.rot2 = self.quat2.to_euler();
            }
        }
        log::debug!("copied rotation keys {direction:?}");
    }
}

impl Default for RotationSystem {
    fn default() -> Self {
        Self::new(AnimationClock::default())
    }
}
