use crate::animation::{AnimationClock, RotationSystem};
use crate::camera::CameraController;
use crate::settings::Settings;
use crate::uniforms::FrameUniforms;

/// Everything one window needs to produce a frame: the camera, the animated
/// rotation and a frame counter.
///
/// Input handlers mutate the camera and rotation between ticks; `tick` is
/// then called once per frame.
pub struct Scene {
    camera: CameraController,
    rotation: RotationSystem,
    frame: u64,
}

impl Scene {
    pub fn new(settings: &Settings) -> Self {
        let clock = AnimationClock::new(settings.animation.period, settings.animation.animate);
        let mut rotation = RotationSystem::new(clock);
        rotation.set_mode(settings.animation.mode);
        rotation.set_blend(settings.animation.blend);

        log::debug!(
            "scene created: distance={} mode={:?} blend={:?} period={}s",
            settings.camera.default_distance,
            settings.animation.mode,
            settings.animation.blend,
            settings.animation.period
        );

        Self {
            camera: CameraController::from_settings(&settings.camera),
            rotation,
            frame: 0,
        }
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    pub fn rotation(&self) -> &RotationSystem {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut RotationSystem {
        &mut self.rotation
    }

    /// Frames produced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the animation by `dt` seconds and build this frame's uniforms.
    pub fn tick(&mut self, dt: f32) -> FrameUniforms {
        let t = self.rotation.update(dt);
        self.frame += 1;
        log::trace!("frame {} t={t:.4}", self.frame);
        self.uniforms()
    }

    /// Uniforms for the current state without advancing time.
    pub fn uniforms(&self) -> FrameUniforms {
        let camera = self.camera.camera();
        FrameUniforms::new(
            &self.camera.view_matrix(),
            &self.camera.projection_matrix(),
            &self.rotation.model_matrix(),
            &self.rotation.normal_matrix(),
            &camera.eye_position(),
        )
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{InterpolationMode, KeyRotation};
    use nalgebra_glm as glm;

    #[test]
    fn default_scene_looks_down_negative_z() {
        let scene = Scene::default();
        let u = scene.uniforms();
        assert_eq!(u.eye, [0.0, 0.0, 8.0, 1.0]);
        // view translates the target to z = -8
        assert!((u.view[3][2] + 8.0).abs() < 1e-5);
    }

    #[test]
    fn tick_counts_frames_and_advances_clock() {
        let mut scene = Scene::default();
        scene.tick(0.75);
        scene.tick(0.75);
        assert_eq!(scene.frame(), 2);
        assert!((scene.rotation().clock().t() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn uniforms_follow_rotation_mode() {
        let mut settings = Settings::default();
        settings.animation.animate = false;
        let mut scene = Scene::new(&settings);
        scene.rotation_mut().set_mode(InterpolationMode::Euler);
        scene
            .rotation_mut()
            .set_euler(KeyRotation::First, glm::vec3(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let u = scene.tick(1.0 / 60.0);
        // +X rotates onto -Z
        assert!((u.model[0][2] + 1.0).abs() < 1e-5);
        assert!(u.normal.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn viewport_changes_projection_aspect() {
        let mut scene = Scene::default();
        scene.camera_mut().on_viewport(1600, 800);
        let u = scene.uniforms();
        assert!((u.projection[1][1] / u.projection[0][0] - 2.0).abs() < 1e-4);
    }
}
