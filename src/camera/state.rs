use nalgebra_glm as glm;

use crate::settings::CameraSettings;

/// Camera orbiting a fixed target on a sphere.
///
/// Only longitude, latitude and distance are stored; the eye is derived from
/// them on every call. The setters do not clamp: latitudes at or past ±90°
/// still produce an eye position, but the view flips around the up vector.
/// Range enforcement belongs to the input side (see `CameraController`).
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    longitude: f32,
    latitude: f32,
    distance: f32,
    target: glm::Vec3,
    up: glm::Vec3,
    fov_y: f32,
    near: f32,
    far: f32,
    default_longitude: f32,
    default_latitude: f32,
    default_distance: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, target: glm::Vec3) -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            distance,
            target,
            up: glm::vec3(0.0, 1.0, 0.0),
            fov_y: 45.0,
            near: 0.01,
            far: 100.0,
            default_longitude: 0.0,
            default_latitude: 0.0,
            default_distance: distance,
        }
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self::new(settings.default_distance, glm::vec3(0.0, 0.0, 0.0));
        camera.default_longitude = settings.default_longitude;
        camera.default_latitude = settings.default_latitude;
        camera.longitude = settings.default_longitude;
        camera.latitude = settings.default_latitude;
        camera.set_clip_planes(settings.near_plane, settings.far_plane);
        camera.fov_y = settings.fov_y;
        camera
    }

    /// Degrees
    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    /// Degrees
    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_longitude(&mut self, degrees: f32) {
        self.longitude = degrees;
    }

    pub fn set_latitude(&mut self, degrees: f32) {
        self.latitude = degrees;
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    pub fn target(&self) -> glm::Vec3 {
        self.target
    }

    pub fn up(&self) -> glm::Vec3 {
        self.up
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn clip_planes(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    /// Callers keep `0 < near < far`; `Settings` validation enforces it for
    /// loaded configs and `glm::perspective` panics otherwise.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// `target + Ry(longitude) * Rx(latitude) * (0, 0, distance)`.
    ///
    /// Longitude +90° puts the eye on +X; positive latitude moves it toward -Y.
    pub fn eye_position(&self) -> glm::Vec3 {
        let latitude = glm::rotation(self.latitude.to_radians(), &glm::vec3(1.0, 0.0, 0.0));
        let longitude = glm::rotation(self.longitude.to_radians(), &glm::vec3(0.0, 1.0, 0.0));
        let eye = longitude * latitude * glm::vec4(0.0, 0.0, self.distance, 1.0);
        self.target + glm::vec4_to_vec3(&eye)
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at(&self.eye_position(), &self.target, &self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> glm::Mat4 {
        glm::perspective(aspect, self.fov_y.to_radians(), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> glm::Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    pub fn reset(&mut self) {
        self.longitude = self.default_longitude;
        self.latitude = self.default_latitude;
        self.distance = self.default_distance;
    }

    /// Map a window point back to world space.
    ///
    /// `window` is `(x, y, depth)` with the origin at the bottom-left of
    /// `viewport = (x, y, width, height)` and depth in `[0, 1]`.
    /// Returns `None` for an empty viewport or a singular view-projection.
    pub fn unproject(&self, window: &glm::Vec3, viewport: &glm::Vec4) -> Option<glm::Vec3> {
        if !is_drawable(viewport.z) || !is_drawable(viewport.w) {
            return None;
        }
        let aspect = viewport.z / viewport.w;
        let inverse = self.view_projection(aspect).try_inverse()?;
        let ndc = glm::vec4(
            (window.x - viewport.x) / viewport.z * 2.0 - 1.0,
            (window.y - viewport.y) / viewport.w * 2.0 - 1.0,
            window.z * 2.0 - 1.0,
            1.0,
        );
        let world = inverse * ndc;
        if world.w.abs() <= f32::EPSILON {
            return None;
        }
        Some(glm::vec4_to_vec3(&world) / world.w)
    }

    /// Ray from the eye through a window point, as `(origin, unit direction)`.
    pub fn pick_ray(&self, x: f32, y: f32, viewport: &glm::Vec4) -> Option<(glm::Vec3, glm::Vec3)> {
        let far = self.unproject(&glm::vec3(x, y, 1.0), viewport)?;
        let eye = self.eye_position();
        let direction = far - eye;
        let length = glm::length(&direction);
        if length.is_nan() || length <= f32::EPSILON {
            return None;
        }
        Some((eye, direction / length))
    }
}

fn is_drawable(extent: f32) -> bool {
    extent.is_finite() && extent > 0.0
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}
