use super::OrbitCamera;
use crate::settings::CameraSettings;

/// Allowed ranges for the orbit parameters, in degrees and distance units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraLimits {
    pub longitude: (f32, f32),
    pub latitude: (f32, f32),
    pub distance: (f32, f32),
}

impl CameraLimits {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            longitude: (settings.min_longitude, settings.max_longitude),
            latitude: (settings.min_latitude, settings.max_latitude),
            distance: (settings.min_distance, settings.max_distance),
        }
    }

    /// A full turn wraps around; a narrower range clamps.
    pub fn apply_longitude(&self, degrees: f32) -> f32 {
        let (min, max) = self.longitude;
        if max - min >= 360.0 {
            (degrees - min).rem_euclid(360.0) + min
        } else {
            degrees.clamp(min, max)
        }
    }

    pub fn apply_latitude(&self, degrees: f32) -> f32 {
        degrees.clamp(self.latitude.0, self.latitude.1)
    }

    pub fn apply_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.distance.0, self.distance.1)
    }
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

/// Orbit keys held during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrbitKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Handles camera input and transformations
pub struct CameraController {
    camera: OrbitCamera,
    limits: CameraLimits,
    rotate_speed: f32,
    zoom_speed: f32,
    key_speed: f32,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    aspect: f32,
}

impl CameraController {
    pub fn new(camera: OrbitCamera, limits: CameraLimits) -> Self {
        let defaults = CameraSettings::default();
        Self {
            camera,
            limits,
            rotate_speed: defaults.rotate_speed,
            zoom_speed: defaults.zoom_speed,
            key_speed: defaults.key_speed,
            mouse_pressed: false,
            last_mouse_pos: None,
            aspect: 1.0,
        }
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut controller = Self::new(
            OrbitCamera::from_settings(settings),
            CameraLimits::from_settings(settings),
        );
        controller.rotate_speed = settings.rotate_speed;
        controller.zoom_speed = settings.zoom_speed;
        controller.key_speed = settings.key_speed;
        controller
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn limits(&self) -> &CameraLimits {
        &self.limits
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Slider-style edits, clamped to the limits.
    pub fn set_longitude(&mut self, degrees: f32) {
        self.camera.set_longitude(self.limits.apply_longitude(degrees));
    }

    pub fn set_latitude(&mut self, degrees: f32) {
        self.camera.set_latitude(self.limits.apply_latitude(degrees));
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.camera.set_distance(self.limits.apply_distance(distance));
    }

    /// Handle mouse button press/release
    pub fn on_mouse_button(&mut self, pressed: bool) {
        self.mouse_pressed = pressed;
        if !pressed {
            self.last_mouse_pos = None;
        }
    }

    /// Handle mouse movement; returns true when the camera moved
    pub fn on_cursor_moved(&mut self, position: (f64, f64)) -> bool {
        if !self.mouse_pressed {
            self.last_mouse_pos = None;
            return false;
        }

        let mut handled = false;
        if let Some(last_pos) = self.last_mouse_pos {
            let delta_x = position.0 - last_pos.0;
            let delta_y = position.1 - last_pos.1;
            self.rotate(delta_x as f32, delta_y as f32);
            handled = true;
        }
        self.last_mouse_pos = Some(position);
        handled
    }

    /// Scroll up (positive) moves closer
    pub fn on_scroll(&mut self, delta: f32) {
        self.zoom(delta * self.zoom_speed);
    }

    pub fn on_keys(&mut self, keys: OrbitKeys, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let step = self.key_speed * dt;
        let horizontal = axis(keys.left, keys.right);
        let vertical = axis(keys.up, keys.down);
        if horizontal != 0.0 {
            self.set_longitude(self.camera.longitude() + horizontal * step);
        }
        if vertical != 0.0 {
            self.set_latitude(self.camera.latitude() + vertical * step);
        }
        let zoom = axis(keys.zoom_out, keys.zoom_in);
        if zoom != 0.0 {
            // scale so a full second of zoom crosses about half the range
            let range = self.limits.distance.1 - self.limits.distance.0;
            self.zoom(zoom * range * 0.5 * dt);
        }
    }

    /// Framebuffer resize. A zero-sized framebuffer (minimized window) is ignored.
    pub fn on_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring {width}x{height} viewport");
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.set_longitude(self.camera.longitude() - delta_x * self.rotate_speed);
        self.set_latitude(self.camera.latitude() + delta_y * self.rotate_speed);
    }

    fn zoom(&mut self, amount: f32) {
        self.set_distance(self.camera.distance() - amount);
    }

    pub fn view_matrix(&self) -> nalgebra_glm::Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> nalgebra_glm::Mat4 {
        self.camera.projection_matrix(self.aspect)
    }

    /// Reset camera to defaults
    pub fn reset(&mut self) {
        self.camera.reset();
        self.last_mouse_pos = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::from_settings(&CameraSettings::default())
    }

    #[test]
    fn drag_rotates_after_first_sample() {
        let mut c = controller();
        c.on_mouse_button(true);
        assert!(!c.on_cursor_moved((100.0, 100.0)));
        assert!(c.on_cursor_moved((110.0, 90.0)));
        assert!((c.camera().longitude() + 3.0).abs() < 1e-5);
        assert!((c.camera().latitude() + 3.0).abs() < 1e-5);
    }

    #[test]
    fn moving_without_button_does_nothing() {
        let mut c = controller();
        assert!(!c.on_cursor_moved((0.0, 0.0)));
        assert!(!c.on_cursor_moved((50.0, 50.0)));
        assert_eq!(c.camera().longitude(), 0.0);
    }

    #[test]
    fn release_forgets_last_position() {
        let mut c = controller();
        c.on_mouse_button(true);
        c.on_cursor_moved((0.0, 0.0));
        c.on_mouse_button(false);
        c.on_mouse_button(true);
        assert!(!c.on_cursor_moved((500.0, 0.0)));
        assert_eq!(c.camera().longitude(), 0.0);
    }

    #[test]
    fn latitude_is_clamped_inside_poles() {
        let mut c = controller();
        c.set_latitude(120.0);
        assert_eq!(c.camera().latitude(), 89.0);
        c.set_latitude(-95.0);
        assert_eq!(c.camera().latitude(), -89.0);
    }

    #[test]
    fn longitude_wraps_over_full_turn() {
        let mut c = controller();
        c.set_longitude(190.0);
        assert!((c.camera().longitude() + 170.0).abs() < 1e-4);
        c.set_longitude(-200.0);
        assert!((c.camera().longitude() - 160.0).abs() < 1e-4);
    }

    #[test]
    fn narrow_longitude_range_clamps() {
        let limits = CameraLimits {
            longitude: (-45.0, 45.0),
            ..CameraLimits::default()
        };
        assert_eq!(limits.apply_longitude(60.0), 45.0);
        assert_eq!(limits.apply_longitude(-60.0), -45.0);
    }

    #[test]
    fn scroll_zooms_within_limits() {
        let mut c = controller();
        c.on_scroll(2.0);
        assert_eq!(c.camera().distance(), 7.0);
        c.on_scroll(100.0);
        assert_eq!(c.camera().distance(), 2.0);
        c.on_scroll(-100.0);
        assert_eq!(c.camera().distance(), 14.0);
    }

    #[test]
    fn keys_orbit_at_key_speed() {
        let mut c = controller();
        let keys = OrbitKeys {
            right: true,
            up: true,
            ..OrbitKeys::default()
        };
        c.on_keys(keys, 0.5);
        assert!((c.camera().longitude() - 45.0).abs() < 1e-4);
        assert!((c.camera().latitude() + 45.0).abs() < 1e-4);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut c = controller();
        let keys = OrbitKeys {
            left: true,
            right: true,
            zoom_in: true,
            zoom_out: true,
            ..OrbitKeys::default()
        };
        c.on_keys(keys, 1.0);
        assert_eq!(c.camera().longitude(), 0.0);
        assert_eq!(c.camera().distance(), 8.0);
    }

    #[test]
    fn keys_ignore_nan_and_negative_dt() {
        let mut c = controller();
        let keys = OrbitKeys {
            right: true,
            zoom_in: true,
            ..OrbitKeys::default()
        };
        c.on_keys(keys, f32::NAN);
        c.on_keys(keys, -0.5);
        assert_eq!(c.camera().longitude(), 0.0);
        assert_eq!(c.camera().distance(), 8.0);
    }

    #[test]
    fn viewport_sets_aspect_and_ignores_zero() {
        let mut c = controller();
        c.on_viewport(900, 720);
        assert!((c.aspect() - 1.25).abs() < 1e-6);
        c.on_viewport(900, 0);
        assert!((c.aspect() - 1.25).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_camera() {
        let mut c = controller();
        c.set_longitude(33.0);
        c.set_distance(3.0);
        c.reset();
        assert_eq!(c.camera().longitude(), 0.0);
        assert_eq!(c.camera().distance(), 8.0);
    }
}
