use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::CONFY_APP_NAME;
use crate::animation::{BlendMode, InterpolationMode};
use crate::error::LabError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub default_longitude: f32,
    pub default_latitude: f32,
    pub default_distance: f32,
    pub min_longitude: f32,
    pub max_longitude: f32,
    pub min_latitude: f32,
    pub max_latitude: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Degrees per pixel of mouse drag
    pub rotate_speed: f32,
    /// Distance units per scroll line
    pub zoom_speed: f32,
    /// Degrees per second while an orbit key is held
    pub key_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            default_longitude: 0.0,
            default_latitude: 0.0,
            default_distance: 8.0,
            min_longitude: -180.0,
            max_longitude: 180.0,
            min_latitude: -89.0,
            max_latitude: 89.0,
            min_distance: 2.0,
            max_distance: 14.0,
            fov_y: 45.0,
            near_plane: 0.01,
            far_plane: 100.0,
            rotate_speed: 0.3,
            zoom_speed: 0.5,
            key_speed: 90.0,
        }
    }
}

impl CameraSettings {
    pub fn load() -> Self {
        load_or_default("camera")
    }

    /// Reject values the camera cannot render with: the projection needs
    /// `0 < near < far` and a field of view inside `(0, 180)`, and each
    /// orbit range needs `min <= max`.
    pub fn validate(&self) -> Result<(), LabError> {
        let (near, far) = (self.near_plane, self.far_plane);
        if !(near.is_finite() && far.is_finite()) || near <= 0.0 || far <= near {
            return Err(LabError::new("invalid-clip-planes")
                .with_arg("near", near)
                .with_arg("far", far));
        }
        if !self.fov_y.is_finite() || self.fov_y <= 0.0 || self.fov_y >= 180.0 {
            return Err(LabError::new("invalid-fov").with_arg("fov_y", self.fov_y));
        }
        let ranges = [
            ("longitude", self.min_longitude, self.max_longitude),
            ("latitude", self.min_latitude, self.max_latitude),
            ("distance", self.min_distance, self.max_distance),
        ];
        for (name, min, max) in ranges {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(LabError::new("invalid-range")
                    .with_arg("field", name)
                    .with_arg("min", min)
                    .with_arg("max", max));
            }
        }
        if self.min_distance <= 0.0 {
            return Err(LabError::new("invalid-range")
                .with_arg("field", "distance")
                .with_arg("min", self.min_distance));
        }
        Ok(())
    }

    pub fn save(&self) {
        store_or_warn("camera", self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Seconds per loop of the interpolation parameter
    pub period: f32,
    pub animate: bool,
    pub mode: InterpolationMode,
    pub blend: BlendMode,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            period: crate::animation::clock::DEFAULT_PERIOD,
            animate: true,
            mode: InterpolationMode::default(),
            blend: BlendMode::default(),
        }
    }
}

impl AnimationSettings {
    pub fn load() -> Self {
        load_or_default("animation")
    }

    pub fn save(&self) {
        store_or_warn("animation", self);
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraSettings,
    pub animation: AnimationSettings,
}

impl Settings {
    /// Per-user config files; missing, unreadable or invalid files give defaults.
    pub fn load() -> Self {
        let mut camera = CameraSettings::load();
        if let Err(e) = camera.validate() {
            log::warn!("invalid camera settings, using defaults: {e}");
            camera = CameraSettings::default();
        }
        Self {
            camera,
            animation: AnimationSettings::load(),
        }
    }

    pub fn validate(&self) -> Result<(), LabError> {
        self.camera.validate()
    }

    pub fn save(&self) {
        self.camera.save();
        self.animation.save();
    }

    /// Single file holding both sections. Created with defaults when missing.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, LabError> {
        let path = path.as_ref();
        let error = || LabError::new("settings-load").with_arg("path", path.display());
        let settings: Self = confy::load_path(path).map_err(|e| error().push_std(e))?;
        settings.validate().map_err(|e| error().push_lab(e))?;
        Ok(settings)
    }

    pub fn store_path(&self, path: impl AsRef<Path>) -> Result<(), LabError> {
        let path = path.as_ref();
        confy::store_path(path, self).map_err(|e| {
            LabError::new("settings-store")
                .with_arg("path", path.display())
                .push_std(e)
        })
    }
}

fn load_or_default<T>(name: &str) -> T
where
    T: Serialize + for<'de> Deserialize<'de> + Default,
{
    confy::load(CONFY_APP_NAME, name).unwrap_or_else(|e| {
        log::warn!("failed to load {name} settings, using defaults: {e}");
        T::default()
    })
}

fn store_or_warn<T: Serialize>(name: &str, value: &T) {
    if let Err(e) = confy::store(CONFY_APP_NAME, name, value) {
        log::warn!("failed to store {name} settings: {e}");
    }
}
