//! Viewer configuration
//!
//! Plain structs with sensible defaults and builder-style setters. Nothing is read
//! from disk; the binary builds a [`ViewerConfig`] from its command line.

use cgmath::Point3;

use crate::importers::ImportOptions;

/// Start pose and tuning of the fly camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Point3<f32>,
    /// Degrees. -90 looks down the negative z axis.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub movement_speed: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 2.0),
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            movement_speed: 4.5,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 4.0,
            znear: 0.01,
            zfar: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn with_position(mut self, position: Point3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn with_movement_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }
}

/// Session-wide settings for [`crate::app::ViewerApp`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub clear_color: [f32; 4],
    pub camera: CameraConfig,
    /// Raw rotation offset applied per frame while an arrow key is held.
    pub key_rotate_step: f32,
    pub import: ImportOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800,
            viewport_height: 600,
            clear_color: [0.1, 0.2, 0.2, 1.0],
            camera: CameraConfig::default(),
            key_rotate_step: 0.1,
            import: ImportOptions::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_import_options(mut self, import: ImportOptions) -> Self {
        self.import = import;
        self
    }

    /// Width over height, falling back to 16:9 for an empty viewport.
    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            16.0 / 9.0
        } else {
            self.viewport_width as f32 / self.viewport_height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera.position, Point3::new(0.0, 0.0, 2.0));
        assert_eq!(config.camera.fov, 45.0);
        assert!(config.import.triangulate);
        assert_eq!(config.aspect_ratio(), 800.0 / 600.0);
    }

    #[test]
    fn test_empty_viewport_falls_back_to_widescreen() {
        let config = ViewerConfig::default().with_viewport(0, 0);
        assert_eq!(config.aspect_ratio(), 16.0 / 9.0);
    }
}
