use cgmath::*;

use super::camera_utils::OPENGL_TO_WGPU_MATRIX;
use crate::config::CameraConfig;

/// Pitch limit applied by [`Camera::rotate`] when constrained, in degrees.
pub const MAX_ROTATE_PITCH: f32 = 89.5;
/// Pitch limit applied by [`Camera::set_pitch_degrees`], in degrees.
pub const MAX_SET_PITCH: f32 = 89.0;
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 90.0;
/// Aspect ratio used when the one given is zero, negative or not finite.
pub const FALLBACK_ASPECT: f32 = 16.0 / 9.0;
const FALLBACK_ZNEAR: f32 = 0.01;
const FALLBACK_ZFAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// First-person camera driven by yaw and pitch.
///
/// Angles are stored in radians. `front`, `right` and `up` are derived from them and
/// recomputed on every orientation change, so they are only readable.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Point3<f32>,
    yaw: f32,
    pitch: f32,
    fovy: f32,
    aspect: f32,
    pub movement_speed: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    znear: f32,
    zfar: f32,
    world_up: Vector3<f32>,
    front: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    home: CameraConfig,
}

impl Camera {
    pub fn new(position: Point3<f32>, aspect: f32) -> Self {
        Self::from_config(&CameraConfig::default().with_position(position), aspect)
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let (znear, zfar) = clip_planes(config.znear, config.zfar);
        let mut camera = Self {
            position: config.position,
            yaw: config.yaw.to_radians(),
            pitch: config
                .pitch
                .clamp(-MAX_SET_PITCH, MAX_SET_PITCH)
                .to_radians(),
            fovy: fov_radians(config.fov).unwrap_or(45f32.to_radians()),
            aspect: sanitize_aspect(aspect),
            movement_speed: config.movement_speed,
            rotate_sensitivity: config.rotate_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
            znear,
            zfar,
            world_up: Vector3::unit_y(),
            front: -Vector3::unit_z(),
            right: Vector3::unit_x(),
            up: Vector3::unit_y(),
            home: *config,
        };
        camera.update_vectors();
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn world_up(&self) -> Vector3<f32> {
        self.world_up
    }

    /// Yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in radians.
    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw.to_degrees()
    }

    pub fn set_yaw_degrees(&mut self, yaw: f32) {
        self.yaw = yaw.to_radians();
        self.update_vectors();
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch.to_degrees()
    }

    /// Sets pitch from degrees, clamped to ±89°.
    pub fn set_pitch_degrees(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-MAX_SET_PITCH, MAX_SET_PITCH).to_radians();
        self.update_vectors();
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fovy.to_degrees()
    }

    /// Sets the field of view from degrees, clamped to [1°, 90°]. NaN is ignored.
    pub fn set_fov_degrees(&mut self, fov: f32) {
        if let Some(fovy) = fov_radians(fov) {
            self.fovy = fovy;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Width over height. Zero, negative or non-finite values fall back to 16:9.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    pub fn znear(&self) -> f32 {
        self.znear
    }

    pub fn zfar(&self) -> f32 {
        self.zfar
    }

    /// Sets the clip planes, keeping `0 < znear < zfar`.
    pub fn set_clip_planes(&mut self, znear: f32, zfar: f32) {
        (self.znear, self.zfar) = clip_planes(znear, zfar);
    }

    /// Moves along the camera axes, or along world up for `Up`/`Down`.
    pub fn move_in(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;

        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    /// Applies a raw mouse/key offset. Positive `dy` looks down.
    pub fn rotate(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        self.yaw += dx * self.rotate_sensitivity;
        self.pitch -= dy * self.rotate_sensitivity;

        if constrain_pitch {
            let max_pitch = MAX_ROTATE_PITCH.to_radians();
            self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
        }

        self.update_vectors();
    }

    /// Narrows the field of view for positive `dy` (scroll up).
    pub fn zoom(&mut self, dy: f32) {
        if let Some(fovy) = fov_radians(self.fov_degrees() - dy * self.zoom_sensitivity) {
            self.fovy = fovy;
        }
    }

    /// Returns to the pose the camera was configured with.
    pub fn reset(&mut self) {
        let aspect = self.aspect;
        let home = self.home;
        *self = Self::from_config(&home, aspect);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.set_aspect(width as f32 / height as f32);
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL-style perspective projection (depth in [-1, 1]).
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(Rad(self.fovy), self.aspect, self.znear, self.zfar)
    }

    /// Combined matrix for the GPU, with depth remapped to [0, 1].
    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix() * self.view_matrix()
    }

    /// Recomputes the basis after `yaw` or `pitch` changed.
    fn update_vectors(&mut self) {
        let front = Vector3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

fn fov_radians(degrees: f32) -> Option<f32> {
    (!degrees.is_nan()).then(|| degrees.clamp(MIN_FOV, MAX_FOV).to_radians())
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        FALLBACK_ASPECT
    }
}

fn clip_planes(znear: f32, zfar: f32) -> (f32, f32) {
    let znear = if znear.is_finite() && znear > 0.0 {
        znear
    } else {
        FALLBACK_ZNEAR
    };
    let zfar = if zfar.is_finite() && zfar > znear {
        zfar
    } else if FALLBACK_ZFAR > znear {
        FALLBACK_ZFAR
    } else {
        znear * 2.0
    };
    (znear, zfar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn camera() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, 2.0), 16.0 / 9.0)
    }

    #[test]
    fn test_default_basis_looks_down_negative_z() {
        let camera = camera();
        assert_abs_diff_eq!(camera.front(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_abs_diff_eq!(camera.right(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(camera.up(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_setter_clamps_to_89_degrees() {
        let mut camera = camera();
        camera.set_pitch_degrees(95.0);
        assert_abs_diff_eq!(camera.pitch(), 89.0f32.to_radians(), epsilon = 1e-6);

        camera.set_pitch_degrees(-120.0);
        assert_abs_diff_eq!(camera.pitch_degrees(), -89.0, epsilon = 1e-4);
    }

    #[test]
    fn test_constrained_rotate_clamps_to_89_5_degrees() {
        let mut camera = camera();
        camera.rotate(0.0, -10_000.0, true);
        assert_abs_diff_eq!(camera.pitch(), 89.5f32.to_radians(), epsilon = 1e-6);

        camera.rotate(0.0, 20_000.0, true);
        assert_abs_diff_eq!(camera.pitch(), -89.5f32.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_unconstrained_rotate_does_not_clamp() {
        let mut camera = camera();
        camera.rotate(0.0, -400.0, false);
        assert_abs_diff_eq!(camera.pitch(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_updates_yaw_and_basis() {
        let mut camera = camera();
        let quarter_turn = std::f32::consts::FRAC_PI_2 / camera.rotate_sensitivity;
        camera.rotate(quarter_turn, 0.0, true);

        assert_abs_diff_eq!(camera.yaw_degrees(), 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(camera.front(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(camera.right(), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = camera();
        for _ in 0..100 {
            camera.zoom(-5.0);
            assert!(camera.fov_degrees() <= 90.0 + 1e-4);
        }
        assert_abs_diff_eq!(camera.fov_degrees(), 90.0, epsilon = 1e-4);

        for _ in 0..100 {
            camera.zoom(5.0);
            assert!(camera.fov_degrees() >= 1.0 - 1e-4);
        }
        assert_abs_diff_eq!(camera.fov_degrees(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_fov_setter_clamps() {
        let mut camera = camera();
        camera.set_fov_degrees(120.0);
        assert_abs_diff_eq!(camera.fov_degrees(), 90.0, epsilon = 1e-4);
        camera.set_fov_degrees(0.0);
        assert_abs_diff_eq!(camera.fov_degrees(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_vertical_movement_uses_world_up() {
        let mut camera = camera();
        camera.set_pitch_degrees(45.0);
        camera.move_in(CameraMovement::Up, 1.0);

        assert_abs_diff_eq!(camera.position(), Point3::new(0.0, 4.5, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_planar_movement_follows_basis() {
        let mut camera = camera();
        camera.move_in(CameraMovement::Forward, 0.5);
        assert_abs_diff_eq!(camera.position(), Point3::new(0.0, 0.0, -0.25), epsilon = 1e-5);

        camera.move_in(CameraMovement::Right, 1.0);
        camera.move_in(CameraMovement::Left, 0.5);
        assert_abs_diff_eq!(camera.position(), Point3::new(2.25, 0.0, -0.25), epsilon = 1e-5);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = camera();
        let eye = camera.view_matrix() * camera.position().to_homogeneous();
        assert_abs_diff_eq!(eye, Vector4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_reset_restores_configured_pose() {
        let mut camera = camera();
        camera.move_in(CameraMovement::Forward, 3.0);
        camera.rotate(100.0, 50.0, true);
        camera.zoom(3.0);
        camera.reset();

        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 2.0));
        assert_abs_diff_eq!(camera.yaw_degrees(), -90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.fov_degrees(), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_resize_ignores_empty_viewport() {
        let mut camera = camera();
        camera.resize_projection(1000, 500);
        assert_eq!(camera.aspect(), 2.0);
        camera.resize_projection(1000, 0);
        assert_eq!(camera.aspect(), 2.0);
    }

    #[test]
    fn test_bad_aspect_falls_back_to_widescreen() {
        for aspect in [0.0, -1.5, f32::NAN, f32::INFINITY] {
            let camera = Camera::new(Point3::new(0.0, 0.0, 2.0), aspect);
            assert_eq!(camera.aspect(), FALLBACK_ASPECT);
            // Building the projection must not trip cgmath's assertions.
            let _ = camera.build_view_projection_matrix();
        }

        let mut camera = camera();
        camera.set_aspect(0.0);
        assert_eq!(camera.aspect(), FALLBACK_ASPECT);
        camera.set_aspect(0.5);
        assert_eq!(camera.aspect(), 0.5);
    }

    #[test]
    fn test_clip_planes_stay_ordered_and_positive() {
        let mut camera = camera();
        camera.set_clip_planes(0.1, 50.0);
        assert_eq!((camera.znear(), camera.zfar()), (0.1, 50.0));

        camera.set_clip_planes(0.0, 50.0);
        assert_eq!((camera.znear(), camera.zfar()), (0.01, 50.0));

        camera.set_clip_planes(5.0, 5.0);
        assert_eq!((camera.znear(), camera.zfar()), (5.0, 100.0));

        camera.set_clip_planes(200.0, f32::NAN);
        assert_eq!((camera.znear(), camera.zfar()), (200.0, 400.0));
        let _ = camera.projection_matrix();
    }

    #[test]
    fn test_nan_fov_input_is_ignored() {
        let mut camera = camera();
        camera.set_fov_degrees(f32::NAN);
        camera.zoom(f32::NAN);
        assert_abs_diff_eq!(camera.fov_degrees(), 45.0, epsilon = 1e-4);
    }
}
