use std::collections::HashSet;

use crate::input::{InputEvent, Key, MouseButton};

use super::fly_camera::{Camera, CameraMovement};

/// Turns input events into camera motion.
///
/// Key state is tracked between events; [`CameraController::update`] applies
/// movement for every held key once per frame.
pub struct CameraController {
    pub key_rotate_step: f32,
    held_keys: HashSet<Key>,
    is_middle_pressed: bool,
    last_cursor: Option<(f32, f32)>,
}

impl CameraController {
    pub fn new(key_rotate_step: f32) -> Self {
        Self {
            key_rotate_step,
            held_keys: HashSet::new(),
            is_middle_pressed: false,
            last_cursor: None,
        }
    }

    /// Updates held state and applies immediate effects (drag rotation, zoom, reset).
    pub fn process_event(&mut self, event: &InputEvent, camera: &mut Camera) {
        match *event {
            InputEvent::KeyDown(key) => {
                self.held_keys.insert(key);

                if key == Key::R && self.is_held(Key::LeftControl) {
                    log::debug!("resetting camera to its start pose");
                    camera.reset();
                }
            }
            InputEvent::KeyUp(key) => {
                self.held_keys.remove(&key);
            }
            InputEvent::MouseDown {
                button: MouseButton::Middle,
                x,
                y,
            } => {
                self.is_middle_pressed = true;
                self.last_cursor = Some((x, y));
            }
            InputEvent::MouseUp {
                button: MouseButton::Middle,
            } => {
                self.is_middle_pressed = false;
            }
            InputEvent::MouseMove { x, y } => {
                if let Some((last_x, last_y)) = self.last_cursor {
                    if self.is_middle_pressed {
                        camera.rotate(x - last_x, y - last_y, true);
                    }
                }
                self.last_cursor = Some((x, y));
            }
            InputEvent::MouseWheel { delta } => camera.zoom(delta),
            InputEvent::Resize { width, height } => camera.resize_projection(width, height),
            _ => (),
        }
    }

    /// Applies held keys. Called once per frame with the frame time.
    pub fn update(&self, camera: &mut Camera, delta_time: f32) {
        const MOVES: [(Key, CameraMovement); 6] = [
            (Key::W, CameraMovement::Forward),
            (Key::S, CameraMovement::Backward),
            (Key::A, CameraMovement::Left),
            (Key::D, CameraMovement::Right),
            (Key::Space, CameraMovement::Up),
            (Key::LeftShift, CameraMovement::Down),
        ];

        for (key, movement) in MOVES {
            if self.is_held(key) {
                camera.move_in(movement, delta_time);
            }
        }

        let step = self.key_rotate_step;
        if self.is_held(Key::ArrowRight) {
            camera.rotate(step, 0.0, true);
        }
        if self.is_held(Key::ArrowLeft) {
            camera.rotate(-step, 0.0, true);
        }
        if self.is_held(Key::ArrowUp) {
            camera.rotate(0.0, -step, true);
        }
        if self.is_held(Key::ArrowDown) {
            camera.rotate(0.0, step, true);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// Returns true while the middle button drags the view
    pub fn is_rotating(&self) -> bool {
        self.is_middle_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::Point3;

    fn setup() -> (CameraController, Camera) {
        (
            CameraController::new(0.1),
            Camera::new(Point3::new(0.0, 0.0, 2.0), 1.0),
        )
    }

    #[test]
    fn test_held_key_moves_every_update() {
        let (mut controller, mut camera) = setup();
        controller.process_event(&InputEvent::KeyDown(Key::Space), &mut camera);
        controller.update(&mut camera, 0.5);
        controller.update(&mut camera, 0.5);
        assert_abs_diff_eq!(camera.position().y, 4.5, epsilon = 1e-5);

        controller.process_event(&InputEvent::KeyUp(Key::Space), &mut camera);
        controller.update(&mut camera, 0.5);
        assert_abs_diff_eq!(camera.position().y, 4.5, epsilon = 1e-5);
    }

    #[test]
    fn test_middle_drag_rotates() {
        let (mut controller, mut camera) = setup();
        let yaw = camera.yaw();

        controller.process_event(&InputEvent::MouseMove { x: 10.0, y: 10.0 }, &mut camera);
        assert_eq!(camera.yaw(), yaw);

        controller.process_event(
            &InputEvent::MouseDown {
                button: MouseButton::Middle,
                x: 10.0,
                y: 10.0,
            },
            &mut camera,
        );
        controller.process_event(&InputEvent::MouseMove { x: 30.0, y: 10.0 }, &mut camera);
        assert!(controller.is_rotating());
        assert_abs_diff_eq!(camera.yaw() - yaw, 20.0 * camera.rotate_sensitivity, epsilon = 1e-6);
    }

    #[test]
    fn test_ctrl_r_resets_camera() {
        let (mut controller, mut camera) = setup();
        camera.set_position(Point3::new(5.0, 5.0, 5.0));

        controller.process_event(&InputEvent::KeyDown(Key::R), &mut camera);
        assert_eq!(camera.position(), Point3::new(5.0, 5.0, 5.0));

        controller.process_event(&InputEvent::KeyDown(Key::LeftControl), &mut camera);
        controller.process_event(&InputEvent::KeyDown(Key::R), &mut camera);
        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_wheel_zooms() {
        let (mut controller, mut camera) = setup();
        controller.process_event(&InputEvent::MouseWheel { delta: 1.0 }, &mut camera);
        assert_abs_diff_eq!(camera.fov_degrees(), 41.0, epsilon = 1e-4);
    }
}
