use std::path::Path;

use crate::{
    config::ViewerConfig,
    gfx::{
        camera::{Camera, CameraController},
        rendering::FrameUniforms,
        resources::{backend::GraphicsBackend, ResourceCache},
        scene::{Model, Scene, Transform},
    },
    importers::ImportError,
    input::{InputEvent, Key, MouseButton},
};

/// One viewer session: the scene, the resources loaded for it and the current selection.
///
/// The windowing layer feeds [`InputEvent`]s into [`ViewerApp::handle_event`], calls
/// [`ViewerApp::update`] once per frame and hands [`ViewerApp::frame_uniforms`] to the
/// renderer.
pub struct ViewerApp<B: GraphicsBackend> {
    config: ViewerConfig,
    scene: Scene,
    resources: ResourceCache<B>,
    controller: CameraController,
    selected: Option<usize>,
    viewport: (u32, u32),
    exit_requested: bool,
}

impl<B: GraphicsBackend> ViewerApp<B> {
    pub fn new(config: ViewerConfig, backend: B) -> Self {
        let camera = Camera::from_config(&config.camera, config.aspect_ratio());

        Self {
            scene: Scene::with_camera(camera),
            resources: ResourceCache::new(backend, config.import),
            controller: CameraController::new(config.key_rotate_step),
            selected: None,
            viewport: (config.viewport_width, config.viewport_height),
            exit_requested: false,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn resources(&self) -> &ResourceCache<B> {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceCache<B> {
        &mut self.resources
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Imports a model file, uploads it and adds it to the scene.
    ///
    /// On any failure the scene is left exactly as it was.
    pub fn import_model(&mut self, path: &Path) -> Result<usize, ImportError> {
        let mut model = self.resources.load_model(path)?;
        model.upload(self.resources.backend_mut())?;

        let index = self.scene.add_model(model);
        log::info!(
            "added '{}' to the scene as model {index}",
            self.scene.models()[index].name()
        );
        Ok(index)
    }

    /// Removes a model, freeing its buffers and keeping the selection pointing at the
    /// same model.
    pub fn remove_model(&mut self, index: usize) -> Option<Model> {
        let removed = self
            .scene
            .remove_model(index, self.resources.backend_mut())?;

        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        Some(removed)
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize { width, height } => {
                if width > 0 && height > 0 {
                    self.viewport = (width, height);
                }
            }
            InputEvent::MouseDown {
                button: MouseButton::Left,
                x,
                y,
            } => {
                self.select_at(x, y);
            }
            InputEvent::KeyDown(Key::Escape) => self.exit_requested = true,
            _ => (),
        }

        self.controller
            .process_event(&event, self.scene.active_camera_mut());
    }

    /// Per-frame update for held keys.
    pub fn update(&mut self, delta_time: f32) {
        self.controller
            .update(self.scene.active_camera_mut(), delta_time);
    }

    /// Selects the closest model under a viewport pixel, clearing the selection on a miss.
    pub fn select_at(&mut self, x: f32, y: f32) -> Option<usize> {
        let (width, height) = self.viewport;
        self.selected = self
            .scene
            .pick_index(x, y, width, height)
            .map(|hit| hit.model_index);

        if let Some(index) = self.selected {
            log::debug!("selected '{}'", self.scene.models()[index].name());
        }
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Model> {
        self.selected.and_then(|index| self.scene.model(index))
    }

    /// Copy of the selected model's transform.
    pub fn selected_transform(&self) -> Option<Transform> {
        self.selected().map(Model::transform)
    }

    /// Replaces the selected model's transform in one step. Returns false if nothing
    /// is selected.
    pub fn set_selected_transform(&mut self, transform: Transform) -> bool {
        match self.selected.and_then(|index| self.scene.model_mut(index)) {
            Some(model) => {
                model.set_transform(transform);
                true
            }
            None => false,
        }
    }

    pub fn frame_uniforms(&self) -> FrameUniforms<'_> {
        FrameUniforms::from_scene(&self.scene)
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Releases every GPU resource the session holds and returns the backend.
    pub fn shutdown(mut self) -> B {
        self.scene.release_all(self.resources.backend_mut());
        self.resources.into_backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        resources::backend::HeadlessBackend,
        scene::{Mesh, Vertex},
    };
    use cgmath::{Point3, Vector3};

    fn app() -> ViewerApp<HeadlessBackend> {
        ViewerApp::new(ViewerConfig::default(), HeadlessBackend::new())
    }

    fn cube_at(z: f32) -> Model {
        let vertices = [[-1.0, -1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]]
            .into_iter()
            .map(|p| Vertex::new(p, [0.0; 3], [0.0; 2]))
            .collect();
        let mut model = Model::new(vec![Mesh::new(vertices, vec![0, 1, 2], None)], "cube");
        model.set_position(Vector3::new(0.0, 0.0, z));
        model
    }

    #[test]
    fn test_camera_starts_from_config() {
        let app = app();
        let camera = app.scene().active_camera();
        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 2.0));
        assert_eq!(camera.aspect(), 800.0 / 600.0);
        assert_eq!(app.viewport(), (800, 600));
    }

    #[test]
    fn test_left_click_selects_and_miss_clears() {
        let mut app = app();
        app.scene_mut().add_model(cube_at(-4.0));
        let near = app.scene_mut().add_model(cube_at(-2.0));

        app.handle_event(InputEvent::MouseDown {
            button: MouseButton::Left,
            x: 400.0,
            y: 300.0,
        });
        assert_eq!(app.selected_index(), Some(near));
        assert_eq!(app.selected().map(Model::name), Some("cube (1)"));

        // Top-left corner looks past both cubes.
        app.handle_event(InputEvent::MouseDown {
            button: MouseButton::Left,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(app.selected_index(), None);
    }

    #[test]
    fn test_selected_transform_is_committed_atomically() {
        let mut app = app();
        app.scene_mut().add_model(cube_at(-3.0));
        assert!(!app.set_selected_transform(Transform::default()));

        app.select_at(400.0, 300.0).expect("cube under the cursor");
        let mut transform = app.selected_transform().expect("selection");
        transform.position.x = 10.0;
        assert_eq!(app.scene().models()[0].transform().position.x, 0.0);

        assert!(app.set_selected_transform(transform));
        assert_eq!(app.scene().models()[0].transform().position.x, 10.0);
    }

    #[test]
    fn test_remove_model_shifts_selection() {
        let mut app = app();
        app.scene_mut().add_model(cube_at(-10.0));
        app.scene_mut().add_model(cube_at(-3.0));
        app.select_at(400.0, 300.0);
        assert_eq!(app.selected_index(), Some(1));

        app.remove_model(0).expect("first model");
        assert_eq!(app.selected_index(), Some(0));

        app.remove_model(0).expect("selected model");
        assert_eq!(app.selected_index(), None);
        assert!(app.remove_model(0).is_none());
    }

    #[test]
    fn test_resize_updates_viewport_and_camera() {
        let mut app = app();
        app.handle_event(InputEvent::Resize {
            width: 1000,
            height: 500,
        });
        assert_eq!(app.viewport(), (1000, 500));
        assert_eq!(app.scene().active_camera().aspect(), 2.0);

        app.handle_event(InputEvent::Resize {
            width: 0,
            height: 0,
        });
        assert_eq!(app.viewport(), (1000, 500));
    }

    #[test]
    fn test_held_key_moves_camera_on_update() {
        let mut app = app();
        app.handle_event(InputEvent::KeyDown(Key::W));
        app.update(1.0);
        app.handle_event(InputEvent::KeyUp(Key::W));
        app.update(1.0);

        let z = app.scene().active_camera().position().z;
        assert!((z - (2.0 - 4.5)).abs() < 1e-4, "camera z was {z}");
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut app = app();
        assert!(!app.should_exit());
        app.handle_event(InputEvent::KeyDown(Key::Escape));
        assert!(app.should_exit());
    }

    #[test]
    fn test_shutdown_releases_uploaded_models() {
        let mut app = app();
        let mut model = cube_at(0.0);
        model
            .upload(app.resources_mut().backend_mut())
            .expect("upload");
        app.scene_mut().add_model(model);
        assert_eq!(app.resources().backend().live_buffers(), 2);

        let backend = app.shutdown();
        assert_eq!(backend.live_buffers(), 0);
    }

    #[test]
    fn test_failed_import_leaves_scene_untouched() {
        let mut app = app();
        app.scene_mut().add_model(cube_at(0.0));
        let err = app.import_model(Path::new("/missing/model.obj")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
        assert_eq!(app.scene().models().len(), 1);
    }
}
