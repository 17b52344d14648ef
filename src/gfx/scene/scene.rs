use cgmath::{Point3, Vector3};

use super::{light::Light, model::Model};
use crate::gfx::{
    camera::Camera,
    geometry::BoundingBox,
    picking::{self, PickResult, Ray},
    resources::backend::GraphicsBackend,
};

/// Main scene containing models, cameras and lights
pub struct Scene {
    models: Vec<Model>,
    cameras: Vec<Camera>,
    active_camera: usize,
    lights: Vec<Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene with a camera at (0, 0, 2) and a point light at (1, 1, 1).
    pub fn new() -> Self {
        Self::with_camera(Camera::new(Point3::new(0.0, 0.0, 2.0), 16.0 / 9.0))
    }

    pub fn with_camera(camera: Camera) -> Self {
        Self {
            models: Vec::new(),
            cameras: vec![camera],
            active_camera: 0,
            lights: vec![Light::default_point(Vector3::new(1.0, 1.0, 1.0))],
        }
    }

    /// Adds a model, renaming it if the name is already taken. Returns its index.
    pub fn add_model(&mut self, mut model: Model) -> usize {
        let name = self.ensure_unique_name(model.name());
        model.set_name(name);
        self.models.push(model);
        self.models.len() - 1
    }

    /// Removes a model and frees its GPU buffers.
    pub fn remove_model(
        &mut self,
        index: usize,
        backend: &mut dyn GraphicsBackend,
    ) -> Option<Model> {
        if index >= self.models.len() {
            return None;
        }
        let mut model = self.models.remove(index);
        model.release(backend);
        Some(model)
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model(&self, index: usize) -> Option<&Model> {
        self.models.get(index)
    }

    pub fn model_mut(&mut self, index: usize) -> Option<&mut Model> {
        self.models.get_mut(index)
    }

    pub fn find_model(&self, name: &str) -> Option<usize> {
        self.models.iter().position(|model| model.name() == name)
    }

    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn active_camera(&self) -> &Camera {
        &self.cameras[self.active_camera]
    }

    pub fn active_camera_mut(&mut self) -> &mut Camera {
        &mut self.cameras[self.active_camera]
    }

    /// Returns false, leaving the active camera unchanged, if `index` is out of range.
    pub fn set_active_camera(&mut self, index: usize) -> bool {
        if index < self.cameras.len() {
            self.active_camera = index;
            true
        } else {
            false
        }
    }

    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// World-space ray through a viewport pixel, starting at the active camera.
    ///
    /// `None` for an empty viewport, which has no pixels to cast through.
    pub fn world_ray_from_screen_point(
        &self,
        x: f32,
        y: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Option<Ray> {
        if viewport_width == 0 || viewport_height == 0 {
            return None;
        }

        let ray = picking::screen_to_ray(
            (x, y),
            (viewport_width as f32, viewport_height as f32),
            self.active_camera(),
        );
        ray.is_valid().then_some(ray)
    }

    /// Closest model under a viewport pixel, with its index and hit distance.
    pub fn pick_index(
        &self,
        x: f32,
        y: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Option<PickResult> {
        let ray = self.world_ray_from_screen_point(x, y, viewport_width, viewport_height)?;
        let result = self.pick_with_ray(&ray);
        log::trace!("pick at ({x}, {y}) -> {result:?}");
        result
    }

    /// Tests every model's current world box against `ray`.
    pub fn pick_with_ray(&self, ray: &Ray) -> Option<PickResult> {
        picking::closest_hit(ray, self.models.iter().map(Model::world_bounds))
    }

    /// Closest model under a viewport pixel.
    pub fn select_model(
        &self,
        x: f32,
        y: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Option<&Model> {
        self.pick_index(x, y, viewport_width, viewport_height)
            .map(|hit| &self.models[hit.model_index])
    }

    /// World box around every model, or `None` for an empty scene.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.models
            .iter()
            .map(Model::world_bounds)
            .reduce(|acc, bbox| acc.union(&bbox))
    }

    /// Frees the GPU buffers of every model, keeping the CPU-side data.
    pub fn release_all(&mut self, backend: &mut dyn GraphicsBackend) {
        for model in &mut self.models {
            model.release(backend);
        }
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let mut materials: Vec<&str> = self
            .models
            .iter()
            .flat_map(|model| model.meshes())
            .map(|mesh| mesh.material().name.as_str())
            .collect();
        materials.sort_unstable();
        materials.dedup();

        SceneStatistics {
            model_count: self.models.len(),
            mesh_count: self.models.iter().map(|model| model.meshes().len()).sum(),
            material_count: materials.len(),
            total_triangles: self.models.iter().map(Model::triangle_count).sum(),
            total_vertices: self.models.iter().map(Model::vertex_count).sum(),
            light_count: self.lights.len(),
        }
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.models.iter().any(|model| model.name() == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub model_count: usize,
    pub mesh_count: usize,
    pub material_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
    pub light_count: usize,
}
