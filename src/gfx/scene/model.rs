use cgmath::{Deg, Matrix4, Rad, Vector3};

use super::mesh::Mesh;
use crate::gfx::{
    geometry::BoundingBox,
    resources::backend::{BackendError, GraphicsBackend},
};

/// Local transform of a model. Rotation holds Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// World-from-object matrix.
    ///
    /// Points are scaled first, then rotated about Y, then X, then Z, and finally
    /// translated. Picking and rendering both go through here so they always agree.
    pub fn matrix(&self) -> Matrix4<f32> {
        let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        let rotation = Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y));
        let translation = Matrix4::from_translation(self.position);

        translation * rotation * scale
    }

    pub fn rotation_degrees(&self) -> Vector3<f32> {
        self.rotation.map(|angle| Deg::from(Rad(angle)).0)
    }

    pub fn with_rotation_degrees(mut self, degrees: Vector3<f32>) -> Self {
        self.rotation = degrees.map(|angle| Rad::from(Deg(angle)).0);
        self
    }
}

/// Imported model: owned meshes, a display name and a local transform.
///
/// The local bounding box is fitted once at construction. The world box is
/// recomputed on every query because the transform may change between queries.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    local_bounds: BoundingBox,
    transform: Transform,
}

impl Model {
    pub fn new(meshes: Vec<Mesh>, name: impl Into<String>) -> Self {
        let local_bounds = BoundingBox::from_points(meshes.iter().flat_map(Mesh::positions));

        Self {
            name: name.into(),
            meshes,
            local_bounds,
            transform: Transform::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn local_bounds(&self) -> &BoundingBox {
        &self.local_bounds
    }

    /// Bounding box in world space under the current transform.
    pub fn world_bounds(&self) -> BoundingBox {
        self.local_bounds.apply_transform(&self.model_matrix())
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }

    /// Copy of the current transform. Edit it and commit with [`Model::set_transform`].
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.transform.position = position;
    }

    /// Euler angles in radians.
    pub fn set_rotation(&mut self, rotation: Vector3<f32>) {
        self.transform.rotation = rotation;
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.transform.scale = scale;
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Uploads every mesh. On failure the meshes uploaded so far are released again.
    pub fn upload(&mut self, backend: &mut dyn GraphicsBackend) -> Result<(), BackendError> {
        for index in 0..self.meshes.len() {
            if let Err(err) = self.meshes[index].upload(backend) {
                self.release(backend);
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn release(&mut self, backend: &mut dyn GraphicsBackend) {
        for mesh in &mut self.meshes {
            mesh.release(backend);
        }
    }
}
