use std::sync::Arc;

use cgmath::Point3;

use super::vertex::Vertex;
use crate::gfx::resources::{
    backend::{BackendError, GraphicsBackend, MeshBuffers},
    material::Material,
};

/// Indexed triangle geometry with one material.
///
/// GPU buffers are created by [`Mesh::upload`] and must be handed back through
/// [`Mesh::release`]; dropping a mesh that still holds buffers logs a leak.
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    material: Arc<Material>,
    buffers: Option<MeshBuffers>,
}

impl Mesh {
    /// Meshes without a material get their own default one.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material: Option<Arc<Material>>) -> Self {
        Self {
            vertices,
            indices,
            material: material.unwrap_or_default(),
            buffers: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.vertices.iter().map(Vertex::position)
    }

    pub fn buffers(&self) -> Option<&MeshBuffers> {
        self.buffers.as_ref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.buffers.is_some()
    }

    /// Creates the vertex and index buffers. Does nothing if they already exist.
    pub fn upload(&mut self, backend: &mut dyn GraphicsBackend) -> Result<(), BackendError> {
        if self.buffers.is_none() {
            self.buffers = Some(backend.create_mesh_buffers(&self.vertices, &self.indices)?);
        }
        Ok(())
    }

    /// Frees the GPU buffers. A second call is a no-op.
    pub fn release(&mut self, backend: &mut dyn GraphicsBackend) {
        if let Some(buffers) = self.buffers.take() {
            backend.delete_mesh_buffers(buffers);
        }
    }
}

impl Clone for Mesh {
    /// Clones the CPU-side geometry only; the copy has to be uploaded separately.
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
            material: Arc::clone(&self.material),
            buffers: None,
        }
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .field("material", &self.material.name)
            .field("uploaded", &self.is_uploaded())
            .finish()
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        if let Some(buffers) = &self.buffers {
            log::warn!(
                "mesh dropped with live GPU buffers {:?}/{:?}",
                buffers.vertex_buffer,
                buffers.index_buffer
            );
        }
    }
}
