//! Graphics backend collaborator
//!
//! Everything that touches a real graphics API (texture upload, shader compilation,
//! vertex/index buffers) goes through [`GraphicsBackend`]. The crate ships a
//! [`HeadlessBackend`] that hands out handles without a GPU, which the CLI and the
//! tests use.

use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::texture::{TextureHandle, TextureLoader};
use crate::gfx::scene::vertex::Vertex;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to read texture {path}")]
    TextureUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read shader source {path}")]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("shader '{name}' failed to compile: {message}")]
    ShaderCompile { name: String, message: String },
    #[error("mesh has {indices} indices but only {vertices} vertices")]
    InvalidMesh { vertices: usize, indices: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Vertex and index buffer pair for one mesh.
#[derive(Debug, PartialEq, Eq)]
pub struct MeshBuffers {
    pub vertex_buffer: BufferHandle,
    pub index_buffer: BufferHandle,
    pub index_count: u32,
}

pub trait GraphicsBackend {
    fn create_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError>;
    fn delete_texture(&mut self, texture: TextureHandle);

    fn compile_shader(
        &mut self,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderHandle, BackendError>;
    fn delete_shader(&mut self, shader: ShaderHandle);

    fn create_mesh_buffers(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<MeshBuffers, BackendError>;
    /// Takes the buffers by value so they cannot be freed twice.
    fn delete_mesh_buffers(&mut self, buffers: MeshBuffers);
}

/// Backend without a GPU. Tracks live handles so leaks and double frees show up.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u32,
    check_texture_files: bool,
    live_textures: HashSet<TextureHandle>,
    live_shaders: HashSet<ShaderHandle>,
    live_buffers: HashSet<BufferHandle>,
    uploaded_bytes: usize,
    textures_created: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            check_texture_files: true,
            ..Default::default()
        }
    }

    /// When disabled, textures are "created" without the file being read.
    pub fn with_texture_file_check(mut self, enabled: bool) -> Self {
        self.check_texture_files = enabled;
        self
    }

    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.live_shaders.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.live_buffers.len()
    }

    /// Total number of texture creations, including ones already deleted.
    pub fn textures_created(&self) -> usize {
        self.textures_created
    }

    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn create_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError> {
        if self.check_texture_files {
            std::fs::metadata(path).map_err(|source| BackendError::TextureUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let handle = TextureHandle(self.next());
        self.live_textures.insert(handle);
        self.textures_created += 1;
        Ok(handle)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if !self.live_textures.remove(&texture) {
            log::warn!("deleting unknown texture {texture:?}");
        }
    }

    fn compile_shader(
        &mut self,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderHandle, BackendError> {
        if vertex_source.trim().is_empty() || fragment_source.trim().is_empty() {
            return Err(BackendError::ShaderCompile {
                name: name.to_string(),
                message: "empty shader stage".to_string(),
            });
        }

        let handle = ShaderHandle(self.next());
        self.live_shaders.insert(handle);
        Ok(handle)
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        if !self.live_shaders.remove(&shader) {
            log::warn!("deleting unknown shader {shader:?}");
        }
    }

    fn create_mesh_buffers(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<MeshBuffers, BackendError> {
        if indices.iter().any(|&index| index as usize >= vertices.len()) {
            return Err(BackendError::InvalidMesh {
                vertices: vertices.len(),
                indices: indices.len(),
            });
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(indices);
        self.uploaded_bytes += vertex_bytes.len() + index_bytes.len();

        let vertex_buffer = BufferHandle(self.next());
        let index_buffer = BufferHandle(self.next());
        self.live_buffers.insert(vertex_buffer);
        self.live_buffers.insert(index_buffer);

        Ok(MeshBuffers {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        })
    }

    fn delete_mesh_buffers(&mut self, buffers: MeshBuffers) {
        for buffer in [buffers.vertex_buffer, buffers.index_buffer] {
            if !self.live_buffers.remove(&buffer) {
                log::warn!("deleting unknown buffer {buffer:?}");
            }
        }
    }
}

impl TextureLoader for HeadlessBackend {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError> {
        self.create_texture(path)
    }
}
