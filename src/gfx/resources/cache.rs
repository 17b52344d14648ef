//! Per-session resource cache
//!
//! Owns the graphics backend and deduplicates what is loaded through it: textures by
//! path, shaders by name and imported models by path. Nothing is global; the
//! application creates one cache and tears it down with [`ResourceCache::unload`].

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use super::{
    backend::{BackendError, GraphicsBackend, ShaderHandle},
    texture::{TextureHandle, TextureLoader},
};
use crate::{
    gfx::scene::Model,
    importers::{importer_for_path, ImportError, ImportOptions},
};

pub struct ResourceCache<B: GraphicsBackend> {
    backend: B,
    import_options: ImportOptions,
    textures: HashMap<PathBuf, TextureHandle>,
    shaders: HashMap<String, ShaderHandle>,
    models: HashMap<PathBuf, Model>,
}

impl<B: GraphicsBackend> ResourceCache<B> {
    pub fn new(backend: B, import_options: ImportOptions) -> Self {
        Self {
            backend,
            import_options,
            textures: HashMap::new(),
            shaders: HashMap::new(),
            models: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Imports a model, or clones the one imported earlier from the same path.
    ///
    /// The returned model never holds GPU buffers; upload it before drawing.
    pub fn load_model(&mut self, path: &Path) -> Result<Model, ImportError> {
        if let Some(model) = self.models.get(path) {
            log::debug!("model cache hit: {}", path.display());
            return Ok(model.clone());
        }

        let importer = importer_for_path(path, self.import_options)?;
        let model = importer.load_model(path, self)?;
        self.models.insert(path.to_path_buf(), model.clone());
        Ok(model)
    }

    /// Compiles a shader program from two source files, once per name.
    pub fn load_shader(
        &mut self,
        name: &str,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<ShaderHandle, BackendError> {
        if let Some(&shader) = self.shaders.get(name) {
            log::debug!("shader cache hit: {name}");
            return Ok(shader);
        }

        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| BackendError::ShaderSource {
                path: path.to_path_buf(),
                source,
            })
        };
        let vertex_source = read(vertex_path)?;
        let fragment_source = read(fragment_path)?;

        let shader = self
            .backend
            .compile_shader(name, &vertex_source, &fragment_source)?;
        self.shaders.insert(name.to_string(), shader);
        Ok(shader)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Deletes every cached texture and shader exactly once and forgets all models.
    pub fn unload(&mut self) {
        log::debug!(
            "unloading {} texture(s), {} shader(s), {} model(s)",
            self.textures.len(),
            self.shaders.len(),
            self.models.len()
        );
        for (_, texture) in self.textures.drain() {
            self.backend.delete_texture(texture);
        }
        for (_, shader) in self.shaders.drain() {
            self.backend.delete_shader(shader);
        }
        self.models.clear();
    }

    /// Unloads everything and hands the backend back.
    pub fn into_backend(mut self) -> B {
        self.unload();
        self.backend
    }
}

impl<B: GraphicsBackend> TextureLoader for ResourceCache<B> {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError> {
        if let Some(&texture) = self.textures.get(path) {
            log::debug!("texture cache hit: {}", path.display());
            return Ok(texture);
        }

        let texture = self.backend.create_texture(path)?;
        self.textures.insert(path.to_path_buf(), texture);
        Ok(texture)
    }
}
