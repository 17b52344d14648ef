//! Texture handles
//!
//! Pixel data never enters the crate; textures are owned by the graphics backend and
//! referenced through opaque handles.

use std::path::Path;

use super::backend::BackendError;

/// Opaque handle to a texture owned by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Role a texture plays in a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    SpecularColour,
    SpecularHighlight,
}

impl TextureKind {
    /// Texture unit the renderer binds this kind to.
    pub fn unit(self) -> u32 {
        match self {
            TextureKind::Diffuse => 0,
            TextureKind::SpecularColour => 1,
            TextureKind::SpecularHighlight => 2,
        }
    }
}

/// Loads a texture from disk and hands back its handle.
///
/// Implemented by [`super::ResourceCache`] (deduplicating by path) and by the
/// graphics backends themselves.
pub trait TextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError>;
}
