//! Material system
//!
//! Materials come from material libraries referenced by imported geometry. They are
//! built once during import and then shared, read-only, by every mesh that uses them.

use super::texture::{TextureHandle, TextureKind};

/// Name used for meshes that never had a material assigned.
pub const DEFAULT_MATERIAL_NAME: &str = "default";

/// Shading path a material needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialType {
    DiffuseOnly,
    DiffuseSpecular,
}

/// Surface description parsed from a material library.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub specular_exponent: f32,
    pub optical_density: f32,
    pub diffuse_texture: Option<TextureHandle>,
    pub specular_color_texture: Option<TextureHandle>,
    pub specular_highlight_texture: Option<TextureHandle>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL_NAME)
    }
}

impl Material {
    /// Creates a material with black colours and no textures.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ambient_color: [0.0; 3],
            diffuse_color: [0.0; 3],
            specular_color: [0.0; 3],
            specular_exponent: 0.0,
            optical_density: 0.0,
            diffuse_texture: None,
            specular_color_texture: None,
            specular_highlight_texture: None,
        }
    }

    /// Builder pattern: Set diffuse color from RGB values
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse_color = [r, g, b];
        self
    }

    /// Builder pattern: Set the specular exponent
    pub fn with_shininess(mut self, exponent: f32) -> Self {
        self.specular_exponent = exponent;
        self
    }

    pub fn texture(&self, kind: TextureKind) -> Option<TextureHandle> {
        match kind {
            TextureKind::Diffuse => self.diffuse_texture,
            TextureKind::SpecularColour => self.specular_color_texture,
            TextureKind::SpecularHighlight => self.specular_highlight_texture,
        }
    }

    pub fn set_texture(&mut self, kind: TextureKind, texture: TextureHandle) {
        let slot = match kind {
            TextureKind::Diffuse => &mut self.diffuse_texture,
            TextureKind::SpecularColour => &mut self.specular_color_texture,
            TextureKind::SpecularHighlight => &mut self.specular_highlight_texture,
        };
        *slot = Some(texture);
    }

    /// `DiffuseSpecular` as soon as either specular map is present.
    pub fn material_type(&self) -> MaterialType {
        if self.specular_color_texture.is_some() || self.specular_highlight_texture.is_some() {
            MaterialType::DiffuseSpecular
        } else {
            MaterialType::DiffuseOnly
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_MATERIAL_NAME
    }
}
