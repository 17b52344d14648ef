// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Materials, texture handles, the graphics backend collaborator and the
//! per-session cache that deduplicates what goes through it.

pub mod backend;
pub mod cache;
pub mod material;
pub mod texture;

// Re-export main types
pub use backend::{BackendError, GraphicsBackend, HeadlessBackend, MeshBuffers, ShaderHandle};
pub use cache::ResourceCache;
pub use material::{Material, MaterialType, DEFAULT_MATERIAL_NAME};
pub use texture::{TextureHandle, TextureKind, TextureLoader};
