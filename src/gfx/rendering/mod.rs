// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! The draw submission itself lives behind the graphics backend. This module builds
//! the per-frame uniform data it consumes.

pub mod uniforms;

// Re-export main types
pub use uniforms::{
    DirectionalLightUniform, DrawItem, FrameUniforms, MaterialUniform, ObjectUniform,
    PointLightUniform, MAX_LIGHTS,
};
