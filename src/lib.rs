// src/lib.rs
//! Model Viewer
//!
//! Core of an interactive 3D asset viewer: OBJ/MTL import, model transforms,
//! a fly camera and ray picking against world-space bounding boxes.

pub mod app;
pub mod config;
pub mod gfx;
pub mod importers;
pub mod input;
pub mod prelude;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use config::{CameraConfig, ViewerConfig};
