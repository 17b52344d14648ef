//! # Model Viewer Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use model_viewer::prelude::*;
//!
//! let scene = Scene::new();
//! assert!(scene.select_model(400.0, 300.0, 800, 600).is_none());
//! ```

// Re-export core application types
pub use crate::app::ViewerApp;
pub use crate::config::{CameraConfig, ViewerConfig};
pub use crate::input::{InputEvent, Key, MouseButton};

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, CameraMovement};
pub use crate::gfx::geometry::BoundingBox;
pub use crate::gfx::picking::{PickResult, Ray};
pub use crate::gfx::resources::{GraphicsBackend, HeadlessBackend, Material, ResourceCache};
pub use crate::gfx::scene::{Light, LightType, Mesh, Model, Scene, Transform, Vertex};

// Re-export importers
pub use crate::importers::{importer_for_path, ImportError, ImportOptions, ModelImporter};

// Re-export common external dependencies
pub use cgmath::{Point3, Vector3};
