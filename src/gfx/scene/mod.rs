//! # Scene Management Module
//!
//! Models, cameras and lights, plus the picking entry points that tie them together.
//!
//! ## Key Components
//!
//! - [`Scene`] - owns the loaded models, the cameras (one active) and the lights
//! - [`Model`] - imported meshes with a name and a local transform
//! - [`Mesh`] - indexed triangles sharing one material
//! - [`Vertex`] - GPU vertex layout with position, normal and texture coordinates
//!
//! ## Usage
//!
//! ```no_run
//! use model_viewer::gfx::scene::Scene;
//!
//! let scene = Scene::new();
//! let stats = scene.get_statistics();
//! println!("{} models, {} triangles", stats.model_count, stats.total_triangles);
//! ```

pub mod light;
pub mod mesh;
pub mod model;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{Light, LightType};
pub use mesh::Mesh;
pub use model::{Model, Transform};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex;
