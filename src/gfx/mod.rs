//! # Graphics Module
//!
//! Everything between an imported file and a frame on screen, minus the graphics API
//! itself.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - axis-aligned bounding boxes that follow model transforms
//! - **Picking** ([`picking`]) - screen-to-world rays and slab intersection
//! - **Camera System** ([`camera`]) - fly camera and its input controller
//! - **Scene Management** ([`scene`]) - models, meshes, lights and cameras
//! - **Resource Management** ([`resources`]) - materials, textures and the backend collaborator
//! - **Rendering** ([`rendering`]) - per-frame uniform data for the renderer
//!
//! ## Usage
//!
//! ```no_run
//! use model_viewer::gfx::{scene::Scene, rendering::FrameUniforms};
//!
//! let scene = Scene::new();
//! let frame = FrameUniforms::from_scene(&scene);
//! println!("{} point light(s)", frame.point_lights.len());
//! ```

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use geometry::BoundingBox;
pub use picking::{PickResult, Ray};
