//! # Geometry
//!
//! Bounding volumes shared by the scene and the picker.

pub mod bounding_box;

pub use bounding_box::BoundingBox;
