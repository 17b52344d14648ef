//! # Vertex Data Structures
//!
//! GPU-compatible vertex format shared by every imported mesh.

use cgmath::Point3;

/// A 3D vertex with position, normal and texture coordinates.
///
/// Normals and texture coordinates are zero when the source file did not provide
/// them for this vertex.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinates [u, v], v already flipped to a top-left origin
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Size of one vertex in a vertex buffer.
    pub const SIZE_IN_BYTES: usize = std::mem::size_of::<Vertex>();

    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }
}
