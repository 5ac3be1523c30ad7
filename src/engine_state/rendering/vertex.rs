//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format handed to the render-submission layer.

use cgmath::Point3;

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Light: f32 (4 bytes)
///
/// Total size: 24 bytes, no padding, so a vertex slice can be uploaded with
/// `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position
    pub position: [f32; 3],
    /// Atlas texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Sunlight intensity of the face this vertex belongs to
    pub light: f32,
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - World-space block corner of the vertex
    /// * `u`, `v` - Atlas texture coordinates
    /// * `light` - Face light value in (0, 1]
    pub fn new(pos: Point3<i32>, u: f32, v: f32, light: f32) -> Self {
        Vertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            tex_coords: [u, v],
            light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let vertices = [Vertex::new(Point3::new(1, 2, 3), 0.5, 0.25, 1.0)];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 24);
    }
}
