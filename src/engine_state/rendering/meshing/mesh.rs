//! Mesh data structures and visible-face extraction.
//!
//! Converts the visible faces of a voxel field into a flat vertex/index list.
//! Every visible face contributes exactly 4 vertices and 6 indices; cells with
//! no visible faces contribute nothing.

use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, BlockCatalog},
        chunk::voxel_field::VoxelField,
    },
};

use super::face::Face;

/// CPU-side geometry of one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// The vertex data, four per face
    pub vertices: Vec<Vertex>,
    /// The index data, six per face
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        MeshData::default()
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends one face.
    ///
    /// # Arguments
    /// * `face` - The face to emit, in chunk-local corners
    /// * `catalog` - Supplies the atlas rectangle for the face's block type
    /// * `light` - Sunlight value of the face
    /// * `origin` - World-space position of the chunk's local origin
    pub fn push_face(
        &mut self,
        face: &Face,
        catalog: &dyn BlockCatalog,
        light: f32,
        origin: Point3<i32>,
    ) {
        let rect = catalog.face_texture_rects(face.block_type)[face.block_side.index()];
        let uvs = [
            (rect.u0, rect.v1),
            (rect.u1, rect.v1),
            (rect.u0, rect.v0),
            (rect.u1, rect.v0),
        ];

        let base = self.vertices.len() as u32;
        for (corner, (u, v)) in face.corners().into_iter().zip(uvs) {
            let world = origin + Vector3::new(corner.x as i32, corner.y as i32, corner.z as i32);
            self.vertices.push(Vertex::new(world, u, v, light));
        }
        self.indices.extend_from_slice(&face_indices(base));
    }
}

/// Index data for a face whose first vertex sits at `base`.
///
/// The two triangles are (ll, lr, ur) and (ll, ur, ul).
pub fn face_indices(base: u32) -> [u32; 6] {
    [base, base + 1, base + 3, base, base + 3, base + 2]
}

/// Builds the mesh of a field from its stored face bits and light values.
///
/// Every non-AIR cell is drawn, solid or not. Face bits must be current; the
/// mesher does not look at neighbors.
pub fn build_mesh(field: &VoxelField, catalog: &dyn BlockCatalog, origin: Point3<i32>) -> MeshData {
    let mut mesh = MeshData::new();
    for (pos, block_type) in field.iter_blocks() {
        let mask = field.face_mask(pos.x, pos.y, pos.z);
        for side in BlockSide::all() {
            if !mask[side.index()] {
                continue;
            }
            let face = Face::new(pos.x, pos.y, pos.z, block_type, side);
            let light = field.light(pos.x, pos.y, pos.z, side);
            mesh.push_face(&face, catalog, light, origin);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{
        block::{block_type::BlockType, test_catalogs::GlassCatalog, AtlasCatalog},
        chunk::{faces, neighbors::NeighborSlices},
    };

    fn meshed(field: &mut VoxelField) -> MeshData {
        meshed_with(field, &AtlasCatalog::default())
    }

    fn meshed_with(field: &mut VoxelField, catalog: &dyn BlockCatalog) -> MeshData {
        faces::refresh_all(field, &NeighborSlices::default(), catalog);
        build_mesh(field, catalog, Point3::new(0, 0, 0))
    }

    #[test]
    fn empty_field_has_empty_mesh() {
        let mut field = VoxelField::new();
        let mesh = meshed(&mut field);
        assert!(mesh.is_empty());
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn lone_block_emits_six_quads() {
        let mut field = VoxelField::new();
        field.set(1, 1, 1, BlockType::GRASS);
        let mesh = meshed(&mut field);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
    }

    #[test]
    fn touching_blocks_drop_the_shared_faces() {
        let mut field = VoxelField::new();
        field.set(1, 1, 1, BlockType::DIRT);
        field.set(2, 1, 1, BlockType::DIRT);
        let mesh = meshed(&mut field);
        assert_eq!(mesh.face_count(), 10);
    }

    #[test]
    fn see_through_blocks_are_drawn_without_hiding_neighbors() {
        let mut field = VoxelField::new();
        field.set(1, 1, 1, BlockType::DIRT);
        field.set(2, 1, 1, BlockType::WHITE);
        let mesh = meshed_with(&mut field, &GlassCatalog);
        assert_eq!(mesh.face_count(), 11);
    }

    #[test]
    fn stale_face_bits_on_air_never_emit() {
        let mut field = VoxelField::new();
        field.set(4, 4, 4, BlockType::DIRT);
        faces::refresh_all(&mut field, &NeighborSlices::default(), &AtlasCatalog::default());
        field.set(4, 4, 4, BlockType::AIR);

        let mesh = build_mesh(&field, &AtlasCatalog::default(), Point3::new(0, 0, 0));
        assert!(mesh.is_empty());
    }

    #[test]
    fn vertices_are_offset_by_the_chunk_origin() {
        let mut field = VoxelField::new();
        field.set(0, 0, 0, BlockType::DIRT);
        faces::refresh_all(&mut field, &NeighborSlices::default(), &AtlasCatalog::default());
        let mesh = build_mesh(&field, &AtlasCatalog::default(), Point3::new(32, 0, -16));
        for vertex in &mesh.vertices {
            assert!(vertex.position[0] >= 32.0 && vertex.position[0] <= 33.0);
            assert!(vertex.position[2] >= -16.0 && vertex.position[2] <= -15.0);
        }
    }

    #[test]
    fn indices_stay_within_their_quad() {
        assert_eq!(face_indices(8), [8, 9, 11, 8, 11, 10]);
    }
}
