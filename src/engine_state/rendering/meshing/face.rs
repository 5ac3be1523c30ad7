use cgmath::Point3;

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points as seen from outside the block
/// (lower-left, lower-right, upper-left, upper-right). With the index pattern
/// from [`face_indices`](super::mesh::face_indices) both triangles wind
/// counter-clockwise from outside, so their normal points away from the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<usize>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<usize>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<usize>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<usize>,
    /// The block type, used for texture lookup
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for a voxel at the given coordinates.
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - The x, y, z coordinates of the voxel in chunk space
    /// * `block_type` - The type of the block, used for texture mapping
    /// * `block_side` - Which side of the block this face represents
    pub fn new(i: usize, j: usize, k: usize, block_type: BlockType, block_side: BlockSide) -> Self {
        let (ll, lr, ul, ur) = match block_side {
            BlockSide::FRONT => (
                Point3::new(i + 1, j, k),
                Point3::new(i, j, k),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i, j + 1, k),
            ),

            BlockSide::BACK => (
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
            ),

            BlockSide::LEFT => (
                Point3::new(i, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
            ),

            BlockSide::RIGHT => (
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
            ),

            BlockSide::TOP => (
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i, j + 1, k),
                Point3::new(i + 1, j + 1, k),
            ),

            BlockSide::BOTTOM => (
                Point3::new(i, j, k),
                Point3::new(i + 1, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j, k + 1),
            ),
        };

        Face {
            ll,
            lr,
            ul,
            ur,
            block_type,
            block_side,
        }
    }

    /// Corners in vertex emission order: ll, lr, ul, ur.
    pub fn corners(&self) -> [Point3<usize>; 4] {
        [self.ll, self.lr, self.ul, self.ur]
    }
}
