//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the axis conventions
//! shared by face visibility, lighting, meshing and physics.

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a fixed integer used to index per-cell face tables
/// (visibility bits and light channels).
///
/// Axis conventions:
/// - `FRONT` faces negative Z, `BACK` faces positive Z
/// - `LEFT` faces negative X, `RIGHT` faces positive X
/// - `TOP` faces positive Y, `BOTTOM` faces negative Y
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing negative Z)
    FRONT = 0,

    /// The back face (facing positive Z)
    BACK = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The top face (facing positive Y)
    TOP = 4,

    /// The bottom face (facing negative Y)
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in index order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// Index of this face in per-cell face tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit step from a cell to the neighbor this face looks at.
    #[inline]
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            BlockSide::FRONT => (0, 0, -1),
            BlockSide::BACK => (0, 0, 1),
            BlockSide::LEFT => (-1, 0, 0),
            BlockSide::RIGHT => (1, 0, 0),
            BlockSide::TOP => (0, 1, 0),
            BlockSide::BOTTOM => (0, -1, 0),
        }
    }

    /// The face pointing the other way along the same axis.
    #[inline]
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (i, side) in BlockSide::all().into_iter().enumerate() {
            assert_eq!(side.index(), i);
        }
    }

    #[test]
    fn opposite_faces_have_opposite_offsets() {
        for side in BlockSide::all() {
            let (x, y, z) = side.offset();
            let (ox, oy, oz) = side.opposite().offset();
            assert_eq!((x + ox, y + oy, z + oz), (0, 0, 0));
            assert_eq!(side.opposite().opposite(), side);
        }
    }
}
