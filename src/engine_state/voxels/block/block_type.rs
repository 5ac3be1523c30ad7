//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and byte conversion.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant is the on-disk value stored in chunk save files, so
/// existing variants must keep their numbers. The `FromPrimitive` derive allows
/// conversion back from bytes.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An air block, which is non-solid and never rendered.
    #[default]
    AIR = 0,

    /// A basic dirt block, found just below the terrain surface.
    DIRT = 1,

    /// A grass block with different textures on top and sides.
    /// The top is green, sides have grass on dirt, and bottom is plain dirt.
    GRASS = 2,

    /// A wooden block with a bark texture on all sides.
    WOOD = 3,

    /// A plain white block, often used for testing.
    WHITE = 4,

    /// Bedrock-like filler below the dirt layer.
    STONE = 5,

    /// Loose sand, placed by players.
    SAND = 6,
}

impl BlockType {
    /// Every block type, in discriminant order.
    pub const ALL: [BlockType; 7] = [
        BlockType::AIR,
        BlockType::DIRT,
        BlockType::GRASS,
        BlockType::WOOD,
        BlockType::WHITE,
        BlockType::STONE,
        BlockType::SAND,
    ];

    /// Converts a stored byte back into a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value does not correspond to any variant.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// The byte written to save files for this type.
    #[inline]
    pub fn to_int(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Shorthand for `self == BlockType::AIR`.
    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }

    /// Picks a random placeable type (never AIR).
    pub fn get_random_type() -> Self {
        Self::ALL[fastrand::usize(1..Self::ALL.len())]
    }
}
