//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the block catalog
//! that maps each type to texture-atlas rectangles and a solidity flag.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Maps each block type to its atlas tile index for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array contains 6 tile indices in `BlockSide` order:
/// [Front, Back, Left, Right, Top, Bottom]
pub static BLOCK_TYPE_TO_TEXTURE_INDICES: [[usize; 6]; 7] = [
    [0, 0, 0, 0, 0, 0], // AIR (never rendered)
    [1, 1, 1, 1, 1, 1], // DIRT (all sides use tile 1)
    [2, 2, 2, 2, 3, 1], // GRASS (top: 3, bottom: 1, sides: 2)
    [5, 5, 5, 5, 6, 6], // WOOD (bark sides, rings on top and bottom)
    [4, 4, 4, 4, 4, 4], // WHITE
    [7, 7, 7, 7, 7, 7], // STONE
    [8, 8, 8, 8, 8, 8], // SAND
];

/// A rectangle in normalized texture-atlas coordinates.
///
/// `(u0, v0)` is the top-left corner and `(u1, v1)` the bottom-right corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TextureRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// Lookup the world core needs from the block catalog.
///
/// Implementations must be shareable with mesh build threads.
pub trait BlockCatalog: Send + Sync {
    /// Texture rectangles for the six faces, in `BlockSide` order.
    fn face_texture_rects(&self, block_type: BlockType) -> [TextureRect; 6];

    /// Whether the type occludes neighbors and collides with moving objects.
    fn is_solid(&self, block_type: BlockType) -> bool;
}

/// Catalog backed by a square atlas of equally sized tiles.
///
/// Tile `n` sits at column `n % tiles_per_row`, row `n / tiles_per_row`.
#[derive(Debug, Clone)]
pub struct AtlasCatalog {
    tiles_per_row: usize,
}

impl AtlasCatalog {
    /// Creates a catalog for an atlas with `tiles_per_row` tiles on each side.
    pub fn new(tiles_per_row: usize) -> Self {
        AtlasCatalog {
            tiles_per_row: tiles_per_row.max(1),
        }
    }

    /// Normalized rectangle of a single atlas tile.
    pub fn tile_rect(&self, tile: usize) -> TextureRect {
        let size = 1.0 / self.tiles_per_row as f32;
        let column = (tile % self.tiles_per_row) as f32;
        let row = (tile / self.tiles_per_row) as f32;
        TextureRect {
            u0: column * size,
            v0: row * size,
            u1: (column + 1.0) * size,
            v1: (row + 1.0) * size,
        }
    }
}

impl Default for AtlasCatalog {
    fn default() -> Self {
        AtlasCatalog::new(16)
    }
}

impl BlockCatalog for AtlasCatalog {
    fn face_texture_rects(&self, block_type: BlockType) -> [TextureRect; 6] {
        let tiles = &BLOCK_TYPE_TO_TEXTURE_INDICES[block_type as usize];
        BlockSide::all().map(|side| self.tile_rect(tiles[side.index()]))
    }

    fn is_solid(&self, block_type: BlockType) -> bool {
        !block_type.is_air()
    }
}

/// Catalogs used by unit tests across the crate.
#[cfg(test)]
pub(crate) mod test_catalogs {
    use super::*;

    /// The default atlas, but WHITE is see-through and non-solid.
    pub struct GlassCatalog;

    impl BlockCatalog for GlassCatalog {
        fn face_texture_rects(&self, block_type: BlockType) -> [TextureRect; 6] {
            AtlasCatalog::default().face_texture_rects(block_type)
        }

        fn is_solid(&self, block_type: BlockType) -> bool {
            !block_type.is_air() && block_type != BlockType::WHITE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_the_only_non_solid_type() {
        let catalog = AtlasCatalog::default();
        for block_type in BlockType::ALL {
            assert_eq!(catalog.is_solid(block_type), block_type != BlockType::AIR);
        }
    }

    #[test]
    fn grass_uses_distinct_top_and_bottom_tiles() {
        let catalog = AtlasCatalog::new(4);
        let rects = catalog.face_texture_rects(BlockType::GRASS);
        assert_eq!(rects[BlockSide::TOP.index()], catalog.tile_rect(3));
        assert_eq!(rects[BlockSide::BOTTOM.index()], catalog.tile_rect(1));
        assert_eq!(rects[BlockSide::LEFT.index()], catalog.tile_rect(2));
    }

    #[test]
    fn tiles_wrap_onto_the_next_row() {
        let catalog = AtlasCatalog::new(4);
        let rect = catalog.tile_rect(5);
        assert_eq!(rect.u0, 0.25);
        assert_eq!(rect.v0, 0.25);
        assert_eq!(rect.u1, 0.5);
        assert_eq!(rect.v1, 0.5);
    }
}
