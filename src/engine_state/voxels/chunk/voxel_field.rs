//! # Voxel Field Module
//!
//! Dense per-chunk storage of block types, face-visibility bits and per-face
//! light values.
//!
//! ## Layout
//!
//! Cells live in one flat array indexed by `x + z * W + y * (W * D)`. The same
//! order is used for the exported byte array, which is the chunk save-file
//! format, so it must not change.
//!
//! Face visibility is kept in a bit vector with 6 bits per cell (one per
//! [`BlockSide`]). Bits of AIR cells are meaningless and never read by the
//! mesher.

use bitvec::prelude::BitVec;

use crate::{
    engine_state::voxels::{
        block::{block_side::BlockSide, block_type::BlockType, BlockCatalog},
        coordinates::LocalPos,
    },
    error::{WorldError, WorldResult},
};

use super::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_PLANE_SIZE, CHUNK_SIZE, CHUNK_WIDTH};

/// Number of faces (and light channels) stored per cell.
pub const CELL_FACES: usize = 6;
/// Light value of a face with open sky above its column.
pub const FULL_LIGHT: f32 = 1.0;
/// Light value below the first solid cell of a column.
pub const SHADOW_LIGHT: f32 = 1.0 / 15.0;

/// Fixed-size block storage for one chunk.
#[derive(Clone, Debug)]
pub struct VoxelField {
    blocks: Vec<BlockType>,
    faces: BitVec,
    light: Vec<[f32; CELL_FACES]>,
}

impl Default for VoxelField {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelField {
    /// Creates a field filled with AIR, no visible faces and full light.
    pub fn new() -> Self {
        VoxelField {
            blocks: vec![BlockType::AIR; CHUNK_SIZE],
            faces: BitVec::repeat(false, CHUNK_SIZE * CELL_FACES),
            light: vec![[FULL_LIGHT; CELL_FACES]; CHUNK_SIZE],
        }
    }

    /// Builds a field from an exported byte array.
    pub fn from_bytes(bytes: &[u8]) -> WorldResult<Self> {
        let mut field = Self::new();
        field.import_bytes(bytes)?;
        Ok(field)
    }

    /// Flat index of cell `(x, y, z)`.
    ///
    /// Out-of-range coordinates are a programming error; they are caught by
    /// `debug_assert!` in debug builds and by slice indexing otherwise.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < CHUNK_WIDTH && y < CHUNK_HEIGHT && z < CHUNK_DEPTH,
            "cell ({}, {}, {}) outside chunk",
            x,
            y,
            z
        );
        x + z * CHUNK_WIDTH + y * CHUNK_PLANE_SIZE
    }

    /// True if signed coordinates name a cell of this field.
    #[inline]
    pub fn contains(x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < CHUNK_WIDTH
            && (y as usize) < CHUNK_HEIGHT
            && (z as usize) < CHUNK_DEPTH
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks[Self::index(x, y, z)]
    }

    #[inline]
    pub fn get_local(&self, pos: LocalPos) -> BlockType {
        self.get(pos.x, pos.y, pos.z)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        let index = Self::index(x, y, z);
        self.blocks[index] = block_type;
    }

    /// Sets every cell to `block_type`.
    pub fn fill(&mut self, block_type: BlockType) {
        self.blocks.fill(block_type);
    }

    /// Sets every cell to AIR.
    pub fn clear(&mut self) {
        self.fill(BlockType::AIR);
    }

    /// All block types in storage order.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// True if no cell holds a solid block.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }

    /// Exports block types as raw bytes in `x + z * W + y * (W * D)` order.
    pub fn export_bytes(&self) -> Vec<u8> {
        self.blocks.iter().map(|b| b.to_int()).collect()
    }

    /// Replaces every block type from an exported byte array.
    ///
    /// The whole array is validated before the field is touched, so a failed
    /// import leaves the field unchanged. Face bits and light are not part of
    /// the format and must be recomputed afterwards.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> WorldResult<()> {
        if bytes.len() != CHUNK_SIZE {
            return Err(WorldError::InvalidFieldLength {
                expected: CHUNK_SIZE,
                found: bytes.len(),
            });
        }
        let decoded = bytes
            .iter()
            .map(|&b| BlockType::from_int(b).ok_or(WorldError::UnknownBlockType(b)))
            .collect::<WorldResult<Vec<BlockType>>>()?;
        self.blocks = decoded;
        Ok(())
    }

    #[inline]
    pub fn is_face_visible(&self, x: usize, y: usize, z: usize, side: BlockSide) -> bool {
        self.faces[Self::index(x, y, z) * CELL_FACES + side.index()]
    }

    /// Visibility bits of all six faces, in `BlockSide` order.
    pub fn face_mask(&self, x: usize, y: usize, z: usize) -> [bool; CELL_FACES] {
        let base = Self::index(x, y, z) * CELL_FACES;
        std::array::from_fn(|i| self.faces[base + i])
    }

    pub fn set_face_mask(&mut self, x: usize, y: usize, z: usize, mask: [bool; CELL_FACES]) {
        let base = Self::index(x, y, z) * CELL_FACES;
        for (i, visible) in mask.into_iter().enumerate() {
            self.faces.set(base + i, visible);
        }
    }

    #[inline]
    pub fn light(&self, x: usize, y: usize, z: usize, side: BlockSide) -> f32 {
        self.light[Self::index(x, y, z)][side.index()]
    }

    #[inline]
    pub fn set_light(&mut self, x: usize, y: usize, z: usize, side: BlockSide, value: f32) {
        self.light[Self::index(x, y, z)][side.index()] = value;
    }

    /// Iterates over every non-AIR cell in storage order.
    ///
    /// This is every cell the mesher may draw, solid or not.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (LocalPos, BlockType)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_air())
            .map(|(i, b)| (Self::position(i), *b))
    }

    /// Iterates over the cells `catalog` reports as solid, in storage order.
    pub fn iter_solid<'a>(
        &'a self,
        catalog: &'a dyn BlockCatalog,
    ) -> impl Iterator<Item = (LocalPos, BlockType)> + 'a {
        self.iter_blocks()
            .filter(move |(_, block_type)| catalog.is_solid(*block_type))
    }

    /// Inverse of [`VoxelField::index`].
    #[inline]
    fn position(index: usize) -> LocalPos {
        let y = index / CHUNK_PLANE_SIZE;
        let z = (index % CHUNK_PLANE_SIZE) / CHUNK_WIDTH;
        let x = index % CHUNK_WIDTH;
        LocalPos::new(x, y, z)
    }
}
