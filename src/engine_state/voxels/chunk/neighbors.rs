//! Per-direction neighbor containers and boundary snapshots.

use crate::engine_state::voxels::{block::block_type::BlockType, coordinates::Direction};

use super::{voxel_field::VoxelField, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// One value per lateral direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LateralNeighbors<T> {
    pub north: T,
    pub south: T,
    pub east: T,
    pub west: T,
}

impl<T> LateralNeighbors<T> {
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::NORTH => &self.north,
            Direction::SOUTH => &self.south,
            Direction::EAST => &self.east,
            Direction::WEST => &self.west,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::NORTH => &mut self.north,
            Direction::SOUTH => &mut self.south,
            Direction::EAST => &mut self.east,
            Direction::WEST => &mut self.west,
        }
    }

    /// Applies `f` to every direction's value.
    pub fn map<U>(self, mut f: impl FnMut(Direction, T) -> U) -> LateralNeighbors<U> {
        LateralNeighbors {
            north: f(Direction::NORTH, self.north),
            south: f(Direction::SOUTH, self.south),
            east: f(Direction::EAST, self.east),
            west: f(Direction::WEST, self.west),
        }
    }

    pub fn each_ref(&self) -> LateralNeighbors<&T> {
        LateralNeighbors {
            north: &self.north,
            south: &self.south,
            east: &self.east,
            west: &self.west,
        }
    }

    pub fn each_mut(&mut self) -> LateralNeighbors<&mut T> {
        LateralNeighbors {
            north: &mut self.north,
            south: &mut self.south,
            east: &mut self.east,
            west: &mut self.west,
        }
    }
}

/// Copy of the plane of a neighbor chunk that touches the owning chunk.
///
/// For an east or west neighbor the plane runs along z; for a north or south
/// neighbor it runs along x. Taken on the calling thread so a build thread
/// never has to lock another chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundarySlice {
    length: usize,
    blocks: Vec<BlockType>,
}

impl BoundarySlice {
    /// Captures the plane of `neighbor` that faces back toward the owner, where
    /// `direction` points from the owner to the neighbor.
    pub fn capture(neighbor: &VoxelField, direction: Direction) -> Self {
        let length = match direction {
            Direction::EAST | Direction::WEST => CHUNK_DEPTH,
            Direction::NORTH | Direction::SOUTH => CHUNK_WIDTH,
        };
        let mut blocks = Vec::with_capacity(length * CHUNK_HEIGHT);
        for y in 0..CHUNK_HEIGHT {
            for along in 0..length {
                let block = match direction {
                    Direction::EAST => neighbor.get(0, y, along),
                    Direction::WEST => neighbor.get(CHUNK_WIDTH - 1, y, along),
                    Direction::NORTH => neighbor.get(along, y, 0),
                    Direction::SOUTH => neighbor.get(along, y, CHUNK_DEPTH - 1),
                };
                blocks.push(block);
            }
        }
        BoundarySlice { length, blocks }
    }

    /// Block at position `along` the shared edge and height `y`.
    #[inline]
    pub fn get(&self, along: usize, y: usize) -> BlockType {
        self.blocks[along + y * self.length]
    }
}

/// Boundary snapshots of whichever neighbors are present.
pub type NeighborSlices = LateralNeighbors<Option<BoundarySlice>>;
