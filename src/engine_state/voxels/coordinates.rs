//! # Coordinates Module
//!
//! Conversions between world-space block positions, chunk coordinates and
//! chunk-local cell positions.
//!
//! Chunks tile the world laterally only: a chunk coordinate is a 2D `(x, z)`
//! pair and every chunk spans the full world height.

use std::fmt;

use cgmath::{Point3, Vector3};

use super::chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// Position of a chunk in the grid, in chunk units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

/// Lateral direction from one chunk to an adjacent one.
///
/// - `NORTH` is positive Z, `SOUTH` negative Z
/// - `EAST` is positive X, `WEST` negative X
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NORTH,
    SOUTH,
    EAST,
    WEST,
}

impl Direction {
    /// All four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::NORTH,
            Direction::SOUTH,
            Direction::EAST,
            Direction::WEST,
        ]
    }

    /// The direction pointing back.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::NORTH => Direction::SOUTH,
            Direction::SOUTH => Direction::NORTH,
            Direction::EAST => Direction::WEST,
            Direction::WEST => Direction::EAST,
        }
    }

    /// Step in chunk units as `(dx, dz)`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::NORTH => (0, 1),
            Direction::SOUTH => (0, -1),
            Direction::EAST => (1, 0),
            Direction::WEST => (-1, 0),
        }
    }
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk owning world block column `(x, z)`.
    pub fn from_block(x: i32, z: i32) -> Self {
        ChunkCoord {
            x: x.div_euclid(CHUNK_WIDTH as i32),
            z: z.div_euclid(CHUNK_DEPTH as i32),
        }
    }

    /// The chunk owning a world-space point.
    pub fn from_position(position: Point3<f32>) -> Self {
        let block = block_at_position(position);
        Self::from_block(block.x, block.z)
    }

    /// Adjacent chunk coordinate in `direction`.
    pub fn neighbor(self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        ChunkCoord::new(self.x + dx, self.z + dz)
    }

    /// World-space block position of local cell `(0, 0, 0)`.
    pub fn origin(self) -> Point3<i32> {
        Point3::new(
            self.x * CHUNK_WIDTH as i32,
            0,
            self.z * CHUNK_DEPTH as i32,
        )
    }

    /// Chebyshev distance in chunk units.
    pub fn distance(self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A cell position inside a chunk.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        LocalPos { x, y, z }
    }
}

/// Splits a world block position into its chunk and local cell.
///
/// # Returns
/// `None` if `y` is outside `[0, CHUNK_HEIGHT)`.
pub fn world_to_local(position: Point3<i32>) -> Option<(ChunkCoord, LocalPos)> {
    if position.y < 0 || position.y >= CHUNK_HEIGHT as i32 {
        return None;
    }
    let coord = ChunkCoord::from_block(position.x, position.z);
    let local = LocalPos::new(
        position.x.rem_euclid(CHUNK_WIDTH as i32) as usize,
        position.y as usize,
        position.z.rem_euclid(CHUNK_DEPTH as i32) as usize,
    );
    Some((coord, local))
}

/// Inverse of [`world_to_local`].
pub fn local_to_world(coord: ChunkCoord, local: LocalPos) -> Point3<i32> {
    coord.origin() + Vector3::new(local.x as i32, local.y as i32, local.z as i32)
}

/// The block containing a world-space point.
pub fn block_at_position(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}
