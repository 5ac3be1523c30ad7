//! # Error Module
//!
//! Failures surfaced by the voxel world. Missing save data is not represented
//! here: loaders return `Ok(None)` for it and the caller generates instead.

use std::{fmt, io, path::PathBuf};

use crate::engine_state::voxels::coordinates::ChunkCoord;

/// Result alias used across the crate.
pub type WorldResult<T> = Result<T, WorldError>;

/// Every failure the world core reports to its caller.
#[derive(Debug)]
pub enum WorldError {
    /// A block edit or query targeted a chunk that is not loaded.
    NoSuchChunk(ChunkCoord),
    /// A world-space y coordinate outside `[0, CHUNK_HEIGHT)`.
    OutOfHeight(i32),
    /// A chunk byte array with the wrong number of cells.
    InvalidFieldLength { expected: usize, found: usize },
    /// A chunk byte array containing a value with no `BlockType`.
    UnknownBlockType(u8),
    /// A metadata record with the wrong size.
    InvalidMetaData { expected: usize, found: usize },
    /// A save file could not be opened, read or written.
    Io { path: PathBuf, source: io::Error },
    /// The configuration file could not be parsed.
    Config(serde_json::Error),
}

impl WorldError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WorldError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::NoSuchChunk(coord) => write!(f, "no chunk loaded at {}", coord),
            WorldError::OutOfHeight(y) => write!(f, "block height {} is outside the world", y),
            WorldError::InvalidFieldLength { expected, found } => write!(
                f,
                "chunk data has {} cells, expected {}",
                found, expected
            ),
            WorldError::UnknownBlockType(value) => write!(f, "unknown block type {}", value),
            WorldError::InvalidMetaData { expected, found } => write!(
                f,
                "metadata record is {} bytes, expected {}",
                found, expected
            ),
            WorldError::Io { path, source } => {
                write!(f, "i/o failure on {}: {}", path.display(), source)
            }
            WorldError::Config(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Io { source, .. } => Some(source),
            WorldError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WorldError {
    fn from(err: serde_json::Error) -> Self {
        WorldError::Config(err)
    }
}
