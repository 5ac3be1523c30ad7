//! # Voxel World Core
//!
//! This module contains the voxel data model: blocks, chunks, the world grid
//! and the work that turns them into renderable geometry.
//!
//! ## Architecture
//!
//! * **Block**: block types, faces and the texture/solidity catalog
//! * **Chunk**: the voxel field of one grid cell, its face bits, sunlight and mesh lifecycle
//! * **Generation**: seeded heightmap terrain
//! * **World**: the grid of chunks, block edits, streaming and saving
//! * **Tasks**: background mesh builds
//!
//! ## Data Flow
//!
//! 1. The generator (or a save file) fills a chunk's voxel field
//! 2. Sunlight and face visibility are computed, across chunk edges where neighbors exist
//! 3. A mesh build turns visible faces into vertices and indices
//! 4. The world hands finished meshes to the render submitter
//!
//! ## Thread Safety
//!
//! Only mesh builds leave the owning thread. Block edits, lighting and edge
//! face refreshes happen on the thread that owns the [`World`](world::World).
//! A build works from snapshots of the neighbor boundaries, and when its
//! chunk's face bits are stale it rewrites them on the worker under the
//! field's write lock. Linking and unlinking join an in-flight build before
//! refreshing the shared edge.

pub mod block;
pub mod chunk;
pub mod coordinates;
pub mod generation;
pub mod raycast;
pub mod tasks;
pub mod world;
