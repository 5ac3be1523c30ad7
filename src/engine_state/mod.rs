//! # Engine State Module
//!
//! The subsystems of the voxel world core.
//!
//! ## Key Components
//!
//! * `voxels` - Blocks, chunks, terrain generation and the world grid
//! * `rendering` - Vertex format and mesh extraction
//! * `buffer_state` - The render-submission boundary and an in-memory recorder
//! * `task_management` - Background tasks with explicit join points
//! * `persistence` - Chunk and metadata save files
//! * `physics` - AABB collision against the voxel grid
//!
//! ## Architecture
//!
//! Each subsystem owns one concern. The [`World`](voxels::world::World) ties
//! them together: it generates or loads chunks, drives their mesh builds and
//! pushes finished geometry through a
//! [`RenderSubmitter`](buffer_state::RenderSubmitter).

pub mod buffer_state;
pub mod persistence;
pub mod physics;
pub mod rendering;
pub mod task_management;
pub mod voxels;
