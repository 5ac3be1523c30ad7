//! # Physics Module
//!
//! Axis-aligned collision between moving objects and the voxel grid.
//!
//! ## Resolution
//!
//! 1. **Broad phase**: the chunk under the object's center and its eight
//!    surrounding chunks, reached through neighbor links, filtered by overlap.
//! 2. **Narrow phase**: every solid cell of those chunks is tested against the
//!    object's box. Overlaps produce a per-axis push out of the block, with
//!    pushes through hidden faces suppressed.
//! 3. **Axis selection**: one axis per block, preferring Y, then Z, then X.
//! 4. **Apply**: the box moves along that axis and the velocity on it is zeroed.
//!
//! Blocks are handled one after another in a single pass; the result is an
//! approximation, not a simultaneous solve.

pub mod aabb;
pub mod resolver;

pub use aabb::{Aabb, Axis};
pub use resolver::{resolve_collisions, MovingObject};
