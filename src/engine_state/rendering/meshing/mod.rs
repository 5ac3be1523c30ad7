//! Mesh generation for voxel rendering.
//!
//! This module converts chunk voxel data into GPU-friendly vertex and index
//! lists. It owns no GPU resources; uploading is done by the chunk through a
//! [`RenderSubmitter`](crate::engine_state::buffer_state::RenderSubmitter).
//!
//! # Architecture
//! - [`MeshData`]: Vertex and index lists of one chunk
//! - [`Face`]: A single quad with outward-facing winding
//! - [`build_mesh`]: Visible-face extraction over a whole field

mod face;
mod mesh;

pub use face::Face;
pub use mesh::{build_mesh, face_indices, MeshData};
