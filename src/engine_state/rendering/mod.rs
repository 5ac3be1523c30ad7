//! Rendering-side data for the voxel engine.
//!
//! This module contains the vertex format and the mesher. Pipelines, shaders
//! and textures live outside the crate; geometry leaves through the
//! [`RenderSubmitter`](crate::engine_state::buffer_state::RenderSubmitter) trait.

pub mod meshing;
mod vertex;

pub use vertex::Vertex;
