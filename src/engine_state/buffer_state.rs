//! # Buffer State Module
//!
//! The boundary between the voxel core and whatever graphics backend draws it.
//!
//! ## Architecture
//!
//! The core never touches a graphics API. Chunks hand finished geometry to a
//! [`RenderSubmitter`], which owns the GPU-side buffers and returns an opaque
//! [`BufferId`] for later draws and releases. Submission only ever happens on
//! the thread that owns the world.
//!
//! [`RecordingSubmitter`] is an in-memory implementation that keeps the
//! uploaded bytes and per-buffer analytics. It backs headless runs and tests.

use std::collections::HashMap;

use crate::engine_state::{rendering::Vertex, voxels::coordinates::ChunkCoord};

/// Handle to a vertex/index buffer pair owned by a [`RenderSubmitter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);

/// Render-submission interface consumed by the world.
pub trait RenderSubmitter {
    /// Uploads a chunk mesh and returns a handle to the new buffers.
    fn upload(&mut self, coord: ChunkCoord, vertices: &[Vertex], indices: &[u32]) -> BufferId;

    /// Frees buffers created by [`upload`](Self::upload).
    fn release(&mut self, id: BufferId);

    /// Issues one indexed draw call over an uploaded mesh.
    fn draw(&mut self, id: BufferId, index_count: u32);
}

/// Analytics data for an uploaded buffer pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferAnalytics {
    /// Chunk the buffers belong to
    pub coord: ChunkCoord,
    /// Size of the vertex buffer in bytes
    pub vertex_bytes: u64,
    /// Size of the index buffer in bytes
    pub index_bytes: u64,
    /// Number of draw calls issued against the buffers
    pub times_drawn: u64,
}

/// Stored contents of one upload.
#[derive(Debug, Clone)]
pub struct RecordedBuffer {
    pub vertex_data: Vec<u8>,
    pub indices: Vec<u32>,
    pub analytics: BufferAnalytics,
}

/// In-memory [`RenderSubmitter`] that records everything it is given.
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    next_id: u64,
    buffers: HashMap<BufferId, RecordedBuffer>,
    /// Total number of uploads, including released ones
    pub uploads: u64,
    /// Total number of draw calls
    pub draw_calls: u64,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        RecordingSubmitter::default()
    }

    /// The live buffer behind `id`, if it has not been released.
    pub fn buffer(&self, id: BufferId) -> Option<&RecordedBuffer> {
        self.buffers.get(&id)
    }

    /// Number of buffers that have been uploaded and not released.
    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// The live buffer uploaded for `coord`, if any.
    pub fn buffer_for_chunk(&self, coord: ChunkCoord) -> Option<&RecordedBuffer> {
        self.buffers.values().find(|b| b.analytics.coord == coord)
    }

    /// Gets the total memory held by live buffers
    ///
    /// # Returns
    ///
    /// Vertex plus index bytes in all live buffers
    pub fn get_total_used_memory(&self) -> u64 {
        self.buffers.values().fold(0, |acc, buffer| {
            acc + buffer.analytics.vertex_bytes + buffer.analytics.index_bytes
        })
    }
}

impl RenderSubmitter for RecordingSubmitter {
    fn upload(&mut self, coord: ChunkCoord, vertices: &[Vertex], indices: &[u32]) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        self.uploads += 1;

        let vertex_data: Vec<u8> = bytemuck::cast_slice(vertices).to_vec();
        let analytics = BufferAnalytics {
            coord,
            vertex_bytes: vertex_data.len() as u64,
            index_bytes: std::mem::size_of_val(indices) as u64,
            times_drawn: 0,
        };
        log::trace!("Uploaded {:?} for chunk {}: {:?}", id, coord, analytics);

        self.buffers.insert(
            id,
            RecordedBuffer {
                vertex_data,
                indices: indices.to_vec(),
                analytics,
            },
        );
        id
    }

    fn release(&mut self, id: BufferId) {
        if self.buffers.remove(&id).is_none() {
            log::warn!("Release of unknown buffer {:?}", id);
        }
    }

    fn draw(&mut self, id: BufferId, index_count: u32) {
        match self.buffers.get_mut(&id) {
            Some(buffer) => {
                debug_assert!(index_count as usize <= buffer.indices.len());
                buffer.analytics.times_drawn += 1;
                self.draw_calls += 1;
            }
            None => log::warn!("Draw of unknown buffer {:?}", id),
        }
    }
}
