//! # Chunk Mesh Build Task
//!
//! This module defines the `MeshBuildTask`, the background half of a chunk's
//! mesh lifecycle. The task optionally recomputes the chunk's face bits and
//! then extracts its visible faces into a private [`MeshData`].
//!
//! The task holds only the chunk's own field and snapshots of the neighbor
//! boundaries, so it never locks another chunk.

use std::sync::Arc;

use cgmath::Point3;
use web_time::Instant;

use crate::{
    core::MtResource,
    engine_state::{
        rendering::meshing::{build_mesh, MeshData},
        task_management::Task,
        voxels::{
            block::BlockCatalog,
            chunk::{faces, neighbors::NeighborSlices, voxel_field::VoxelField},
            coordinates::ChunkCoord,
        },
    },
};

/// A task that builds the mesh of one chunk.
pub struct MeshBuildTask {
    /// Chunk the mesh belongs to, for logging
    coord: ChunkCoord,
    /// The chunk's voxel field, shared with the owning chunk
    field: MtResource<VoxelField>,
    /// Boundary planes of the loaded neighbors, captured at spawn time
    slices: NeighborSlices,
    /// Texture and solidity lookup
    catalog: Arc<dyn BlockCatalog>,
    /// Recompute every face bit before meshing
    recompute_faces: bool,
}

impl MeshBuildTask {
    /// Creates a new mesh build task.
    ///
    /// # Arguments
    /// * `coord` - The chunk being built
    /// * `field` - Shared handle to the chunk's voxel field
    /// * `slices` - Neighbor boundary snapshots used for face visibility
    /// * `catalog` - Block catalog for texture coordinates and face culling
    /// * `recompute_faces` - Whether the field's face bits are stale
    pub fn new(
        coord: ChunkCoord,
        field: MtResource<VoxelField>,
        slices: NeighborSlices,
        catalog: Arc<dyn BlockCatalog>,
        recompute_faces: bool,
    ) -> Self {
        MeshBuildTask {
            coord,
            field,
            slices,
            catalog,
            recompute_faces,
        }
    }

    /// Runs the build on the current thread.
    pub fn run(&self) -> MeshData {
        let start = Instant::now();

        if self.recompute_faces {
            faces::refresh_all(&mut self.field.get_mut(), &self.slices, self.catalog.as_ref());
        }
        let origin: Point3<i32> = self.coord.origin();
        let mesh = build_mesh(&self.field.get(), self.catalog.as_ref(), origin);

        log::debug!(
            "Built mesh for chunk {} ({} faces) in {:?}",
            self.coord,
            mesh.face_count(),
            start.elapsed()
        );
        mesh
    }
}

impl Task for MeshBuildTask {
    type Output = MeshData;

    fn process(&self) -> MeshData {
        self.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        task_management::TaskHandle,
        voxels::block::{block_type::BlockType, AtlasCatalog},
    };

    #[test]
    fn background_build_matches_direct_build() {
        let mut field = VoxelField::new();
        field.set(3, 3, 3, BlockType::STONE);
        field.set(3, 4, 3, BlockType::GRASS);
        let field = MtResource::new(field);

        let task = MeshBuildTask::new(
            ChunkCoord::new(0, 0),
            field.clone(),
            NeighborSlices::default(),
            Arc::new(AtlasCatalog::default()),
            true,
        );
        let mesh = TaskHandle::spawn(task).join().unwrap();

        assert_eq!(mesh.face_count(), 10);
        let direct = build_mesh(&field.get(), &AtlasCatalog::default(), Point3::new(0, 0, 0));
        assert_eq!(mesh, direct);
    }
}
