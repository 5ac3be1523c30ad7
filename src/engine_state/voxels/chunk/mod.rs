//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one `CHUNK_WIDTH x CHUNK_DEPTH x
//! CHUNK_HEIGHT` column of the world, the unit of meshing, threading and
//! persistence.
//!
//! ## Ownership
//!
//! A chunk owns its [`VoxelField`] through an [`MtResource`], which it shares
//! only with its own in-flight build thread. Lateral neighbors are reached
//! through [`NeighborLink`]s holding weak references, so the world's chunk map
//! stays the sole owner and link cycles cannot leak.
//!
//! ## Mesh Lifecycle
//!
//! ```text
//! Clean -> FacesDirty -> Building -> Ready -> Clean
//!            (edit)      (thread)   (flag)   (upload)
//! ```
//!
//! Building runs on a background [`TaskHandle`]; [`Chunk::rebuild_now`] is the
//! synchronous path used for edits. At most one build is in flight: starting a
//! new build joins the previous one, as does dropping the chunk. Geometry only
//! reaches the [`RenderSubmitter`] from [`Chunk::upload`], on the owning thread.

use std::sync::{Arc, RwLockReadGuard};

use crate::{
    core::{MtResource, WeakMtResource},
    engine_state::{
        buffer_state::{BufferId, RenderSubmitter},
        rendering::meshing::MeshData,
        task_management::TaskHandle,
        voxels::{
            block::{block_type::BlockType, BlockCatalog},
            coordinates::{ChunkCoord, Direction, LocalPos},
            generation::TerrainGenerator,
            tasks::MeshBuildTask,
        },
    },
    error::WorldResult,
};

use neighbors::{BoundarySlice, LateralNeighbors, NeighborSlices};
use voxel_field::VoxelField;

pub mod faces;
pub mod lighting;
pub mod neighbors;
pub mod voxel_field;

/// Width of a chunk along X, in blocks.
pub const CHUNK_WIDTH: usize = 16;
/// Depth of a chunk along Z, in blocks.
pub const CHUNK_DEPTH: usize = 16;
/// Height of a chunk along Y, in blocks. Also the height of the world.
pub const CHUNK_HEIGHT: usize = 64;
/// The number of blocks in one horizontal plane of a chunk.
pub const CHUNK_PLANE_SIZE: usize = CHUNK_WIDTH * CHUNK_DEPTH;
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_HEIGHT;

/// Where a chunk is in its mesh (re)build lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshState {
    /// The uploaded mesh matches the field.
    Clean,
    /// The field changed and the mesh must be rebuilt.
    FacesDirty,
    /// A background build is in flight.
    Building,
    /// A finished mesh is staged and waiting for upload.
    Ready,
}

/// Non-owning reference to an adjacent chunk.
#[derive(Clone, Debug)]
pub struct NeighborLink {
    /// Grid coordinate of the neighbor
    pub coord: ChunkCoord,
    field: WeakMtResource<VoxelField>,
}

impl NeighborLink {
    /// The neighbor's field, if the neighbor is still alive.
    pub fn field(&self) -> Option<MtResource<VoxelField>> {
        self.field.upgrade()
    }
}

/// A mesh living in render buffers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UploadedMesh {
    pub id: BufferId,
    pub index_count: u32,
}

/// Represents one column of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    coord: ChunkCoord,
    /// Block, face and light storage, shared with the build thread.
    field: MtResource<VoxelField>,
    /// Links to the four lateral neighbors, where loaded.
    neighbors: LateralNeighbors<Option<NeighborLink>>,
    /// Texture and solidity lookup, shared with build threads.
    catalog: Arc<dyn BlockCatalog>,
    mesh_state: MeshState,
    /// Set when every face bit must be recomputed before the next mesh.
    faces_stale: bool,
    build: Option<TaskHandle<MeshData>>,
    staged: Option<MeshData>,
    uploaded: Option<UploadedMesh>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `coord` - The grid coordinate of the new chunk
    /// * `catalog` - Decides which blocks occlude, shade and collide
    pub fn new(coord: ChunkCoord, catalog: Arc<dyn BlockCatalog>) -> Self {
        Chunk {
            coord,
            field: MtResource::new(VoxelField::new()),
            neighbors: LateralNeighbors::default(),
            catalog,
            mesh_state: MeshState::Clean,
            faces_stale: true,
            build: None,
            staged: None,
            uploaded: None,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn mesh_state(&self) -> MeshState {
        self.mesh_state
    }

    /// Read access to the voxel field.
    pub fn field(&self) -> RwLockReadGuard<'_, VoxelField> {
        self.field.get()
    }

    pub fn catalog(&self) -> &dyn BlockCatalog {
        self.catalog.as_ref()
    }

    pub fn uploaded_mesh(&self) -> Option<UploadedMesh> {
        self.uploaded
    }

    // Neighbor links

    /// A non-owning link other chunks can hold to this one.
    pub fn as_link(&self) -> NeighborLink {
        NeighborLink {
            coord: self.coord,
            field: self.field.downgrade(),
        }
    }

    /// Stores `link` as this chunk's neighbor in `direction`.
    ///
    /// Only one side of the pair is updated; the world links both. Face bits of
    /// the edge facing the neighbor are recomputed before this returns.
    pub fn link(&mut self, direction: Direction, link: NeighborLink) {
        *self.neighbors.get_mut(direction) = Some(link);
        self.refresh_edge_faces(direction);
    }

    /// Removes the link in `direction`.
    ///
    /// The edge facing the old neighbor gets its face bits recomputed and the
    /// light that neighbor wrote into it cleared.
    pub fn unlink(&mut self, direction: Direction) {
        if self.neighbors.get_mut(direction).take().is_some() {
            lighting::reset_edge(&mut self.field.get_mut(), direction);
            self.refresh_edge_faces(direction);
        }
    }

    pub fn neighbor(&self, direction: Direction) -> Option<&NeighborLink> {
        self.neighbors.get(direction).as_ref()
    }

    /// Grid coordinate of the linked neighbor in `direction`.
    pub fn neighbor_coord(&self, direction: Direction) -> Option<ChunkCoord> {
        self.neighbor(direction).map(|link| link.coord)
    }

    /// Snapshots the boundary plane of every loaded neighbor.
    pub fn neighbor_slices(&self) -> NeighborSlices {
        self.neighbors.each_ref().map(|direction, link| {
            let field = link.as_ref()?.field()?;
            let guard = field.get();
            Some(BoundarySlice::capture(&guard, direction))
        })
    }

    // Contents

    /// Fills the field with procedurally generated terrain.
    pub fn generate(&mut self, generator: &TerrainGenerator) {
        generator.fill_chunk(self.coord, &mut self.field.get_mut());
        self.mark_faces_stale();
    }

    /// Replaces the field's blocks from a saved byte array.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> WorldResult<()> {
        self.field.get_mut().import_bytes(bytes)?;
        self.mark_faces_stale();
        Ok(())
    }

    /// Block types in save-file order.
    pub fn export_bytes(&self) -> Vec<u8> {
        self.field.get().export_bytes()
    }

    pub fn get_block(&self, local: LocalPos) -> BlockType {
        self.field.get().get_local(local)
    }

    // Derived data

    /// Recomputes sunlight for every column, writing into neighbor boundaries.
    ///
    /// Locks this field and every loaded neighbor field for writing, so it must
    /// only run on the thread that owns the world.
    pub fn recompute_lighting(&mut self) {
        let neighbor_fields = self
            .neighbors
            .each_ref()
            .map(|_, link| link.as_ref().and_then(NeighborLink::field));
        let mut guards = neighbor_fields
            .each_ref()
            .map(|_, field| field.as_ref().map(MtResource::get_mut));
        let mut fields = guards
            .each_mut()
            .map(|_, guard| guard.as_mut().map(|guard| &mut **guard));

        lighting::propagate_sunlight(
            &mut self.field.get_mut(),
            &mut fields,
            self.catalog.as_ref(),
        );
    }

    /// Recomputes every face bit on the calling thread.
    pub fn recompute_faces(&mut self) {
        let slices = self.neighbor_slices();
        faces::refresh_all(&mut self.field.get_mut(), &slices, self.catalog.as_ref());
        self.faces_stale = false;
    }

    /// Recomputes the face bits of a single cell, for edits next door.
    pub fn refresh_cell_faces(&mut self, local: LocalPos) {
        let slices = self.neighbor_slices();
        faces::refresh_cell(&mut self.field.get_mut(), &slices, self.catalog.as_ref(), local);
        self.mesh_state = MeshState::FacesDirty;
    }

    /// Recomputes the face bits of the edge plane facing `direction`.
    ///
    /// An in-flight build is joined and discarded first so it cannot write
    /// its older face bits over the refreshed edge.
    pub fn refresh_edge_faces(&mut self, direction: Direction) {
        self.join_build();
        let slices = self.neighbor_slices();
        faces::refresh_edge(
            &mut self.field.get_mut(),
            &slices,
            self.catalog.as_ref(),
            direction,
        );
        self.mesh_state = MeshState::FacesDirty;
    }

    /// Marks every face bit as needing recomputation before the next mesh.
    pub fn mark_faces_stale(&mut self) {
        self.faces_stale = true;
        self.mesh_state = MeshState::FacesDirty;
    }

    pub fn faces_stale(&self) -> bool {
        self.faces_stale
    }

    // Edits

    /// Sets one cell to a solid type.
    ///
    /// # Returns
    /// Directions of the neighbors whose mirrored boundary cell must be
    /// refreshed, see [`Chunk::set_block`].
    pub fn place(&mut self, local: LocalPos, block_type: BlockType) -> Vec<Direction> {
        self.set_block(local, block_type)
    }

    /// Sets one cell to AIR.
    pub fn destroy(&mut self, local: LocalPos) -> Vec<Direction> {
        self.set_block(local, BlockType::AIR)
    }

    /// Writes one cell and brings lighting and nearby face bits up to date.
    ///
    /// Sunlight is recomputed for the whole chunk and face bits for the
    /// 3x3x3 neighborhood of the cell. The mesh state becomes `FacesDirty`.
    ///
    /// # Returns
    /// The lateral directions in which `local` touches the chunk edge and a
    /// neighbor is linked. The caller refreshes the mirrored cell there.
    pub fn set_block(&mut self, local: LocalPos, block_type: BlockType) -> Vec<Direction> {
        self.field
            .get_mut()
            .set(local.x, local.y, local.z, block_type);
        self.recompute_lighting();

        let slices = self.neighbor_slices();
        faces::refresh_around(
            &mut self.field.get_mut(),
            &slices,
            self.catalog.as_ref(),
            local,
        );
        self.mesh_state = MeshState::FacesDirty;

        boundary_directions(local)
            .into_iter()
            .filter(|direction| self.neighbor(*direction).is_some())
            .collect()
    }

    // Mesh lifecycle

    /// Starts a background mesh build, joining any build still in flight.
    pub fn start_build(&mut self) {
        self.join_build();
        let task = self.build_task();
        self.faces_stale = false;
        self.build = Some(TaskHandle::spawn(task));
        self.mesh_state = MeshState::Building;
        log::trace!("Started mesh build for chunk {}", self.coord);
    }

    /// Builds the mesh on the calling thread. Leaves the chunk `Ready`.
    pub fn rebuild_now(&mut self) {
        self.join_build();
        let task = self.build_task();
        self.faces_stale = false;
        self.staged = Some(task.run());
        self.mesh_state = MeshState::Ready;
    }

    /// Moves a finished background build to `Ready`. Never blocks.
    ///
    /// # Returns
    /// `true` if a build finished during this call
    pub fn poll_build(&mut self) -> bool {
        if self.mesh_state != MeshState::Building {
            return false;
        }
        if !self.build.as_ref().is_some_and(TaskHandle::is_ready) {
            return false;
        }
        self.finish_build();
        true
    }

    /// Blocks until any in-flight build has finished and staged its mesh.
    pub fn wait_for_build(&mut self) {
        if self.mesh_state == MeshState::Building {
            self.finish_build();
        }
    }

    /// Hands a `Ready` mesh to the submitter and returns to `Clean`.
    ///
    /// The chunk's previous buffers are released first. Empty meshes are not
    /// uploaded.
    ///
    /// # Returns
    /// `true` if the state was `Ready`
    pub fn upload(&mut self, submitter: &mut dyn RenderSubmitter) -> bool {
        if self.mesh_state != MeshState::Ready {
            return false;
        }
        if let Some(previous) = self.uploaded.take() {
            submitter.release(previous.id);
        }
        if let Some(mesh) = self.staged.take() {
            if !mesh.is_empty() {
                let id = submitter.upload(self.coord, &mesh.vertices, &mesh.indices);
                self.uploaded = Some(UploadedMesh {
                    id,
                    index_count: mesh.indices.len() as u32,
                });
            }
        }
        self.mesh_state = MeshState::Clean;
        true
    }

    /// Issues the draw call for the uploaded mesh, if any.
    pub fn draw(&self, submitter: &mut dyn RenderSubmitter) {
        if let Some(mesh) = self.uploaded {
            submitter.draw(mesh.id, mesh.index_count);
        }
    }

    /// Gives up ownership of the uploaded buffers, for release by the caller.
    pub fn take_uploaded(&mut self) -> Option<UploadedMesh> {
        self.uploaded.take()
    }

    fn build_task(&self) -> MeshBuildTask {
        MeshBuildTask::new(
            self.coord,
            self.field.clone(),
            self.neighbor_slices(),
            Arc::clone(&self.catalog),
            self.faces_stale,
        )
    }

    fn finish_build(&mut self) {
        let Some(handle) = self.build.take() else {
            return;
        };
        match handle.join() {
            Some(mesh) => {
                self.staged = Some(mesh);
                self.mesh_state = MeshState::Ready;
            }
            None => {
                log::error!("Mesh build for chunk {} failed", self.coord);
                self.mesh_state = MeshState::Clean;
            }
        }
    }

    /// Joins an in-flight build and discards its result.
    fn join_build(&mut self) {
        if let Some(handle) = self.build.take() {
            handle.join();
        }
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        self.join_build();
    }
}

/// Lateral directions in which `local` lies on the chunk edge.
pub fn boundary_directions(local: LocalPos) -> Vec<Direction> {
    let mut directions = Vec::with_capacity(2);
    if local.x == 0 {
        directions.push(Direction::WEST);
    }
    if local.x == CHUNK_WIDTH - 1 {
        directions.push(Direction::EAST);
    }
    if local.z == 0 {
        directions.push(Direction::SOUTH);
    }
    if local.z == CHUNK_DEPTH - 1 {
        directions.push(Direction::NORTH);
    }
    directions
}

/// The cell across the edge from `local` in the neighbor at `direction`.
pub fn mirrored_cell(local: LocalPos, direction: Direction) -> LocalPos {
    match direction {
        Direction::WEST => LocalPos::new(CHUNK_WIDTH - 1, local.y, local.z),
        Direction::EAST => LocalPos::new(0, local.y, local.z),
        Direction::SOUTH => LocalPos::new(local.x, local.y, CHUNK_DEPTH - 1),
        Direction::NORTH => LocalPos::new(local.x, local.y, 0),
    }
}
