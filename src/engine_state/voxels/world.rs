//! # World Module
//!
//! This module provides the `World` struct which owns every loaded chunk and
//! serves as the central coordinator for generation, persistence, block edits
//! and mesh builds.
//!
//! ## Architecture
//!
//! Chunks live in a hash map keyed by [`ChunkCoord`]; the map is their only
//! owner. Adjacent chunks hold [`NeighborLink`](super::chunk::NeighborLink)s to
//! each other, which are weak and only used for face and light lookups across
//! edges. Links are always set up and torn down in pairs.
//!
//! ## Frame Flow
//!
//! 1. Gameplay edits blocks through [`World::place_block`] and friends; the
//!    affected chunks are rebuilt synchronously before the call returns
//! 2. [`World::update`] collects finished background builds, uploads staged
//!    meshes and starts builds for dirty chunks
//! 3. [`World::render`] issues one draw per uploaded mesh
//!
//! The world is not internally synchronized. Callers must not edit it from
//! several threads at once.

use std::{collections::HashMap, sync::Arc};

use cgmath::{Point3, Vector3};
use web_time::Instant;

use crate::{
    config::WorldConfig,
    engine_state::{
        buffer_state::{BufferId, RenderSubmitter},
        persistence::{MetaData, SaveStore},
        voxels::{
            block::{block_type::BlockType, AtlasCatalog, BlockCatalog},
            chunk::{mirrored_cell, Chunk, MeshState},
            coordinates::{world_to_local, ChunkCoord, Direction, LocalPos},
            generation::TerrainGenerator,
            raycast::{self, RayHit},
        },
    },
    error::{WorldError, WorldResult},
};

/// The grid of loaded chunks.
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: TerrainGenerator,
    catalog: Arc<dyn BlockCatalog>,
    meta: MetaData,
    /// Buffers of unloaded chunks, released on the next update.
    pending_releases: Vec<BufferId>,
}

impl World {
    /// Creates a world with the default block catalog.
    pub fn new(config: &WorldConfig, store: &SaveStore) -> WorldResult<Self> {
        Self::with_catalog(config, store, Arc::new(AtlasCatalog::default()))
    }

    /// Creates the rectangular grid of chunks described by `config`.
    ///
    /// Chunks are created in row-major order, each linking to the already
    /// created chunks west and south of it. Saved chunks are loaded from
    /// `store`; the rest are generated. Lighting and face bits are computed for
    /// the whole grid before a background mesh build is started per chunk.
    ///
    /// # Arguments
    /// * `config` - Grid size, seed override and noise settings
    /// * `store` - Source of saved chunks and metadata
    /// * `catalog` - Texture and solidity lookup shared with build threads
    pub fn with_catalog(
        config: &WorldConfig,
        store: &SaveStore,
        catalog: Arc<dyn BlockCatalog>,
    ) -> WorldResult<Self> {
        let start = Instant::now();

        let stored_meta = store.load_meta()?;
        let seed = config
            .seed
            .or(stored_meta.map(|meta| meta.seed))
            .unwrap_or_else(|| fastrand::u32(..));
        let mut meta = stored_meta.unwrap_or_default();
        meta.seed = seed;

        let mut world = World {
            chunks: HashMap::new(),
            generator: TerrainGenerator::new(seed, config.noise_octaves, config.noise_frequency),
            catalog,
            meta,
            pending_releases: Vec::new(),
        };

        let x_start = -(config.grid_width / 2);
        let z_start = -(config.grid_depth / 2);
        for z in z_start..z_start + config.grid_depth {
            for x in x_start..x_start + config.grid_width {
                let coord = ChunkCoord::new(x, z);
                world
                    .chunks
                    .insert(coord, Chunk::new(coord, Arc::clone(&world.catalog)));
                world.link_existing(coord, &[Direction::WEST, Direction::SOUTH]);
            }
        }

        for chunk in world.chunks.values_mut() {
            populate(chunk, store, &world.generator)?;
        }
        for chunk in world.chunks.values_mut() {
            chunk.recompute_lighting();
        }
        for chunk in world.chunks.values_mut() {
            chunk.recompute_faces();
            chunk.start_build();
        }

        log::info!(
            "Created {}x{} world with seed {} in {:?}",
            config.grid_width,
            config.grid_depth,
            seed,
            start.elapsed()
        );
        Ok(world)
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn meta(&self) -> &MetaData {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaData {
        &mut self.meta
    }

    pub fn catalog(&self) -> &Arc<dyn BlockCatalog> {
        &self.catalog
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Coordinates of every loaded chunk, sorted.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self.chunks.keys().copied().collect();
        coords.sort();
        coords
    }

    // Block edits

    /// Resolves a world block position to its loaded chunk and local cell.
    fn locate(&self, position: Point3<i32>) -> WorldResult<(ChunkCoord, LocalPos)> {
        let (coord, local) =
            world_to_local(position).ok_or(WorldError::OutOfHeight(position.y))?;
        if !self.chunks.contains_key(&coord) {
            return Err(WorldError::NoSuchChunk(coord));
        }
        Ok((coord, local))
    }

    /// Places a block at a world position.
    ///
    /// The owning chunk and any neighbor sharing the edited edge are rebuilt
    /// before this returns.
    pub fn place_block(&mut self, position: Point3<i32>, block_type: BlockType) -> WorldResult<()> {
        self.edit_block(position, block_type)
    }

    /// Replaces the block at a world position with AIR.
    pub fn destroy_block(&mut self, position: Point3<i32>) -> WorldResult<()> {
        self.edit_block(position, BlockType::AIR)
    }

    /// The block at a world position.
    pub fn show_block(&self, position: Point3<i32>) -> WorldResult<BlockType> {
        let (coord, local) = self.locate(position)?;
        self.chunks
            .get(&coord)
            .map(|chunk| chunk.get_block(local))
            .ok_or(WorldError::NoSuchChunk(coord))
    }

    fn edit_block(&mut self, position: Point3<i32>, block_type: BlockType) -> WorldResult<()> {
        let (coord, local) = self.locate(position)?;
        let chunk = self
            .chunks
            .get_mut(&coord)
            .ok_or(WorldError::NoSuchChunk(coord))?;

        let touched = if block_type.is_air() {
            chunk.destroy(local)
        } else {
            chunk.place(local, block_type)
        };
        let mirrored: Vec<(ChunkCoord, LocalPos)> = touched
            .into_iter()
            .filter_map(|direction| {
                chunk
                    .neighbor_coord(direction)
                    .map(|neighbor| (neighbor, mirrored_cell(local, direction)))
            })
            .collect();
        chunk.rebuild_now();

        for (neighbor, cell) in mirrored {
            if let Some(chunk) = self.chunks.get_mut(&neighbor) {
                chunk.refresh_cell_faces(cell);
                chunk.rebuild_now();
            }
        }
        log::debug!("Set block {:?} to {:?}", position, block_type);
        Ok(())
    }

    /// The first solid block along a ray, for edit targeting.
    pub fn raycast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RayHit> {
        raycast::cast(origin, direction, max_distance, |cell| {
            let (coord, local) = world_to_local(cell)?;
            let block_type = self.chunks.get(&coord)?.get_block(local);
            (!block_type.is_air()).then_some(block_type)
        })
    }

    // Rendering

    /// Advances every chunk's mesh lifecycle by one frame.
    ///
    /// Finished builds become `Ready`, `Ready` meshes are uploaded and dirty
    /// chunks start a background build. Buffers of unloaded chunks are
    /// released first.
    pub fn update(&mut self, submitter: &mut dyn RenderSubmitter) {
        for id in self.pending_releases.drain(..) {
            submitter.release(id);
        }

        for chunk in self.chunks.values_mut() {
            chunk.poll_build();
            chunk.upload(submitter);
            if chunk.mesh_state() == MeshState::FacesDirty {
                chunk.start_build();
            }
        }
    }

    /// Draws every uploaded chunk mesh.
    pub fn render(&self, submitter: &mut dyn RenderSubmitter) {
        for chunk in self.chunks.values() {
            chunk.draw(submitter);
        }
    }

    /// Blocks until no chunk has a build in flight.
    pub fn finish_builds(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.wait_for_build();
        }
    }

    // Persistence and streaming

    /// Writes every loaded chunk and the metadata record.
    pub fn save(&self, store: &mut SaveStore) -> WorldResult<()> {
        for (coord, chunk) in &self.chunks {
            store.store_chunk(*coord, &chunk.export_bytes())?;
        }
        store.store_meta(&self.meta)?;
        log::info!("Saved {} chunks", self.chunks.len());
        Ok(())
    }

    /// Loads or generates the chunk at `coord` and links it into the grid.
    ///
    /// Linking refreshes the face bits on both sides of every shared edge
    /// before returning, so collision queries see the new chunk at once.
    /// Lighting is recomputed for the new chunk and its neighbors.
    ///
    /// # Returns
    /// `false` if the chunk was already loaded
    pub fn load_chunk(&mut self, coord: ChunkCoord, store: &SaveStore) -> WorldResult<bool> {
        if self.chunks.contains_key(&coord) {
            return Ok(false);
        }
        let mut chunk = Chunk::new(coord, Arc::clone(&self.catalog));
        populate(&mut chunk, store, &self.generator)?;
        self.chunks.insert(coord, chunk);

        let linked = self.link_existing(coord, &Direction::all());
        for neighbor in &linked {
            if let Some(chunk) = self.chunks.get_mut(neighbor) {
                chunk.recompute_lighting();
            }
        }
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.recompute_lighting();
            chunk.recompute_faces();
        }
        Ok(true)
    }

    /// Saves the chunk at `coord`, unlinks it and drops it.
    ///
    /// The chunk's render buffers are released on the next update.
    ///
    /// # Returns
    /// `false` if no chunk was loaded there
    pub fn unload_chunk(&mut self, coord: ChunkCoord, store: &mut SaveStore) -> WorldResult<bool> {
        let Some(mut chunk) = self.chunks.remove(&coord) else {
            return Ok(false);
        };
        chunk.wait_for_build();
        store.store_chunk(coord, &chunk.export_bytes())?;

        for direction in Direction::all() {
            if let Some(neighbor) = chunk.neighbor_coord(direction) {
                if let Some(neighbor) = self.chunks.get_mut(&neighbor) {
                    neighbor.unlink(direction.opposite());
                }
            }
        }
        if let Some(mesh) = chunk.take_uploaded() {
            self.pending_releases.push(mesh.id);
        }
        log::debug!("Unloaded chunk {}", coord);
        Ok(true)
    }

    /// Loads every chunk within `radius` of the chunk containing `position`
    /// and unloads chunks farther than `radius + 1`.
    pub fn stream_around(
        &mut self,
        position: Point3<f32>,
        radius: i32,
        store: &mut SaveStore,
    ) -> WorldResult<()> {
        let center = ChunkCoord::from_position(position);

        let far: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|coord| coord.distance(center) > radius + 1)
            .collect();
        for coord in far {
            self.unload_chunk(coord, store)?;
        }

        for dz in -radius..=radius {
            for dx in -radius..=radius {
                let coord = ChunkCoord::new(center.x + dx, center.z + dz);
                if self.load_chunk(coord, store)? {
                    log::trace!("Streamed in chunk {}", coord);
                }
            }
        }
        Ok(())
    }

    /// Links the chunk at `coord` with its loaded neighbors in `directions`.
    ///
    /// # Returns
    /// The coordinates of the neighbors that were linked
    fn link_existing(&mut self, coord: ChunkCoord, directions: &[Direction]) -> Vec<ChunkCoord> {
        let mut linked = Vec::new();
        for &direction in directions {
            let neighbor = coord.neighbor(direction);
            let (Some(own_link), Some(neighbor_link)) = (
                self.chunks.get(&coord).map(Chunk::as_link),
                self.chunks.get(&neighbor).map(Chunk::as_link),
            ) else {
                continue;
            };
            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.link(direction, neighbor_link);
            }
            if let Some(chunk) = self.chunks.get_mut(&neighbor) {
                chunk.link(direction.opposite(), own_link);
            }
            linked.push(neighbor);
        }
        linked
    }
}

impl Drop for World {
    fn drop(&mut self) {
        self.finish_builds();
    }
}

/// Fills a fresh chunk from its save file, or generates it when there is none.
fn populate(chunk: &mut Chunk, store: &SaveStore, generator: &TerrainGenerator) -> WorldResult<()> {
    match store.load_chunk(chunk.coord())? {
        Some(bytes) => {
            log::debug!("Loaded chunk {} from save", chunk.coord());
            chunk.load_bytes(&bytes)
        }
        None => {
            log::debug!("Generating chunk {}", chunk.coord());
            chunk.generate(generator);
            Ok(())
        }
    }
}
