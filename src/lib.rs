#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! The world core of a block-based sandbox: a grid of fixed-size chunks of
//! typed blocks, generated from seeded noise, meshed on background threads
//! with neighbor-aware face culling and column sunlight, saved to per-chunk
//! files, and used as a collision field for moving boxes.
//!
//! ## Key Modules
//!
//! * `core` - Shared-resource wrappers used across threads
//! * `engine_state` - Voxels, meshing, tasks, persistence and physics
//! * `config` - Runtime settings loaded from JSON
//! * `error` - The crate's error type
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::{BlockType, RecordingSubmitter, SaveStore, World, WorldConfig};
//!
//! let config = WorldConfig {
//!     seed: Some(3),
//!     grid_width: 1,
//!     grid_depth: 1,
//!     ..WorldConfig::default()
//! };
//! let mut world = World::new(&config, &SaveStore::in_memory()).unwrap();
//! world.place_block(Point3::new(2, 63, 2), BlockType::WOOD).unwrap();
//! assert_eq!(world.show_block(Point3::new(2, 63, 2)).unwrap(), BlockType::WOOD);
//!
//! let mut submitter = RecordingSubmitter::new();
//! world.update(&mut submitter);
//! world.render(&mut submitter);
//! ```
//!
//! Rendering itself is out of scope: geometry leaves through the
//! [`RenderSubmitter`] trait and textures are addressed through a
//! [`BlockCatalog`].

use std::path::Path;

use cgmath::{Point3, Vector3};
use log::info;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

pub use config::WorldConfig;
pub use engine_state::{
    buffer_state::{BufferId, RecordingSubmitter, RenderSubmitter},
    persistence::{ByteStore, FsByteStore, MemoryByteStore, MetaData, SaveStore},
    physics::{Aabb, MovingObject},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType, AtlasCatalog, BlockCatalog},
        chunk::{Chunk, MeshState, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
        coordinates::{ChunkCoord, Direction, LocalPos},
        world::World,
    },
};
pub use error::{WorldError, WorldResult};

/// Frames simulated by [`run`].
const DEMO_FRAMES: usize = 240;
/// Chunk radius kept loaded around the player by [`run`].
const DEMO_STREAM_RADIUS: i32 = 1;

/// Initializes `env_logger`, writing to stdout and filtered by `RUST_LOG`.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
}

/// Runs a headless session against the save folder of the given config.
///
/// The player drops onto the terrain, the world streams and meshes around
/// it, a random block is placed where the player looks, and everything is
/// saved.
///
/// # Arguments
/// * `config_path` - Optional JSON configuration file
pub fn run(config_path: Option<&Path>) -> WorldResult<()> {
    init_logger();
    info!("Logger initialized");

    let config = match config_path {
        Some(path) => WorldConfig::from_json_file(path)?,
        None => WorldConfig::default(),
    };
    let mut store = SaveStore::new(FsByteStore::new(&config.save_folder)?);
    let mut world = World::new(&config, &store)?;
    let mut submitter = RecordingSubmitter::new();

    let mut spawn = world.meta().player_position();
    if spawn == Point3::new(0.0, 0.0, 0.0) {
        spawn = Point3::new(8.0, CHUNK_HEIGHT as f32, 8.0);
    }
    let mut player = MovingObject::new(
        spawn,
        Vector3::new(0.6, 1.8, 0.6),
        Vector3::new(-0.3, 0.0, -0.3),
    );
    player.velocity = world.meta().player_velocity();

    let dt = 1.0 / 60.0;
    for _ in 0..DEMO_FRAMES {
        player.step(&world, dt, config.gravity);
        world.stream_around(player.position, DEMO_STREAM_RADIUS, &mut store)?;
        world.update(&mut submitter);
        world.render(&mut submitter);
    }
    info!(
        "Player at {:?}, grounded: {}",
        player.position,
        player.grounded()
    );

    let eye = player.position + Vector3::new(0.0, 1.6, 0.0);
    if let Some(hit) = world.raycast(eye, Vector3::new(0.3, -1.0, 0.2), 8.0) {
        let block_type = BlockType::get_random_type();
        world.place_block(hit.previous, block_type)?;
        info!("Placed {:?} at {:?}", block_type, hit.previous);
    }

    world.meta_mut().set_player(player.position, player.velocity);
    world.save(&mut store)?;
    info!(
        "{} uploads, {} draw calls, {} bytes in live buffers",
        submitter.uploads,
        submitter.draw_calls,
        submitter.get_total_used_memory()
    );
    Ok(())
}
