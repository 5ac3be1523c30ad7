use std::sync::Arc;

use cgmath::{Point3, Vector3};
use voxel_world::engine_state::physics::resolver::resolve_collisions;
use voxel_world::engine_state::voxels::block::TextureRect;
use voxel_world::engine_state::voxels::chunk::voxel_field::{VoxelField, FULL_LIGHT, SHADOW_LIGHT};
use voxel_world::{
    AtlasCatalog, BlockCatalog, BlockSide, BlockType, ChunkCoord, FsByteStore, MeshState,
    MovingObject, RecordingSubmitter, SaveStore, World, WorldConfig, WorldError, CHUNK_DEPTH,
    CHUNK_HEIGHT, CHUNK_WIDTH,
};

const EAST: ChunkCoord = ChunkCoord::new(0, 0);
const WEST: ChunkCoord = ChunkCoord::new(-1, 0);

fn config(width: i32, depth: i32) -> WorldConfig {
    WorldConfig {
        seed: Some(5),
        grid_width: width,
        grid_depth: depth,
        ..WorldConfig::default()
    }
}

/// A 2x1 world of two empty chunks with one block on each side of their shared edge.
fn touching_pair() -> World {
    let mut store = SaveStore::in_memory();
    let mut east = VoxelField::new();
    east.set(0, 10, 5, BlockType::DIRT);
    let mut west = VoxelField::new();
    west.set(CHUNK_WIDTH - 1, 10, 5, BlockType::STONE);
    store.store_chunk(EAST, &east.export_bytes()).unwrap();
    store.store_chunk(WEST, &west.export_bytes()).unwrap();
    World::new(&config(2, 1), &store).unwrap()
}

/// A field filled with STONE from the bottom up to `height` blocks.
fn floor(height: usize) -> VoxelField {
    let mut field = VoxelField::new();
    for y in 0..height {
        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                field.set(x, y, z, BlockType::STONE);
            }
        }
    }
    field
}

/// The default atlas, with WHITE treated as glass.
struct GlassCatalog;

impl BlockCatalog for GlassCatalog {
    fn face_texture_rects(&self, block_type: BlockType) -> [TextureRect; 6] {
        AtlasCatalog::default().face_texture_rects(block_type)
    }

    fn is_solid(&self, block_type: BlockType) -> bool {
        !block_type.is_air() && block_type != BlockType::WHITE
    }
}

#[test]
fn blocks_touching_across_a_chunk_edge_hide_each_other() {
    let world = touching_pair();

    let east = world.chunk(EAST).unwrap().field();
    assert!(!east.is_face_visible(0, 10, 5, BlockSide::LEFT));
    assert!(east.is_face_visible(0, 10, 5, BlockSide::RIGHT));
    assert!(east.is_face_visible(0, 10, 5, BlockSide::TOP));
    drop(east);

    let west = world.chunk(WEST).unwrap().field();
    assert!(!west.is_face_visible(CHUNK_WIDTH - 1, 10, 5, BlockSide::RIGHT));
    assert!(west.is_face_visible(CHUNK_WIDTH - 1, 10, 5, BlockSide::LEFT));
}

#[test]
fn removing_a_boundary_block_exposes_the_neighbor_face() {
    let mut world = touching_pair();
    let mut submitter = RecordingSubmitter::new();
    world.finish_builds();
    world.update(&mut submitter);
    assert_eq!(submitter.buffer_for_chunk(EAST).unwrap().indices.len(), 5 * 6);

    world.destroy_block(Point3::new(-1, 10, 5)).unwrap();
    assert!(world
        .chunk(EAST)
        .unwrap()
        .field()
        .is_face_visible(0, 10, 5, BlockSide::LEFT));

    world.update(&mut submitter);
    assert_eq!(submitter.buffer_for_chunk(EAST).unwrap().indices.len(), 6 * 6);
    assert!(submitter.buffer_for_chunk(WEST).is_none());
}

#[test]
fn mesh_states_advance_only_through_update() {
    let mut world = World::new(&config(1, 1), &SaveStore::in_memory()).unwrap();
    let mut submitter = RecordingSubmitter::new();
    assert_eq!(world.chunk(EAST).unwrap().mesh_state(), MeshState::Building);

    world.finish_builds();
    assert_eq!(world.chunk(EAST).unwrap().mesh_state(), MeshState::Ready);
    assert_eq!(submitter.uploads, 0);

    world.update(&mut submitter);
    assert_eq!(world.chunk(EAST).unwrap().mesh_state(), MeshState::Clean);
    assert_eq!(submitter.uploads, 1);

    world.update(&mut submitter);
    assert_eq!(submitter.uploads, 1);
}

#[test]
fn air_contributes_no_geometry() {
    let mut store = SaveStore::in_memory();
    store
        .store_chunk(EAST, &VoxelField::new().export_bytes())
        .unwrap();
    let mut world = World::new(&config(1, 1), &store).unwrap();
    let mut submitter = RecordingSubmitter::new();
    world.finish_builds();
    world.update(&mut submitter);
    world.render(&mut submitter);

    assert_eq!(world.chunk(EAST).unwrap().mesh_state(), MeshState::Clean);
    assert_eq!(submitter.uploads, 0);
    assert_eq!(submitter.draw_calls, 0);
    assert_eq!(submitter.get_total_used_memory(), 0);
}

#[test]
fn edits_on_missing_chunks_are_reported() {
    let mut world = World::new(&config(1, 1), &SaveStore::in_memory()).unwrap();
    let result = world.place_block(Point3::new(-1, 3, 0), BlockType::SAND);
    assert!(matches!(result, Err(WorldError::NoSuchChunk(coord)) if coord == WEST));
    assert!(matches!(
        world.show_block(Point3::new(0, -1, 0)),
        Err(WorldError::OutOfHeight(-1))
    ));
}

#[test]
fn worlds_persist_through_the_filesystem() {
    let folder = std::env::temp_dir().join(format!("voxel-world-save-{}", std::process::id()));
    let target = Point3::new(2, CHUNK_HEIGHT as i32 - 1, 7);

    {
        let mut store = SaveStore::new(FsByteStore::new(&folder).unwrap());
        let mut world = World::new(&config(2, 2), &store).unwrap();
        world.place_block(target, BlockType::WOOD).unwrap();
        world
            .meta_mut()
            .set_player(Point3::new(1.0, 40.0, 2.0), Vector3::new(0.0, -3.0, 0.0));
        world.save(&mut store).unwrap();
    }

    let store = SaveStore::new(FsByteStore::new(&folder).unwrap());
    let world = World::new(&WorldConfig { seed: None, ..config(2, 2) }, &store).unwrap();
    assert_eq!(world.seed(), 5);
    assert_eq!(world.show_block(target).unwrap(), BlockType::WOOD);
    assert_eq!(world.meta().player_position(), Point3::new(1.0, 40.0, 2.0));
    assert_eq!(world.meta().player_velocity(), Vector3::new(0.0, -3.0, 0.0));

    drop(world);
    std::fs::remove_dir_all(&folder).unwrap();
}

#[test]
fn player_lands_where_four_chunks_meet() {
    let mut floor = VoxelField::new();
    for y in 0..20 {
        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                floor.set(x, y, z, BlockType::STONE);
            }
        }
    }
    let mut store = SaveStore::in_memory();
    for (x, z) in [(-1, -1), (0, -1), (-1, 0), (0, 0)] {
        store
            .store_chunk(ChunkCoord::new(x, z), &floor.export_bytes())
            .unwrap();
    }
    let world = World::new(&config(2, 2), &store).unwrap();

    let mut player = MovingObject::new(
        Point3::new(0.0, 25.0, 0.0),
        Vector3::new(0.6, 1.8, 0.6),
        Vector3::new(-0.3, 0.0, -0.3),
    );
    for _ in 0..120 {
        player.step(&world, 1.0 / 60.0, -20.0);
    }

    assert!(player.grounded());
    assert!((player.position.y - 20.0).abs() < 1e-3);
    assert_eq!(player.position.x, 0.0);
    assert_eq!(player.position.z, 0.0);
}

#[test]
fn collisions_see_a_streamed_in_neighbor_immediately() {
    let east = ChunkCoord::new(1, 0);
    let mut store = SaveStore::in_memory();
    store.store_chunk(EAST, &floor(5).export_bytes()).unwrap();
    store.store_chunk(east, &floor(5).export_bytes()).unwrap();
    let mut world = World::new(&config(1, 1), &store).unwrap();
    assert!(world
        .chunk(EAST)
        .unwrap()
        .field()
        .is_face_visible(CHUNK_WIDTH - 1, 4, 8, BlockSide::RIGHT));

    assert!(world.load_chunk(east, &store).unwrap());
    assert!(!world
        .chunk(EAST)
        .unwrap()
        .field()
        .is_face_visible(CHUNK_WIDTH - 1, 4, 8, BlockSide::RIGHT));

    // Straddles the edge, sunk 0.6 into the floor
    let mut mover = MovingObject::new(
        Point3::new(15.5, 4.4, 8.2),
        Vector3::new(0.6, 1.8, 0.6),
        Vector3::new(0.0, 0.0, 0.0),
    );
    mover.velocity = Vector3::new(1.0, -1.0, 0.0);
    let applied = resolve_collisions(&world, &mut mover);

    assert_eq!(applied.x, 0.0);
    assert_eq!(applied.z, 0.0);
    assert!((applied.y - 0.6).abs() < 1e-4);
    assert_eq!(mover.velocity.x, 1.0);
    assert_eq!(mover.velocity.y, 0.0);
}

#[test]
fn unloading_a_chunk_clears_the_light_it_cast_next_door() {
    let east = ChunkCoord::new(1, 0);
    let mut store = SaveStore::in_memory();
    store.store_chunk(EAST, &VoxelField::new().export_bytes()).unwrap();
    store.store_chunk(east, &floor(40).export_bytes()).unwrap();
    let mut world = World::new(&config(1, 1), &store).unwrap();

    world.load_chunk(east, &store).unwrap();
    let shadowed = world
        .chunk(EAST)
        .unwrap()
        .field()
        .light(CHUNK_WIDTH - 1, 30, 8, BlockSide::RIGHT);
    assert_eq!(shadowed, SHADOW_LIGHT);

    assert!(world.unload_chunk(east, &mut store).unwrap());
    let field = world.chunk(EAST).unwrap().field();
    assert_eq!(field.light(CHUNK_WIDTH - 1, 30, 8, BlockSide::RIGHT), FULL_LIGHT);
}

#[test]
fn non_solid_blocks_neither_hide_faces_nor_collide() {
    let mut store = SaveStore::in_memory();
    let mut field = VoxelField::new();
    field.set(4, 10, 4, BlockType::DIRT);
    field.set(5, 10, 4, BlockType::WHITE);
    store.store_chunk(EAST, &field.export_bytes()).unwrap();
    let world = World::with_catalog(&config(1, 1), &store, Arc::new(GlassCatalog)).unwrap();

    let chunk = world.chunk(EAST).unwrap();
    assert!(chunk.field().is_face_visible(4, 10, 4, BlockSide::RIGHT));
    assert!(chunk.field().is_face_visible(5, 10, 4, BlockSide::LEFT));

    let mut mover = MovingObject::new(
        Point3::new(5.2, 10.2, 4.2),
        Vector3::new(0.6, 0.6, 0.6),
        Vector3::new(0.0, 0.0, 0.0),
    );
    assert_eq!(resolve_collisions(&world, &mut mover), Vector3::new(0.0, 0.0, 0.0));
}
