//! Moving objects and penetration resolution against the voxel grid.

use cgmath::{Point3, Vector3, Zero};

use crate::engine_state::voxels::{
    chunk::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
    coordinates::{ChunkCoord, Direction},
    world::World,
};

use super::aabb::{collide, select_axis, Aabb, Axis};

/// A body that moves through the world and collides with solid blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct MovingObject {
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
    /// Offset from `position` to the box's minimum corner
    pub offset: Vector3<f32>,
    aabb: Aabb,
    grounded: bool,
}

impl MovingObject {
    pub fn new(position: Point3<f32>, size: Vector3<f32>, offset: Vector3<f32>) -> Self {
        MovingObject {
            position,
            velocity: Vector3::zero(),
            offset,
            aabb: Aabb::new(position + offset, size),
            grounded: false,
        }
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// True if the last step pushed the object up out of a block.
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Moves the box to `position + offset`.
    pub fn sync_aabb(&mut self) {
        self.aabb.position = self.position + self.offset;
    }

    /// Moves `position` to follow the box.
    pub fn sync_position(&mut self) {
        self.position = self.aabb.position - self.offset;
    }

    /// Advances the object by `dt` seconds.
    ///
    /// Gravity is added to the vertical velocity, the object moves, and any
    /// penetration into solid blocks is resolved.
    pub fn step(&mut self, world: &World, dt: f32, gravity: f32) {
        self.velocity.y += gravity * dt;
        self.position += self.velocity * dt;
        self.sync_aabb();

        let applied = resolve_collisions(world, self);
        self.grounded = applied.y > 0.0;
        self.sync_position();
    }
}

/// World-space box covering a whole chunk.
fn chunk_bounds(coord: ChunkCoord) -> Aabb {
    let origin = coord.origin();
    Aabb::new(
        Point3::new(origin.x as f32, origin.y as f32, origin.z as f32),
        Vector3::new(CHUNK_WIDTH as f32, CHUNK_HEIGHT as f32, CHUNK_DEPTH as f32),
    )
}

/// The loaded chunk linked from `chunk` in `direction`.
fn linked<'w>(world: &'w World, chunk: &Chunk, direction: Direction) -> Option<&'w Chunk> {
    chunk
        .neighbor_coord(direction)
        .and_then(|coord| world.chunk(coord))
}

/// The center chunk and its eight surrounding chunks, reached through links.
fn gather_candidates<'w>(world: &'w World, center: &'w Chunk) -> Vec<&'w Chunk> {
    let mut candidates = vec![center];

    for direction in Direction::all() {
        if let Some(chunk) = linked(world, center, direction) {
            candidates.push(chunk);
        }
    }
    for (vertical, lateral) in [
        (Direction::NORTH, Direction::EAST),
        (Direction::NORTH, Direction::WEST),
        (Direction::SOUTH, Direction::EAST),
        (Direction::SOUTH, Direction::WEST),
    ] {
        let corner = linked(world, center, vertical)
            .and_then(|chunk| linked(world, chunk, lateral))
            .or_else(|| {
                linked(world, center, lateral).and_then(|chunk| linked(world, chunk, vertical))
            });
        if let Some(chunk) = corner {
            candidates.push(chunk);
        }
    }

    candidates
}

/// Pushes the object out of every solid block it overlaps.
///
/// Blocks are visited once each, chunk by chunk in storage order. Each
/// overlapping block contributes a push on a single axis; that axis's velocity
/// is zeroed. The box is updated, `position` is not.
///
/// # Returns
/// The sum of all pushes applied
pub fn resolve_collisions(world: &World, object: &mut MovingObject) -> Vector3<f32> {
    let mut applied = Vector3::zero();

    let Some(center) = world.chunk(ChunkCoord::from_position(object.aabb.center())) else {
        return applied;
    };

    for chunk in gather_candidates(world, center) {
        if !chunk_bounds(chunk.coord()).overlaps(&object.aabb) {
            continue;
        }
        let origin = chunk.coord().origin();
        let field = chunk.field();

        for (local, _) in field.iter_solid(chunk.catalog()) {
            let block = Aabb::block(Point3::new(
                origin.x + local.x as i32,
                local.y as i32,
                origin.z + local.z as i32,
            ));
            let exposed = field.face_mask(local.x, local.y, local.z);
            let Some(push) = collide(&object.aabb, &block, exposed) else {
                continue;
            };
            let Some(axis) = select_axis(push) else {
                continue;
            };

            let amount = push[axis.index()];
            object.aabb.translate(axis, amount);
            object.velocity[axis.index()] = 0.0;
            applied[axis.index()] += amount;

            if axis == Axis::Y {
                log::trace!("Pushed {:.3} along Y out of {:?}", amount, block.position);
            }
        }
    }

    applied
}
