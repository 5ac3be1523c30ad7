//! Voxel traversal along a ray.
//!
//! Steps cell by cell through the grid (Amanatides and Woo) and reports the
//! first cell the predicate calls solid, together with the cell the ray was in
//! just before. Placing a block targets that previous cell.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::block::block_type::BlockType;

/// Upper bound on cells visited by one cast.
const MAX_STEPS: usize = 1024;

/// First solid cell along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// The solid cell
    pub block: Point3<i32>,
    /// The cell entered just before `block`
    pub previous: Point3<i32>,
    /// Type of the solid cell
    pub block_type: BlockType,
    /// Distance along the ray at which `block` was entered
    pub distance: f32,
}

fn axis_setup(origin: f32, direction: f32) -> (i32, f32, f32) {
    if direction > 0.0 {
        let delta = 1.0 / direction;
        (1, (origin.floor() + 1.0 - origin) * delta, delta)
    } else if direction < 0.0 {
        let delta = -1.0 / direction;
        (-1, (origin - origin.floor()) * delta, delta)
    } else {
        (0, f32::MAX, f32::MAX)
    }
}

/// Walks the cells pierced by a ray until `lookup` returns a block type.
///
/// # Arguments
/// * `origin` - Ray start in world space
/// * `direction` - Ray direction, need not be normalized
/// * `max_distance` - Cells entered beyond this distance are not examined
/// * `lookup` - Returns `Some(type)` for a solid cell
pub fn cast<F>(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
    mut lookup: F,
) -> Option<RayHit>
where
    F: FnMut(Point3<i32>) -> Option<BlockType>,
{
    if direction.magnitude2() < 1e-12 {
        return None;
    }
    let direction = direction.normalize();

    let mut cell = Point3::new(
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    );
    let (step_x, mut next_x, delta_x) = axis_setup(origin.x, direction.x);
    let (step_y, mut next_y, delta_y) = axis_setup(origin.y, direction.y);
    let (step_z, mut next_z, delta_z) = axis_setup(origin.z, direction.z);

    let mut previous = cell;
    let mut distance = 0.0;

    for _ in 0..MAX_STEPS {
        if distance > max_distance {
            break;
        }
        if let Some(block_type) = lookup(cell) {
            return Some(RayHit {
                block: cell,
                previous,
                block_type,
                distance,
            });
        }
        previous = cell;

        if next_x < next_y && next_x < next_z {
            cell.x += step_x;
            distance = next_x;
            next_x += delta_x;
        } else if next_y < next_z {
            cell.y += step_y;
            distance = next_y;
            next_y += delta_y;
        } else {
            cell.z += step_z;
            distance = next_z;
            next_z += delta_z;
        }
    }
    None
}
