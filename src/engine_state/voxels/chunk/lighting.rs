//! Column-wise sunlight.
//!
//! Each `(x, z)` column is scanned from the top down with a running light
//! value that starts at [`FULL_LIGHT`] and drops to [`SHADOW_LIGHT`] at the
//! first solid cell. At every height the current value is written to the
//! facing light channel of the four lateral neighbor cells (across chunk
//! edges when a neighbor is loaded) and to the cell's own top channel. There
//! is no horizontal spreading.

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, BlockCatalog},
    coordinates::Direction,
};

use super::{
    faces,
    neighbors::LateralNeighbors,
    voxel_field::{VoxelField, FULL_LIGHT, SHADOW_LIGHT},
    CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH,
};

/// Mutable access to whichever neighbor fields are loaded.
pub type NeighborFieldsMut<'a> = LateralNeighbors<Option<&'a mut VoxelField>>;

/// Recomputes sunlight for every column of `field`.
///
/// A cell shades its column only if `catalog` reports it solid.
pub fn propagate_sunlight(
    field: &mut VoxelField,
    neighbors: &mut NeighborFieldsMut<'_>,
    catalog: &dyn BlockCatalog,
) {
    for z in 0..CHUNK_DEPTH {
        for x in 0..CHUNK_WIDTH {
            propagate_column(field, neighbors, catalog, x, z);
        }
    }
}

/// Resets the light channels of the edge plane facing `direction` to full.
///
/// Those channels are written only by the neighbor in that direction, so they
/// must be cleared when the neighbor goes away.
pub fn reset_edge(field: &mut VoxelField, direction: Direction) {
    let side = match direction {
        Direction::EAST => BlockSide::RIGHT,
        Direction::WEST => BlockSide::LEFT,
        Direction::NORTH => BlockSide::BACK,
        Direction::SOUTH => BlockSide::FRONT,
    };
    for y in 0..CHUNK_HEIGHT {
        for pos in faces::edge_cells(direction, y) {
            field.set_light(pos.x, pos.y, pos.z, side, FULL_LIGHT);
        }
    }
}

fn propagate_column(
    field: &mut VoxelField,
    neighbors: &mut NeighborFieldsMut<'_>,
    catalog: &dyn BlockCatalog,
    x: usize,
    z: usize,
) {
    let mut light = FULL_LIGHT;
    let mut shadowed = false;

    for y in (0..CHUNK_HEIGHT).rev() {
        field.set_light(x, y, z, BlockSide::TOP, light);
        smear_lateral(field, neighbors, x, y, z, light);

        if !shadowed && catalog.is_solid(field.get(x, y, z)) {
            shadowed = true;
            light *= SHADOW_LIGHT;
        }
        field.set_light(x, y, z, BlockSide::BOTTOM, light);
    }
}

fn smear_lateral(
    field: &mut VoxelField,
    neighbors: &mut NeighborFieldsMut<'_>,
    x: usize,
    y: usize,
    z: usize,
    light: f32,
) {
    // -x neighbor sees this column through its right face
    if x > 0 {
        field.set_light(x - 1, y, z, BlockSide::RIGHT, light);
    } else if let Some(west) = neighbors.west.as_deref_mut() {
        west.set_light(CHUNK_WIDTH - 1, y, z, BlockSide::RIGHT, light);
    }

    if x + 1 < CHUNK_WIDTH {
        field.set_light(x + 1, y, z, BlockSide::LEFT, light);
    } else if let Some(east) = neighbors.east.as_deref_mut() {
        east.set_light(0, y, z, BlockSide::LEFT, light);
    }

    if z > 0 {
        field.set_light(x, y, z - 1, BlockSide::BACK, light);
    } else if let Some(south) = neighbors.south.as_deref_mut() {
        south.set_light(x, y, CHUNK_DEPTH - 1, BlockSide::BACK, light);
    }

    if z + 1 < CHUNK_DEPTH {
        field.set_light(x, y, z + 1, BlockSide::FRONT, light);
    } else if let Some(north) = neighbors.north.as_deref_mut() {
        north.set_light(x, y, 0, BlockSide::FRONT, light);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{
        block_type::BlockType, test_catalogs::GlassCatalog, AtlasCatalog,
    };

    fn no_neighbors<'a>() -> NeighborFieldsMut<'a> {
        LateralNeighbors {
            north: None,
            south: None,
            east: None,
            west: None,
        }
    }

    #[test]
    fn single_block_shadows_only_below_itself() {
        let h = 20;
        let mut field = VoxelField::new();
        field.set(4, h, 4, BlockType::STONE);
        propagate_sunlight(&mut field, &mut no_neighbors(), &AtlasCatalog::default());

        for y in h + 1..CHUNK_HEIGHT {
            assert_eq!(field.light(4, y, 4, BlockSide::TOP), FULL_LIGHT);
            assert_eq!(field.light(5, y, 4, BlockSide::LEFT), FULL_LIGHT);
        }
        assert_eq!(field.light(4, h, 4, BlockSide::TOP), FULL_LIGHT);
        assert_eq!(field.light(5, h, 4, BlockSide::LEFT), FULL_LIGHT);

        for y in 0..h {
            assert_eq!(field.light(5, y, 4, BlockSide::LEFT), SHADOW_LIGHT);
            assert_eq!(field.light(3, y, 4, BlockSide::RIGHT), SHADOW_LIGHT);
            assert_eq!(field.light(4, y, 5, BlockSide::FRONT), SHADOW_LIGHT);
            assert_eq!(field.light(4, y, 3, BlockSide::BACK), SHADOW_LIGHT);
            assert_eq!(field.light(4, y, 4, BlockSide::TOP), SHADOW_LIGHT);
        }
    }

    #[test]
    fn light_stays_low_below_a_second_solid() {
        let mut field = VoxelField::new();
        field.set(1, 30, 1, BlockType::DIRT);
        field.set(1, 10, 1, BlockType::DIRT);
        propagate_sunlight(&mut field, &mut no_neighbors(), &AtlasCatalog::default());

        assert_eq!(field.light(1, 10, 1, BlockSide::TOP), SHADOW_LIGHT);
        assert_eq!(field.light(2, 5, 1, BlockSide::LEFT), SHADOW_LIGHT);
    }

    #[test]
    fn edge_columns_write_into_neighbor_fields() {
        let mut field = VoxelField::new();
        field.set(CHUNK_WIDTH - 1, 8, 2, BlockType::STONE);
        let mut east = VoxelField::new();

        let mut neighbors = no_neighbors();
        neighbors.east = Some(&mut east);
        propagate_sunlight(&mut field, &mut neighbors, &AtlasCatalog::default());

        assert_eq!(east.light(0, 9, 2, BlockSide::LEFT), FULL_LIGHT);
        assert_eq!(east.light(0, 7, 2, BlockSide::LEFT), SHADOW_LIGHT);
    }

    #[test]
    fn non_solid_blocks_let_light_through() {
        let mut field = VoxelField::new();
        field.set(6, 12, 6, BlockType::WHITE);
        propagate_sunlight(&mut field, &mut no_neighbors(), &GlassCatalog);

        assert_eq!(field.light(6, 12, 6, BlockSide::BOTTOM), FULL_LIGHT);
        assert_eq!(field.light(7, 3, 6, BlockSide::LEFT), FULL_LIGHT);
    }

    #[test]
    fn reset_edge_restores_full_light_on_that_edge_only() {
        let mut field = VoxelField::new();
        let mut east = VoxelField::new();
        east.fill(BlockType::STONE);
        {
            let mut neighbors = no_neighbors();
            neighbors.west = Some(&mut field);
            propagate_sunlight(&mut east, &mut neighbors, &AtlasCatalog::default());
        }
        assert_eq!(field.light(CHUNK_WIDTH - 1, 4, 4, BlockSide::RIGHT), SHADOW_LIGHT);

        field.set_light(0, 4, 4, BlockSide::LEFT, SHADOW_LIGHT);
        reset_edge(&mut field, Direction::EAST);
        assert_eq!(field.light(CHUNK_WIDTH - 1, 4, 4, BlockSide::RIGHT), FULL_LIGHT);
        assert_eq!(field.light(0, 4, 4, BlockSide::LEFT), SHADOW_LIGHT);
    }
}
