//! Face-visibility computation.
//!
//! A face is visible iff the cell it looks at does not exist or is not solid
//! according to the [`BlockCatalog`]. Lateral lookups that leave the chunk go
//! through the neighbor's boundary slice; a missing neighbor counts as
//! exposed. Top and bottom never cross a chunk.

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, BlockCatalog},
    coordinates::{Direction, LocalPos},
};

use super::{
    neighbors::NeighborSlices,
    voxel_field::{VoxelField, CELL_FACES},
    CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH,
};

/// Visibility of the six faces of cell `(x, y, z)`.
pub fn cell_faces(
    field: &VoxelField,
    slices: &NeighborSlices,
    catalog: &dyn BlockCatalog,
    x: usize,
    y: usize,
    z: usize,
) -> [bool; CELL_FACES] {
    BlockSide::all().map(|side| is_exposed(field, slices, catalog, x, y, z, side))
}

fn is_exposed(
    field: &VoxelField,
    slices: &NeighborSlices,
    catalog: &dyn BlockCatalog,
    x: usize,
    y: usize,
    z: usize,
    side: BlockSide,
) -> bool {
    let (dx, dy, dz) = side.offset();
    let nx = x as i32 + dx;
    let ny = y as i32 + dy;
    let nz = z as i32 + dz;

    if ny < 0 || ny >= CHUNK_HEIGHT as i32 {
        return true;
    }
    if VoxelField::contains(nx, ny, nz) {
        return !catalog.is_solid(field.get(nx as usize, ny as usize, nz as usize));
    }

    let neighbor = if nx < 0 {
        slices.west.as_ref().map(|s| s.get(z, y))
    } else if nx >= CHUNK_WIDTH as i32 {
        slices.east.as_ref().map(|s| s.get(z, y))
    } else if nz < 0 {
        slices.south.as_ref().map(|s| s.get(x, y))
    } else {
        debug_assert!(nz >= CHUNK_DEPTH as i32);
        slices.north.as_ref().map(|s| s.get(x, y))
    };
    neighbor.map_or(true, |block| !catalog.is_solid(block))
}

/// Recomputes the face bits of one cell.
pub fn refresh_cell(
    field: &mut VoxelField,
    slices: &NeighborSlices,
    catalog: &dyn BlockCatalog,
    pos: LocalPos,
) {
    let mask = cell_faces(field, slices, catalog, pos.x, pos.y, pos.z);
    field.set_face_mask(pos.x, pos.y, pos.z, mask);
}

/// Recomputes the face bits of every cell in the field.
pub fn refresh_all(field: &mut VoxelField, slices: &NeighborSlices, catalog: &dyn BlockCatalog) {
    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                refresh_cell(field, slices, catalog, LocalPos::new(x, y, z));
            }
        }
    }
}

/// Recomputes the face bits of the edge plane that faces `direction`.
pub fn refresh_edge(
    field: &mut VoxelField,
    slices: &NeighborSlices,
    catalog: &dyn BlockCatalog,
    direction: Direction,
) {
    for y in 0..CHUNK_HEIGHT {
        for pos in edge_cells(direction, y) {
            refresh_cell(field, slices, catalog, pos);
        }
    }
}

/// Cells of the edge plane facing `direction` at height `y`.
pub fn edge_cells(direction: Direction, y: usize) -> impl Iterator<Item = LocalPos> {
    let length = match direction {
        Direction::EAST | Direction::WEST => CHUNK_DEPTH,
        Direction::NORTH | Direction::SOUTH => CHUNK_WIDTH,
    };
    (0..length).map(move |along| match direction {
        Direction::EAST => LocalPos::new(CHUNK_WIDTH - 1, y, along),
        Direction::WEST => LocalPos::new(0, y, along),
        Direction::NORTH => LocalPos::new(along, y, CHUNK_DEPTH - 1),
        Direction::SOUTH => LocalPos::new(along, y, 0),
    })
}

/// Recomputes the face bits of `center` and its 26 neighbors, clipped to the chunk.
pub fn refresh_around(
    field: &mut VoxelField,
    slices: &NeighborSlices,
    catalog: &dyn BlockCatalog,
    center: LocalPos,
) {
    for dy in -1..=1 {
        for dz in -1..=1 {
            for dx in -1..=1 {
                let x = center.x as i32 + dx;
                let y = center.y as i32 + dy;
                let z = center.z as i32 + dz;
                if VoxelField::contains(x, y, z) {
                    let pos = LocalPos::new(x as usize, y as usize, z as usize);
                    refresh_cell(field, slices, catalog, pos);
                }
            }
        }
    }
}
