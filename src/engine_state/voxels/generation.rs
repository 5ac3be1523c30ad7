//! # Terrain Generation
//!
//! Heightmap terrain from fractal Perlin noise.
//!
//! Every column is a pure function of the seed and its absolute `(x, z)`
//! position, so chunks can be generated in any order and always line up at
//! their edges.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{voxel_field::VoxelField, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
    coordinates::ChunkCoord,
};

/// Number of DIRT cells between the GRASS top and the STONE below.
pub const DIRT_DEPTH: usize = 3;

/// Amplitude falloff between octaves.
const PERSISTENCE: f64 = 0.5;
/// Frequency growth between octaves.
const LACUNARITY: f64 = 2.0;

/// Seeded heightmap generator.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    seed: u32,
    noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `seed` - Reshuffles the permutation tables of every octave
    /// * `octaves` - Number of noise layers summed per sample
    /// * `frequency` - Frequency of the first octave, in cycles per block
    pub fn new(seed: u32, octaves: usize, frequency: f64) -> Self {
        let noise = Fbm::<Perlin>::new(seed)
            .set_octaves(octaves.max(1))
            .set_frequency(frequency)
            .set_persistence(PERSISTENCE)
            .set_lacunarity(LACUNARITY);
        TerrainGenerator { seed, noise }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of solid cells in world column `(x, z)`, in `[0, CHUNK_HEIGHT)`.
    pub fn height(&self, x: i32, z: i32) -> usize {
        let sample = self.noise.get([x as f64, z as f64]).clamp(-1.0, 1.0);
        let scaled = ((sample + 1.0) * 0.5 * CHUNK_HEIGHT as f64).floor() as usize;
        scaled.min(CHUNK_HEIGHT - 1)
    }

    /// Block type at height `y` of a column with `height` solid cells.
    pub fn column_block(height: usize, y: usize) -> BlockType {
        if y >= height {
            BlockType::AIR
        } else if y + 1 == height {
            BlockType::GRASS
        } else if y + 1 + DIRT_DEPTH >= height {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Overwrites `field` with the terrain of the chunk at `coord`.
    pub fn fill_chunk(&self, coord: ChunkCoord, field: &mut VoxelField) {
        let origin = coord.origin();
        for z in 0..CHUNK_DEPTH {
            for x in 0..CHUNK_WIDTH {
                let height = self.height(origin.x + x as i32, origin.z + z as i32);
                for y in 0..CHUNK_HEIGHT {
                    field.set(x, y, z, Self::column_block(height, y));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_heights() {
        let a = TerrainGenerator::new(7, 4, 0.01);
        let b = TerrainGenerator::new(7, 4, 0.01);
        for x in -40..40 {
            assert_eq!(a.height(x, x * 3 - 5), b.height(x, x * 3 - 5));
        }
    }

    #[test]
    fn different_seeds_differ_somewhere() {
        let a = TerrainGenerator::new(1, 4, 0.05);
        let b = TerrainGenerator::new(2, 4, 0.05);
        let differs = (0..64).any(|i| a.height(i * 7 + 3, i * 5 + 1) != b.height(i * 7 + 3, i * 5 + 1));
        assert!(differs);
    }

    #[test]
    fn columns_are_layered() {
        assert_eq!(TerrainGenerator::column_block(10, 10), BlockType::AIR);
        assert_eq!(TerrainGenerator::column_block(10, 9), BlockType::GRASS);
        assert_eq!(TerrainGenerator::column_block(10, 8), BlockType::DIRT);
        assert_eq!(TerrainGenerator::column_block(10, 6), BlockType::DIRT);
        assert_eq!(TerrainGenerator::column_block(10, 5), BlockType::STONE);
        assert_eq!(TerrainGenerator::column_block(0, 0), BlockType::AIR);
    }

    #[test]
    fn filled_chunk_matches_heightmap() {
        let generator = TerrainGenerator::new(42, 3, 0.03);
        let coord = ChunkCoord::new(-1, 2);
        let mut field = VoxelField::new();
        generator.fill_chunk(coord, &mut field);

        let origin = coord.origin();
        for (x, z) in [(0, 0), (5, 11), (15, 15)] {
            let height = generator.height(origin.x + x as i32, origin.z + z as i32);
            for y in 0..CHUNK_HEIGHT {
                assert_eq!(field.get(x, y, z).is_air(), y >= height);
            }
        }
    }

    #[test]
    fn neighboring_chunks_share_column_heights() {
        let generator = TerrainGenerator::new(3, 4, 0.02);
        let mut west = VoxelField::new();
        let mut east = VoxelField::new();
        generator.fill_chunk(ChunkCoord::new(0, 0), &mut west);
        generator.fill_chunk(ChunkCoord::new(1, 0), &mut east);

        let at_edge = generator.height(CHUNK_WIDTH as i32, 4);
        assert_eq!(east.get(0, at_edge.saturating_sub(1), 4).is_air(), at_edge == 0);
        assert!(west.get(0, CHUNK_HEIGHT - 1, 0).is_air());
    }
}
