//! # Persistence Module
//!
//! Save files for chunks and the world's metadata record.
//!
//! ## File Formats
//!
//! - `"{x}_{z}.chunk"`: the chunk's raw block-type bytes in
//!   `x + z * W + y * (W * D)` order. No header, no compression.
//! - `"meta_data"`: one fixed-size [`MetaData`] record.
//!
//! A missing file is a normal outcome and reads as `Ok(None)`. Anything else
//! that goes wrong with the backing store is a [`WorldError::Io`].
//!
//! Bytes go through the [`ByteStore`] trait so the world can be saved to disk
//! ([`FsByteStore`]) or kept in memory ([`MemoryByteStore`]).

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use bytemuck::{Pod, Zeroable};
use cgmath::{Point3, Vector3};

use crate::{
    engine_state::voxels::{chunk::CHUNK_SIZE, coordinates::ChunkCoord},
    error::{WorldError, WorldResult},
};

/// Name of the metadata file in the save folder.
pub const META_DATA_FILE: &str = "meta_data";

/// Whole-file byte storage keyed by file name.
pub trait ByteStore {
    /// Reads a whole file. `Ok(None)` if it does not exist.
    fn read(&self, name: &str) -> WorldResult<Option<Vec<u8>>>;

    /// Creates or replaces a whole file.
    fn write(&mut self, name: &str, bytes: &[u8]) -> WorldResult<()>;
}

/// [`ByteStore`] over a folder on disk.
#[derive(Debug, Clone)]
pub struct FsByteStore {
    folder: PathBuf,
}

impl FsByteStore {
    /// Opens a save folder, creating it if needed.
    pub fn new(folder: impl Into<PathBuf>) -> WorldResult<Self> {
        let folder = folder.into();
        fs::create_dir_all(&folder).map_err(|e| WorldError::io(&folder, e))?;
        Ok(FsByteStore { folder })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

impl ByteStore for FsByteStore {
    fn read(&self, name: &str) -> WorldResult<Option<Vec<u8>>> {
        let path = self.folder.join(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WorldError::io(path, e)),
        }
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> WorldResult<()> {
        let path = self.folder.join(name);
        fs::write(&path, bytes).map_err(|e| WorldError::io(path, e))
    }
}

/// [`ByteStore`] kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryByteStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryByteStore {
    pub fn new() -> Self {
        MemoryByteStore::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ByteStore for MemoryByteStore {
    fn read(&self, name: &str) -> WorldResult<Option<Vec<u8>>> {
        Ok(self.files.get(name).cloned())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> WorldResult<()> {
        self.files.insert(name.to_owned(), bytes.to_vec());
        Ok(())
    }
}

/// The save-game record stored next to the chunks.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MetaData {
    pub seed: u32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub rotation: [f32; 3],
}

impl MetaData {
    /// Size of the record on disk.
    pub const SIZE: usize = std::mem::size_of::<MetaData>();

    pub fn new(seed: u32) -> Self {
        MetaData {
            seed,
            ..Default::default()
        }
    }

    pub fn player_position(&self) -> Point3<f32> {
        self.position.into()
    }

    pub fn player_velocity(&self) -> Vector3<f32> {
        self.velocity.into()
    }

    pub fn set_player(&mut self, position: Point3<f32>, velocity: Vector3<f32>) {
        self.position = position.into();
        self.velocity = velocity.into();
    }

    /// Decodes a record. The slice must be exactly [`MetaData::SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> WorldResult<Self> {
        if bytes.len() != Self::SIZE {
            return Err(WorldError::InvalidMetaData {
                expected: Self::SIZE,
                found: bytes.len(),
            });
        }
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::bytes_of(self).to_vec()
    }
}

/// Chunk and metadata files on top of a [`ByteStore`].
pub struct SaveStore {
    bytes: Box<dyn ByteStore>,
}

impl SaveStore {
    pub fn new(bytes: impl ByteStore + 'static) -> Self {
        SaveStore {
            bytes: Box::new(bytes),
        }
    }

    /// A store that keeps everything in memory.
    pub fn in_memory() -> Self {
        SaveStore::new(MemoryByteStore::new())
    }

    /// File name of the chunk at `coord`.
    pub fn chunk_file_name(coord: ChunkCoord) -> String {
        format!("{}_{}.chunk", coord.x, coord.z)
    }

    /// Loads a chunk's block bytes, or `None` if it was never saved.
    ///
    /// The length is checked here; decoding the values is left to the field.
    pub fn load_chunk(&self, coord: ChunkCoord) -> WorldResult<Option<Vec<u8>>> {
        let Some(bytes) = self.bytes.read(&Self::chunk_file_name(coord))? else {
            return Ok(None);
        };
        if bytes.len() != CHUNK_SIZE {
            return Err(WorldError::InvalidFieldLength {
                expected: CHUNK_SIZE,
                found: bytes.len(),
            });
        }
        Ok(Some(bytes))
    }

    /// Writes or overwrites a chunk's block bytes.
    pub fn store_chunk(&mut self, coord: ChunkCoord, bytes: &[u8]) -> WorldResult<()> {
        debug_assert_eq!(bytes.len(), CHUNK_SIZE);
        log::trace!("Storing chunk {}", coord);
        self.bytes.write(&Self::chunk_file_name(coord), bytes)
    }

    /// Loads the metadata record, or `None` if there is none yet.
    pub fn load_meta(&self) -> WorldResult<Option<MetaData>> {
        self.bytes
            .read(META_DATA_FILE)?
            .map(|bytes| MetaData::from_bytes(&bytes))
            .transpose()
    }

    pub fn store_meta(&mut self, meta: &MetaData) -> WorldResult<()> {
        self.bytes.write(META_DATA_FILE, &meta.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_record_is_forty_bytes() {
        assert_eq!(MetaData::SIZE, 40);
    }

    #[test]
    fn missing_files_are_not_errors() {
        let store = SaveStore::in_memory();
        assert!(store.load_chunk(ChunkCoord::new(3, -2)).unwrap().is_none());
        assert!(store.load_meta().unwrap().is_none());
    }

    #[test]
    fn chunk_files_are_named_by_coordinate() {
        assert_eq!(SaveStore::chunk_file_name(ChunkCoord::new(-1, 4)), "-1_4.chunk");
    }

    #[test]
    fn stored_chunk_reads_back() {
        let mut store = SaveStore::in_memory();
        let mut bytes = vec![0u8; CHUNK_SIZE];
        bytes[100] = 5;
        store.store_chunk(ChunkCoord::new(0, 1), &bytes).unwrap();
        assert_eq!(store.load_chunk(ChunkCoord::new(0, 1)).unwrap(), Some(bytes));
    }

    #[test]
    fn truncated_chunk_is_rejected() {
        let mut memory = MemoryByteStore::new();
        memory.write("0_0.chunk", &[1, 2, 3]).unwrap();
        let store = SaveStore::new(memory);
        assert!(matches!(
            store.load_chunk(ChunkCoord::new(0, 0)),
            Err(WorldError::InvalidFieldLength { found: 3, .. })
        ));
    }

    #[test]
    fn metadata_is_all_or_nothing() {
        let mut store = SaveStore::in_memory();
        let mut meta = MetaData::new(99);
        meta.set_player(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, -1.0, 0.0));
        store.store_meta(&meta).unwrap();
        assert_eq!(store.load_meta().unwrap(), Some(meta));

        let mut memory = MemoryByteStore::new();
        memory.write(META_DATA_FILE, &meta.to_bytes()[..39]).unwrap();
        assert!(matches!(
            SaveStore::new(memory).load_meta(),
            Err(WorldError::InvalidMetaData { expected: 40, found: 39 })
        ));
    }

    #[test]
    fn filesystem_store_round_trips() {
        let folder = std::env::temp_dir().join(format!("voxel-world-save-{}", fastrand::u64(..)));
        let mut fs_store = FsByteStore::new(&folder).unwrap();
        assert!(fs_store.read("nothing").unwrap().is_none());
        fs_store.write("file", b"abc").unwrap();
        assert_eq!(fs_store.read("file").unwrap(), Some(b"abc".to_vec()));
        let _ = fs::remove_dir_all(&folder);
    }
}
