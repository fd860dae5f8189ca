use std::fmt;

use crate::terrain::coords::ChunkCoords;

/// A convenient result type wrapping [`TerrainError`].
pub type Result<T> = std::result::Result<T, TerrainError>;

#[derive(Debug)]
pub enum TerrainError {
    /// Snapshot chunk with the wrong number of slots.
    SlotCount {
        coords: ChunkCoords,
        expected: usize,
        found: usize,
    },
    DuplicateChunk(ChunkCoords),
    /// Snapshot chunk with no vertices; live grids never hold one.
    EmptyChunk(ChunkCoords),
    InvalidNonce(ChunkCoords),
    InvalidChunkSize(i32),
    /// Non-empty slot whose global position falls outside the `i32` range.
    OutOfRange { coords: ChunkCoords, slot: usize },
    /// A stored height collides with the persisted empty marker.
    ReservedHeight { x: i32, y: i32 },
    InvalidConfig(String),
    Json(serde_json::Error),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::SlotCount { coords, expected, found } => write!(
                f,
                "Chunk {},{} has {} vertex slots, expected {}",
                coords.x, coords.y, found, expected
            ),
            TerrainError::DuplicateChunk(c) => write!(f, "Chunk {},{} appears more than once", c.x, c.y),
            TerrainError::EmptyChunk(c) => write!(f, "Chunk {},{} has no vertices", c.x, c.y),
            TerrainError::InvalidNonce(c) => write!(f, "Chunk {},{} has a zero nonce", c.x, c.y),
            TerrainError::InvalidChunkSize(size) => write!(f, "Invalid chunk size {}", size),
            TerrainError::OutOfRange { coords, slot } => write!(
                f,
                "Chunk {},{} stores slot {} outside the integer grid",
                coords.x, coords.y, slot
            ),
            TerrainError::ReservedHeight { x, y } => write!(
                f,
                "Height at {},{} equals the reserved empty marker and cannot be saved",
                x, y
            ),
            TerrainError::InvalidConfig(msg) => write!(f, "Invalid tile set config: {}", msg),
            TerrainError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(value: serde_json::Error) -> Self {
        TerrainError::Json(value)
    }
}
