// src/terrain/persist.rs

use std::collections::HashSet;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::terrain::chunk::{Chunk, Height};
use crate::terrain::coords::{slot_count, ChunkCoords, LocalCoords, VertexCoords};
use crate::terrain::error::{Result, TerrainError};
use crate::terrain::heightmap::HeightGrid;

/// Stored in place of an empty vertex slot.
pub const EMPTY_SENTINEL: i32 = i32::MIN;

#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkRecord {
    pub x: i32,
    pub y: i32,
    pub nonce: u64,
    /// Row-major slots, `chunk_size²` long.
    pub vertices: Vec<i32>,
}

/// Flat, ordered chunk list for external serialization.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSnapshot {
    pub chunk_size: i32,
    pub chunks: Vec<ChunkRecord>,
}

impl GridSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl HeightGrid {
    /// Chunks sorted by coordinate so equal grids give equal snapshots.
    pub fn snapshot(&self) -> Result<GridSnapshot> {
        let chunk_size = self.chunk_size();
        let mut chunks: Vec<&Chunk> = self.chunks().collect();
        chunks.sort_by_key(|c| (c.coords().y, c.coords().x));

        let records = chunks
            .into_iter()
            .map(|chunk| encode_chunk(chunk, chunk_size))
            .collect::<Result<Vec<_>>>()?;

        Ok(GridSnapshot { chunk_size, chunks: records })
    }

    /// Rebuilds a grid, its coordinate lookup and populations from a
    /// snapshot.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self> {
        let chunk_size = snapshot.chunk_size;
        let expected = slot_count(chunk_size).ok_or(TerrainError::InvalidChunkSize(chunk_size))?;
        let mut seen = HashSet::with_capacity(snapshot.chunks.len());
        let mut chunks = Vec::with_capacity(snapshot.chunks.len());

        for record in &snapshot.chunks {
            let coords = ChunkCoords::new(record.x, record.y);
            if record.vertices.len() != expected {
                return Err(TerrainError::SlotCount { coords, expected, found: record.vertices.len() });
            }
            if !seen.insert(coords) {
                return Err(TerrainError::DuplicateChunk(coords));
            }
            if record.nonce == 0 {
                return Err(TerrainError::InvalidNonce(coords));
            }

            let heights: Vec<Height> = record
                .vertices
                .iter()
                .map(|&v| (v != EMPTY_SENTINEL).then_some(v))
                .collect();
            if heights.iter().all(Option::is_none) {
                warn!("Snapshot chunk {:?} holds no vertices", coords);
                return Err(TerrainError::EmptyChunk(coords));
            }
            let outside = heights
                .iter()
                .enumerate()
                .find(|(i, h)| h.is_some() && slot_position(coords, *i, chunk_size).is_none());
            if let Some((slot, _)) = outside {
                return Err(TerrainError::OutOfRange { coords, slot });
            }

            chunks.push(Chunk::from_parts(coords, chunk_size, record.nonce, heights));
        }

        info!("Loaded {} terrain chunks", chunks.len());
        Ok(HeightGrid::from_chunks(chunk_size, chunks))
    }
}

fn encode_chunk(chunk: &Chunk, chunk_size: i32) -> Result<ChunkRecord> {
    let coords = chunk.coords();
    let mut vertices = Vec::with_capacity(chunk.heights().len());

    for (i, h) in chunk.heights().iter().enumerate() {
        match *h {
            Some(EMPTY_SENTINEL) => {
                let at = slot_position(coords, i, chunk_size).ok_or(TerrainError::OutOfRange { coords, slot: i })?;
                return Err(TerrainError::ReservedHeight { x: at.x, y: at.y });
            }
            Some(v) => vertices.push(v),
            None => vertices.push(EMPTY_SENTINEL),
        }
    }

    Ok(ChunkRecord { x: coords.x, y: coords.y, nonce: chunk.nonce(), vertices })
}

fn slot_position(coords: ChunkCoords, slot: usize, chunk_size: i32) -> Option<VertexCoords> {
    let slot = slot as i32;
    coords.to_global(LocalCoords { x: slot % chunk_size, y: slot / chunk_size }, chunk_size)
}
