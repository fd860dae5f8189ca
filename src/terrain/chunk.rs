// src/terrain/chunk.rs

use crate::terrain::coords::{slot_count, ChunkCoords, LocalCoords};

/// Optional vertex height. `None` means "no terrain here", which is not
/// the same as a height of 0.
pub type Height = Option<i32>;

/// A square block of vertex heights, the unit of invalidation and mesh
/// regeneration.
#[derive(Clone, Debug)]
pub struct Chunk {
    coords: ChunkCoords,
    chunk_size: i32,
    population: usize,
    nonce: u64,
    heights: Vec<Height>,
}

impl Chunk {
    pub fn new(coords: ChunkCoords, chunk_size: i32) -> Self {
        let Some(slots) = slot_count(chunk_size) else {
            panic!("invalid chunk size {chunk_size}");
        };
        Self {
            coords,
            chunk_size,
            population: 0,
            nonce: 1,
            heights: vec![None; slots],
        }
    }

    /// Rebuilds a chunk from persisted slots; population is recomputed.
    pub(crate) fn from_parts(coords: ChunkCoords, chunk_size: i32, nonce: u64, heights: Vec<Height>) -> Self {
        debug_assert_eq!(Some(heights.len()), slot_count(chunk_size));
        let population = heights.iter().filter(|h| h.is_some()).count();
        Self { coords, chunk_size, population, nonce, heights }
    }

    pub fn coords(&self) -> ChunkCoords {
        self.coords
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of non-empty slots.
    pub fn population(&self) -> usize {
        self.population
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn heights(&self) -> &[Height] {
        &self.heights
    }

    pub fn get(&self, local: LocalCoords) -> Height {
        self.heights[local.index(self.chunk_size)]
    }

    /// Writes a slot and bumps the nonce. Returns false when the stored
    /// value already matches, in which case nothing changes.
    pub(crate) fn set(&mut self, local: LocalCoords, value: Height) -> bool {
        let slot = &mut self.heights[local.index(self.chunk_size)];
        if *slot == value {
            return false;
        }

        match (slot.is_some(), value.is_some()) {
            (false, true) => self.population += 1,
            (true, false) => self.population -= 1,
            _ => {}
        }

        *slot = value;
        self.bump_nonce();
        true
    }

    pub(crate) fn bump_nonce(&mut self) {
        self.nonce += 1;
    }
}
