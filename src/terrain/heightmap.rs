// src/terrain/heightmap.rs

use std::collections::HashMap;

use log::debug;

use crate::terrain::changes::neighbor_chunks;
use crate::terrain::chunk::{Chunk, Height};
use crate::terrain::coords::{
    slot_count, to_chunk_coords, to_local_coords, ChunkCoords, LocalCoords, VertexCoords, CHUNK_SIZE,
};
use crate::terrain::shape::classify;
use crate::terrain::tile::{Corner, Tile};

/// Result of a [`HeightGrid::set_height`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Empty write into a chunk that does not exist.
    Skipped,
    /// The stored value already matched.
    Unchanged,
    Written { created: bool },
    /// The write emptied the chunk, which was dropped from the grid. The
    /// renderer should discard its geometry.
    ChunkRemoved(ChunkCoords),
}

/// Sparse chunked storage of vertex heights on an infinite grid.
#[derive(Clone, Debug)]
pub struct HeightGrid {
    chunk_size: i32,
    chunks: HashMap<ChunkCoords, Chunk>,
}

impl Default for HeightGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightGrid {
    pub fn new() -> Self {
        Self::with_chunk_size(CHUNK_SIZE)
    }

    pub fn with_chunk_size(chunk_size: i32) -> Self {
        assert!(
            slot_count(chunk_size).is_some(),
            "chunk size must be positive with a square that fits in i32, got {chunk_size}"
        );
        Self {
            chunk_size,
            chunks: HashMap::new(),
        }
    }

    pub(crate) fn from_chunks(chunk_size: i32, chunks: impl IntoIterator<Item = Chunk>) -> Self {
        let mut grid = Self::with_chunk_size(chunk_size);
        grid.chunks = chunks.into_iter().map(|c| (c.coords(), c)).collect();
        grid
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn to_chunk_coords(&self, x: i32, y: i32) -> ChunkCoords {
        to_chunk_coords(x, y, self.chunk_size)
    }

    pub fn to_local_coords(&self, x: i32, y: i32) -> LocalCoords {
        to_local_coords(x, y, self.chunk_size)
    }

    pub fn height(&self, x: i32, y: i32) -> Height {
        self.chunks
            .get(&self.to_chunk_coords(x, y))
            .and_then(|chunk| chunk.get(self.to_local_coords(x, y)))
    }

    pub fn set_height(&mut self, x: i32, y: i32, value: Height) -> WriteOutcome {
        let coords = self.to_chunk_coords(x, y);
        let local = self.to_local_coords(x, y);

        let created = !self.chunks.contains_key(&coords);
        if created && value.is_none() {
            return WriteOutcome::Skipped;
        }

        let chunk_size = self.chunk_size;
        let chunk = self.chunks.entry(coords).or_insert_with(|| {
            debug!("Creating chunk {:?}", coords);
            Chunk::new(coords, chunk_size)
        });

        if !chunk.set(local, value) {
            return WriteOutcome::Unchanged;
        }
        let emptied = chunk.population() == 0;

        // tiles of neighboring chunks read border vertices too
        for neighbor in neighbor_chunks(VertexCoords::new(x, y), chunk_size) {
            if let Some(chunk) = self.chunks.get_mut(&neighbor) {
                chunk.bump_nonce();
            }
        }

        if emptied {
            debug!("Removing empty chunk {:?}", coords);
            self.chunks.remove(&coords);
            return WriteOutcome::ChunkRemoved(coords);
        }

        WriteOutcome::Written { created }
    }

    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.tile_from(VertexCoords::new(x, y), 0, 0)
    }

    /// The tile anchored at `at + (dx, dy)`. Corners past the edge of the
    /// `i32` range read as empty.
    fn tile_from(&self, at: VertexCoords, dx: i32, dy: i32) -> Tile {
        let corner = |cx: i32, cy: i32| {
            at.offset(dx + cx, dy + cy)
                .and_then(|v| self.height(v.x, v.y))
        };
        Tile::new(corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1))
    }

    pub fn chunk(&self, coords: ChunkCoords) -> Option<&Chunk> {
        self.chunks.get(&coords)
    }

    pub fn chunk_of_vertex(&self, x: i32, y: i32) -> Option<&Chunk> {
        self.chunk(self.to_chunk_coords(x, y))
    }

    /// All live chunks, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The tiles anchored inside a chunk, row by row. Tiles on the top and
    /// right edges read corners from neighboring chunks. Slots outside the
    /// `i32` range have no tile.
    pub fn chunk_tiles(&self, coords: ChunkCoords) -> impl Iterator<Item = (LocalCoords, Tile)> + '_ {
        let size = self.chunk_size;
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| LocalCoords { x, y }))
            .filter_map(move |local| {
                let global = coords.to_global(local, size)?;
                Some((local, self.tile(global.x, global.y)))
            })
    }

    /// Whether writing `value` at `(x, y)` keeps all four tiles touching
    /// that vertex representable. Does not mutate the grid.
    pub fn can_set_height(&self, x: i32, y: i32, value: Height) -> bool {
        let at = VertexCoords::new(x, y);
        let touching = [
            self.tile_from(at, -1, -1).with_corner(Corner::TopRight, value),
            self.tile_from(at, 0, -1).with_corner(Corner::TopLeft, value),
            self.tile_from(at, 0, 0).with_corner(Corner::BottomLeft, value),
            self.tile_from(at, -1, 0).with_corner(Corner::BottomRight, value),
        ];

        touching.iter().all(|tile| classify(tile).is_valid())
    }
}
