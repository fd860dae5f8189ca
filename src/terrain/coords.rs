// src/terrain/coords.rs

use serde::{Deserialize, Serialize};

/// How many vertices per edge of a chunk.
pub const CHUNK_SIZE: i32 = 16;

/// Chunk indices on the XY grid plane.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoords {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoords {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Global vertex position of a local slot inside this chunk, or `None`
    /// when that slot lies outside the `i32` range.
    pub fn to_global(&self, local: LocalCoords, chunk_size: i32) -> Option<VertexCoords> {
        // the origin of the chunk holding i32::MIN can sit below it
        let global = |c: i32, l: i32| i32::try_from(i64::from(c) * i64::from(chunk_size) + i64::from(l)).ok();
        Some(VertexCoords {
            x: global(self.x, local.x)?,
            y: global(self.y, local.y)?,
        })
    }
}

/// Position of a vertex inside its chunk, always in `[0, chunk_size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalCoords {
    pub x: i32,
    pub y: i32,
}

impl LocalCoords {
    pub fn index(&self, chunk_size: i32) -> usize {
        (self.x + self.y * chunk_size) as usize
    }

    pub fn is_on_border(&self, chunk_size: i32) -> bool {
        self.x == 0 || self.y == 0 || self.x == chunk_size - 1 || self.y == chunk_size - 1
    }
}

/// Global vertex position on the infinite grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexCoords {
    pub x: i32,
    pub y: i32,
}

impl VertexCoords {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset position, `None` past the edge of the `i32` range.
    pub fn offset(&self, dx: i32, dy: i32) -> Option<VertexCoords> {
        Some(VertexCoords {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// The 3x3 neighborhood around this vertex, center excluded. Positions
    /// outside the `i32` range are left out.
    pub fn neighbors(&self) -> impl Iterator<Item = VertexCoords> {
        let center = *self;
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| center.offset(dx, dy))
    }
}

// floor division, so -1 lands in chunk -1 rather than 0
pub fn to_chunk_coords(x: i32, y: i32, chunk_size: i32) -> ChunkCoords {
    ChunkCoords {
        x: x.div_euclid(chunk_size),
        y: y.div_euclid(chunk_size),
    }
}

/// Slots in a chunk of the given size, `None` unless the size is positive
/// and its square fits in an `i32`.
pub fn slot_count(chunk_size: i32) -> Option<usize> {
    if chunk_size <= 0 {
        return None;
    }
    chunk_size.checked_mul(chunk_size).map(|n| n as usize)
}

pub fn to_local_coords(x: i32, y: i32, chunk_size: i32) -> LocalCoords {
    LocalCoords {
        x: x.rem_euclid(chunk_size),
        y: y.rem_euclid(chunk_size),
    }
}
