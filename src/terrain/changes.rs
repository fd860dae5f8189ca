// src/terrain/changes.rs

use crate::terrain::coords::{to_chunk_coords, to_local_coords, ChunkCoords, VertexCoords};

/// Chunks other than the owner whose tiles may read the vertex at `at`.
///
/// Only vertices on the owner's border can be read by a neighboring
/// chunk's tiles, so interior writes yield nothing. Each chunk appears at
/// most once. Existence is not checked here; the grid skips chunks that
/// are absent.
pub fn neighbor_chunks(at: VertexCoords, chunk_size: i32) -> Vec<ChunkCoords> {
    let owner = to_chunk_coords(at.x, at.y, chunk_size);
    if !to_local_coords(at.x, at.y, chunk_size).is_on_border(chunk_size) {
        return Vec::new();
    }

    let mut touched: Vec<ChunkCoords> = Vec::with_capacity(3);
    for n in at.neighbors() {
        let coords = to_chunk_coords(n.x, n.y, chunk_size);
        if coords != owner && !touched.contains(&coords) {
            touched.push(coords);
        }
    }
    touched
}
