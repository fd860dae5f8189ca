// src/terrain/sync.rs

use std::collections::HashMap;

use log::{debug, info};
use nalgebra::Vector3;

use crate::terrain::coords::ChunkCoords;
use crate::terrain::generator::{MeshGenerator, TileSet};
use crate::terrain::heightmap::HeightGrid;
use crate::terrain::mesh::ChunkMesh;

/// Renderer-side state of one chunk.
#[derive(Clone, Debug)]
pub struct SyncedChunk {
    /// Nonce the current mesh was built from; 0 means never built.
    pub nonce: u64,
    pub mesh: Option<ChunkMesh>,
}

/// What a [`ChunkSync::sync`] pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub regenerated: Vec<ChunkCoords>,
    pub removed: Vec<ChunkCoords>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.regenerated.is_empty() && self.removed.is_empty()
    }
}

/// Keeps rendered chunk meshes in step with a [`HeightGrid`] by comparing
/// nonces.
#[derive(Default)]
pub struct ChunkSync {
    chunks: HashMap<ChunkCoords, SyncedChunk>,
}

impl ChunkSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds stale chunk meshes (all of them with `regenerate_all`) and
    /// drops meshes of chunks that no longer exist.
    pub fn sync(&mut self, grid: &HeightGrid, tileset: &TileSet, regenerate_all: bool) -> SyncReport {
        let generator = MeshGenerator::new(tileset);
        let mut report = SyncReport::default();

        for chunk in grid.chunks() {
            let coords = chunk.coords();
            let synced = self.chunks.entry(coords).or_insert_with(|| {
                debug!("Tracking new chunk {:?}", coords);
                SyncedChunk { nonce: 0, mesh: None }
            });

            if regenerate_all || synced.nonce != chunk.nonce() {
                synced.mesh = Some(generator.generate_chunk_mesh(grid, coords));
                synced.nonce = chunk.nonce();
                report.regenerated.push(coords);
            }
        }

        self.chunks.retain(|coords, _| {
            let alive = grid.chunk(*coords).is_some();
            if !alive {
                debug!("Discarding mesh of removed chunk {:?}", coords);
                report.removed.push(*coords);
            }
            alive
        });

        // HashMap order is arbitrary
        report.regenerated.sort();
        report.removed.sort();

        if !report.is_empty() {
            info!(
                "Synced terrain: {} regenerated, {} removed",
                report.regenerated.len(),
                report.removed.len()
            );
        }
        report
    }

    pub fn is_stale(&self, grid: &HeightGrid, coords: ChunkCoords) -> bool {
        match (grid.chunk(coords), self.chunks.get(&coords)) {
            (Some(chunk), Some(synced)) => chunk.nonce() != synced.nonce,
            (Some(_), None) => true,
            (None, Some(_)) => true,
            (None, None) => false,
        }
    }

    pub fn last_synced_nonce(&self, coords: ChunkCoords) -> Option<u64> {
        self.chunks.get(&coords).map(|c| c.nonce)
    }

    pub fn mesh(&self, coords: ChunkCoords) -> Option<&ChunkMesh> {
        self.chunks.get(&coords).and_then(|c| c.mesh.as_ref())
    }

    pub fn tracked(&self) -> impl Iterator<Item = ChunkCoords> + '_ {
        self.chunks.keys().copied()
    }

    /// Forgets every mesh so the next sync rebuilds from scratch, e.g.
    /// after the grid was replaced wholesale.
    pub fn reset(&mut self) {
        self.chunks.clear();
    }
}

/// World-space translation of a chunk's mesh.
pub fn chunk_origin(coords: ChunkCoords, chunk_size: i32, block_size: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        coords.x as f32 * chunk_size as f32 * block_size.x,
        0.0,
        coords.y as f32 * chunk_size as f32 * block_size.z,
    )
}
