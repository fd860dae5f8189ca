// src/terrain/mesh.rs

use std::ops::Range;

use crate::terrain::coords::ChunkCoords;

/// Material group of a sub-mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshGroup {
    Cliff = 0,
    Ground = 1,
}

/// Contiguous run of indices rendered with one material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SubMesh {
    pub index_start: usize,
    pub index_count: usize,
}

impl SubMesh {
    pub fn range(&self) -> Range<usize> {
        self.index_start..self.index_start + self.index_count
    }
}

/// Combined geometry for one chunk, in chunk-local space.
///
/// `vertices` and `uvs` are flat (xyz / uv per vertex). `submeshes` holds
/// the cliff range followed by the ground range.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    pub coord: ChunkCoords,
    pub vertices: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
    pub submeshes: [SubMesh; 2],
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn submesh(&self, group: MeshGroup) -> SubMesh {
        self.submeshes[group as usize]
    }

    pub fn group_indices(&self, group: MeshGroup) -> &[u32] {
        &self.indices[self.submesh(group).range()]
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
