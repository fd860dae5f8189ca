use log::debug;
use nalgebra::{Matrix4, Point3};

use crate::terrain::{
    coords::ChunkCoords,
    generator::tileset::{MeshFragment, TileSet, VariantSelection},
    heightmap::HeightGrid,
    mesh::{ChunkMesh, SubMesh},
    shape::{classify, TileShape},
};

/// Vertex/index buffers of one material group.
#[derive(Default)]
struct GroupBuffer {
    vertices: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
}

impl GroupBuffer {
    fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    // indices stay local to the group; `finish` rebases the ground group.
    // Fragments were checked when the tile set was built.
    fn place(&mut self, fragment: &MeshFragment, transform: &Matrix4<f32>) {
        let base = self.vertex_count() as u32;

        for p in &fragment.positions {
            let v = transform.transform_point(&Point3::new(p[0], p[1], p[2]));
            self.vertices.extend_from_slice(&[v.x, v.y, v.z]);
        }
        for uv in &fragment.uvs {
            self.uvs.extend_from_slice(uv);
        }
        self.indices.extend(fragment.indices.iter().map(|i| i + base));
    }
}

/// Collects placed fragments for one chunk and combines them into a
/// two-group mesh: cliff walls first, ground caps after.
pub struct MeshAssembler<'a> {
    tileset: &'a TileSet,
    selection: VariantSelection,
    cliff: GroupBuffer,
    ground: GroupBuffer,
}

impl<'a> MeshAssembler<'a> {
    pub fn new(tileset: &'a TileSet) -> Self {
        Self::with_selection(tileset, tileset.variation)
    }

    pub fn with_selection(tileset: &'a TileSet, selection: VariantSelection) -> Self {
        Self {
            tileset,
            selection,
            cliff: GroupBuffer::default(),
            ground: GroupBuffer::default(),
        }
    }

    /// Places the fragments for one classified tile. Invalid shapes are
    /// skipped.
    pub fn add(&mut self, local_x: i32, local_y: i32, shape: &TileShape) {
        if !shape.is_valid() {
            return;
        }

        let transform = self.tileset.placement(local_x, local_y, shape.height);
        let variation = self.selection.variation(local_x, local_y, shape.height);

        for pick in self.tileset.fragments(shape, variation) {
            let group = if pick.is_ground { &mut self.ground } else { &mut self.cliff };
            group.place(pick.fragment, &transform);
        }
    }

    pub fn finish(self, coord: ChunkCoords) -> ChunkMesh {
        let MeshAssembler { cliff, ground, .. } = self;
        let cliff_index_count = cliff.indices.len();
        let ground_index_count = ground.indices.len();
        let ground_base = cliff.vertex_count() as u32;

        let mut vertices = cliff.vertices;
        vertices.extend(ground.vertices);
        let mut uvs = cliff.uvs;
        uvs.extend(ground.uvs);
        let mut indices = cliff.indices;
        indices.extend(ground.indices.into_iter().map(|i| i + ground_base));

        ChunkMesh {
            coord,
            vertices,
            uvs,
            indices,
            submeshes: [
                SubMesh { index_start: 0, index_count: cliff_index_count },
                SubMesh { index_start: cliff_index_count, index_count: ground_index_count },
            ],
        }
    }
}

pub struct MeshGenerator<'a> {
    tileset: &'a TileSet,
    selection: VariantSelection,
}

impl<'a> MeshGenerator<'a> {
    pub fn new(tileset: &'a TileSet) -> Self {
        Self { tileset, selection: tileset.variation }
    }

    pub fn with_selection(mut self, selection: VariantSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Classifies every tile anchored in the chunk and assembles the
    /// fragments of the representable ones.
    pub fn generate_chunk_mesh(&self, grid: &HeightGrid, coord: ChunkCoords) -> ChunkMesh {
        let mut assembler = MeshAssembler::with_selection(self.tileset, self.selection);
        let mut skipped = 0usize;

        for (local, tile) in grid.chunk_tiles(coord) {
            if tile.is_all_empty() {
                continue;
            }

            let shape = classify(&tile);
            if !shape.is_valid() {
                skipped += 1;
                continue;
            }
            assembler.add(local.x, local.y, &shape);
        }

        let mesh = assembler.finish(coord);
        debug!(
            "Generated chunk {:?}: {} vertices, {} cliff / {} ground indices, {} invalid tiles",
            coord,
            mesh.vertex_count(),
            mesh.submeshes[0].index_count,
            mesh.submeshes[1].index_count,
            skipped
        );
        mesh
    }
}
