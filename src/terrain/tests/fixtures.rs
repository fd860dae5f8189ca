use crate::terrain::generator::{FragmentTable, MeshFragment, TileSet, TileSetConfig, VariantSelection};
use crate::terrain::heightmap::HeightGrid;

/// Unit quad, 4 vertices and 6 indices.
pub fn quad(name: &str) -> MeshFragment {
    MeshFragment {
        name: name.to_string(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Single triangle, 3 vertices and 3 indices.
pub fn triangle(name: &str) -> MeshFragment {
    MeshFragment {
        name: name.to_string(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        indices: vec![0, 1, 2],
    }
}

/// Every code has a quad as variant 0 and a triangle as variant 1.
pub fn full_table(prefix: &str) -> FragmentTable {
    let mut table = FragmentTable::new();
    for code in 1..15u8 {
        table.insert(code, quad(&format!("{prefix}{code:04b}_a")));
        table.insert(code, triangle(&format!("{prefix}{code:04b}_b")));
    }
    table
}

pub fn test_tileset(selection: VariantSelection) -> TileSet {
    let config = TileSetConfig {
        variation: selection,
        ..TileSetConfig::default()
    };
    TileSet::new(&config, quad("Ground"), full_table("Cliff"), full_table("Ground"))
        .expect("default config is valid")
}

/// Fills the vertices `[x0, x1] x [y0, y1]` with one height.
pub fn fill(grid: &mut HeightGrid, x0: i32, y0: i32, x1: i32, y1: i32, height: i32) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            grid.set_height(x, y, Some(height));
        }
    }
}
