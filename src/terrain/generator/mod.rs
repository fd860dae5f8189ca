mod mesh;
mod tileset;

pub use mesh::{MeshAssembler, MeshGenerator};
pub use tileset::{
    FragmentPick,
    FragmentTable,
    MeshFragment,
    TileSet,
    TileSetConfig,
    VariantSelection,
    SHAPE_COUNT,
};

#[cfg(test)]
mod tests;
