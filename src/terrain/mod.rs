pub mod coords;
pub mod chunk;
pub mod changes;
pub mod heightmap;
pub mod tile;
pub mod shape;
pub mod mesh;
pub mod generator;
pub mod sync;
pub mod brush;
pub mod persist;
pub mod error;

pub use chunk::{Chunk, Height};
pub use coords::{ChunkCoords, LocalCoords, VertexCoords, CHUNK_SIZE};
pub use error::{Result, TerrainError};
pub use heightmap::{HeightGrid, WriteOutcome};
pub use mesh::{ChunkMesh, MeshGroup, SubMesh};
pub use shape::{classify, TileShape};
pub use tile::{Corner, Tile};

#[cfg(test)]
mod tests;
