// src/terrain/tile.rs

use crate::terrain::chunk::Height;

/// Corner of a tile. The discriminant is the bit position in a shape code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    BottomLeft = 0,
    BottomRight = 1,
    TopRight = 2,
    TopLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopRight,
        Corner::TopLeft,
    ];

    /// Vertex offset of this corner relative to the tile anchor.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Corner::BottomLeft => (0, 0),
            Corner::BottomRight => (1, 0),
            Corner::TopRight => (1, 1),
            Corner::TopLeft => (0, 1),
        }
    }
}

/// The unit cell anchored at `(x, y)`, bounded by four vertex heights.
/// Tiles are never stored; the grid builds them on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub corners: [Height; 4],
}

impl Tile {
    pub fn new(bl: Height, br: Height, tr: Height, tl: Height) -> Self {
        Self { corners: [bl, br, tr, tl] }
    }

    pub fn corner(&self, corner: Corner) -> Height {
        self.corners[corner as usize]
    }

    pub fn with_corner(mut self, corner: Corner, height: Height) -> Self {
        self.corners[corner as usize] = height;
        self
    }

    pub fn is_all_empty(&self) -> bool {
        self.corners.iter().all(Option::is_none)
    }

    pub fn is_any_empty(&self) -> bool {
        self.corners.iter().any(Option::is_none)
    }
}
