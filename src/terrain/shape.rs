// src/terrain/shape.rs

use crate::terrain::tile::Tile;

/// Shape code of a flat tile.
pub const FLAT: u8 = 0b0000;

/// Classification of a tile: base height plus which corners sit one step
/// above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileShape {
    pub height: i32,
    pub code: u8,
    pub is_border: bool,
    valid: bool,
}

impl TileShape {
    pub const INVALID: TileShape = TileShape {
        height: 0,
        code: FLAT,
        is_border: false,
        valid: false,
    };

    pub fn new(height: i32, code: u8, is_border: bool) -> Self {
        debug_assert!(code < 0b1111, "shape code {code:#06b} cannot be produced");
        Self { height, code, is_border, valid: true }
    }

    /// False means "do not render this tile" (and "reject the edit" when
    /// validating a hypothetical write).
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_flat(&self) -> bool {
        self.code == FLAT
    }
}

/// Maps a tile's corners to its shape.
///
/// Empty corners count as height 0 when computing the span, so a tile
/// mixing empties with heights far from 0 is rejected as too steep.
pub fn classify(tile: &Tile) -> TileShape {
    if tile.is_all_empty() {
        return TileShape::INVALID;
    }

    let heights = tile.corners.map(|h| h.unwrap_or(0));
    let min = heights.iter().copied().fold(i32::MAX, i32::min);
    let max = heights.iter().copied().fold(i32::MIN, i32::max);

    // i64 so spans near the integer limits do not overflow
    if i64::from(max) - i64::from(min) > 1 {
        return TileShape::INVALID;
    }

    let code = heights
        .iter()
        .enumerate()
        .fold(0u8, |code, (i, &h)| code | (((h - min) as u8) << i));

    TileShape::new(min, code, tile.is_any_empty())
}
