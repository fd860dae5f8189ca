// src/terrain/brush.rs

use std::collections::HashSet;

use log::debug;

use crate::terrain::chunk::Height;
use crate::terrain::coords::VertexCoords;
use crate::terrain::heightmap::{HeightGrid, WriteOutcome};

pub const MAX_BRUSH_SIZE: i32 = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BrushShape {
    #[default]
    Rectangle,
    Circle,
}

/// Square or round footprint of vertices around a center vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    size: i32,
    pub shape: BrushShape,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(1, BrushShape::Rectangle)
    }
}

impl Brush {
    pub fn new(size: i32, shape: BrushShape) -> Self {
        Self { size: size.clamp(0, MAX_BRUSH_SIZE), shape }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn set_size(&mut self, size: i32) {
        self.size = size.clamp(0, MAX_BRUSH_SIZE);
    }

    pub fn grow(&mut self) {
        self.set_size(self.size + 1);
    }

    pub fn shrink(&mut self) {
        self.set_size(self.size - 1);
    }

    /// Vertices covered by the brush centered at `center`. Even sizes lean
    /// toward negative coordinates.
    pub fn cells(&self, center: VertexCoords) -> Vec<VertexCoords> {
        let a = self.size / 2;
        let b = self.size - a;
        let even = self.size % 2 == 0;
        let r = self.size as f32 / 2.0 - 0.25;

        let mut cells = Vec::with_capacity((self.size * self.size) as usize);
        for dy in -a..b {
            for dx in -a..b {
                if self.shape == BrushShape::Circle {
                    let half = if even { 0.5 } else { 0.0 };
                    let fx = dx as f32 + half;
                    let fy = dy as f32 + half;
                    if fx * fx + fy * fy >= r * r {
                        continue;
                    }
                }
                // cells past the integer limits are dropped
                cells.extend(center.offset(dx, dy));
            }
        }
        cells
    }
}

/// Integer line from `from` to `to`, both ends included.
pub fn bresenham_line(from: VertexCoords, to: VertexCoords) -> Vec<VertexCoords> {
    // i64 so spans across the whole i32 range cannot overflow
    let dx = (i64::from(to.x) - i64::from(from.x)).abs();
    let dy = -(i64::from(to.y) - i64::from(from.y)).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut err = dx + dy;
    loop {
        points.push(VertexCoords::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PaintMode {
    #[default]
    Raise,
    Lower,
}

impl PaintMode {
    /// Height after one paint step. Painting an empty vertex always
    /// creates it at height 1.
    pub fn apply(self, current: Height) -> Height {
        match (current, self) {
            (None, _) => Some(1),
            (Some(h), PaintMode::Raise) => Some(h.saturating_add(1)),
            (Some(h), PaintMode::Lower) => Some(h.saturating_sub(1)),
        }
    }
}

/// Brush preview of one vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewCell {
    pub at: VertexCoords,
    pub height: Height,
    pub rejected: bool,
}

/// One continuous paint gesture. Every vertex changes at most once per
/// stroke, however often the brush passes over it.
#[derive(Debug, Default)]
pub struct PaintStroke {
    mode: PaintMode,
    painted: HashSet<VertexCoords>,
}

impl PaintStroke {
    pub fn begin(mode: PaintMode) -> Self {
        Self { mode, painted: HashSet::new() }
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn is_painted(&self, at: VertexCoords) -> bool {
        self.painted.contains(&at)
    }

    pub fn painted_count(&self) -> usize {
        self.painted.len()
    }

    /// Paints every brush cell that is unpainted and whose new height keeps
    /// the surrounding tiles valid. Returns the write outcomes.
    pub fn paint(&mut self, grid: &mut HeightGrid, brush: &Brush, center: VertexCoords) -> Vec<WriteOutcome> {
        let mut outcomes = Vec::new();
        for at in brush.cells(center) {
            if self.painted.contains(&at) {
                continue;
            }

            let value = self.mode.apply(grid.height(at.x, at.y));
            if !grid.can_set_height(at.x, at.y, value) {
                continue;
            }

            outcomes.push(grid.set_height(at.x, at.y, value));
            self.painted.insert(at);
        }
        outcomes
    }

    /// Paints along the line between two brush positions, as when the
    /// cursor moves between two frames.
    pub fn paint_line(&mut self, grid: &mut HeightGrid, brush: &Brush, from: VertexCoords, to: VertexCoords) -> Vec<WriteOutcome> {
        let mut outcomes = Vec::new();
        for center in bresenham_line(from, to) {
            outcomes.extend(self.paint(grid, brush, center));
        }
        outcomes
    }

    pub fn end(self) -> usize {
        debug!("Paint stroke finished, {} vertices changed", self.painted.len());
        self.painted.len()
    }
}

/// What painting at `center` would do, without touching the grid.
pub fn preview(grid: &HeightGrid, brush: &Brush, mode: PaintMode, center: VertexCoords) -> Vec<PreviewCell> {
    brush
        .cells(center)
        .into_iter()
        .map(|at| {
            let height = grid.height(at.x, at.y);
            PreviewCell {
                at,
                height,
                rejected: !grid.can_set_height(at.x, at.y, mode.apply(height)),
            }
        })
        .collect()
}
