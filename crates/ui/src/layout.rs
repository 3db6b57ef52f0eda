//! Screen geometry for the slot grid.

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, half-open on the max edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl CellRect {
    /// Whether the point lies inside `[x, x + width) x [y, y + height)`.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && px < (self.x + self.width) as f32
            && py >= self.y as f32
            && py < (self.y + self.height) as f32
    }

    /// Convert to an egui rectangle in points.
    pub fn to_egui(self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.x as f32, self.y as f32),
            egui::vec2(self.width as f32, self.height as f32),
        )
    }
}

/// Row-major layout of square cells separated by a gap, offset from the window origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridLayout {
    /// Cells per row.
    pub columns: u32,
    /// Cell edge length in points.
    pub cell_size: i32,
    /// Space between neighbouring cells.
    pub gap: i32,
    /// Left edge of the first cell.
    pub origin_x: i32,
    /// Top edge of the first cell.
    pub origin_y: i32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 9,
            cell_size: 64,
            gap: 2,
            origin_x: 200,
            origin_y: 200,
        }
    }
}

impl GridLayout {
    fn columns(&self) -> usize {
        self.columns.max(1) as usize
    }

    /// Screen rectangle of the slot at `index`.
    pub fn cell_rect(&self, index: usize) -> CellRect {
        let stride = self.cell_size + self.gap;
        let column = (index % self.columns()) as i32;
        let row = (index / self.columns()) as i32;
        CellRect {
            x: column * stride + self.origin_x,
            y: row * stride + self.origin_y,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    /// Index of the first of `len` slots whose rectangle contains the point.
    pub fn slot_at(&self, x: f32, y: f32, len: usize) -> Option<usize> {
        (0..len).find(|&index| self.cell_rect(index).contains(x, y))
    }

    /// Rectangle for a stack attached to the cursor, centred on the pointer.
    pub fn held_rect(&self, pointer_x: f32, pointer_y: f32) -> CellRect {
        let half = self.cell_size / 2;
        CellRect {
            x: pointer_x as i32 - half,
            y: pointer_y as i32 - half,
            width: self.cell_size,
            height: self.cell_size,
        }
    }
}
