//! Grid collision queries and axis-separated movement
//!
//! World coordinates map onto the maze grid by flooring against the cell
//! size. Anything outside the grid has no wall data and is NOT treated as a
//! wall: callers clamp targets to the playable surface before moving.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::maze::{Cell, Grid};

/// Axis-aligned rectangle in world units (wall tiles for renderers)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Outcome of one axis-separated step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMove {
    /// Position after the step
    pub pos: Vec2,
    /// X test passed and the x component was applied
    pub moved_x: bool,
    /// Y test passed and the y component was applied
    pub moved_y: bool,
}

impl AxisMove {
    /// True if either axis advanced
    #[inline]
    pub fn moved(&self) -> bool {
        self.moved_x || self.moved_y
    }
}

/// The maze grid placed on a drawing surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    grid: Grid,
    surface: Vec2,
    cell_size: Vec2,
}

impl Arena {
    /// Stretch `grid` over a surface of the given extent
    pub fn new(grid: Grid, surface: Vec2) -> Self {
        let cell_size = surface / grid.size().max(1) as f32;
        Self {
            grid,
            surface,
            cell_size,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// (row, col) containing a world point; may lie outside the grid
    #[inline]
    pub fn cell_at(&self, pos: Vec2) -> (isize, isize) {
        let row = (pos.y / self.cell_size.y).floor() as isize;
        let col = (pos.x / self.cell_size.x).floor() as isize;
        (row, col)
    }

    /// True only when the point lands on an existing wall cell
    #[inline]
    pub fn is_wall(&self, pos: Vec2) -> bool {
        let (row, col) = self.cell_at(pos);
        self.grid.get(row, col) == Some(Cell::Wall)
    }

    /// World position of a cell centre
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            col as f32 * self.cell_size.x + self.cell_size.x / 2.0,
            row as f32 * self.cell_size.y + self.cell_size.y / 2.0,
        )
    }

    /// Apply `step` one axis at a time, skipping any axis that would land in a wall.
    ///
    /// X goes first; the Y test uses the already-updated x, so a diagonal step
    /// into a corner slides along whichever axis is free.
    pub fn slide(&self, pos: Vec2, step: Vec2) -> AxisMove {
        let mut next = pos;

        let moved_x = !self.is_wall(Vec2::new(pos.x + step.x, next.y));
        if moved_x {
            next.x = pos.x + step.x;
        }

        let moved_y = !self.is_wall(Vec2::new(next.x, pos.y + step.y));
        if moved_y {
            next.y = pos.y + step.y;
        }

        AxisMove {
            pos: next,
            moved_x,
            moved_y,
        }
    }

    /// Wall tiles as world rectangles, row-major
    pub fn wall_rects(&self) -> Vec<Rect> {
        let n = self.grid.size();
        let mut rects = Vec::new();
        for row in 0..n {
            for col in 0..n {
                if !self.grid.is_open(row, col) {
                    rects.push(Rect {
                        x: col as f32 * self.cell_size.x,
                        y: row as f32 * self.cell_size.y,
                        w: self.cell_size.x,
                        h: self.cell_size.y,
                    });
                }
            }
        }
        rects
    }
}
