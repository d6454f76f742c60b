//! Procedural maze generation
//!
//! Mazes are carved with a randomized depth-first walk over the odd cells,
//! then densified by knocking out random interior walls so the ghost and
//! player have loops to run around.

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Occupancy of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Open,
}

/// Square occupancy grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

/// Cells two steps away in each cardinal direction (carve candidates)
const CARVE_STEPS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

impl Grid {
    /// Grid with every cell set to `cell`.
    ///
    /// Panics if `size * size` overflows; settings cap the maze size well below that.
    pub fn filled(size: usize, cell: Cell) -> Self {
        Self {
            size,
            cells: vec![cell; size * size],
        }
    }

    /// Walled border around a fully open interior
    pub fn open_room(size: usize) -> Self {
        let mut grid = Self::filled(size, Cell::Wall);
        for (row, col) in grid.interior_cells() {
            grid.set(row, col, Cell::Open);
        }
        grid
    }

    /// Build a grid from ASCII rows (`#` = wall, anything else = open).
    ///
    /// Returns `None` unless the rows form a square.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.chars().count() != size {
                return None;
            }
            cells.extend(row.chars().map(|c| if c == '#' { Cell::Wall } else { Cell::Open }));
        }
        Some(Self { size, cells })
    }

    /// Cells per side
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at (row, col), `None` outside the grid
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.cells[row * self.size + col])
    }

    #[inline]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.get(row as isize, col as isize) == Some(Cell::Open)
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = cell;
        }
    }

    /// True for cells on the outer ring
    #[inline]
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 >= self.size || col + 1 >= self.size
    }

    /// All (row, col) pairs strictly inside the border, row-major
    pub fn interior_cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let last = self.size.saturating_sub(1);
        (1..last).flat_map(move |row| (1..last).map(move |col| (row, col)))
    }

    /// Open interior cells, row-major
    pub fn open_interior_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.interior_cells().filter(|&(row, col)| self.is_open(row, col))
    }

    /// Number of open cells anywhere in the grid
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Open).count()
    }

    /// Flood fill over open cells with 4-way adjacency.
    ///
    /// Returns a row-major mask; empty when the start cell is not open.
    pub fn reachable_from(&self, row: usize, col: usize) -> Vec<bool> {
        let mut visited = vec![false; self.size * self.size];
        if !self.is_open(row, col) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited[row * self.size + col] = true;
        queue.push_back((row, col));

        while let Some((row, col)) = queue.pop_front() {
            for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if self.get(nr, nc) != Some(Cell::Open) {
                    continue;
                }
                let idx = nr as usize * self.size + nc as usize;
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back((nr as usize, nc as usize));
                }
            }
        }

        visited
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                f.write_str(match cell {
                    Cell::Wall => "#",
                    Cell::Open => ".",
                })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Generate a carved and densified maze
pub fn generate_maze<R: Rng + ?Sized>(size: usize, densify_chance: f64, rng: &mut R) -> Grid {
    let mut grid = carve(size, rng);
    let carved_open = grid.open_count();
    densify(&mut grid, densify_chance, rng);
    log::info!(
        "Generated {}x{} maze: {} open after carving, {} after densify",
        size,
        size,
        carved_open,
        grid.open_count()
    );
    grid
}

/// Randomized depth-first carve starting at (1, 1).
///
/// The top of the stack advances to a random wall cell two steps away,
/// opening the cell in between. A cell stays on the stack until it has no
/// candidates left. The border is never opened.
pub fn carve<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(size, Cell::Wall);
    if size < 3 {
        return grid;
    }

    let inner = 1..=(size as isize - 2);
    grid.set(1, 1, Cell::Open);
    let mut stack = vec![(1usize, 1usize)];
    let mut candidates = Vec::with_capacity(CARVE_STEPS.len());

    while let Some(&(row, col)) = stack.last() {
        candidates.clear();
        for (dr, dc) in CARVE_STEPS {
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if inner.contains(&nr) && inner.contains(&nc) && grid.get(nr, nc) == Some(Cell::Wall) {
                candidates.push((nr as usize, nc as usize));
            }
        }

        if candidates.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let (next_row, next_col) = candidates[rng.random_range(0..candidates.len())];
        // Knock down the wall between current and chosen cell
        grid.set((row + next_row) / 2, (col + next_col) / 2, Cell::Open);
        grid.set(next_row, next_col, Cell::Open);
        stack.push((next_row, next_col));
    }

    grid
}

/// Open each interior cell independently with probability `chance`.
///
/// Open cells stay open and the border is untouched, so connectivity only grows.
pub fn densify<R: Rng + ?Sized>(grid: &mut Grid, chance: f64, rng: &mut R) {
    for (row, col) in grid.interior_cells() {
        // One draw per cell keeps the RNG stream independent of the layout
        if rng.random::<f64>() < chance {
            grid.set(row, col, Cell::Open);
        }
    }
}
