//! Board module - the grid of fixed cells plus the falling figure
//!
//! The grid is a flat row-major array of [`Cell`]s, `AREA_WIDTH` columns by
//! `AREA_HEIGHT` rows, with (0, 0) in the top-left corner. The board also
//! owns the one figure currently falling and keeps the display informed
//! about where it is.
//!
//! Moves and rotations are all-or-nothing: a request that would push the
//! figure out of the grid or into a fixed cell is refused and the figure is
//! left exactly as it was.

use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::figures::Figure;
use crate::types::{Cell, Point, AREA_HEIGHT, AREA_WIDTH};
use crate::view::GameView;

/// Total number of cells on the board
const BOARD_SIZE: usize = AREA_WIDTH * AREA_HEIGHT;

/// Row indices, ascending
pub type LineIndices = ArrayVec<usize, AREA_HEIGHT>;

pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    current: Figure,
    view: Arc<dyn GameView>,
}

impl Board {
    /// Create an empty board with `figure` as the current figure
    pub fn new(view: Arc<dyn GameView>, figure: Figure) -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            current: figure,
            view,
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= AREA_WIDTH as i32 || y < 0 || y >= AREA_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * AREA_WIDTH + (x as usize))
    }

    pub fn width(&self) -> usize {
        AREA_WIDTH
    }

    pub fn height(&self) -> usize {
        AREA_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and not fixed
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Whether every cell of `figure` is in bounds and free
    pub fn fits(&self, figure: &Figure) -> bool {
        figure.cells().all(|p| self.is_free(p.x, p.y))
    }

    pub fn current_figure(&self) -> &Figure {
        &self.current
    }

    /// Install the next figure. No legality check: a figure spawned on top
    /// of the stack is detected by the game loop when it fails to descend.
    pub fn set_current_figure(&mut self, figure: Figure) {
        self.current = figure;
    }

    /// Translate the current figure by `delta` if the result is legal
    ///
    /// Returns false and leaves the figure untouched otherwise. A failed
    /// downward move is how the game loop learns that a figure has landed.
    pub fn move_figure(&mut self, delta: Point) -> bool {
        let moved = self.current.moved(delta);
        if !self.fits(&moved) {
            return false;
        }
        self.current = moved;
        self.draw_figure();
        true
    }

    /// Switch the current figure to its next orientation if that is legal
    pub fn rotate_figure(&mut self) -> bool {
        let rotated = self.current.rotated();
        if rotated == self.current || !self.fits(&rotated) {
            return false;
        }
        self.current = rotated;
        self.draw_figure();
        true
    }

    /// Copy the current figure into the grid as fixed cells
    ///
    /// Cells outside the grid are dropped.
    pub fn fix_figure(&mut self) {
        let kind = self.current.kind;
        let figure = self.current;
        for p in figure.cells() {
            self.set(p.x, p.y, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= AREA_HEIGHT {
            return false;
        }
        let start = y * AREA_WIDTH;
        self.cells[start..start + AREA_WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Indices of completely filled rows, top to bottom
    pub fn filled_lines(&self) -> LineIndices {
        (0..AREA_HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows and let everything above them fall
    ///
    /// Single bottom-up compaction pass: surviving rows keep their order,
    /// each moves down by the number of removed rows below it, and the top
    /// is refilled with empty rows. Duplicate or out-of-range indices are
    /// ignored.
    pub fn wipe_lines(&mut self, lines: &[usize]) {
        let mut write_y = AREA_HEIGHT;

        for read_y in (0..AREA_HEIGHT).rev() {
            if lines.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * AREA_WIDTH;
                let dst_start = write_y * AREA_WIDTH;
                self.cells
                    .copy_within(src_start..src_start + AREA_WIDTH, dst_start);
            }
        }

        for cell in &mut self.cells[..write_y * AREA_WIDTH] {
            *cell = None;
        }
    }

    /// Ask the display to draw the current figure
    pub fn draw_figure(&self) {
        self.view.draw_figure(&self.current);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Remove every fixed cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("current", &self.current)
            .field(
                "fixed",
                &self.cells.iter().filter(|cell| cell.is_some()).count(),
            )
            .finish_non_exhaustive()
    }
}
