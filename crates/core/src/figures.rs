//! Figures module - shape matrices and the rotation table
//!
//! Each figure kind owns a fixed list of orientations. Rotating a figure
//! swaps its matrix for the next entry of that list, keeping the top-left
//! corner in place. Kinds differ in how many distinct orientations they
//! have: the square has one, the bar and the two S shapes have two, the
//! rest have four.

use crate::types::{FigureKind, Point};

/// Offset of a single filled cell relative to the matrix top-left corner
pub type CellOffset = (i32, i32);

/// Occupancy pattern of one figure orientation
///
/// Every figure covers exactly four cells; `width` and `height` describe the
/// bounding box of those cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrix {
    pub width: i32,
    pub height: i32,
    pub cells: [CellOffset; 4],
}

impl Matrix {
    const fn new(width: i32, height: i32, cells: [CellOffset; 4]) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    /// Whether the cell at `(x, y)` inside the bounding box is filled
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&(x, y))
    }
}

// X.
// X.
// XX
const L_ROTATIONS: [Matrix; 4] = [
    Matrix::new(2, 3, [(0, 0), (0, 1), (0, 2), (1, 2)]),
    Matrix::new(3, 2, [(0, 0), (1, 0), (2, 0), (0, 1)]),
    Matrix::new(2, 3, [(0, 0), (1, 0), (1, 1), (1, 2)]),
    Matrix::new(3, 2, [(2, 0), (0, 1), (1, 1), (2, 1)]),
];

// .X
// .X
// XX
const J_ROTATIONS: [Matrix; 4] = [
    Matrix::new(2, 3, [(1, 0), (1, 1), (0, 2), (1, 2)]),
    Matrix::new(3, 2, [(0, 0), (0, 1), (1, 1), (2, 1)]),
    Matrix::new(2, 3, [(0, 0), (1, 0), (0, 1), (0, 2)]),
    Matrix::new(3, 2, [(0, 0), (1, 0), (2, 0), (2, 1)]),
];

const T_ROTATIONS: [Matrix; 4] = [
    Matrix::new(3, 2, [(0, 0), (1, 0), (2, 0), (1, 1)]),
    Matrix::new(2, 3, [(1, 0), (0, 1), (1, 1), (1, 2)]),
    Matrix::new(3, 2, [(1, 0), (0, 1), (1, 1), (2, 1)]),
    Matrix::new(2, 3, [(0, 0), (0, 1), (1, 1), (0, 2)]),
];

const I_ROTATIONS: [Matrix; 2] = [
    Matrix::new(4, 1, [(0, 0), (1, 0), (2, 0), (3, 0)]),
    Matrix::new(1, 4, [(0, 0), (0, 1), (0, 2), (0, 3)]),
];

const S_ROTATIONS: [Matrix; 2] = [
    Matrix::new(3, 2, [(1, 0), (2, 0), (0, 1), (1, 1)]),
    Matrix::new(2, 3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
];

const Z_ROTATIONS: [Matrix; 2] = [
    Matrix::new(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]),
    Matrix::new(2, 3, [(1, 0), (0, 1), (1, 1), (0, 2)]),
];

const O_ROTATIONS: [Matrix; 1] = [Matrix::new(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)])];

/// All orientations of a figure kind, in rotation order
pub fn rotations(kind: FigureKind) -> &'static [Matrix] {
    match kind {
        FigureKind::I => &I_ROTATIONS,
        FigureKind::L => &L_ROTATIONS,
        FigureKind::J => &J_ROTATIONS,
        FigureKind::S => &S_ROTATIONS,
        FigureKind::Z => &Z_ROTATIONS,
        FigureKind::O => &O_ROTATIONS,
        FigureKind::T => &T_ROTATIONS,
    }
}

/// A falling figure: kind, orientation index and top-left position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub kind: FigureKind,
    pub rotation: usize,
    pub position: Point,
}

impl Figure {
    /// New figure in its first orientation
    pub fn new(kind: FigureKind, position: Point) -> Self {
        Self {
            kind,
            rotation: 0,
            position,
        }
    }

    /// Matrix of the current orientation
    pub fn matrix(&self) -> &'static Matrix {
        let table = rotations(self.kind);
        &table[self.rotation % table.len()]
    }

    /// Copy of this figure translated by `delta`
    pub fn moved(&self, delta: Point) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }

    /// Copy of this figure in its next orientation
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % rotations(self.kind).len(),
            ..*self
        }
    }

    /// Absolute grid coordinates of the four filled cells
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.matrix()
            .cells
            .iter()
            .map(move |&(dx, dy)| Point::new(self.position.x + dx, self.position.y + dy))
    }
}
