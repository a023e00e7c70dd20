//! Shared data structures and constants
//!
//! Everything in here is plain data with no external dependencies, so the
//! board, the scoring rules and the async engine can all agree on the same
//! vocabulary without pulling each other in.
//!
//! # Play area
//!
//! - **Width**: [`AREA_WIDTH`] columns (indexed 0-9)
//! - **Height**: [`AREA_HEIGHT`] rows (indexed 0-19)
//! - Coordinates are `(x, y)` with `(0, 0)` in the top-left corner
//!
//! # Timing constants
//!
//! All timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DELAY_MS` | 800 | Gravity delay at level 0 |
//! | `DELAY_STEP_MS` | 50 | Delay reduction per level |
//! | `MIN_DELAY_MS` | 1 | Gravity delay floor |
//! | `HORIZONTAL_REPEAT_MS` | 100 | Left/right repeat interval while held |
//! | `DOWN_REPEAT_MS` | 50 | Soft drop repeat interval while held |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, FigureKind, Point, AREA_WIDTH};
//!
//! assert_eq!(Direction::Left.movement(), Point::new(-1, 0));
//! assert_eq!(FigureKind::from_str("t"), Some(FigureKind::T));
//! assert_eq!(AREA_WIDTH, 10);
//! ```

/// Play area width in cells
pub const AREA_WIDTH: usize = 10;

/// Play area height in cells
pub const AREA_HEIGHT: usize = 20;

/// Gravity delay at level 0
pub const BASE_DELAY_MS: u64 = 800;

/// How much each level shortens the gravity delay
pub const DELAY_STEP_MS: u64 = 50;

/// Gravity never waits less than this
pub const MIN_DELAY_MS: u64 = 1;

/// Repeat interval for a held left/right key
pub const HORIZONTAL_REPEAT_MS: u64 = 100;

/// Repeat interval for a held down key
pub const DOWN_REPEAT_MS: u64 = 50;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Bonus for every voluntary soft drop step
pub const SPEED_UP_POINTS: u32 = 1;

/// Line clear scoring table
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// The three directions a figure can be pushed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// One-cell translation for this direction
    pub const fn movement(self) -> Point {
        match self {
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
            Direction::Down => Point::new(0, 1),
        }
    }
}

/// The figure variants
///
/// - **I**: straight bar
/// - **L**: L-shaped
/// - **J**: L flipped
/// - **S**: S-shaped
/// - **Z**: S flipped
/// - **O**: 2x2 square
/// - **T**: T-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    I,
    L,
    J,
    S,
    Z,
    O,
    T,
}

impl FigureKind {
    /// Parse figure kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::FigureKind;
    ///
    /// assert_eq!(FigureKind::from_str("i"), Some(FigureKind::I));
    /// assert_eq!(FigureKind::from_str("O"), Some(FigureKind::O));
    /// assert_eq!(FigureKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(FigureKind::I),
            "l" => Some(FigureKind::L),
            "j" => Some(FigureKind::J),
            "s" => Some(FigureKind::S),
            "z" => Some(FigureKind::Z),
            "o" => Some(FigureKind::O),
            "t" => Some(FigureKind::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FigureKind::I => "i",
            FigureKind::L => "l",
            FigureKind::J => "j",
            FigureKind::S => "s",
            FigureKind::Z => "z",
            FigureKind::O => "o",
            FigureKind::T => "t",
        }
    }
}

/// A cell on the board
///
/// - `None`: empty
/// - `Some(FigureKind)`: fixed by a locked figure of that kind
pub type Cell = Option<FigureKind>;
