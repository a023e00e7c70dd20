//! Core game data - pure, deterministic, and testable
//!
//! This crate holds the leaf data owners of the game: the board with its
//! falling figure, the score, the figure catalog and the random figure
//! factory. Nothing in here knows about time or threads; the engine crate
//! drives these types from a single task.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, the current figure, collision checks and line wiping
//! - [`figures`]: shape matrices and per-kind rotation tables
//! - [`rng`]: weighted random figure factory with a seedable LCG
//! - [`score`]: points and level with a change listener
//! - [`view`]: the display interface the game pushes changes to
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use blockfall_core::{Board, FigureFactory, NullView};
//! use blockfall_core::types::{Direction, FigureKind};
//!
//! let mut board = Board::new(Arc::new(NullView), FigureFactory::figure(FigureKind::T));
//! assert!(board.move_figure(Direction::Down.movement()));
//! assert!(board.filled_lines().is_empty());
//! ```

pub mod board;
pub mod figures;
pub mod rng;
pub mod score;
pub mod view;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LineIndices};
pub use figures::{rotations, Figure, Matrix};
pub use rng::{FigureFactory, SimpleRng, CATALOG};
pub use score::{level_for_lines, line_clear_points, Score};
pub use view::{GameView, NullView, RecordingView, ViewEvent};
