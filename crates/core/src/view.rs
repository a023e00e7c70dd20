//! Display collaborator interface
//!
//! The game never renders anything itself. It pushes changes to a
//! [`GameView`], which is shared between the board, the score listener and
//! the game loop, so every method takes `&self`.

use std::sync::Mutex;

use crate::figures::Figure;

/// Rendering surface driven by the game
pub trait GameView: Send + Sync {
    /// Wipe everything, including fixed cells
    fn clear_area(&self);

    /// Draw the current figure (the view is expected to erase its previous image)
    fn draw_figure(&self, figure: &Figure);

    /// Remove the given rows, ascending, and collapse the rows above
    fn wipe_lines(&self, lines: &[usize]);

    fn game_over(&self);

    fn set_score(&self, score: u32);

    fn set_level(&self, level: u32);
}

/// A view that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl GameView for NullView {
    fn clear_area(&self) {}
    fn draw_figure(&self, _figure: &Figure) {}
    fn wipe_lines(&self, _lines: &[usize]) {}
    fn game_over(&self) {}
    fn set_score(&self, _score: u32) {}
    fn set_level(&self, _level: u32) {}
}

/// One call made on a [`RecordingView`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    ClearArea,
    DrawFigure(Figure),
    WipeLines(Vec<usize>),
    GameOver,
    Score(u32),
    Level(u32),
}

/// Headless view that keeps a log of every call
#[derive(Debug, Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<ViewEvent> {
        self.lock().clone()
    }

    /// The most recently drawn figure, if any
    pub fn last_figure(&self) -> Option<Figure> {
        self.lock().iter().rev().find_map(|event| match event {
            ViewEvent::DrawFigure(figure) => Some(*figure),
            _ => None,
        })
    }

    /// The most recently reported score, if any
    pub fn last_score(&self) -> Option<u32> {
        self.lock().iter().rev().find_map(|event| match event {
            ViewEvent::Score(score) => Some(*score),
            _ => None,
        })
    }

    pub fn saw_game_over(&self) -> bool {
        self.lock().contains(&ViewEvent::GameOver)
    }

    fn push(&self, event: ViewEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ViewEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl GameView for RecordingView {
    fn clear_area(&self) {
        self.push(ViewEvent::ClearArea);
    }

    fn draw_figure(&self, figure: &Figure) {
        self.push(ViewEvent::DrawFigure(*figure));
    }

    fn wipe_lines(&self, lines: &[usize]) {
        self.push(ViewEvent::WipeLines(lines.to_vec()));
    }

    fn game_over(&self) {
        self.push(ViewEvent::GameOver);
    }

    fn set_score(&self, score: u32) {
        self.push(ViewEvent::Score(score));
    }

    fn set_level(&self, level: u32) {
        self.push(ViewEvent::Level(level));
    }
}
