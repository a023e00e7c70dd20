//! Score module - points, level and the rules that move them
//!
//! Line clears use the classic table ([`LINE_SCORES`]) multiplied by
//! `level + 1`, so clearing several rows at once is worth far more than
//! clearing them one at a time. The level is derived from the running total
//! of cleared lines and can only go up during a game.
//!
//! Every mutation ends with a synchronous call to the change listener, which
//! the engine wires to the display.

use std::fmt;

use crate::types::{LINES_PER_LEVEL, LINE_SCORES, SPEED_UP_POINTS};

/// Receives the score after every change
pub type ScoreListener = Box<dyn FnMut(&Score) + Send>;

pub struct Score {
    points: u32,
    level: u32,
    lines: u32,
    listener: ScoreListener,
}

impl Score {
    pub fn new(listener: impl FnMut(&Score) + Send + 'static) -> Self {
        Self {
            points: 0,
            level: 0,
            lines: 0,
            listener: Box::new(listener),
        }
    }

    /// A score nobody listens to
    pub fn silent() -> Self {
        Self::new(|_| {})
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Cumulative cleared lines
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Reset for a new game
    pub fn award_start(&mut self) {
        self.points = 0;
        self.level = 0;
        self.lines = 0;
        self.notify();
    }

    /// Bonus for a voluntary soft drop step
    pub fn award_speed_up(&mut self) {
        self.points = self.points.saturating_add(SPEED_UP_POINTS);
        self.notify();
    }

    /// Award `count` simultaneously cleared lines
    pub fn award_lines_wipe(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        self.points = self
            .points
            .saturating_add(line_clear_points(count, self.level));
        self.lines = self.lines.saturating_add(count as u32);
        self.level = self.level.max(level_for_lines(self.lines));
        self.notify();
    }

    fn notify(&mut self) {
        // Take the listener out so it can borrow the rest of `self`
        let mut listener = std::mem::replace(&mut self.listener, Box::new(|_| {}));
        listener(self);
        self.listener = listener;
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Score")
            .field("points", &self.points)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

/// Points for clearing `lines` rows at once on `level`
///
/// More than four rows cannot be cleared by a single figure; such counts
/// score as four.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level + 1)
}

/// Level reached after `lines` cumulative cleared lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL
}
