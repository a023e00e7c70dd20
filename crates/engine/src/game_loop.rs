//! The game loop task
//!
//! One task per session owns the board, the score, the figure factory and
//! the paused flag. Nothing else writes to them, so there is no locking:
//! input reaches the loop only as messages (see [`crate::command`]).
//!
//! Each falling step races four things and applies at most one descend:
//!
//! 1. session cancellation, which ends the task;
//! 2. control messages (move, rotate, pause), applied in place without
//!    touching the gravity deadline, except that unpausing re-arms it;
//! 3. the coalesced soft drop signal, which awards the speed-up bonus and
//!    moves the figure down;
//! 4. the gravity deadline, disabled while paused.
//!
//! When a downward move is refused the figure has landed: a figure still on
//! row 0 means game over, anything else is fixed, full rows are wiped and
//! scored, and a new figure is spawned.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::command::{Control, Inbox};
use crate::config::GameConfig;
use crate::core::{Board, FigureFactory, GameView, Score};
use crate::types::Direction;

/// Where the loop currently is in the piece life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Idle,
    Falling,
    Locking,
    Clearing,
    Spawning,
    Paused,
    GameOver,
}

impl GamePhase {
    /// No loop is driving the game in this phase
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::GameOver)
    }
}

/// How a falling step ended
enum Fall {
    Landed,
    Cancelled,
}

pub struct GameLoop {
    board: Board,
    score: Score,
    factory: FigureFactory,
    view: Arc<dyn GameView>,
    config: GameConfig,
    inbox: Inbox,
    phase: watch::Sender<GamePhase>,
    cancel: CancellationToken,
    paused: bool,
}

impl GameLoop {
    pub fn new(
        view: Arc<dyn GameView>,
        config: GameConfig,
        inbox: Inbox,
        phase: watch::Sender<GamePhase>,
        cancel: CancellationToken,
    ) -> Self {
        let seed = config.seed_or_clock();
        debug!(seed, "seeding figure factory");
        let mut factory = FigureFactory::new(seed);
        let board = Board::new(view.clone(), factory.random_figure());

        let score_view = view.clone();
        let score = Score::new(move |score: &Score| {
            score_view.set_score(score.points());
            score_view.set_level(score.level());
        });

        Self {
            board,
            score,
            factory,
            view,
            config,
            inbox,
            phase,
            cancel,
            paused: false,
        }
    }

    /// Board access before the loop runs, for setting up positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Drive the session until game over or cancellation
    ///
    /// Returns the final phase: [`GamePhase::GameOver`] or
    /// [`GamePhase::Idle`] after a stop.
    pub async fn run(mut self) -> GamePhase {
        info!("game loop started");
        self.view.clear_area();
        self.score.award_start();

        loop {
            self.board.draw_figure();

            if let Fall::Cancelled = self.fall().await {
                info!("game loop stopped");
                self.set_phase(GamePhase::Idle);
                return GamePhase::Idle;
            }

            self.set_phase(GamePhase::Locking);
            if self.is_game_over() {
                info!(
                    points = self.score.points(),
                    level = self.score.level(),
                    lines = self.score.lines(),
                    "game over"
                );
                self.set_phase(GamePhase::GameOver);
                self.view.game_over();
                return GamePhase::GameOver;
            }
            self.board.fix_figure();

            self.set_phase(GamePhase::Clearing);
            self.clear_lines();

            self.set_phase(GamePhase::Spawning);
            let next = self.factory.random_figure();
            debug!(kind = next.kind.as_str(), "figure spawned");
            self.board.set_current_figure(next);
        }
    }

    async fn fall(&mut self) -> Fall {
        let mut deadline = Instant::now() + self.delay();

        loop {
            self.set_phase(if self.paused {
                GamePhase::Paused
            } else {
                GamePhase::Falling
            });

            let descended = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Fall::Cancelled,
                Some(control) = self.inbox.control_rx.recv() => {
                    if self.apply(control) {
                        deadline = Instant::now() + self.delay();
                    }
                    continue;
                }
                Some(()) = self.inbox.descend_rx.recv() => {
                    self.score.award_speed_up();
                    self.board.move_figure(Direction::Down.movement())
                }
                _ = time::sleep_until(deadline), if !self.paused => {
                    trace!("gravity tick");
                    self.board.move_figure(Direction::Down.movement())
                }
            };

            if !descended {
                return Fall::Landed;
            }
            deadline = Instant::now() + self.delay();
        }
    }

    /// Apply a control message; true when the gravity deadline must be re-armed
    fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::Move(direction) => {
                self.board.move_figure(direction.movement());
                false
            }
            Control::Rotate => {
                self.board.rotate_figure();
                false
            }
            Control::TogglePause => {
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
                !self.paused
            }
        }
    }

    fn clear_lines(&mut self) {
        let lines = self.board.filled_lines();
        if lines.is_empty() {
            return;
        }
        debug!(lines = ?lines.as_slice(), "wiping lines");
        self.board.wipe_lines(&lines);
        self.view.wipe_lines(&lines);
        self.score.award_lines_wipe(lines.len());
    }

    /// The figure landed without ever leaving the spawn row
    fn is_game_over(&self) -> bool {
        self.board.current_figure().position.y <= 0
    }

    fn delay(&self) -> time::Duration {
        self.config.delay_for_level(self.score.level())
    }

    fn set_phase(&self, phase: GamePhase) {
        self.phase.send_if_modified(|current| {
            if *current == phase {
                false
            } else {
                *current = phase;
                true
            }
        });
    }
}
