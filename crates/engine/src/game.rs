//! Caller-facing control surface
//!
//! [`Game`] is what an input layer talks to. Every method returns
//! immediately: key events become messages for the loop task or start and
//! stop repeaters, and nothing here ever waits on the game.
//!
//! A session lives from [`Game::start`] until game over or [`Game::stop`].
//! Each session gets its own loop task, command channels, repeaters and
//! cancellation token, so a finished game can simply be started again.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::command::{self, Commands, Control};
use crate::config::GameConfig;
use crate::core::GameView;
use crate::error::GameError;
use crate::game_loop::{GameLoop, GamePhase};
use crate::repeater::{InputRepeater, RepeatAction};
use crate::types::Direction;

struct Session {
    cancel: CancellationToken,
    commands: Commands,
    phase: watch::Receiver<GamePhase>,
    task: JoinHandle<GamePhase>,
    left: InputRepeater,
    right: InputRepeater,
    down: InputRepeater,
}

impl Session {
    /// Not stopped, no game over published, loop task still alive
    fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
            && *self.phase.borrow() != GamePhase::GameOver
            && !self.task.is_finished()
    }
}

pub struct Game {
    view: Arc<dyn GameView>,
    config: GameConfig,
    runtime: Handle,
    session: Option<Session>,
}

impl Game {
    /// A game that spawns its tasks on `runtime`
    pub fn new(view: Arc<dyn GameView>, config: GameConfig, runtime: Handle) -> Self {
        Self {
            view,
            config,
            runtime,
            session: None,
        }
    }

    /// A game bound to the runtime of the calling context
    pub fn on_current_runtime(
        view: Arc<dyn GameView>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        let runtime = Handle::try_current()?;
        Ok(Self::new(view, config, runtime))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new session
    ///
    /// Fails with [`GameError::AlreadyStarted`] while a session is running.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.is_started() {
            return Err(GameError::AlreadyStarted);
        }
        if let Some(previous) = self.session.take() {
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let (commands, inbox) = command::channel(self.config.max_pending_controls);
        let (phase_tx, phase) = watch::channel(GamePhase::Idle);

        let game_loop = GameLoop::new(
            self.view.clone(),
            self.config.clone(),
            inbox,
            phase_tx,
            cancel.clone(),
        );
        let task = self.runtime.spawn(game_loop.run());

        let repeater = |action, interval| {
            InputRepeater::new(
                action,
                interval,
                commands.clone(),
                cancel.clone(),
                self.runtime.clone(),
            )
        };
        let left = repeater(
            RepeatAction::Move(Direction::Left),
            self.config.horizontal_repeat(),
        );
        let right = repeater(
            RepeatAction::Move(Direction::Right),
            self.config.horizontal_repeat(),
        );
        let down = repeater(RepeatAction::SoftDrop, self.config.down_repeat());

        self.session = Some(Session {
            cancel,
            commands,
            phase,
            task,
            left,
            right,
            down,
        });
        debug!("session started");
        Ok(())
    }

    /// Cancel the loop and every repeater of the running session
    pub fn stop(&mut self) {
        if let Some(session) = &self.session {
            session.cancel.cancel();
            debug!("session stopped");
        }
    }

    /// Toggle pause
    pub fn pause(&self) {
        self.send(Control::TogglePause);
    }

    /// Whether a session is running (not stopped, not over)
    pub fn is_started(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_running)
    }

    /// Latest phase published by the loop
    pub fn phase(&self) -> GamePhase {
        match &self.session {
            Some(session) if session.cancel.is_cancelled() => GamePhase::Idle,
            Some(session) => *session.phase.borrow(),
            None => GamePhase::Idle,
        }
    }

    /// Wait until the current session ends, returning its final phase
    pub async fn finished(&self) -> GamePhase {
        let Some(session) = &self.session else {
            return GamePhase::Idle;
        };
        let mut phase = session.phase.clone();
        let cancel = session.cancel.clone();
        tokio::select! {
            _ = cancel.cancelled() => return GamePhase::Idle,
            // An error means the loop dropped its sender; its last phase still stands
            result = phase.wait_for(|p| *p == GamePhase::GameOver) => drop(result),
        }
        let last = *phase.borrow();
        last
    }

    pub fn on_left_pressed(&mut self) {
        self.with_running_session(|s| s.left.start());
    }

    pub fn on_left_released(&mut self) {
        self.with_session(|s| s.left.stop());
    }

    pub fn on_right_pressed(&mut self) {
        self.with_running_session(|s| s.right.start());
    }

    pub fn on_right_released(&mut self) {
        self.with_session(|s| s.right.stop());
    }

    /// Rotate once; rotation does not repeat
    pub fn on_up_pressed(&self) {
        self.send(Control::Rotate);
    }

    pub fn on_down_pressed(&mut self) {
        self.with_running_session(|s| s.down.start());
    }

    pub fn on_down_released(&mut self) {
        self.with_session(|s| s.down.stop());
    }

    fn send(&self, control: Control) {
        match &self.session {
            Some(session) => {
                session.commands.send(control);
            }
            None => trace!(?control, "no session, ignoring"),
        }
    }

    fn with_session(&mut self, f: impl FnOnce(&mut Session)) {
        match self.session.as_mut() {
            Some(session) => f(session),
            None => trace!("no session, ignoring key"),
        }
    }

    /// Presses after stop or game over would only feed a dead loop
    fn with_running_session(&mut self, f: impl FnOnce(&mut Session)) {
        match self.session.as_mut() {
            Some(session) if session.is_running() => f(session),
            _ => trace!("no running session, ignoring key press"),
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NullView;
    use crate::repeater::RepeaterState;

    #[tokio::test]
    async fn start_twice_is_rejected() {
        let mut game = Game::on_current_runtime(Arc::new(NullView), GameConfig::default()).unwrap();

        game.start().unwrap();
        assert!(matches!(game.start(), Err(GameError::AlreadyStarted)));

        game.stop();
        assert!(!game.is_started());
        game.start().unwrap();
        assert!(game.is_started());
    }

    #[test]
    fn no_runtime_is_an_error() {
        let result = Game::on_current_runtime(Arc::new(NullView), GameConfig::default());
        assert!(matches!(result, Err(GameError::NoRuntime(_))));
    }

    #[tokio::test]
    async fn keys_without_session_are_ignored() {
        let mut game = Game::on_current_runtime(Arc::new(NullView), GameConfig::default()).unwrap();
        game.on_left_pressed();
        game.on_up_pressed();
        game.on_down_released();
        game.pause();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(!game.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn held_keys_go_quiet_after_game_over() {
        let config = GameConfig {
            base_delay_ms: 1,
            seed: Some(5),
            ..GameConfig::default()
        };
        let mut game = Game::on_current_runtime(Arc::new(NullView), config).unwrap();
        game.start().unwrap();
        game.on_down_pressed();

        assert_eq!(game.finished().await, GamePhase::GameOver);
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;

        let session = game.session.as_ref().unwrap();
        assert_eq!(session.down.state(), RepeaterState::Idle);

        // Presses after game over start nothing
        game.on_left_pressed();
        game.on_right_pressed();
        let session = game.session.as_ref().unwrap();
        assert_eq!(session.left.state(), RepeaterState::Idle);
        assert_eq!(session.right.state(), RepeaterState::Idle);
    }
}
