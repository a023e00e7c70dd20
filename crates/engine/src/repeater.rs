//! Held-key repeat
//!
//! An [`InputRepeater`] turns "key down" / "key up" into a steady stream of
//! commands: one immediately on press, then one every `interval` until
//! release. Each key has its own repeater, so holding two keys gives two
//! independent streams.
//!
//! Every run is cancelled through a child of the session token, so stopping
//! the game also silences every held key. A run also ends by itself once the
//! game loop has gone away.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::command::{Commands, Control};
use crate::types::Direction;

/// What a repeater does on every repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatAction {
    Move(Direction),
    SoftDrop,
}

impl RepeatAction {
    fn apply(self, commands: &Commands) {
        match self {
            RepeatAction::Move(direction) => {
                commands.send(Control::Move(direction));
            }
            RepeatAction::SoftDrop => {
                commands.descend();
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeaterState {
    Idle,
    Repeating,
}

#[derive(Debug)]
pub struct InputRepeater {
    action: RepeatAction,
    interval: Duration,
    commands: Commands,
    session: CancellationToken,
    runtime: Handle,
    running: Option<CancellationToken>,
}

impl InputRepeater {
    pub fn new(
        action: RepeatAction,
        interval: Duration,
        commands: Commands,
        session: CancellationToken,
        runtime: Handle,
    ) -> Self {
        Self {
            action,
            interval,
            commands,
            session,
            runtime,
            running: None,
        }
    }

    pub fn action(&self) -> RepeatAction {
        self.action
    }

    pub fn state(&self) -> RepeaterState {
        match &self.running {
            Some(token) if !token.is_cancelled() => RepeaterState::Repeating,
            _ => RepeaterState::Idle,
        }
    }

    /// Fire once now and keep firing every interval until [`stop`](Self::stop)
    ///
    /// Does nothing while already repeating.
    pub fn start(&mut self) {
        if self.state() == RepeaterState::Repeating {
            return;
        }

        self.action.apply(&self.commands);

        let token = self.session.child_token();
        self.running = Some(token.clone());

        let action = self.action;
        let commands = self.commands.clone();
        let interval = self.interval;
        self.runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = commands.closed() => {
                        // Loop is gone (game over); stop as if released
                        token.cancel();
                        break;
                    }
                    _ = ticker.tick() => action.apply(&commands),
                }
            }
        });
    }

    /// Cancel the pending repeats; safe to call any number of times
    pub fn stop(&mut self) {
        if let Some(token) = self.running.take() {
            token.cancel();
        }
    }
}

impl Drop for InputRepeater {
    fn drop(&mut self) {
        self.stop();
    }
}
