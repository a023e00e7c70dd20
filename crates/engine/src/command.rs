//! Channels from input callbacks into the game loop
//!
//! Input callbacks never touch game state. They drop messages into two
//! bounded queues drained by the loop task:
//!
//! - the control queue carries horizontal moves, rotations and pause
//!   toggles, in order;
//! - the descend queue holds at most one pending "soft drop now" signal.
//!   Extra signals sent while one is pending are discarded, so a burst of
//!   presses collapses into a single descend.
//!
//! Both sides are non-blocking for the sender: a full queue drops the new
//! message instead of waiting.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

use crate::types::Direction;

/// Messages applied by the loop without consuming the gravity deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Move(Direction),
    Rotate,
    TogglePause,
}

/// Sending half, cheap to clone into every repeater
#[derive(Debug, Clone)]
pub struct Commands {
    control_tx: mpsc::Sender<Control>,
    descend_tx: mpsc::Sender<()>,
}

/// Receiving half, owned by the game loop
#[derive(Debug)]
pub struct Inbox {
    pub control_rx: mpsc::Receiver<Control>,
    pub descend_rx: mpsc::Receiver<()>,
}

/// Create a connected pair; `max_pending` bounds the control queue
pub fn channel(max_pending: usize) -> (Commands, Inbox) {
    let (control_tx, control_rx) = mpsc::channel(max_pending.max(1));
    let (descend_tx, descend_rx) = mpsc::channel(1);
    (
        Commands {
            control_tx,
            descend_tx,
        },
        Inbox {
            control_rx,
            descend_rx,
        },
    )
}

impl Commands {
    /// Queue a control message; false if it was dropped
    pub fn send(&self, control: Control) -> bool {
        match self.control_tx.try_send(control) {
            Ok(()) => true,
            Err(TrySendError::Full(control)) => {
                debug!(?control, "control queue full, dropping");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Ask the loop to descend now; false if a signal was already pending
    /// or the loop is gone
    pub fn descend(&self) -> bool {
        self.descend_tx.try_send(()).is_ok()
    }

    /// Resolves once the loop has dropped its [`Inbox`]
    pub async fn closed(&self) {
        tokio::select! {
            _ = self.control_tx.closed() => {}
            _ = self.descend_tx.closed() => {}
        }
    }
}
