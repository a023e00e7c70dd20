//! Game engine - the async loop, input repeat and the control surface
//!
//! Built on tokio. A running game is one loop task that owns every piece of
//! mutable game state, plus one short-lived task per held key. They talk
//! through bounded, non-blocking channels and share a single cancellation
//! token per session.
//!
//! # Module Structure
//!
//! - [`game`]: [`Game`], the handle input code calls into
//! - [`game_loop`]: the per-session task and its [`GamePhase`]s
//! - [`repeater`]: held-key repeat tasks
//! - [`command`]: the control and soft drop channels
//! - [`config`]: [`GameConfig`] and the gravity delay formula
//! - [`error`]: [`GameError`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use blockfall_engine::{Game, GameConfig};
//! use blockfall_engine::core::NullView;
//!
//! # async fn demo() -> Result<(), blockfall_engine::GameError> {
//! let mut game = Game::on_current_runtime(Arc::new(NullView), GameConfig::from_env())?;
//! game.start()?;
//! game.on_left_pressed();
//! game.on_left_released();
//! let phase = game.finished().await;
//! # let _ = phase;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod game;
pub mod game_loop;
pub mod repeater;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use command::{Commands, Control, Inbox};
pub use config::{delay_ms, GameConfig};
pub use error::GameError;
pub use game::Game;
pub use game_loop::{GameLoop, GamePhase};
pub use repeater::{InputRepeater, RepeatAction, RepeaterState};
