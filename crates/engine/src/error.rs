use thiserror::Error;

/// Errors surfaced by the [`Game`](crate::Game) control surface
///
/// Illegal moves and game over are not errors; they are reported through
/// booleans and the game phase.
#[derive(Debug, Error)]
pub enum GameError {
    /// `start()` was called while a session is still running
    #[error("can't start twice: a game session is already running")]
    AlreadyStarted,

    #[error("no tokio runtime to run the game on")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
