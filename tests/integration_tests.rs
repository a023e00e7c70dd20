//! Integration tests - whole sessions driven through the `Game` handle
//!
//! Most tests run on a paused tokio clock, so gravity and key repeat timing
//! is exact and a full game finishes instantly. The restart race needs real
//! worker threads.

use std::sync::Arc;
use std::time::Duration;

use blockfall::core::{Figure, GameView, RecordingView, ViewEvent};
use blockfall::engine::{Game, GameConfig, GameError, GamePhase};

fn config() -> GameConfig {
    GameConfig {
        seed: Some(1234),
        ..GameConfig::default()
    }
}

fn started_game(config: GameConfig) -> (Game, Arc<RecordingView>) {
    let view = Arc::new(RecordingView::new());
    let mut game = Game::on_current_runtime(view.clone(), config).unwrap();
    game.start().unwrap();
    (game, view)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

fn current(view: &RecordingView) -> Figure {
    view.last_figure().expect("figure drawn")
}

/// Display whose game over screen takes a while to show
struct SlowGameOverView;

impl GameView for SlowGameOverView {
    fn clear_area(&self) {}
    fn draw_figure(&self, _figure: &Figure) {}
    fn wipe_lines(&self, _lines: &[usize]) {}
    fn game_over(&self) {
        std::thread::sleep(Duration::from_millis(200));
    }
    fn set_score(&self, _score: u32) {}
    fn set_level(&self, _level: u32) {}
}

#[tokio::test(start_paused = true)]
async fn test_quick_tap_moves_exactly_once() {
    let (mut game, view) = started_game(config());
    settle().await;
    let spawn = current(&view);

    game.on_left_pressed();
    game.on_left_released();
    tokio::time::sleep(Duration::from_millis(500)).await;

    let now = current(&view);
    assert_eq!(now.position.x, spawn.position.x - 1);
    assert_eq!(now.position.y, spawn.position.y);
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_held_key_repeats_until_released() {
    let (mut game, view) = started_game(config());
    settle().await;
    let spawn = current(&view);

    // Immediate move, then one per 100ms
    game.on_left_pressed();
    tokio::time::sleep(Duration::from_millis(250)).await;
    game.on_left_released();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let now = current(&view);
    assert_eq!(now.position.x, spawn.position.x - 3);
    assert_eq!(now.position.y, 0);
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_left_and_right_repeat_independently() {
    let (mut game, view) = started_game(config());
    settle().await;
    let spawn = current(&view);

    // Both held: the streams cancel out
    game.on_left_pressed();
    game.on_right_pressed();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(current(&view).position.x, spawn.position.x);

    // Releasing left leaves right repeating on its own
    game.on_left_released();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(current(&view).position.x, spawn.position.x + 2);

    game.on_right_released();
    tokio::time::sleep(Duration::from_millis(300)).await;
    let now = current(&view);
    assert_eq!(now.position.x, spawn.position.x + 2);
    assert_eq!(now.position.y, 0);
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_phase_goes_from_idle_to_falling() {
    let (mut game, view) = started_game(config());
    assert_eq!(game.phase(), GamePhase::Idle);
    assert!(game.is_started());

    settle().await;
    assert_eq!(game.phase(), GamePhase::Falling);
    assert_eq!(view.events().first(), Some(&ViewEvent::ClearArea));
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_held_down_soft_drops_and_scores() {
    let (mut game, view) = started_game(config());
    settle().await;

    game.on_down_pressed();
    tokio::time::sleep(Duration::from_millis(120)).await;
    game.on_down_released();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(current(&view).position.y, 3);
    assert_eq!(view.last_score(), Some(3));
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_rotate_is_applied_once() {
    let (mut game, view) = started_game(config());
    settle().await;
    let spawn = current(&view);

    game.on_up_pressed();
    settle().await;

    let now = current(&view);
    if spawn.matrix() != spawn.rotated().matrix() {
        assert_eq!(now.rotation, spawn.rotated().rotation);
    } else {
        assert_eq!(now, spawn);
    }
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_unpause_descends_one_delay_later() {
    let (mut game, view) = started_game(config());
    settle().await;

    game.pause();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(current(&view).position.y, 0);
    assert_eq!(game.phase(), GamePhase::Paused);

    game.pause();
    tokio::time::sleep(Duration::from_millis(790)).await;
    assert_eq!(current(&view).position.y, 0);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(current(&view).position.y, 1);
    assert_eq!(game.phase(), GamePhase::Falling);
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_untouched_game_ends_in_game_over() {
    let (mut game, view) = started_game(GameConfig {
        base_delay_ms: 10,
        ..config()
    });

    let phase = tokio::time::timeout(Duration::from_secs(3600), game.finished())
        .await
        .expect("game should end");

    assert_eq!(phase, GamePhase::GameOver);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(!game.is_started());
    assert!(view.saw_game_over());

    // A finished game can be started again
    game.start().unwrap();
    assert!(game.is_started());
    game.stop();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_game_over_allows_restart_before_view_returns() {
    let config = GameConfig {
        base_delay_ms: 1,
        ..config()
    };
    let mut game = Game::on_current_runtime(Arc::new(SlowGameOverView), config).unwrap();
    game.start().unwrap();

    let phase = tokio::time::timeout(Duration::from_secs(30), game.finished())
        .await
        .expect("game should end");
    assert_eq!(phase, GamePhase::GameOver);

    // The loop may still be inside game_over() here
    assert!(!game.is_started());
    game.start().unwrap();
    assert!(game.is_started());
    game.stop();
}

#[tokio::test(start_paused = true)]
async fn test_start_while_running_is_rejected() {
    let (mut game, _view) = started_game(config());
    assert!(matches!(game.start(), Err(GameError::AlreadyStarted)));

    game.stop();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert_eq!(game.finished().await, GamePhase::Idle);

    game.start().unwrap();
    assert!(game.is_started());
}

#[tokio::test(start_paused = true)]
async fn test_keys_after_stop_change_nothing() {
    let (mut game, view) = started_game(config());
    settle().await;
    game.stop();
    settle().await;
    let before = view.events().len();

    game.on_left_pressed();
    game.on_right_pressed();
    game.on_down_pressed();
    game.on_up_pressed();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(view.events().len(), before);
}
