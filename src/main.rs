//! Headless demo runner (default binary).
//!
//! Plays one session with a random key-masher against a display that only
//! logs, then prints a JSON summary. Useful for watching the loop, the
//! repeaters and the scoring interact without a terminal UI.
//!
//! Besides the engine's `BLOCKFALL_*` variables, `BLOCKFALL_DEMO_SECS` caps
//! the run time (default: 60). Log verbosity follows `RUST_LOG`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::core::{Figure, GameView, SimpleRng};
use blockfall::engine::{Game, GameConfig, GamePhase};

const DEFAULT_DEMO_SECS: u64 = 60;
const KEY_INTERVAL_MS: u64 = 120;

/// Display that logs instead of drawing
#[derive(Debug, Default)]
struct LogView {
    score: AtomicU32,
    level: AtomicU32,
    lines: AtomicU32,
    figures: AtomicU32,
}

impl GameView for LogView {
    fn clear_area(&self) {
        debug!("clear area");
    }

    fn draw_figure(&self, figure: &Figure) {
        self.figures.fetch_add(1, Ordering::Relaxed);
        debug!(
            kind = figure.kind.as_str(),
            x = figure.position.x,
            y = figure.position.y,
            rotation = figure.rotation,
            "draw figure"
        );
    }

    fn wipe_lines(&self, lines: &[usize]) {
        self.lines.fetch_add(lines.len() as u32, Ordering::Relaxed);
        info!(?lines, "lines wiped");
    }

    fn game_over(&self) {
        info!("game over");
    }

    fn set_score(&self, score: u32) {
        self.score.store(score, Ordering::Relaxed);
    }

    fn set_level(&self, level: u32) {
        if self.level.swap(level, Ordering::Relaxed) != level {
            info!(level, "level changed");
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    outcome: &'static str,
    score: u32,
    level: u32,
    lines: u32,
    figure_draws: u32,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = GameConfig::from_env();
    let demo_secs = std::env::var("BLOCKFALL_DEMO_SECS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_DEMO_SECS);

    let rt = tokio::runtime::Runtime::new()?;
    let summary = rt.block_on(run(config, Duration::from_secs(demo_secs)))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run(config: GameConfig, limit: Duration) -> Result<Summary> {
    let view = Arc::new(LogView::default());
    let mut rng = SimpleRng::new(config.seed_or_clock());
    let mut game = Game::on_current_runtime(view.clone(), config)?;
    game.start()?;
    info!(?limit, "demo started");

    let deadline = tokio::time::sleep(limit);
    tokio::pin!(deadline);
    let mut keys = tokio::time::interval(Duration::from_millis(KEY_INTERVAL_MS));

    let outcome = loop {
        tokio::select! {
            _ = &mut deadline => break "time_limit",
            _ = keys.tick() => {
                if game.phase() == GamePhase::GameOver || !game.is_started() {
                    break "game_over";
                }
                mash(&mut game, &mut rng);
            }
        }
    };
    game.stop();

    Ok(Summary {
        outcome,
        score: view.score.load(Ordering::Relaxed),
        level: view.level.load(Ordering::Relaxed),
        lines: view.lines.load(Ordering::Relaxed),
        figure_draws: view.figures.load(Ordering::Relaxed),
    })
}

/// Press or release one random key
fn mash(game: &mut Game, rng: &mut SimpleRng) {
    match rng.next_range(8) {
        0 => game.on_left_pressed(),
        1 => game.on_left_released(),
        2 => game.on_right_pressed(),
        3 => game.on_right_released(),
        4 => game.on_up_pressed(),
        5 => game.on_down_pressed(),
        _ => {
            game.on_left_released();
            game.on_right_released();
            game.on_down_released();
        }
    }
}
