use std::io;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::game::{Game, StepOutcome};
use crate::snapshot::Snapshot;

/// Whether the driver should keep going after a frontend call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Stop,
}

/// Presentation and pacing collaborator for [`run_until_terminated`].
pub trait Frontend {
    /// Shows the board before the next step.
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()>;

    /// Waits between ticks. Returning [`Control::Stop`] ends the run early.
    fn pause(&mut self, delay: Duration) -> io::Result<Control>;

    /// Called once after the final step.
    fn finish(&mut self, _snapshot: &Snapshot) -> io::Result<()> {
        Ok(())
    }
}

/// Frontend that draws nothing and never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Frontend for Headless {
    fn present(&mut self, _snapshot: &Snapshot) -> io::Result<()> {
        Ok(())
    }

    fn pause(&mut self, _delay: Duration) -> io::Result<Control> {
        Ok(Control::Continue)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub length: i32,
    pub ticks: u64,
    /// False when the frontend or the tick limit stopped the run first.
    pub terminated: bool,
}

/// Drives `game` until no safe move is left, the frontend asks to stop, or
/// `max_ticks` ticks have been taken.
pub fn run_until_terminated<R: Rng, F: Frontend + ?Sized>(
    game: &mut Game<R>,
    frontend: &mut F,
    max_ticks: Option<u64>,
) -> io::Result<RunSummary> {
    let terminated = loop {
        if max_ticks.is_some_and(|limit| game.tick_count() >= limit) {
            debug!(ticks = game.tick_count(), "tick limit reached");
            break false;
        }

        game.prepare_tick();
        frontend.present(&game.snapshot())?;

        if frontend.pause(delay_for(game.speed()))? == Control::Stop {
            debug!(ticks = game.tick_count(), "run stopped by frontend");
            break false;
        }

        let exploration_rate = game.config().exploration_rate;
        if game.step(exploration_rate) == StepOutcome::Terminated {
            break true;
        }
    };

    frontend.finish(&game.snapshot())?;

    let summary = RunSummary {
        length: game.length(),
        ticks: game.tick_count(),
        terminated,
    };
    info!(
        length = summary.length,
        ticks = summary.ticks,
        terminated = summary.terminated,
        "run finished"
    );
    Ok(summary)
}

/// Plays `games` headless games back to back, resetting between them, and
/// returns the final length of each.
pub fn run_batch<R: Rng>(game: &mut Game<R>, games: u64, max_ticks: Option<u64>) -> Vec<i32> {
    let mut scores = Vec::new();
    for _ in 0..games {
        game.reset();
        let length = match run_until_terminated(game, &mut Headless, max_ticks) {
            Ok(summary) => summary.length,
            Err(error) => {
                warn!(%error, "headless run failed");
                game.length()
            }
        };
        scores.push(length);
    }
    scores
}

fn delay_for(speed: f64) -> Duration {
    Duration::try_from_secs_f64(speed).unwrap_or(Duration::ZERO)
}
