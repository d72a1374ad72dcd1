use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use torus_snake::config::SimConfig;
use torus_snake::direction::Direction;
use torus_snake::driver::{run_batch, run_until_terminated, Headless};
use torus_snake::error::AppError;
use torus_snake::game::Game;
use torus_snake::platform::Platform;
use torus_snake::terminal_runtime::{install_panic_hook, TerminalFrontend, TerminalSession};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "torus-snake", version, about = "Autonomous snake on a toroidal grid")]
struct Cli {
    /// JSON config file. Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Initial heading.
    #[arg(long, value_enum)]
    direction: Option<Direction>,

    /// Exploration rate in [0, 1]; 0 always heads straight for the fruit.
    #[arg(long, short = 'e')]
    exploration: Option<f64>,

    /// Grow the snake every N ticks regardless of fruit.
    #[arg(long, short = 'g')]
    auto_grow: Option<u32>,

    /// Initial delay between ticks, in seconds.
    #[arg(long)]
    speed: Option<f64>,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop each game after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Run without drawing or pacing and print the final score.
    #[arg(long)]
    headless: bool,

    /// Number of headless games to play; prints one score per game.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    games: u64,

    /// Draw the board with ASCII glyphs only.
    #[arg(long)]
    ascii: bool,
}

impl Cli {
    /// True when the run draws the board in the terminal.
    fn uses_terminal(&self) -> bool {
        self.games == 1 && !self.headless
    }

    fn sim_config(&self) -> Result<SimConfig, AppError> {
        let mut config = SimConfig::load(self.config.as_deref())?;

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if let Some(exploration) = self.exploration {
            config.exploration_rate = exploration;
        }
        if let Some(auto_grow) = self.auto_grow {
            config.auto_grow_every = Some(auto_grow);
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.uses_terminal());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "torus-snake failed");
            eprintln!("torus-snake: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.sim_config()?;
    info!(?config, seed = ?cli.seed, "starting simulation");

    let mut game = match cli.seed {
        Some(seed) => Game::with_seed(config, seed)?,
        None => Game::new(config)?,
    };

    if cli.games > 1 {
        let scores = run_batch(&mut game, cli.games, cli.max_ticks);
        print_scores(&scores);
        return Ok(());
    }

    if cli.headless {
        let summary = run_until_terminated(&mut game, &mut Headless, cli.max_ticks)?;
        println!("Score: {}", summary.length);
        return Ok(());
    }

    install_panic_hook();
    let glyphs = Platform::detect().glyphs(cli.ascii);
    let mut frontend = TerminalFrontend::new(TerminalSession::enter()?, glyphs);
    let summary = run_until_terminated(&mut game, &mut frontend, cli.max_ticks)?;
    drop(frontend);

    println!("Score: {}", summary.length);
    Ok(())
}

fn print_scores(scores: &[i32]) {
    println!("{scores:?}");

    if let Some(best) = scores.iter().max() {
        let mean = f64::from(scores.iter().sum::<i32>()) / scores.len() as f64;
        println!("games: {}  mean: {mean:.2}  best: {best}", scores.len());
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing(terminal: bool) {
    let filter = log_filter(terminal);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// The board owns the screen, so only errors reach stderr while it is drawn.
fn log_filter(terminal: bool) -> EnvFilter {
    if terminal {
        return EnvFilter::new("error");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
