//! Terminal front end for the SweepBots cleaning simulation.

mod render;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use sweepbots_core::{Model, ModelObserver, ModelSnapshot, SweepConfig, TickResult};
use tracing::info;

use crate::render::{StatsObserver, TerminalObserver};

#[derive(Parser, Debug)]
#[command(name = "sweepbots", version, about = "Grid cleaning simulation")]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = 15)]
    width: u32,

    /// Grid height in cells.
    #[arg(long, default_value_t = 15)]
    height: u32,

    /// Number of cleaner agents.
    #[arg(long, default_value_t = 700)]
    cleaners: u32,

    /// Fraction of cells seeded with dirt, in [0, 1].
    #[arg(long, default_value_t = 0.40)]
    dirty_percent: f64,

    /// Maximum number of ticks before the run halts.
    #[arg(long, default_value_t = 30)]
    step_budget: u32,

    /// RNG seed; omit for a random run.
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks between rendered frames; 0 disables per-tick output.
    #[arg(long, default_value_t = 1)]
    render_interval: u32,

    /// Log statistics only, without drawing the grid.
    #[arg(long)]
    quiet: bool,

    /// Print the final statistics and positions as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct FinalReport {
    result: TickResult,
    snapshot: ModelSnapshot,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = SweepConfig {
        width: cli.width,
        height: cli.height,
        num_cleaners: cli.cleaners,
        dirty_percent: cli.dirty_percent,
        step_budget: cli.step_budget,
        rng_seed: cli.seed,
        observer_interval: cli.render_interval,
        ..SweepConfig::default()
    };

    let observer: Box<dyn ModelObserver> = if cli.quiet {
        Box::new(StatsObserver)
    } else {
        Box::new(TerminalObserver::new(config.width, config.height))
    };

    let mut model = Model::with_observer(config, observer)?;
    info!(
        width = cli.width,
        height = cli.height,
        cleaners = cli.cleaners,
        dirt = model.remaining_dirt(),
        step_budget = cli.step_budget,
        "starting cleaning run",
    );

    let final_result = model.run()?;
    info!(
        tick = final_result.tick.0,
        remaining_dirt = final_result.remaining_dirt,
        clean_percentage = final_result.clean_percentage,
        total_movements = final_result.total_movements,
        fully_clean = (final_result.remaining_dirt == 0),
        "run halted",
    );

    if cli.json {
        let report = FinalReport {
            result: final_result,
            snapshot: model.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
