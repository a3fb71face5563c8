use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;
use torus_snake::clock::{TickRate, format_elapsed};
use torus_snake::game::GameConfig;
use torus_snake::modes::{HeadlessMode, RunOutcome};

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Headless snake simulation on a wrapping grid")]
struct Cli {
    /// JSON config file; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Tick rate preset
    #[arg(long, value_enum)]
    speed: Option<Speed>,

    /// Seed for food placement and the autopilot
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many seconds even if the snake is still alive
    #[arg(long)]
    seconds: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Speed {
    /// 5 ticks per second
    Slow,
    /// 10 ticks per second
    Medium,
    /// 30 ticks per second
    Fast,
}

impl From<Speed> for TickRate {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Slow => TickRate::Slow,
            Speed::Medium => TickRate::Medium,
            Speed::Fast => TickRate::Fast,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(speed) = self.speed {
            config.tick_rate = speed.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid command line options")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    debug!("using {:?}", config);

    let time_limit = cli.seconds.map(Duration::from_secs);
    let tick = config.tick_rate.interval();
    let mut mode = HeadlessMode::new(config, time_limit);
    let report = mode.run().await?;

    let outcome = match report.outcome {
        RunOutcome::GameOver(reason) => format!("game over ({:?})", reason),
        RunOutcome::TimeLimit => "time limit reached".to_string(),
        RunOutcome::Interrupted => "interrupted".to_string(),
    };
    println!("{}", outcome);
    let steps = report.final_frame.steps;
    let survived = tick * u32::try_from(steps).unwrap_or(u32::MAX);
    println!(
        "Steps: {}    Length: {}    Time: {}",
        steps,
        report.final_frame.snake_length,
        format_elapsed(survived)
    );
    print!("{}", report.final_frame.grid);

    Ok(())
}
