//! Wheel Spin Simulator
//!
//! Usage:
//!   wf-sim simulate --spins 1000000 --seed 7   - Outcome distribution
//!   wf-sim simulate --config wheel.yaml --json - Same, as JSON
//!   wf-sim spin --target 2 --fps 30            - Trace one spin

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use wf_sim::{simulate, trace_spin};
use wf_wheel::WheelConfig;

#[derive(Parser)]
#[command(name = "wf-sim", about = "Wheel of fortune spin simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run many spins and compare outcomes with the configured weights
    Simulate {
        /// Wheel config (.json, .yaml); stock wheel when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 1_000_000)]
        spins: u64,
        /// Base seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Animate a single spin and print its frames
    Spin {
        /// Wheel config (.json, .yaml); stock wheel when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Land on this segment instead of drawing by weight
        #[arg(short, long)]
        target: Option<usize>,
        /// Frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            spins,
            seed,
            json,
        } => run_simulate(config.as_deref(), spins, seed, json),
        Commands::Spin {
            config,
            seed,
            target,
            fps,
            json,
        } => run_spin(config.as_deref(), seed, target, fps, json),
    }
}

fn load_config(path: Option<&Path>) -> Result<WheelConfig> {
    match path {
        Some(path) => WheelConfig::load(path)
            .with_context(|| format!("Failed to load wheel config {}", path.display())),
        None => {
            log::info!("No config given, using the stock wheel");
            Ok(WheelConfig::default())
        }
    }
}

fn run_simulate(config: Option<&Path>, spins: u64, seed: u64, json: bool) -> Result<()> {
    let config = load_config(config)?;
    if spins == 0 {
        bail!("--spins must be at least 1");
    }

    let report = simulate(&config, spins, seed);
    if report.spins == 0 {
        bail!("Wheel needs at least 2 segments to spin");
    }

    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn run_spin(
    config: Option<&Path>,
    seed: Option<u64>,
    target: Option<usize>,
    fps: f64,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let seed = seed.unwrap_or_else(rand::random);

    let trace = trace_spin(&config, seed, target, fps);
    let Some(plan) = &trace.plan else {
        bail!("Wheel needs at least 2 segments to spin");
    };
    let Some(outcome) = &trace.outcome else {
        bail!(
            "Spin did not finish within {} frames at {} fps",
            trace.frames.len(),
            trace.fps
        );
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&trace).context("Failed to serialize trace")?
        );
        return Ok(());
    }

    println!(
        "seed {}: {} turns over {:.3}s, {:.2}° → {:.2}° ({})",
        seed, plan.turns, plan.duration, plan.start_angle, plan.end_angle, plan.easing
    );
    for (i, frame) in trace.frames.iter().enumerate() {
        println!("{:>5}  {:>8.4}s  {:>10.3}°", i + 1, frame.time, frame.orientation);
    }
    println!("landed on #{} {:?}", outcome.index, outcome.label);
    Ok(())
}
