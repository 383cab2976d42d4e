//! Steady streaming simulator
//!
//! Solves the first and second order amplitudes for one (ε, Re) pair, then
//! sweeps the composite field over a time window on a 2D grid and writes the
//! snapshots as JSON.
//!
//! Usage:
//!   cargo run --release --bin streaming-sim -- --config configs/cylinder.json
//!   cargo run --release --bin streaming-sim -- --write-default-config cylinder.json
//!   cargo run --release --bin streaming-sim -- --help

use clap::Parser;
use math_streaming::config::{StreamingConfig, print_config_summary};
use math_streaming::output::{create_output_json, snapshots_from_history};
use math_streaming::solvers::{Order, StreamingSolution};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "streaming-sim")]
#[command(about = "Steady streaming around an oscillating cylinder")]
struct Args {
    /// Path to JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON file path
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// Number of parallel threads (default: all cores)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Write the built-in configuration to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    if let Some(path) = &args.write_default_config {
        StreamingConfig::default_config().to_file(path)?;
        println!("Default configuration written to: {}", path.display());
        return Ok(());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        println!("Using {} threads (user-specified)\n", threads);
    } else {
        println!(
            "Using {} threads (all cores)\n",
            rayon::current_num_threads()
        );
    }

    let config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {}", config_path.display());
        StreamingConfig::from_file(config_path)?
    } else {
        println!("No configuration file specified, using default cylinder setup");
        let config = StreamingConfig::default_config();
        config.validate()?;
        config
    };

    print_config_summary(&config);

    let params = config.flow.to_params()?;
    let r = config.radial.generate_samples();
    let grid = config.grid.to_grid()?;
    let times = config.time.generate_times();

    println!("\n=== Solving ===");
    let start = Instant::now();
    let solution = StreamingSolution::solve(&params, &r)?;
    println!("Amplitudes solved in {:.2?}", start.elapsed());
    if args.verbose {
        for order in Order::ALL {
            println!(
                "  {:<12} K = {}  max |psi| = {:.6e}",
                order.to_string(),
                order.harmonic(),
                solution.max_abs_psi(order)
            );
        }
    }

    println!("\n=== Time sweep ===");
    let start = Instant::now();
    let history = solution.sweep(&times, &grid)?;
    println!(
        "{} snapshots on {} grid points in {:.2?}",
        times.len(),
        grid.len(),
        start.elapsed()
    );

    let snapshots = snapshots_from_history(&history, &grid, config.output.cartesian_velocity)?;
    let output_data = create_output_json(&config, &solution, &snapshots)?;

    println!("\nSaving results to: {}", args.output.display());
    fs::write(&args.output, serde_json::to_string_pretty(&output_data)?)?;
    println!("Done!");

    Ok(())
}
