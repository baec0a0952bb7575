//! Kinetic CLI
//!
//! Runs the animation demo catalog headlessly and prints the sampled
//! property values frame by frame.

mod config;
mod demos;
mod output;
mod project;
mod runner;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::KineticConfig;
use demos::Demo;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kinetic")]
#[command(author, version, about = "Declarative animation timeline demos", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to kinetic.toml (or a directory containing it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available demos
    List,

    /// Run a demo and print sampled frames
    Run {
        /// Demo to run
        #[arg(value_enum)]
        demo: Demo,

        /// Frames per second (overrides the config)
        #[arg(long)]
        fps: Option<u32>,

        /// Print JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a default kinetic.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = KineticConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::List => {
            for demo in Demo::ALL {
                println!("{:<18} {}", demo.name(), demo.description());
            }
        }
        Commands::Run { demo, fps, json } => {
            if let Some(fps) = fps {
                anyhow::ensure!(fps > 0, "--fps must be at least 1");
                config.playback.fps = fps;
            }
            let report = runner::run(demo, &config)?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                output::write_json_lines(&mut out, &report)?;
            } else {
                output::write_table(&mut out, &report)?;
            }
            out.flush().context("Failed to flush output")?;
        }
        Commands::Init { path, force } => {
            let written = project::init_config(&path, force)?;
            println!("Wrote {}", written.display());
        }
    }

    Ok(())
}

fn init_logging(config: &KineticConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
