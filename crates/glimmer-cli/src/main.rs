//! Glimmer CLI - headless driver for firefly fields

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{presets, simulate, validate};

#[derive(Parser)]
#[command(name = "glimmer")]
#[command(about = "Camera-aware firefly lights with a bounded light budget", long_about = None)]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a field headless under an orbiting camera and report statistics
    Simulate {
        /// Embedded preset name
        #[arg(long, conflicts_with = "config")]
        preset: Option<String>,

        /// Path to a firefly config TOML
        #[arg(long)]
        config: Option<String>,

        /// Device tier override (mobile, low, desktop)
        #[arg(long, value_parser = parse_tier)]
        tier: Option<String>,

        /// Scatter seed override
        #[arg(long)]
        seed: Option<u32>,

        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Frame delta in seconds
        #[arg(long, default_value = "0.016666668")]
        dt: f64,

        /// Camera orbit distance from the field center
        #[arg(long, default_value = "25")]
        distance: f32,

        /// Camera orbit speed in radians per second
        #[arg(long, default_value = "0.25")]
        orbit_speed: f32,
    },

    /// Parse and validate a firefly config file
    Validate {
        /// Path to config file
        file: String,
    },

    /// List embedded presets
    Presets {
        /// Print the TOML of one preset
        #[arg(long)]
        show: Option<String>,
    },
}

fn parse_tier(s: &str) -> Result<String, String> {
    match s {
        "mobile" | "low" | "desktop" => Ok(s.to_string()),
        _ => Err(format!(
            "unknown device tier '{}'; valid values: mobile, low, desktop",
            s
        )),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            preset,
            config,
            tier,
            seed,
            frames,
            dt,
            distance,
            orbit_speed,
        } => simulate::run(simulate::SimulateArgs {
            preset,
            config,
            tier,
            seed,
            frames,
            dt,
            distance,
            orbit_speed,
        }),
        Commands::Validate { file } => validate::run(&file),
        Commands::Presets { show } => presets::run(show.as_deref()),
    }
}
