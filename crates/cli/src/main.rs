#![deny(unsafe_code)]
//! CLI binary for the heatsim field simulation.
//!
//! Subcommands:
//! - `run` - drive a demo simulation with randomized injections, write PNG
//! - `list` - print available palettes and stimulus sources

mod error;
mod stimulus;

use clap::{Parser, Subcommand};
use error::CliError;
use heatsim_core::{HeatMap, HeatMapParams};
use heatsim_render::Palette;
use std::path::PathBuf;
use std::process;

/// Host frame length in milliseconds. The demo ticks at a typical display
/// rate; the simulation itself steps at its own fixed 24 Hz inside
/// `advance`.
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser)]
#[command(name = "heatsim", about = "Sparse heat field simulation demo")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a demo simulation and write a PNG snapshot of the final field.
    Run {
        /// Field width in cells.
        #[arg(short = 'W', long, default_value_t = 50)]
        width: usize,

        /// Field height in cells.
        #[arg(short = 'H', long, default_value_t = 50)]
        height: usize,

        /// Number of 60 Hz host frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// PRNG seed for deterministic stimulus.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Stimulus source (uniform, clustered, drift).
        #[arg(long, default_value = "clustered")]
        stimulus: String,

        /// Frames between stimulus pulses; 0 disables stimulus.
        #[arg(long, default_value_t = 20)]
        pulse_interval: usize,

        /// Heat added per pulse.
        #[arg(long, default_value_t = 50.0)]
        amount: f64,

        /// Splat radius per pulse, in cells.
        #[arg(long, default_value_t = 4)]
        radius: i64,

        /// Palette name (thermal, grayscale).
        #[arg(short, long, default_value = "thermal")]
        palette: String,

        /// Pixels per cell in the snapshot.
        #[arg(long, default_value_t = 8)]
        scale: usize,

        /// Output file path.
        #[arg(short, long, default_value = "heatmap.png")]
        output: PathBuf,

        /// Simulation parameters as a JSON string
        /// (min_value, max_value, decay_rate, contain_heat).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available palettes and stimulus sources.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            let stimuli = stimulus::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "palettes": palettes,
                    "stimuli": stimuli,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Stimulus sources:");
                println!("  {}", stimuli.join(", "));
            }
        }
        Command::Run {
            width,
            height,
            frames,
            seed,
            stimulus: stimulus_name,
            pulse_interval,
            amount,
            radius,
            palette,
            scale,
            output,
            params,
        } => {
            let params_json: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let sim_params = HeatMapParams::from_json(&params_json);

            let palette =
                Palette::from_name(&palette).map_err(|e| CliError::Input(e.to_string()))?;

            let mut source = stimulus::from_name(&stimulus_name, seed, amount, radius)
                .ok_or_else(|| {
                    CliError::Input(format!("unknown stimulus: {stimulus_name}"))
                })?;

            let mut map = HeatMap::new(width, height, sim_params)?;

            let mut passes = 0;
            for frame in 0..frames {
                if pulse_interval > 0 && frame % pulse_interval == 0 {
                    let pulse = source.pulse(width, height);
                    map.add_value_at(pulse.x, pulse.y, pulse.amount, pulse.radius);
                }
                passes += map.advance(FRAME_MS);
            }

            heatsim_render::snapshot::write_png(&map, &palette, scale, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "passes": passes,
                    "seed": seed,
                    "stimulus": stimulus_name,
                    "cells": map.cell_count(),
                    "observed_max": map.observed_max(),
                    "params": map.params(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "simulated {width}x{height} for {frames} frames ({passes} passes, \
                     {} live cells, peak {:.1}) -> {}",
                    map.cell_count(),
                    map.observed_max(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
