//! Choice Tracker
//!
//! Replays recorded recognizer frames through the grid tracker and writes
//! every detected choice to a CSV file.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::info;

use choice_tracker::logging::{init_logging, install_panic_hook};
use choice_tracker::paths;
use choice_tracker::session::{default_config_path, run_replay, FrameScript, TrackerConfig};

/// Detect which on-screen option disappeared, frame over frame.
#[derive(Debug, Parser)]
#[command(name = "choice-tracker", author, version)]
struct Cli {
    /// Frame script (JSON) to replay.
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Path to config.json (defaults to the one next to the executable).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Choices CSV path (defaults to output/<timestamp>/<choices_csv>).
    #[arg(short, long, value_name = "CSV")]
    output: Option<PathBuf>,

    /// Override the choice cooldown in milliseconds.
    #[arg(long, value_name = "MS")]
    cooldown_ms: Option<u64>,

    /// Exit after validating the configuration and script.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> Result<()> {
    install_panic_hook();

    let cli = Cli::parse();

    paths::ensure_directories()?;

    // Read first so the configured level applies, report once logging is up
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let outcome = TrackerConfig::read(&config_path);
    let log_level = match &outcome {
        Ok(Some(config)) => config.log_level.clone(),
        _ => TrackerConfig::default().log_level,
    };
    let _logging = init_logging(&paths::get_logs_dir(), &log_level)?;
    info!("Looking for config at: {}", config_path.display());

    let mut config = if cli.validate_only {
        TrackerConfig::resolve_strict(&config_path, outcome)?
    } else {
        TrackerConfig::resolve(&config_path, outcome)
    };
    if let Some(ms) = cli.cooldown_ms {
        config.cooldown_ms = ms;
    }
    info!("Config: {:?}", config);

    let script = FrameScript::load(&cli.script, config.min_confidence)?;
    info!("Loaded {} frames from {}", script.len(), cli.script.display());

    if cli.validate_only {
        info!("Validation succeeded");
        return Ok(());
    }

    let csv_path = cli.output.unwrap_or_else(|| {
        // Timestamped session folder: output/YYYYMMDD_HHMMSS/
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        paths::get_output_dir()
            .join(timestamp)
            .join(&config.choices_csv)
    });

    let summary = run_replay(script, &config, Some(csv_path.clone()))?;

    for choice in &summary.choices {
        println!("{}\t{}", choice.frame, choice.label);
    }
    info!(
        "Replay complete: {} frames, {} choices -> {}",
        summary.frames,
        summary.choices.len(),
        csv_path.display()
    );

    Ok(())
}
