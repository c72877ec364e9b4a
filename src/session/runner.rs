//! Replay runner - feeds a recorded frame script through the tracker worker.
//!
//! Spawns the worker thread, sends every frame in order, then waits for the
//! worker to drain the queue.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::thread;
use tracing::info;

use crate::session::config::TrackerConfig;
use crate::session::csv_writer::init_csv;
use crate::session::queue::create_work_queue;
use crate::session::script::FrameScript;
use crate::session::worker::{run_tracker_worker, WorkerSummary};

/// Replays `script` on a dedicated tracker worker.
///
/// When `csv_path` is given, the file is initialized before the first frame
/// and every reported choice is appended to it.
pub fn run_replay(
    script: FrameScript,
    config: &TrackerConfig,
    csv_path: Option<PathBuf>,
) -> Result<WorkerSummary> {
    if let Some(path) = &csv_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        init_csv(path)?;
        info!("Choices will be written to {}", path.display());
    }

    info!(
        "Replaying {} frames (cooldown {}ms, origin {:?})",
        script.len(),
        config.cooldown_ms,
        config.vertical_origin
    );

    let (sender, receiver) = create_work_queue();
    let worker_config = config.clone();
    let handle = thread::Builder::new()
        .name("tracker-worker".to_string())
        .spawn(move || run_tracker_worker(receiver, worker_config, csv_path))?;

    for item in script.items {
        if sender.send(item).is_err() {
            // Worker is gone; join below reports why
            break;
        }
    }
    drop(sender);

    handle
        .join()
        .map_err(|_| anyhow!("Tracker worker thread panicked"))
}
