//! Tracker worker thread for processing recognition frames.
//!
//! Runs in a separate thread, receiving frames from the work queue and
//! feeding them to a single grid tracker. Reported choices are written to a
//! CSV file.

use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::grid::{GridTracker, ManualClock};
use crate::session::config::TrackerConfig;
use crate::session::csv_writer::append_choice;
use crate::session::queue::{FrameCommand, FrameWorkItem};

/// A choice reported by the tracker.
#[derive(Debug, Clone)]
pub struct ChoiceRecord {
    pub frame: u32,
    /// Normalized label of the chosen option
    pub label: String,
    pub elapsed: Duration,
    pub captured_at: DateTime<Local>,
}

/// What the worker did before the channel closed.
#[derive(Debug, Clone, Default)]
pub struct WorkerSummary {
    /// Number of frames processed
    pub frames: u32,
    pub choices: Vec<ChoiceRecord>,
}

/// Applies one frame to the tracker. Returns the reported choice, if any.
fn process_frame(
    tracker: &mut GridTracker<ManualClock>,
    clock: &ManualClock,
    item: FrameWorkItem,
) -> Option<ChoiceRecord> {
    // Cooldowns are measured between captures, not between processing times
    clock.set_elapsed(item.elapsed);

    match item.command {
        FrameCommand::Populate(regions) => {
            let added = tracker.add_tiles(&regions);
            debug!(
                "Frame {}: {} new tiles ({} tracked)",
                item.frame,
                added,
                tracker.len()
            );
            None
        }
        FrameCommand::Detect(regions) => {
            let label = tracker.find_choice(&regions)?;
            Some(ChoiceRecord {
                frame: item.frame,
                label,
                elapsed: item.elapsed,
                captured_at: item.captured_at,
            })
        }
        FrameCommand::Reset => {
            debug!("Frame {}: clearing {} tiles", item.frame, tracker.len());
            tracker.clear();
            None
        }
    }
}

/// Runs the tracker worker loop.
///
/// Processes items from the queue in order until the channel is closed
/// (sender dropped). The worker owns the only tracker, so callers on other
/// threads never touch it directly.
///
/// This function blocks until the channel closes, so it should be run in a
/// dedicated thread.
pub fn run_tracker_worker(
    receiver: Receiver<FrameWorkItem>,
    config: TrackerConfig,
    csv_path: Option<PathBuf>,
) -> WorkerSummary {
    info!("Tracker worker started");

    let clock = ManualClock::new();
    let mut tracker =
        GridTracker::with_clock(config.cooldown(), config.vertical_origin, clock.clone());
    let mut summary = WorkerSummary::default();

    // recv() fails once the channel is closed and drained
    while let Ok(item) = receiver.recv() {
        summary.frames += 1;
        debug!(
            "Tracker worker: frame {} ({})",
            item.frame,
            item.command.name()
        );

        let Some(choice) = process_frame(&mut tracker, &clock, item) else {
            continue;
        };

        info!(
            "Choice at frame {} (+{}ms): {}",
            choice.frame,
            choice.elapsed.as_millis(),
            choice.label
        );

        if let Some(path) = &csv_path {
            if let Err(e) = append_choice(path, &choice) {
                warn!(
                    "Tracker worker: failed to write CSV for frame {}: {}",
                    choice.frame, e
                );
                // Continue anyway - the choice is still in the summary
            }
        }

        summary.choices.push(choice);
    }

    info!(
        "Tracker worker finished: {} frames, {} choices",
        summary.frames,
        summary.choices.len()
    );
    summary
}
