//! Event queue for passing recognition batches to the tracker worker.
//!
//! Uses std::sync::mpsc channel for single-consumer communication. The
//! capture side sends frames, the tracker worker receives and processes them
//! one at a time.

use chrono::{DateTime, Local};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::ocr::TextRegion;

/// What the tracker should do with a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCommand {
    /// Learn the options currently on screen
    Populate(Vec<TextRegion>),
    /// Look for an option that disappeared
    Detect(Vec<TextRegion>),
    /// A new screen or round begins, forget the tracked options
    Reset,
}

impl FrameCommand {
    pub fn name(&self) -> &'static str {
        match self {
            FrameCommand::Populate(_) => "populate",
            FrameCommand::Detect(_) => "detect",
            FrameCommand::Reset => "reset",
        }
    }
}

/// A work item for the tracker worker thread.
#[derive(Debug, Clone)]
pub struct FrameWorkItem {
    /// Frame number (1-based)
    pub frame: u32,
    pub command: FrameCommand,
    /// Monotonic time since the session started, taken at capture
    pub elapsed: Duration,
    /// Wall-clock capture time, for output only
    pub captured_at: DateTime<Local>,
}

impl FrameWorkItem {
    /// Creates a work item stamped with the time elapsed since `session_start`.
    pub fn new(frame: u32, command: FrameCommand, session_start: Instant) -> Self {
        Self::with_elapsed(frame, command, session_start.elapsed())
    }

    /// Creates a work item with an explicit capture offset (recorded frames).
    pub fn with_elapsed(frame: u32, command: FrameCommand, elapsed: Duration) -> Self {
        Self {
            frame,
            command,
            elapsed,
            captured_at: Local::now(),
        }
    }
}

/// Creates a new work queue.
///
/// Returns a tuple of (sender, receiver):
/// - The sender is used by the capture thread to queue frames
/// - The receiver is used by the tracker worker thread to process them
///
/// The channel is unbounded - frames will queue up if tracking falls behind.
pub fn create_work_queue() -> (Sender<FrameWorkItem>, Receiver<FrameWorkItem>) {
    channel()
}
