//! Running a tracker over a stream of recognition frames.
//!
//! This module provides:
//! - Configuration loaded from config.json
//! - A frame queue and a worker thread that owns the tracker
//! - Recorded frame scripts and a replay runner
//! - CSV output of reported choices

pub mod config;
pub mod csv_writer;
pub mod queue;
pub mod runner;
pub mod script;
pub mod worker;

pub use config::{default_config_path, TrackerConfig};
pub use queue::{create_work_queue, FrameCommand, FrameWorkItem};
pub use runner::run_replay;
pub use script::FrameScript;
pub use worker::{run_tracker_worker, ChoiceRecord, WorkerSummary};
