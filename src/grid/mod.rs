//! Choice detection on a grid of recognized options.
//!
//! This module provides:
//! - Normalized, content-keyed tiles
//! - A per-key cooldown filter for debouncing
//! - The grid tracker that diffs batches and picks the chosen option

pub mod clock;
pub mod cooldown;
pub mod tile;
pub mod tracker;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use cooldown::{CooldownFilter, DEFAULT_COOLDOWN};
pub use tile::{normalize, Tile};
pub use tracker::{GridTracker, MissingTile, VerticalOrigin};
