//! Choice tracking for grids of on-screen options.
//!
//! A recognizer reports the text regions it sees on every frame. The grid
//! tracker remembers the options that were on screen, notices the one that
//! disappears, and reports it as the user's choice, debounced per label.

pub mod grid;
pub mod logging;
pub mod ocr;
pub mod paths;
pub mod session;

pub use grid::{CooldownFilter, GridTracker, MissingTile, Tile, VerticalOrigin};
pub use ocr::{BoundingBox, Point, TextRegion};
