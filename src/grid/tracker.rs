//! Grid of on-screen options and choice detection.
//!
//! The tracker remembers which options were on screen. When a later batch no
//! longer contains one of them, that option is taken as the user's choice.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{Clock, MonotonicClock};
use super::cooldown::{CooldownFilter, DEFAULT_COOLDOWN};
use super::tile::{normalize, Tile};
use crate::ocr::{Point, TextRegion};

/// Where y = 0 sits on the host screen.
///
/// The tie-break prefers the missing tile closest to the user, i.e. nearest
/// the physical bottom of the screen. With a top-left origin (y grows
/// downward) that is the greatest y. For any coordinate system other than
/// these two the heuristic is undefined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalOrigin {
    #[default]
    TopLeft,
    BottomLeft,
}

impl VerticalOrigin {
    /// Orders `a` before `b` when `a` is closer to the bottom of the screen.
    fn closer_to_user(self, a: &Point, b: &Point) -> Ordering {
        match self {
            VerticalOrigin::TopLeft => b.y.cmp(&a.y),
            VerticalOrigin::BottomLeft => a.y.cmp(&b.y),
        }
    }
}

/// A tracked tile that is absent from the latest batch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MissingTile {
    /// Normalized value
    pub label: String,
    /// Last known center
    pub center: Point,
}

pub struct GridTracker<C: Clock = MonotonicClock> {
    tiles: HashSet<Tile>,
    filter: CooldownFilter<String, C>,
    origin: VerticalOrigin,
}

impl GridTracker<MonotonicClock> {
    /// Creates a tracker with a one second cooldown and a top-left origin.
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_COOLDOWN, VerticalOrigin::default(), MonotonicClock)
    }

    pub fn with_settings(cooldown: Duration, origin: VerticalOrigin) -> Self {
        Self::with_clock(cooldown, origin, MonotonicClock)
    }
}

impl Default for GridTracker<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> GridTracker<C> {
    pub fn with_clock(cooldown: Duration, origin: VerticalOrigin, clock: C) -> Self {
        Self {
            tiles: HashSet::new(),
            filter: CooldownFilter::with_clock(cooldown, clock),
            origin,
        }
    }

    /// Starts tracking the region's text.
    ///
    /// Returns true if the normalized value was not tracked yet. Regions
    /// without text are never added.
    pub fn add_tile(&mut self, region: &TextRegion) -> bool {
        match Tile::from_region(region) {
            Some(tile) => self.tiles.insert(tile),
            None => false,
        }
    }

    /// Adds every region of a batch, returning how many were new.
    pub fn add_tiles(&mut self, regions: &[TextRegion]) -> usize {
        regions.iter().filter(|r| self.add_tile(r)).count()
    }

    pub fn contains(&self, region: &TextRegion) -> bool {
        region
            .value
            .as_deref()
            .is_some_and(|raw| self.tiles.contains(normalize(raw).as_str()))
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tracked normalized values, in no particular order.
    pub fn snapshot_values(&self) -> Vec<String> {
        self.tiles.iter().map(|t| t.value().to_string()).collect()
    }

    pub fn origin(&self) -> VerticalOrigin {
        self.origin
    }

    pub fn cooldown(&self) -> Duration {
        self.filter.cooldown()
    }

    /// Tracked tiles whose normalized value does not appear in `observed`.
    ///
    /// Regions without text are not counted as observed, so they never hide
    /// a tracked tile.
    pub fn compute_missing(&self, observed: &[TextRegion]) -> Vec<MissingTile> {
        let detected: HashSet<Tile> = observed.iter().filter_map(Tile::from_region).collect();

        self.tiles
            .difference(&detected)
            .map(|tile| MissingTile {
                label: tile.value().to_string(),
                center: tile.center(),
            })
            .collect()
    }

    /// Returns the label the user most likely chose, if any.
    ///
    /// Among the missing tiles the one closest to the user wins (ties go to
    /// the smallest label). The winner is reported only if the same label
    /// was not reported within the cooldown.
    pub fn find_choice(&mut self, observed: &[TextRegion]) -> Option<String> {
        let missing = self.compute_missing(observed);
        if missing.is_empty() {
            return None;
        }

        debug!(
            "Missing values: {}",
            missing
                .iter()
                .map(|m| m.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let origin = self.origin;
        let chosen = missing.into_iter().min_by(|a, b| {
            origin
                .closer_to_user(&a.center, &b.center)
                .then_with(|| a.label.cmp(&b.label))
        })?;

        let cold = self.filter.is_cold_enough(&chosen.label);
        info!(label = %chosen.label, cold, "Choice candidate");

        cold.then_some(chosen.label)
    }
}
