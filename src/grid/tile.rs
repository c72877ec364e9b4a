use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use crate::ocr::{BoundingBox, Point, TextRegion};

/// Lower-cases `raw` and removes every space character.
///
/// Spaces are stripped, not collapsed: "Hello World" and "helloworld" are
/// the same tile. Other whitespace is left alone.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "")
}

/// A normalized text region tracked on the grid.
///
/// Equality and hashing use only the normalized value, so the same option
/// drifting across frames stays one tile.
#[derive(Clone, Debug)]
pub struct Tile {
    value: String,
    bounding_box: BoundingBox,
    corner_points: Vec<Point>,
}

impl Tile {
    /// Builds a tile from a recognizer region.
    ///
    /// Returns `None` when the region has no text, or when nothing is left
    /// after normalization.
    pub fn from_region(region: &TextRegion) -> Option<Self> {
        let value = normalize(region.value.as_deref()?);
        if value.is_empty() {
            return None;
        }
        Some(Self {
            value,
            bounding_box: region.bounding_box,
            corner_points: region.corner_points.clone(),
        })
    }

    /// The normalized value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn corner_points(&self) -> &[Point] {
        &self.corner_points
    }

    pub fn center(&self) -> Point {
        self.bounding_box.center()
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

// Hash/Eq match `str`, so a set of tiles can be looked up by normalized value.
impl Borrow<str> for Tile {
    fn borrow(&self) -> &str {
        &self.value
    }
}
