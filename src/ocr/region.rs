//! Input records produced by the text recognizer.
//!
//! These are plain owned values copied out of whatever the recognizer
//! returns. The tracker only reads `value` and `bounding_box`.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box of a detected text region, in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: i32,
    /// Top edge (for a top-left origin)
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Integer center of the box. Clamps at the `i32` range.
    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> Vec<Point> {
        vec![
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }
}

/// One detected text region from a recognition batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRegion {
    /// Recognized text. `None` when the recognizer produced a box without text.
    pub value: Option<String>,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub corner_points: Vec<Point>,
    /// Sub-regions (words of a line). Not used by the tracker.
    #[serde(default)]
    pub components: Vec<TextRegion>,
}

impl TextRegion {
    /// Creates a region with a value and a box, with corners derived from the box.
    pub fn new(value: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            value: Some(value.into()),
            corner_points: bounding_box.corners(),
            bounding_box,
            components: Vec::new(),
        }
    }

    /// Creates a region the recognizer could not read.
    pub fn unread(bounding_box: BoundingBox) -> Self {
        Self {
            value: None,
            corner_points: bounding_box.corners(),
            bounding_box,
            components: Vec::new(),
        }
    }
}
