//! Drop zone geometry
//!
//! Classifies a pointer position relative to a target element into a drop
//! [`Intent`]. Zones are checked in a fixed precedence: horizontal edges win
//! over vertical edges, which win over the center. A pointer in the top-left
//! corner of a field therefore always means [`Intent::Left`].
//!
//! ```text
//!  field target                      row target
//! +----+----------------+----+      +----+----------------+----+
//! |    |     BEFORE     |    |      |    |     BEFORE     |    | 15%
//! |    +----------------+    |      |    +----------------+    |
//! |LEFT|  CENTER(AFTER) |RGHT|      |LEFT| INSERT_INTO_ROW|RGHT|
//! |    +----------------+    |      |    +----------------+    |
//! |    |     AFTER      |    | 30%  |    |     AFTER      |    | 15%
//! +----+----------------+----+      +----+----------------+----+
//!  20%                   20%
//! ```

use crate::ZoneConfigError;
use serde::{Deserialize, Serialize};

/// A pointer position in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered bounds of a target element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Position of a point as fractions of this rect, `(0, 0)` being the top-left corner
    ///
    /// Returns `None` for degenerate rects or non-finite input.
    pub fn relative(&self, point: Point) -> Option<(f64, f64)> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let x_pct = (point.x - self.x) / self.width;
        let y_pct = (point.y - self.y) / self.height;
        if x_pct.is_finite() && y_pct.is_finite() {
            Some((x_pct, y_pct))
        } else {
            None
        }
    }

    /// Whether the point lies within the rect, edges included
    pub fn contains(&self, point: Point) -> bool {
        matches!(
            self.relative(point),
            Some((x, y)) if (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)
        )
    }
}

/// Symbolic meaning of a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Insert above the target in the column
    Before,
    /// Insert below the target in the column
    After,
    /// Place to the left of the target, side by side
    Left,
    /// Place to the right of the target, side by side
    Right,
    /// Append into the target row group
    InsertIntoRow,
    /// Pointer is not over the target
    Reject,
    /// Drop on empty canvas space; never produced by [`classify`]
    AppendToEnd,
}

impl Intent {
    /// Side-by-side intents that build or extend rows
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Intent::Left | Intent::Right)
    }
}

/// Edge fractions used to carve a target into drop zones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneConfig {
    /// Left/right edge width as a fraction of the target width
    pub horizontal_edge: f64,
    /// Top/bottom edge height for field targets
    pub field_vertical_edge: f64,
    /// Top/bottom edge height for row group targets
    pub row_vertical_edge: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            horizontal_edge: 0.20,
            field_vertical_edge: 0.30,
            row_vertical_edge: 0.15,
        }
    }
}

impl ZoneConfig {
    /// Every edge must be a fraction in the open range (0, 0.5)
    pub fn validate(&self) -> Result<(), ZoneConfigError> {
        let edges = [
            ("horizontalEdge", self.horizontal_edge),
            ("fieldVerticalEdge", self.field_vertical_edge),
            ("rowVerticalEdge", self.row_vertical_edge),
        ];
        for (name, value) in edges {
            if !(value > 0.0 && value < 0.5) {
                return Err(ZoneConfigError { name, value });
            }
        }
        Ok(())
    }

    fn vertical_edge(&self, target_is_row: bool) -> f64 {
        if target_is_row {
            self.row_vertical_edge
        } else {
            self.field_vertical_edge
        }
    }
}

/// Classify a pointer position over a target into a drop intent
pub fn classify(pointer: Point, bounds: Rect, target_is_row: bool, zones: &ZoneConfig) -> Intent {
    let Some((x_pct, y_pct)) = bounds.relative(pointer) else {
        return Intent::Reject;
    };
    if !(0.0..=1.0).contains(&x_pct) || !(0.0..=1.0).contains(&y_pct) {
        return Intent::Reject;
    }

    let h = zones.horizontal_edge;
    let v = zones.vertical_edge(target_is_row);

    if x_pct < h {
        Intent::Left
    } else if x_pct > 1.0 - h {
        Intent::Right
    } else if y_pct < v {
        Intent::Before
    } else if y_pct > 1.0 - v {
        Intent::After
    } else if target_is_row {
        Intent::InsertIntoRow
    } else {
        Intent::After
    }
}
