//! # Bridge Layout
//!
//! Places the structural elements of a general arrangement drawing in
//! engineering coordinates (meters). The x-axis runs along the span, the
//! y-axis across the carriageway in plan or upward in elevation.
//!
//! ```text
//!   y
//!   ^  +----+=========================+----+
//!   |  | LA |  deck    [P1]    [P2]   | RA |
//!   |  +----+=========================+----+
//!   +--------------------------------------------> x
//!    -battr  0        s1      s2     span  span+battr
//! ```
//!
//! Pier `i` (1-based) is centered on station `i * span / (n + 1)`. The deck is
//! always `[0, span] × [0, width]`; piers and abutments are drawn on top of
//! it, never cut out of it.
//!
//! Degenerate inputs are laid out as given: a zero span gives a zero-area deck
//! with every pier stacked on x = 0, a non-positive pier count gives no piers.
//!
//! ## Example
//!
//! ```rust
//! use gad_core::layout::compute_layout;
//! use gad_core::params::ParameterSet;
//!
//! let params: ParameterSet = [("span1", 30.0), ("piern", 2.0)].into_iter().collect();
//! let layout = compute_layout(&params);
//!
//! assert_eq!(layout.piers.len(), 2);
//! assert_eq!(layout.pier_stations(), &[10.0, 20.0]);
//! assert_eq!(layout.right_abutment.x_min, 30.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::{BridgeParameters, ParameterSet};

/// Axis-aligned rectangle in engineering units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// A straight edge from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl Edge {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Edge { start, end }
    }
}

impl Rect {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Rect { x_min, y_min, x_max, y_max }
    }

    /// Rectangle centered on `center_x` with the given horizontal extent.
    pub fn centered(center_x: f64, width: f64, y_min: f64, y_max: f64) -> Self {
        Rect::new(center_x - width / 2.0, y_min, center_x + width / 2.0, y_max)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center_x(&self) -> f64 {
        (self.x_min + self.x_max) / 2.0
    }

    /// Same horizontal extent, new vertical extent.
    pub fn with_vertical(&self, y_min: f64, y_max: f64) -> Self {
        Rect::new(self.x_min, y_min, self.x_max, y_max)
    }

    /// The four edges as one closed loop: bottom, right, top, left.
    ///
    /// Each edge starts where the previous one ended.
    pub fn edge_loop(&self) -> [Edge; 4] {
        let (x0, y0, x1, y1) = (self.x_min, self.y_min, self.x_max, self.y_max);
        [
            Edge::new((x0, y0), (x1, y0)),
            Edge::new((x1, y0), (x1, y1)),
            Edge::new((x1, y1), (x0, y1)),
            Edge::new((x0, y1), (x0, y0)),
        ]
    }

    /// The four edges as independent strokes: bottom, top, left, right.
    ///
    /// Horizontal edges run left to right, vertical edges bottom to top.
    pub fn edge_strokes(&self) -> [Edge; 4] {
        let (x0, y0, x1, y1) = (self.x_min, self.y_min, self.x_max, self.y_max);
        [
            Edge::new((x0, y0), (x1, y0)),
            Edge::new((x0, y1), (x1, y1)),
            Edge::new((x0, y0), (x0, y1)),
            Edge::new((x1, y0), (x1, y1)),
        ]
    }
}

/// Every structural element of the drawing in plan, plus the elevation heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// `[0, span] × [0, width]`
    pub deck: Rect,
    /// One per pier, ordered by station
    pub piers: Vec<Rect>,
    /// Pier center stations, parallel to `piers`
    pub stations: Vec<f64>,
    /// `[-abutment_width, 0] × [0, width]`
    pub left_abutment: Rect,
    /// `[span, span + abutment_width] × [0, width]`
    pub right_abutment: Rect,
    pub pier_height: f64,
    pub abutment_height: f64,
}

impl Layout {
    /// Lay out the bridge from resolved parameters.
    pub fn from_parameters(params: &BridgeParameters) -> Self {
        let span = params.span;
        let width = params.width;

        let deck = Rect::new(0.0, 0.0, span, width);

        let stations = pier_stations(span, params.drawn_pier_count());
        let piers: Vec<Rect> = stations
            .iter()
            .map(|&station| Rect::centered(station, params.pier_width, 0.0, width))
            .collect();

        let left_abutment = Rect::new(-params.abutment_width, 0.0, 0.0, width);
        let right_abutment = Rect::new(span, 0.0, span + params.abutment_width, width);

        debug!(span, width, piers = piers.len(), "computed bridge layout");

        Layout {
            deck,
            piers,
            stations,
            left_abutment,
            right_abutment,
            pier_height: params.pier_height,
            abutment_height: params.abutment_height,
        }
    }

    /// Pier center stations along the span.
    pub fn pier_stations(&self) -> &[f64] {
        &self.stations
    }

    /// Pier rectangles in elevation: same x extent, `y ∈ [0, pier_height]`.
    pub fn pier_elevations(&self) -> Vec<Rect> {
        self.piers
            .iter()
            .map(|p| p.with_vertical(0.0, self.pier_height))
            .collect()
    }

    /// Left and right abutments in elevation: `y ∈ [0, abutment_height]`.
    pub fn abutment_elevations(&self) -> [Rect; 2] {
        [
            self.left_abutment.with_vertical(0.0, self.abutment_height),
            self.right_abutment.with_vertical(0.0, self.abutment_height),
        ]
    }

}

/// Evenly spaced pier stations: `i * span / (n + 1)` for `i = 1..=n`.
///
/// Empty for `n = 0`.
pub fn pier_stations(span: f64, pier_count: usize) -> Vec<f64> {
    let spacing = span / (pier_count as f64 + 1.0);
    (1..=pier_count).map(|i| i as f64 * spacing).collect()
}

/// Resolve a parameter set and lay out the bridge.
///
/// Never fails; missing or malformed values take their documented defaults.
pub fn compute_layout(params: &ParameterSet) -> Layout {
    Layout::from_parameters(&BridgeParameters::resolve(params))
}
