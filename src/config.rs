//! Plot-wide settings handed to plottables and items at draw and hit-test time.
//!
//! With the `serde` feature, [`PlotConfig`] can be loaded from any serde format;
//! missing fields fall back to their defaults.

use crate::geometry::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-element antialiasing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Antialiasing {
    /// Lines and outlines of plottables.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub plottables: bool,
    /// Area fills below or inside curves and boxes.
    #[cfg_attr(feature = "serde", serde(default = "default_false"))]
    pub fills: bool,
    /// Scatter markers.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub scatters: bool,
    /// Whiskers of statistical boxes.
    #[cfg_attr(feature = "serde", serde(default = "default_false"))]
    pub error_bars: bool,
    /// Items such as lines and brackets.
    #[cfg_attr(feature = "serde", serde(default = "default_false"))]
    pub items: bool,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}
#[cfg(feature = "serde")]
fn default_false() -> bool {
    false
}

impl Default for Antialiasing {
    fn default() -> Self {
        Self {
            plottables: true,
            fills: false,
            scatters: true,
            error_bars: false,
            items: false,
        }
    }
}

/// Settings that would otherwise be looked up through a parent plot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotConfig {
    /// Maximum pixel distance at which a click still selects an object.
    #[cfg_attr(feature = "serde", serde(default = "default_selection_tolerance"))]
    pub selection_tolerance: f64,

    /// Antialiasing per element kind.
    #[cfg_attr(feature = "serde", serde(default))]
    pub antialiasing: Antialiasing,

    /// Draw solid curve lines as individual segments on raster surfaces.
    #[cfg_attr(feature = "serde", serde(default = "default_fast_polylines"))]
    pub fast_polylines: bool,

    /// Whole drawing area, used by items when no clip rect is active.
    #[cfg_attr(feature = "serde", serde(default = "default_viewport"))]
    pub viewport: Rect,
}

fn default_selection_tolerance() -> f64 {
    8.0
}
fn default_fast_polylines() -> bool {
    true
}
fn default_viewport() -> Rect {
    Rect::new(0.0, 0.0, 640.0, 480.0)
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            selection_tolerance: default_selection_tolerance(),
            antialiasing: Antialiasing::default(),
            fast_polylines: default_fast_polylines(),
            viewport: default_viewport(),
        }
    }
}

impl PlotConfig {
    /// Set the selection tolerance in pixels.
    #[must_use]
    pub fn selection_tolerance(mut self, tolerance: f64) -> Self {
        self.selection_tolerance = tolerance;
        self
    }

    /// Enable or disable segment-wise drawing of solid curve lines.
    #[must_use]
    pub fn fast_polylines(mut self, enabled: bool) -> Self {
        self.fast_polylines = enabled;
        self
    }

    /// Set the viewport.
    #[must_use]
    pub fn viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the antialiasing switches.
    #[must_use]
    pub fn antialiasing(mut self, antialiasing: Antialiasing) -> Self {
        self.antialiasing = antialiasing;
        self
    }
}
