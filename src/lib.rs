//! # Plotcraft
//!
//! Core of a 2D scientific plotting library: graphs, parametric curves,
//! statistical box plots and annotation items, drawn through a painter abstraction.
//!
//! ## Features
//!
//! - **Region-clipped curves**: curve polylines are reduced to what is visible
//!   before drawing, so zoomed-in plots of huge data sets stay cheap and
//!   lines still leave the view at the correct angle
//! - **Pluggable surfaces**: draw into a display list, a software raster or an
//!   SVG document through [`render::DrawingSurface`]
//! - **Hit testing**: every plottable and item reports its pixel distance to a
//!   click position
//!
//! ## Quick Start
//!
//! ```rust
//! use plotcraft::prelude::*;
//!
//! let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
//! let key_axis = Axis::shared(AxisType::Bottom, rect, Range::new(0.0, 10.0));
//! let value_axis = Axis::shared(AxisType::Left, rect, Range::new(-1.0, 1.0));
//!
//! let mut curve = Curve::new(&key_axis, &value_axis);
//! let t: Vec<f64> = (0_i32..200).map(|i| f64::from(i) * 0.1).collect();
//! let x: Vec<f64> = t.iter().map(|t| t.cos() * 5.0 + 5.0).collect();
//! let y: Vec<f64> = t.iter().map(|t| t.sin()).collect();
//! curve.set_data(&t, &x, &y);
//!
//! let mut surface = SvgSurface::new(400, 300);
//! curve.draw(&mut surface, &PlotConfig::default());
//! assert!(surface.render().contains("<polyline"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize [`config::PlotConfig`] and value types

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Geometric primitives (points, lines, rectangles) and segment math.
pub mod geometry;

/// Value intervals and sign domains.
pub mod range;

/// Key and value axes mapping plot coordinates to pixels.
pub mod axis;

/// Plot-wide settings.
pub mod config;

// ============================================================================
// Drawing Modules
// ============================================================================

/// Pens, brushes, paths, pixmaps, scatter styles and line endings.
pub mod style;

/// The drawing surface abstraction and its in-crate implementations.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Plot Content
// ============================================================================

/// Graphs, curves, statistical boxes and the curve clipping optimizer.
pub mod plottables;

/// Annotation items: straight lines, lines, brackets, pixmaps.
pub mod items;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for plotcraft operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use plotcraft::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axis::{Axis, AxisType, ScaleType};
    pub use crate::color::Rgba;
    pub use crate::config::PlotConfig;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Line, Point, Rect};
    pub use crate::items::{
        Bracket, BracketStyle, Item, ItemPosition, LineItem, PixmapItem, StraightLine,
    };
    pub use crate::output::{PngEncoder, SvgSurface};
    pub use crate::plottables::{
        Curve, CurveData, CurveLineStyle, Graph, GraphData, GraphLineStyle, Plottable,
        StatisticalBox, StatisticalBoxData,
    };
    pub use crate::range::{Range, SignDomain};
    pub use crate::render::{DrawingSurface, RasterSurface, RecordingSurface};
    pub use crate::style::{Brush, LineEndingStyle, Pen, PenStyle, Pixmap, ScatterShape, ScatterStyle};
}
