//! Axes as coordinate mappers between plot coordinates and pixels.
//!
//! Axes are shared by several plottables and items. They live behind an
//! `Rc` and use interior mutability so that panning or zooming an axis is
//! immediately visible to everything that holds a (weak) reference to it.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::geometry::{Point, Rect};
use crate::range::Range;

/// Pixel offset used to push values that are invalid on a logarithmic axis
/// well outside the visible area.
const LOG_INVALID_OFFSET: f64 = 200.0;

/// Which side of the axis rect an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisType {
    /// Vertical axis on the left.
    Left,
    /// Vertical axis on the right.
    Right,
    /// Horizontal axis on top.
    Top,
    /// Horizontal axis at the bottom.
    Bottom,
}

/// Pixel direction an axis maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Coordinates map to pixel x.
    Horizontal,
    /// Coordinates map to pixel y.
    Vertical,
}

impl AxisType {
    /// Orientation implied by the side.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Vertical,
            Self::Top | Self::Bottom => Orientation::Horizontal,
        }
    }
}

/// How coordinates are spaced along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleType {
    /// Equal coordinate steps map to equal pixel steps.
    #[default]
    Linear,
    /// Equal ratios map to equal pixel steps.
    Logarithmic,
}

/// A plot axis.
#[derive(Debug)]
pub struct Axis {
    axis_type: AxisType,
    range: Cell<Range>,
    range_reversed: Cell<bool>,
    scale_type: Cell<ScaleType>,
    log_base: Cell<f64>,
    axis_rect: Cell<Rect>,
}

impl Axis {
    /// Create an axis spanning `axis_rect` with the default range `[0, 5]`.
    #[must_use]
    pub fn new(axis_type: AxisType, axis_rect: Rect) -> Self {
        Self {
            axis_type,
            range: Cell::new(Range::new(0.0, 5.0)),
            range_reversed: Cell::new(false),
            scale_type: Cell::new(ScaleType::Linear),
            log_base: Cell::new(10.0),
            axis_rect: Cell::new(axis_rect),
        }
    }

    /// Create a shared axis with the given range.
    #[must_use]
    pub fn shared(axis_type: AxisType, axis_rect: Rect, range: Range) -> Rc<Self> {
        let axis = Self::new(axis_type, axis_rect);
        axis.set_range(range);
        Rc::new(axis)
    }

    /// Side of the axis rect.
    pub fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    /// Pixel direction.
    pub fn orientation(&self) -> Orientation {
        self.axis_type.orientation()
    }

    /// Visible coordinate range.
    pub fn range(&self) -> Range {
        self.range.get()
    }

    /// Set the visible range; bounds are normalized so `lower <= upper`.
    pub fn set_range(&self, range: Range) {
        self.range.set(range.normalized());
    }

    /// Whether coordinates grow against the usual pixel direction.
    pub fn range_reversed(&self) -> bool {
        self.range_reversed.get()
    }

    /// Reverse the coordinate direction.
    pub fn set_range_reversed(&self, reversed: bool) {
        self.range_reversed.set(reversed);
    }

    /// Linear or logarithmic spacing.
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type.get()
    }

    /// Change the spacing.
    pub fn set_scale_type(&self, scale_type: ScaleType) {
        self.scale_type.set(scale_type);
    }

    /// Base of the logarithm for logarithmic spacing.
    pub fn log_base(&self) -> f64 {
        self.log_base.get()
    }

    /// Set the logarithm base. Bases `<= 1` are ignored.
    pub fn set_log_base(&self, base: f64) {
        if base > 1.0 {
            self.log_base.set(base);
        } else {
            log::warn!("ignoring invalid logarithm base {base}");
        }
    }

    /// Pixel rectangle the axis spans.
    pub fn axis_rect(&self) -> Rect {
        self.axis_rect.get()
    }

    /// Move or resize the pixel rectangle.
    pub fn set_axis_rect(&self, rect: Rect) {
        self.axis_rect.set(rect);
    }

    fn base_log(&self, value: f64) -> f64 {
        value.ln() / self.log_base.get().ln()
    }

    /// Fraction of the pixel span at which `value` sits, before reversal.
    fn log_fraction(&self, numerator: f64, denominator: f64) -> f64 {
        let range = self.range.get();
        self.base_log(numerator / denominator) / self.base_log(range.upper / range.lower)
    }

    /// Map a coordinate to a pixel position along this axis.
    pub fn coord_to_pixel(&self, value: f64) -> f64 {
        let range = self.range.get();
        let rect = self.axis_rect.get();
        let reversed = self.range_reversed.get();
        match (self.orientation(), self.scale_type.get()) {
            (Orientation::Horizontal, ScaleType::Linear) => {
                let offset = if reversed {
                    range.upper - value
                } else {
                    value - range.lower
                };
                offset / range.size() * rect.width() + rect.left
            }
            (Orientation::Vertical, ScaleType::Linear) => {
                let offset = if reversed {
                    range.upper - value
                } else {
                    value - range.lower
                };
                rect.bottom - offset / range.size() * rect.height()
            }
            (Orientation::Horizontal, ScaleType::Logarithmic) => {
                if value >= 0.0 && range.upper < 0.0 {
                    if reversed {
                        rect.left - LOG_INVALID_OFFSET
                    } else {
                        rect.right + LOG_INVALID_OFFSET
                    }
                } else if value <= 0.0 && range.upper > 0.0 {
                    if reversed {
                        rect.right + LOG_INVALID_OFFSET
                    } else {
                        rect.left - LOG_INVALID_OFFSET
                    }
                } else {
                    let fraction = if reversed {
                        self.log_fraction(range.upper, value)
                    } else {
                        self.log_fraction(value, range.lower)
                    };
                    fraction * rect.width() + rect.left
                }
            }
            (Orientation::Vertical, ScaleType::Logarithmic) => {
                if value >= 0.0 && range.upper < 0.0 {
                    if reversed {
                        rect.bottom + LOG_INVALID_OFFSET
                    } else {
                        rect.top - LOG_INVALID_OFFSET
                    }
                } else if value <= 0.0 && range.upper > 0.0 {
                    if reversed {
                        rect.top - LOG_INVALID_OFFSET
                    } else {
                        rect.bottom + LOG_INVALID_OFFSET
                    }
                } else {
                    let fraction = if reversed {
                        self.log_fraction(range.upper, value)
                    } else {
                        self.log_fraction(value, range.lower)
                    };
                    rect.bottom - fraction * rect.height()
                }
            }
        }
    }

    /// Map a pixel position along this axis back to a coordinate.
    pub fn pixel_to_coord(&self, pixel: f64) -> f64 {
        let range = self.range.get();
        let rect = self.axis_rect.get();
        let reversed = self.range_reversed.get();
        let fraction = match self.orientation() {
            Orientation::Horizontal => (pixel - rect.left) / rect.width(),
            Orientation::Vertical => (rect.bottom - pixel) / rect.height(),
        };
        match self.scale_type.get() {
            ScaleType::Linear => {
                if reversed {
                    range.upper - fraction * range.size()
                } else {
                    range.lower + fraction * range.size()
                }
            }
            ScaleType::Logarithmic => {
                let ratio = range.upper / range.lower;
                if reversed {
                    ratio.powf(-fraction) * range.upper
                } else {
                    ratio.powf(fraction) * range.lower
                }
            }
        }
    }

    /// Pixel positions of the lower and upper range bounds along this axis.
    pub fn pixel_span(&self) -> (f64, f64) {
        let range = self.range.get();
        (self.coord_to_pixel(range.lower), self.coord_to_pixel(range.upper))
    }
}

/// A key axis and a value axis upgraded for the duration of one operation.
#[derive(Debug, Clone)]
pub struct AxisPair {
    /// Axis along which keys are laid out.
    pub key: Rc<Axis>,
    /// Axis along which values are laid out.
    pub value: Rc<Axis>,
}

impl AxisPair {
    /// Upgrade both weak references. `None` when either axis has been dropped.
    pub fn upgrade(key: &Weak<Axis>, value: &Weak<Axis>) -> Option<Self> {
        Some(Self {
            key: key.upgrade()?,
            value: value.upgrade()?,
        })
    }

    /// Map a key/value coordinate pair to a pixel position, honoring which of
    /// the two axes is horizontal.
    pub fn coords_to_pixels(&self, key: f64, value: f64) -> Point {
        let key_pixel = self.key.coord_to_pixel(key);
        let value_pixel = self.value.coord_to_pixel(value);
        match self.key.orientation() {
            Orientation::Horizontal => Point::new(key_pixel, value_pixel),
            Orientation::Vertical => Point::new(value_pixel, key_pixel),
        }
    }

    /// Map a pixel position back to a `(key, value)` coordinate pair.
    pub fn pixels_to_coords(&self, pixel: Point) -> (f64, f64) {
        match self.key.orientation() {
            Orientation::Horizontal => (
                self.key.pixel_to_coord(pixel.x),
                self.value.pixel_to_coord(pixel.y),
            ),
            Orientation::Vertical => (
                self.key.pixel_to_coord(pixel.y),
                self.value.pixel_to_coord(pixel.x),
            ),
        }
    }

    /// Pixel rectangle spanned by the visible ranges of both axes.
    pub fn visible_rect(&self) -> Rect {
        let (k0, k1) = self.key.pixel_span();
        let (v0, v1) = self.value.pixel_span();
        match self.key.orientation() {
            Orientation::Horizontal => Rect::from_corners(Point::new(k0, v0), Point::new(k1, v1)),
            Orientation::Vertical => Rect::from_corners(Point::new(v0, k0), Point::new(v1, k1)),
        }
    }

    /// Area plottables on this pair are clipped to: the overlap of both axis
    /// rects, or an empty rect at the key rect's corner when they are disjoint.
    pub fn clip_rect(&self) -> Rect {
        let key_rect = self.key.axis_rect();
        key_rect
            .intersected(&self.value.axis_rect())
            .unwrap_or_else(|| Rect::new(key_rect.left, key_rect.top, key_rect.left, key_rect.top))
    }
}
