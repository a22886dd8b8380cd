//! Items: annotations placed on the plot by position rather than by data.
//!
//! An item's positions are either absolute pixels or plot coordinates
//! resolved through a key/value axis pair at draw time. Items draw into the
//! surface's clip rect, or into [`PlotConfig::viewport`] when the surface has
//! none.

pub mod bracket;
pub mod line;
pub mod pixmap;
pub mod straight_line;

use std::rc::{Rc, Weak};

use crate::axis::{Axis, AxisPair};
use crate::color::Rgba;
use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::geometry::{dist_sqr_to_segment, Point, Rect};
use crate::render::DrawingSurface;
use crate::style::Pen;

pub use bracket::{Bracket, BracketStyle};
pub use line::LineItem;
pub use pixmap::{PixmapAnchor, PixmapItem};
pub use straight_line::StraightLine;

// ============================================================================
// Positions
// ============================================================================

/// Where an item point sits.
#[derive(Debug, Clone)]
pub enum ItemPosition {
    /// Fixed pixel position.
    Absolute(Point),
    /// Plot coordinates mapped through two axes.
    PlotCoords {
        /// Key coordinate.
        key: f64,
        /// Value coordinate.
        value: f64,
        /// Axis mapping `key`.
        key_axis: Weak<Axis>,
        /// Axis mapping `value`.
        value_axis: Weak<Axis>,
    },
}

impl Default for ItemPosition {
    fn default() -> Self {
        Self::Absolute(Point::ORIGIN)
    }
}

impl ItemPosition {
    /// Absolute pixel position.
    pub fn absolute(x: f64, y: f64) -> Self {
        Self::Absolute(Point::new(x, y))
    }

    /// Position in plot coordinates of the given axes.
    pub fn plot_coords(key: f64, value: f64, key_axis: &Rc<Axis>, value_axis: &Rc<Axis>) -> Self {
        Self::PlotCoords {
            key,
            value,
            key_axis: Rc::downgrade(key_axis),
            value_axis: Rc::downgrade(value_axis),
        }
    }

    /// The raw coordinates: `(x, y)` pixels or `(key, value)`.
    pub fn coords(&self) -> (f64, f64) {
        match self {
            Self::Absolute(p) => (p.x, p.y),
            Self::PlotCoords { key, value, .. } => (*key, *value),
        }
    }

    /// Move the position, keeping its kind.
    pub fn set_coords(&mut self, a: f64, b: f64) {
        match self {
            Self::Absolute(p) => *p = Point::new(a, b),
            Self::PlotCoords { key, value, .. } => {
                *key = a;
                *value = b;
            }
        }
    }

    /// Pixel position.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAxis`] for plot coordinates whose axes were dropped.
    pub fn pixel_point(&self) -> Result<Point> {
        match self {
            Self::Absolute(p) => Ok(*p),
            Self::PlotCoords {
                key,
                value,
                key_axis,
                value_axis,
            } => {
                let axes = AxisPair::upgrade(key_axis, value_axis).ok_or_else(|| {
                    log::warn!("item position is in plot coordinates, but its axes were dropped");
                    Error::InvalidAxis("item position axes have been dropped")
                })?;
                Ok(axes.coords_to_pixels(*key, *value))
            }
        }
    }
}

// ============================================================================
// Shared state
// ============================================================================

/// State common to all items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBase {
    pen: Pen,
    selected_pen: Pen,
    selectable: bool,
    selected: bool,
    antialiased: bool,
}

impl Default for ItemBase {
    fn default() -> Self {
        Self {
            pen: Pen::solid(Rgba::BLACK),
            selected_pen: Pen::solid(Rgba::BLUE).with_width(2.0),
            selectable: true,
            selected: false,
            antialiased: true,
        }
    }
}

impl ItemBase {
    /// Pen used when not selected.
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Set the pen used when not selected.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    /// Pen used when selected.
    pub fn selected_pen(&self) -> Pen {
        self.selected_pen
    }

    /// Set the pen used when selected.
    pub fn set_selected_pen(&mut self, pen: Pen) {
        self.selected_pen = pen;
    }

    /// Pen for the current selection state.
    pub fn main_pen(&self) -> Pen {
        if self.selected {
            self.selected_pen
        } else {
            self.pen
        }
    }

    /// Whether the item may be selected by clicking.
    pub fn selectable(&self) -> bool {
        self.selectable
    }

    /// Allow or forbid selection; forbidding also deselects.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
        if !selectable {
            self.selected = false;
        }
    }

    /// Whether the item is selected.
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Select or deselect. Returns whether the state changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    /// Antialias the item.
    pub fn set_antialiased(&mut self, enabled: bool) {
        self.antialiased = enabled;
    }

    fn apply_antialiasing(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        surface.set_antialiasing(self.antialiased && config.antialiasing.items);
    }

    fn rejects_selection(&self, only_selectable: bool) -> bool {
        only_selectable && !self.selectable
    }
}

// ============================================================================
// Item trait
// ============================================================================

/// An annotation drawn on top of the plottables.
pub trait Item {
    /// Shared state.
    fn base(&self) -> &ItemBase;

    /// Mutable shared state.
    fn base_mut(&mut self) -> &mut ItemBase;

    /// Draw onto `surface`. The surface state is restored afterwards.
    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig);

    /// Pixel distance from `pos` to the item, or `None` when it cannot be
    /// hit.
    fn select_test(&self, pos: Point, only_selectable: bool, config: &PlotConfig) -> Option<f64>;
}

/// Area items draw into.
fn clip_rect(surface: &dyn DrawingSurface, config: &PlotConfig) -> Rect {
    surface.clip_rect().unwrap_or(config.viewport)
}

/// Distance from `pos` to the outline of `rect`. With `filled`, any point
/// inside counts as a hit just under the selection tolerance.
pub fn rect_select_test(rect: &Rect, pos: Point, filled: bool, config: &PlotConfig) -> f64 {
    let edges = [
        (rect.top_left(), rect.top_right()),
        (rect.bottom_left(), rect.bottom_right()),
        (rect.top_left(), rect.bottom_left()),
        (rect.top_right(), rect.bottom_right()),
    ];
    let distance = edges
        .iter()
        .map(|&(a, b)| dist_sqr_to_segment(a, b, pos))
        .fold(f64::MAX, f64::min)
        .sqrt();
    let inside_hit = config.selection_tolerance * 0.99;
    if filled && distance > inside_hit && rect.contains(pos) {
        inside_hit
    } else {
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisType;
    use crate::range::Range;

    #[test]
    fn test_absolute_position() {
        let mut pos = ItemPosition::absolute(3.0, 4.0);
        assert_eq!(pos.pixel_point().unwrap(), Point::new(3.0, 4.0));
        pos.set_coords(5.0, 6.0);
        assert_eq!(pos.coords(), (5.0, 6.0));
    }

    #[test]
    fn test_plot_coords_position() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let k = Axis::shared(AxisType::Bottom, rect, Range::new(0.0, 10.0));
        let v = Axis::shared(AxisType::Left, rect, Range::new(0.0, 10.0));
        let pos = ItemPosition::plot_coords(2.0, 5.0, &k, &v);
        assert_eq!(pos.pixel_point().unwrap(), Point::new(20.0, 50.0));
        drop(k);
        assert!(matches!(pos.pixel_point(), Err(Error::InvalidAxis(_))));
    }

    #[test]
    fn test_item_base_selection() {
        let mut base = ItemBase::default();
        assert_eq!(base.main_pen().color, Rgba::BLACK);
        base.set_selected(true);
        assert_eq!(base.main_pen().width, 2.0);
        base.set_selectable(false);
        assert!(!base.selected());
        assert!(base.rejects_selection(true));
        assert!(!base.rejects_selection(false));
    }

    #[test]
    fn test_rect_select_test() {
        let config = PlotConfig::default();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(rect_select_test(&rect, Point::new(50.0, -3.0), false, &config), 3.0);
        assert_eq!(rect_select_test(&rect, Point::new(50.0, 50.0), false, &config), 50.0);
        assert_eq!(
            rect_select_test(&rect, Point::new(50.0, 50.0), true, &config),
            config.selection_tolerance * 0.99
        );
        assert_eq!(rect_select_test(&rect, Point::new(50.0, 2.0), true, &config), 2.0);
    }

    #[test]
    fn test_clip_rect_falls_back_to_viewport() {
        use crate::render::RecordingSurface;
        let config = PlotConfig::default();
        let surface = RecordingSurface::new();
        assert_eq!(clip_rect(&surface, &config), config.viewport);
        let clipped = RecordingSurface::new().with_clip(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(clip_rect(&clipped, &config), Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
