//! Plottables: data representations drawn against a key and a value axis.
//!
//! Every plottable implements [`Plottable`] and embeds a [`PlottableBase`]
//! with the state they all share: name, pens, brushes, selection and the
//! two axes. Axes are held weakly; an operation on a plottable whose axis
//! has been dropped logs a warning and does nothing.

pub mod curve;
pub mod graph;
pub mod optimizer;
pub mod region;
pub mod statistical_box;

use std::rc::{Rc, Weak};

use crate::axis::{Axis, AxisPair, ScaleType};
use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::geometry::{Line, Point, Rect};
use crate::range::{Range, SignDomain};
use crate::render::DrawingSurface;
use crate::style::{AspectRatioMode, Brush, BrushStyle, Pen, PenStyle, ScatterShape, ScatterStyle};

pub use curve::{Curve, CurveData, CurveDataMap, CurveLineStyle};
pub use graph::{Graph, GraphData, GraphDataMap, GraphLineStyle};
pub use optimizer::optimize_curve;
pub use region::{classify_region, Region};
pub use statistical_box::{StatisticalBox, StatisticalBoxData};

// ============================================================================
// Shared state
// ============================================================================

/// State common to all plottables.
#[derive(Debug, Clone)]
pub struct PlottableBase {
    name: String,
    pen: Pen,
    selected_pen: Pen,
    brush: Brush,
    selected_brush: Brush,
    antialiased: bool,
    antialiased_fill: bool,
    antialiased_scatters: bool,
    antialiased_error_bars: bool,
    selectable: bool,
    selected: bool,
    key_axis: Weak<Axis>,
    value_axis: Weak<Axis>,
}

impl PlottableBase {
    /// Black pen, no brush, selectable, attached to the given axes.
    ///
    /// Axes of equal orientation are accepted but logged, since points
    /// would collapse onto a line.
    pub fn new(key_axis: &Rc<Axis>, value_axis: &Rc<Axis>) -> Self {
        if key_axis.orientation() == value_axis.orientation() {
            log::warn!("key axis and value axis should be orthogonal");
        }
        Self {
            name: String::new(),
            pen: Pen::default(),
            selected_pen: Pen::default(),
            brush: Brush::NONE,
            selected_brush: Brush::NONE,
            antialiased: true,
            antialiased_fill: true,
            antialiased_scatters: true,
            antialiased_error_bars: false,
            selectable: true,
            selected: false,
            key_axis: Rc::downgrade(key_axis),
            value_axis: Rc::downgrade(value_axis),
        }
    }

    /// Name shown in legends.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the legend name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

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

    /// Brush used when not selected.
    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Set the brush used when not selected.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Brush used when selected.
    pub fn selected_brush(&self) -> Brush {
        self.selected_brush
    }

    /// Set the brush used when selected.
    pub fn set_selected_brush(&mut self, brush: Brush) {
        self.selected_brush = brush;
    }

    /// Pen for the current selection state.
    pub fn main_pen(&self) -> Pen {
        if self.selected {
            self.selected_pen
        } else {
            self.pen
        }
    }

    /// Brush for the current selection state.
    pub fn main_brush(&self) -> Brush {
        if self.selected {
            self.selected_brush
        } else {
            self.brush
        }
    }

    /// Whether the plottable may be selected by clicking.
    pub fn selectable(&self) -> bool {
        self.selectable
    }

    /// Allow or forbid selection. Making a selected plottable unselectable
    /// also deselects it.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
        if !selectable {
            self.selected = false;
        }
    }

    /// Whether the plottable is selected.
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Select or deselect. Returns whether the state changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    /// Antialias lines.
    pub fn set_antialiased(&mut self, enabled: bool) {
        self.antialiased = enabled;
    }

    /// Antialias fills.
    pub fn set_antialiased_fill(&mut self, enabled: bool) {
        self.antialiased_fill = enabled;
    }

    /// Antialias scatter markers.
    pub fn set_antialiased_scatters(&mut self, enabled: bool) {
        self.antialiased_scatters = enabled;
    }

    /// Antialias error bars and whiskers.
    pub fn set_antialiased_error_bars(&mut self, enabled: bool) {
        self.antialiased_error_bars = enabled;
    }

    /// Switch antialiasing for lines; on only when both the plottable and
    /// `config` enable it.
    pub fn apply_default_antialiasing(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        surface.set_antialiasing(self.antialiased && config.antialiasing.plottables);
    }

    /// Switch antialiasing for fills.
    pub fn apply_fill_antialiasing(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        surface.set_antialiasing(self.antialiased_fill && config.antialiasing.fills);
    }

    /// Switch antialiasing for scatter markers.
    pub fn apply_scatters_antialiasing(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        surface.set_antialiasing(self.antialiased_scatters && config.antialiasing.scatters);
    }

    /// Switch antialiasing for error bars.
    pub fn apply_error_bars_antialiasing(
        &self,
        surface: &mut dyn DrawingSurface,
        config: &PlotConfig,
    ) {
        surface.set_antialiasing(self.antialiased_error_bars && config.antialiasing.error_bars);
    }

    /// Key axis, if still alive.
    pub fn key_axis(&self) -> Option<Rc<Axis>> {
        self.key_axis.upgrade()
    }

    /// Value axis, if still alive.
    pub fn value_axis(&self) -> Option<Rc<Axis>> {
        self.value_axis.upgrade()
    }

    /// Attach to another key axis.
    pub fn set_key_axis(&mut self, axis: &Rc<Axis>) {
        self.key_axis = Rc::downgrade(axis);
    }

    /// Attach to another value axis.
    pub fn set_value_axis(&mut self, axis: &Rc<Axis>) {
        self.value_axis = Rc::downgrade(axis);
    }

    /// Both axes, or [`Error::InvalidAxis`] (logged) when either was dropped.
    pub fn axes(&self) -> Result<AxisPair> {
        AxisPair::upgrade(&self.key_axis, &self.value_axis).ok_or_else(|| {
            log::warn!("plottable '{}' has an invalid key or value axis", self.name);
            Error::InvalidAxis("key or value axis has been dropped")
        })
    }

    /// Pixel position of a key/value pair, honoring axis orientation.
    pub fn coords_to_pixels(&self, key: f64, value: f64) -> Result<Point> {
        Ok(self.axes()?.coords_to_pixels(key, value))
    }

    /// Key/value pair at a pixel position.
    pub fn pixels_to_coords(&self, pixel: Point) -> Result<(f64, f64)> {
        Ok(self.axes()?.pixels_to_coords(pixel))
    }
}

// ============================================================================
// Shared drawing
// ============================================================================

/// Stroke a pixel polyline with `pen`; NaN points leave gaps.
///
/// Solid pens on raster surfaces go through single segments when
/// `config.fast_polylines` is set. Otherwise every NaN-free run of at least
/// two points is one polyline.
pub(crate) fn draw_line_data(
    surface: &mut dyn DrawingSurface,
    points: &[Point],
    pen: Pen,
    config: &PlotConfig,
) {
    surface.set_pen(pen);
    surface.set_brush(Brush::NONE);
    let modes = surface.modes();
    if config.fast_polylines && pen.style == PenStyle::Solid && !modes.vectorized && !modes.no_caching {
        let mut previous: Option<Point> = None;
        for &point in points {
            if point.is_nan() {
                previous = None;
                continue;
            }
            if let Some(from) = previous {
                surface.draw_line(Line::new(from, point));
            }
            previous = Some(point);
        }
    } else {
        for run in points.split(|p| p.is_nan()).filter(|run| run.len() > 1) {
            surface.draw_polyline(run);
        }
    }
}

/// Legend icon of a line-like plottable: fill band, a centered line and the
/// scatter marker. Pixmap markers larger than `rect` are shrunk to fit.
pub(crate) fn draw_line_legend_icon(
    base: &PlottableBase,
    has_line: bool,
    scatter_style: &ScatterStyle,
    surface: &mut dyn DrawingSurface,
    rect: Rect,
    config: &PlotConfig,
) {
    surface.save();
    let middle = rect.top + rect.height() / 2.0;
    let brush = base.brush();
    if brush.style != BrushStyle::NoBrush {
        base.apply_fill_antialiasing(surface, config);
        surface.fill_rect(Rect::from_xywh(rect.left, middle, rect.width(), rect.height() / 3.0), brush);
    }
    if has_line {
        base.apply_default_antialiasing(surface, config);
        surface.set_pen(base.pen());
        // +5 keeps the last dash of patterned pens
        surface.draw_line(Line::from_coords(rect.left, middle, rect.right + 5.0, middle));
    }
    if !scatter_style.is_none() {
        base.apply_scatters_antialiasing(surface, config);
        let oversized = scatter_style.shape() == ScatterShape::Pixmap
            && scatter_style.pixmap().is_some_and(|p| {
                f64::from(p.width()) > rect.width() || f64::from(p.height()) > rect.height()
            });
        let shrunk = oversized
            .then(|| {
                let pixmap = scatter_style.pixmap()?;
                let target = (rect.width() as u32, rect.height() as u32);
                let mut style = scatter_style.clone();
                style.set_pixmap(pixmap.scaled_to(target, AspectRatioMode::Keep)?);
                Some(style)
            })
            .flatten();
        let style = shrunk.as_ref().unwrap_or(scatter_style);
        style.apply_to(surface, base.pen());
        style.draw_shape_at(surface, rect.center());
    }
    surface.restore();
}

// ============================================================================
// Plottable trait
// ============================================================================

/// A data representation drawn against a key and a value axis.
pub trait Plottable {
    /// Shared state.
    fn base(&self) -> &PlottableBase;

    /// Mutable shared state.
    fn base_mut(&mut self) -> &mut PlottableBase;

    /// Draw onto `surface`. The surface state is restored afterwards.
    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig);

    /// Draw the small legend representation into `rect`.
    fn draw_legend_icon(&self, surface: &mut dyn DrawingSurface, rect: Rect, config: &PlotConfig);

    /// Pixel distance from `pos` to the plottable, or `None` when it cannot
    /// be hit there.
    fn select_test(&self, pos: Point, only_selectable: bool, config: &PlotConfig) -> Option<f64>;

    /// Extent of the data along the key axis within `sign_domain`.
    fn key_range(&self, sign_domain: SignDomain) -> Option<Range>;

    /// Extent of the data along the value axis within `sign_domain`.
    fn value_range(&self, sign_domain: SignDomain) -> Option<Range>;

    /// Remove all data.
    fn clear_data(&mut self);

    /// Fit both axes to the data.
    fn rescale_axes(&self, only_enlarge: bool) {
        self.rescale_key_axis(only_enlarge);
        self.rescale_value_axis(only_enlarge);
    }

    /// Fit the key axis to the data. With `only_enlarge` the axis range only
    /// grows.
    fn rescale_key_axis(&self, only_enlarge: bool) {
        match self.base().key_axis() {
            Some(axis) => rescale_axis(&axis, |domain| self.key_range(domain), only_enlarge),
            None => log::warn!("cannot rescale: invalid key axis"),
        }
    }

    /// Fit the value axis to the data. With `only_enlarge` the axis range
    /// only grows.
    fn rescale_value_axis(&self, only_enlarge: bool) {
        match self.base().value_axis() {
            Some(axis) => rescale_axis(&axis, |domain| self.value_range(domain), only_enlarge),
            None => log::warn!("cannot rescale: invalid value axis"),
        }
    }
}

/// Set `axis` to the data range reported by `data_range`. A collapsed data
/// range keeps the current axis size, centered on the data.
fn rescale_axis(axis: &Axis, data_range: impl Fn(SignDomain) -> Option<Range>, only_enlarge: bool) {
    let current = axis.range();
    let sign_domain = match axis.scale_type() {
        ScaleType::Linear => SignDomain::Both,
        ScaleType::Logarithmic if current.upper < 0.0 => SignDomain::Negative,
        ScaleType::Logarithmic => SignDomain::Positive,
    };
    let Some(mut range) = data_range(sign_domain) else {
        return;
    };
    if only_enlarge {
        range = range.union(&current);
    }
    if !range.is_valid() {
        let center = range.center();
        range = match axis.scale_type() {
            ScaleType::Linear => {
                let half = current.size() / 2.0;
                Range::new(center - half, center + half)
            }
            ScaleType::Logarithmic => {
                let factor = (current.upper / current.lower).sqrt();
                Range::new(center / factor, center * factor)
            }
        };
    }
    axis.set_range(range);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisType;
    use crate::color::Rgba;

    fn axes() -> (Rc<Axis>, Rc<Axis>) {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        (
            Axis::shared(AxisType::Bottom, rect, Range::new(0.0, 10.0)),
            Axis::shared(AxisType::Left, rect, Range::new(0.0, 10.0)),
        )
    }

    #[test]
    fn test_main_pen_follows_selection() {
        let (k, v) = axes();
        let mut base = PlottableBase::new(&k, &v);
        base.set_selected_pen(Pen::solid(Rgba::BLUE));
        assert_eq!(base.main_pen(), Pen::default());
        assert!(base.set_selected(true));
        assert_eq!(base.main_pen().color, Rgba::BLUE);
        assert!(!base.set_selected(true));
    }

    #[test]
    fn test_unselectable_deselects() {
        let (k, v) = axes();
        let mut base = PlottableBase::new(&k, &v);
        base.set_selected(true);
        base.set_selectable(false);
        assert!(!base.selected());
    }

    #[test]
    fn test_dropped_axis_is_invalid() {
        let (k, v) = axes();
        let base = PlottableBase::new(&k, &v);
        drop(k);
        assert!(matches!(base.axes(), Err(Error::InvalidAxis(_))));
        assert!(base.coords_to_pixels(1.0, 1.0).is_err());
    }

    #[test]
    fn test_coords_round_trip() {
        let (k, v) = axes();
        let base = PlottableBase::new(&k, &v);
        let px = base.coords_to_pixels(5.0, 5.0).unwrap();
        assert_eq!(px, Point::new(50.0, 50.0));
        assert_eq!(base.pixels_to_coords(px).unwrap(), (5.0, 5.0));
    }

    #[test]
    fn test_rescale_collapsed_range_keeps_size() {
        let (k, _) = axes();
        rescale_axis(&k, |_| Some(Range::new(3.0, 3.0)), false);
        assert_eq!(k.range(), Range::new(-2.0, 8.0));
    }

    #[test]
    fn test_rescale_only_enlarge() {
        let (k, _) = axes();
        rescale_axis(&k, |_| Some(Range::new(2.0, 20.0)), true);
        assert_eq!(k.range(), Range::new(0.0, 20.0));
        rescale_axis(&k, |_| None, false);
        assert_eq!(k.range(), Range::new(0.0, 20.0));
    }

    #[test]
    fn test_rescale_log_axis_uses_positive_domain() {
        let (k, _) = axes();
        k.set_scale_type(ScaleType::Logarithmic);
        k.set_range(Range::new(1.0, 100.0));
        rescale_axis(
            &k,
            |domain| {
                assert_eq!(domain, SignDomain::Positive);
                Some(Range::new(0.5, 50.0))
            },
            false,
        );
        assert_eq!(k.range(), Range::new(0.5, 50.0));
    }
}
