//! Parametric curves: points ordered by a free parameter `t`.
//!
//! Unlike a graph, a curve may visit the same key several times, so it can
//! form loops. Points are kept sorted by `t`; a point whose key or value is
//! NaN breaks the line into separate runs.
//!
//! # Algorithms
//!
//! Drawing and hit testing both go through the region clipping optimizer
//! ([`optimize_curve`]) with the visible rect widened by the stroke and
//! scatter size, so off-screen stretches cost a constant number of vertices.

use std::collections::BTreeMap;
use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::axis::{Axis, AxisPair};
use crate::color::Rgba;
use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::geometry::{dist_sqr_to_segment, Point, Rect};
use crate::plottables::optimizer::optimize_curve;
use crate::plottables::{draw_line_data, draw_line_legend_icon, Plottable, PlottableBase};
use crate::range::{Range, RangeAccumulator, SignDomain};
use crate::render::DrawingSurface;
use crate::style::{Brush, BrushStyle, Pen, ScatterStyle};

/// One curve point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveData {
    /// Curve parameter; defines the drawing order.
    pub t: f64,
    /// Coordinate on the key axis.
    pub key: f64,
    /// Coordinate on the value axis.
    pub value: f64,
}

impl CurveData {
    /// Create a curve point.
    #[must_use]
    pub const fn new(t: f64, key: f64, value: f64) -> Self {
        Self { t, key, value }
    }

    fn is_invalid(&self) -> bool {
        !self.t.is_finite() || self.key.is_infinite() || self.value.is_infinite()
    }
}

/// Curve points keyed by their parameter. A point added with an existing
/// `t` replaces the old one.
pub type CurveDataMap = BTreeMap<OrderedFloat<f64>, CurveData>;

/// How consecutive curve points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveLineStyle {
    /// Points are not connected; use a scatter style to see them.
    None,
    /// Straight lines between consecutive points.
    #[default]
    Line,
}

/// A parametric curve plottable.
#[derive(Debug, Clone)]
pub struct Curve {
    base: PlottableBase,
    data: Rc<CurveDataMap>,
    scatter_style: ScatterStyle,
    line_style: CurveLineStyle,
}

impl Curve {
    /// Empty curve drawn with a blue line and no markers.
    pub fn new(key_axis: &Rc<Axis>, value_axis: &Rc<Axis>) -> Self {
        let mut base = PlottableBase::new(key_axis, value_axis);
        base.set_pen(Pen::solid(Rgba::BLUE));
        base.set_selected_pen(Pen::solid(Rgba::rgb(80, 80, 255)).with_width(2.5));
        let brush = Brush {
            color: Rgba::BLUE,
            style: BrushStyle::NoBrush,
        };
        base.set_brush(brush);
        base.set_selected_brush(brush);
        Self {
            base,
            data: Rc::new(CurveDataMap::new()),
            scatter_style: ScatterStyle::default(),
            line_style: CurveLineStyle::Line,
        }
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// The points, ordered by `t`.
    pub fn data(&self) -> &CurveDataMap {
        &self.data
    }

    /// Handle to the point container, shared until either side mutates it.
    pub fn shared_data(&self) -> Rc<CurveDataMap> {
        Rc::clone(&self.data)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replace the points with a copy of `data`.
    pub fn set_data_map(&mut self, data: &CurveDataMap) {
        self.data = Rc::new(data.clone());
    }

    /// Replace the points, taking ownership of `data` without copying.
    pub fn set_data_map_owned(&mut self, data: CurveDataMap) {
        self.data = Rc::new(data);
    }

    /// Share `data` with its other holders; the curve copies it on its next
    /// mutation.
    ///
    /// # Errors
    ///
    /// [`Error::SelfAssignment`] when `data` is the container this curve
    /// already holds.
    pub fn set_shared_data(&mut self, data: Rc<CurveDataMap>) -> Result<()> {
        if Rc::ptr_eq(&self.data, &data) {
            log::warn!("curve '{}' already owns this data container", self.base.name());
            return Err(Error::SelfAssignment("curve"));
        }
        self.data = data;
        Ok(())
    }

    /// Replace the points with `(t, key, value)` triples zipped from the three
    /// slices. Extra elements of longer slices are ignored.
    pub fn set_data(&mut self, t: &[f64], key: &[f64], value: &[f64]) {
        let map = Rc::make_mut(&mut self.data);
        map.clear();
        insert_all(map, t, key, value);
    }

    /// Replace the points with key/value pairs, using each pair's index as `t`.
    pub fn set_data_keys_values(&mut self, key: &[f64], value: &[f64]) {
        let map = Rc::make_mut(&mut self.data);
        map.clear();
        for (i, (&k, &v)) in key.iter().zip(value).enumerate() {
            let point = CurveData::new(i as f64, k, v);
            map.insert(OrderedFloat(point.t), point);
        }
    }

    /// Merge the points of `data` into the curve.
    pub fn add_data_map(&mut self, data: &CurveDataMap) {
        Rc::make_mut(&mut self.data).extend(data.iter().map(|(&t, &point)| (t, point)));
    }

    /// Add one point.
    pub fn add_data_point(&mut self, point: CurveData) {
        Rc::make_mut(&mut self.data).insert(OrderedFloat(point.t), point);
    }

    /// Add one point given as its three coordinates.
    pub fn add_data(&mut self, t: f64, key: f64, value: f64) {
        self.add_data_point(CurveData::new(t, key, value));
    }

    /// Append a key/value pair with `t` one past the last point, or `0` when
    /// the curve is empty.
    pub fn add_data_key_value(&mut self, key: f64, value: f64) {
        let t = self.data.keys().next_back().map_or(0.0, |last| last.0 + 1.0);
        self.add_data(t, key, value);
    }

    /// Add `(t, key, value)` triples zipped from the three slices.
    pub fn add_data_vectors(&mut self, ts: &[f64], keys: &[f64], values: &[f64]) {
        insert_all(Rc::make_mut(&mut self.data), ts, keys, values);
    }

    /// Remove every point with parameter below `t`.
    pub fn remove_data_before(&mut self, t: f64) {
        let bound = OrderedFloat(t);
        Rc::make_mut(&mut self.data).retain(|k, _| *k >= bound);
    }

    /// Remove every point with parameter above `t`.
    pub fn remove_data_after(&mut self, t: f64) {
        let bound = OrderedFloat(t);
        Rc::make_mut(&mut self.data).retain(|k, _| *k <= bound);
    }

    /// Remove points with `from < t <= to`. Does nothing when `from >= to`.
    pub fn remove_data_between(&mut self, from: f64, to: f64) {
        if from >= to || self.data.is_empty() {
            return;
        }
        let (from, to) = (OrderedFloat(from), OrderedFloat(to));
        Rc::make_mut(&mut self.data).retain(|k, _| *k <= from || *k > to);
    }

    /// Remove the point with parameter exactly `t`.
    pub fn remove_data(&mut self, t: f64) {
        Rc::make_mut(&mut self.data).remove(&OrderedFloat(t));
    }

    // ========================================================================
    // Appearance
    // ========================================================================

    /// Marker drawn at each visible point.
    pub fn scatter_style(&self) -> &ScatterStyle {
        &self.scatter_style
    }

    /// Set the marker; [`ScatterShape::None`] draws none.
    pub fn set_scatter_style(&mut self, style: ScatterStyle) {
        self.scatter_style = style;
    }

    /// How points are connected.
    pub fn line_style(&self) -> CurveLineStyle {
        self.line_style
    }

    /// Set how points are connected.
    pub fn set_line_style(&mut self, style: CurveLineStyle) {
        self.line_style = style;
    }

    // ========================================================================
    // Pixel-space line data
    // ========================================================================

    /// Optimized pixel polyline of the curve.
    fn line_data(&self, axes: &AxisPair) -> Vec<Point> {
        let mut margin = (self.base.main_pen().width * 0.75).max(1.0);
        if !self.scatter_style.is_none() {
            margin = margin.max(self.scatter_style.size());
        }
        let pixels: Vec<Point> = self
            .data
            .values()
            .map(|point| axes.coords_to_pixels(point.key, point.value))
            .collect();
        optimize_curve(&pixels, &axes.visible_rect().padded(margin))
    }

    fn point_distance(&self, axes: &AxisPair, pos: Point) -> Option<f64> {
        let mut points = self.data.values();
        match (points.next(), points.next()) {
            (None, _) => {
                log::warn!("point distance requested on curve '{}' without data", self.base.name());
                None
            }
            (Some(only), None) => {
                let distance = axes.coords_to_pixels(only.key, only.value).distance(pos);
                (!distance.is_nan()).then_some(distance)
            }
            // segments touching a gap marker are not part of the line
            _ => self
                .line_data(axes)
                .windows(2)
                .filter(|pair| !pair[0].is_nan() && !pair[1].is_nan())
                .map(|pair| dist_sqr_to_segment(pair[0], pair[1], pos))
                .filter(|d| !d.is_nan())
                .min_by(f64::total_cmp)
                .map(f64::sqrt),
        }
    }

    fn data_range(&self, sign_domain: SignDomain, pick: impl Fn(&CurveData) -> f64) -> Option<Range> {
        let mut acc = RangeAccumulator::default();
        for point in self.data.values() {
            if point.key.is_nan() || point.value.is_nan() {
                continue;
            }
            let current = pick(point);
            if sign_domain.admits(current) {
                acc.add(current);
            }
        }
        acc.finish()
    }
}

fn insert_all(map: &mut CurveDataMap, ts: &[f64], keys: &[f64], values: &[f64]) {
    for ((&t, &key), &value) in ts.iter().zip(keys).zip(values) {
        map.insert(OrderedFloat(t), CurveData::new(t, key, value));
    }
}

impl Plottable for Curve {
    fn base(&self) -> &PlottableBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlottableBase {
        &mut self.base
    }

    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        if self.data.is_empty() {
            return;
        }
        let Ok(axes) = self.base.axes() else {
            return;
        };
        if log::log_enabled!(log::Level::Debug) {
            for point in self.data.values().filter(|p| p.is_invalid()) {
                log::debug!(
                    "curve '{}': invalid data point at t = {}",
                    self.base.name(),
                    point.t
                );
            }
        }
        let line_data = self.line_data(&axes);

        surface.save();
        surface.set_clip_rect(axes.clip_rect());

        let brush = self.base.main_brush();
        if brush.is_visible() {
            self.base.apply_fill_antialiasing(surface, config);
            surface.set_pen(Pen::NONE);
            surface.set_brush(brush);
            let outline: Vec<Point> = line_data.iter().copied().filter(|p| !p.is_nan()).collect();
            surface.draw_polygon(&outline);
        }

        let pen = self.base.main_pen();
        if self.line_style != CurveLineStyle::None && pen.is_visible() {
            self.base.apply_default_antialiasing(surface, config);
            draw_line_data(surface, &line_data, pen, config);
        }

        if !self.scatter_style.is_none() {
            self.base.apply_scatters_antialiasing(surface, config);
            self.scatter_style.apply_to(surface, pen);
            for &point in line_data.iter().filter(|p| !p.is_nan()) {
                self.scatter_style.draw_shape_at(surface, point);
            }
        }
        surface.restore();
    }

    fn draw_legend_icon(&self, surface: &mut dyn DrawingSurface, rect: Rect, config: &PlotConfig) {
        let has_line = self.line_style != CurveLineStyle::None;
        draw_line_legend_icon(&self.base, has_line, &self.scatter_style, surface, rect, config);
    }

    fn select_test(&self, pos: Point, only_selectable: bool, _config: &PlotConfig) -> Option<f64> {
        if (only_selectable && !self.base.selectable()) || self.data.is_empty() {
            return None;
        }
        let axes = self.base.axes().ok()?;
        if !axes.key.axis_rect().contains(pos) {
            return None;
        }
        self.point_distance(&axes, pos)
    }

    fn key_range(&self, sign_domain: SignDomain) -> Option<Range> {
        self.data_range(sign_domain, |point| point.key)
    }

    fn value_range(&self, sign_domain: SignDomain) -> Option<Range> {
        self.data_range(sign_domain, |point| point.value)
    }

    fn clear_data(&mut self) {
        Rc::make_mut(&mut self.data).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisType;
    use crate::geometry::Line;
    use crate::render::{DrawCommand, RecordingSurface, SurfaceModes};
    use crate::style::ScatterShape;
    use approx::assert_relative_eq;

    fn axes() -> (Rc<Axis>, Rc<Axis>) {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        (
            Axis::shared(AxisType::Bottom, rect, Range::new(0.0, 10.0)),
            Axis::shared(AxisType::Left, rect, Range::new(0.0, 10.0)),
        )
    }

    fn peak(k: &Rc<Axis>, v: &Rc<Axis>) -> Curve {
        let mut curve = Curve::new(k, v);
        curve.set_data_keys_values(&[1.0, 5.0, 9.0], &[1.0, 5.0, 1.0]);
        curve
    }

    fn ts(curve: &Curve) -> Vec<f64> {
        curve.data().keys().map(|t| t.0).collect()
    }

    #[test]
    fn test_defaults() {
        let (k, v) = axes();
        let curve = Curve::new(&k, &v);
        assert!(curve.is_empty());
        assert_eq!(curve.line_style(), CurveLineStyle::Line);
        assert!(curve.scatter_style().is_none());
        assert_eq!(curve.base().pen().color, Rgba::BLUE);
        assert_eq!(curve.base().selected_pen().width, 2.5);
        assert!(!curve.base().brush().is_visible());
    }

    #[test]
    fn test_set_data_truncates_to_shortest() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data(&[0.0, 1.0, 2.0], &[10.0, 11.0], &[5.0, 6.0, 7.0]);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.data()[&OrderedFloat(1.0)], CurveData::new(1.0, 11.0, 6.0));
    }

    #[test]
    fn test_keys_values_use_index_as_t() {
        let (k, v) = axes();
        let curve = peak(&k, &v);
        assert_eq!(ts(&curve), vec![0.0, 1.0, 2.0]);
        assert_eq!(curve.data()[&OrderedFloat(2.0)].key, 9.0);
    }

    #[test]
    fn test_add_key_value_synthesizes_t() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.add_data_key_value(1.0, 1.0);
        assert_eq!(ts(&curve), vec![0.0]);
        curve.add_data(4.5, 2.0, 2.0);
        curve.add_data_key_value(3.0, 3.0);
        assert_eq!(ts(&curve), vec![0.0, 4.5, 5.5]);
    }

    #[test]
    fn test_add_map_and_vectors() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        let mut map = CurveDataMap::new();
        map.insert(OrderedFloat(3.0), CurveData::new(3.0, 1.0, 1.0));
        curve.add_data_map(&map);
        curve.add_data_vectors(&[1.0, 2.0], &[0.0, 0.0], &[0.0]);
        curve.add_data_point(CurveData::new(0.5, 0.0, 0.0));
        assert_eq!(ts(&curve), vec![0.5, 1.0, 3.0]);
    }

    #[test]
    fn test_remove_before_and_after_are_strict() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data_keys_values(&[0.0; 6], &[0.0; 6]);
        curve.remove_data_before(1.0);
        curve.remove_data_after(4.0);
        assert_eq!(ts(&curve), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_remove_between_is_open_closed() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data_keys_values(&[0.0; 6], &[0.0; 6]);
        curve.remove_data_between(1.0, 3.0);
        assert_eq!(ts(&curve), vec![0.0, 1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_remove_between_empty_interval_is_noop() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data_keys_values(&[0.0; 4], &[0.0; 4]);
        curve.remove_data_between(3.0, 3.0);
        curve.remove_data_between(3.0, 1.0);
        assert_eq!(curve.len(), 4);
        curve.remove_data(2.0);
        curve.remove_data(2.5);
        assert_eq!(ts(&curve), vec![0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_shared_data_is_copy_on_write() {
        let (k, v) = axes();
        let mut curve = peak(&k, &v);
        let shared = curve.shared_data();
        curve.add_data_key_value(0.0, 0.0);
        assert_eq!(shared.len(), 3);
        assert_eq!(curve.len(), 4);
    }

    #[test]
    fn test_self_assignment_rejected() {
        let (k, v) = axes();
        let mut curve = peak(&k, &v);
        let own = curve.shared_data();
        assert!(matches!(curve.set_shared_data(own), Err(Error::SelfAssignment(_))));
        assert_eq!(curve.len(), 3);

        let mut other = Curve::new(&k, &v);
        other.set_shared_data(curve.shared_data()).unwrap();
        assert_eq!(other.len(), 3);
    }

    #[test]
    fn test_set_data_map_owned_moves() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        let mut map = CurveDataMap::new();
        map.insert(OrderedFloat(0.0), CurveData::new(0.0, 2.0, 3.0));
        curve.set_data_map_owned(map);
        assert_eq!(curve.len(), 1);
        curve.set_data_map(&CurveDataMap::new());
        assert!(curve.is_empty());
    }

    #[test]
    fn test_draw_fast_segments() {
        let (k, v) = axes();
        let curve = peak(&k, &v);
        let mut surface = RecordingSurface::new();
        curve.draw(&mut surface, &PlotConfig::default());
        let lines: Vec<Line> = surface
            .commands()
            .filter_map(|c| match c {
                DrawCommand::Line { line, pen } => {
                    assert_eq!(pen.color, Rgba::BLUE);
                    Some(*line)
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                Line::from_coords(10.0, 90.0, 50.0, 50.0),
                Line::from_coords(50.0, 50.0, 90.0, 90.0)
            ]
        );
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_draw_polyline_on_vector_surface() {
        let (k, v) = axes();
        let curve = peak(&k, &v);
        let mut surface = RecordingSurface::new().with_modes(SurfaceModes {
            vectorized: true,
            no_caching: false,
        });
        curve.draw(&mut surface, &PlotConfig::default());
        let polylines: Vec<usize> = surface
            .commands()
            .filter_map(|c| match c {
                DrawCommand::Polyline { points, .. } => Some(points.len()),
                _ => None,
            })
            .collect();
        assert_eq!(polylines, vec![3]);
    }

    #[test]
    fn test_nan_splits_line() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data_keys_values(&[1.0, f64::NAN, 5.0, 9.0], &[1.0, f64::NAN, 5.0, 1.0]);

        let mut fast = RecordingSurface::new();
        curve.draw(&mut fast, &PlotConfig::default());
        assert_eq!(fast.commands().count(), 1);

        let mut slow = RecordingSurface::new();
        curve.draw(&mut slow, &PlotConfig::default().fast_polylines(false));
        match slow.commands().collect::<Vec<_>>().as_slice() {
            [DrawCommand::Polyline { points, .. }] => assert_eq!(points.len(), 2),
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_fill_then_scatters() {
        let (k, v) = axes();
        let mut curve = peak(&k, &v);
        curve.base_mut().set_brush(Brush::solid(Rgba::GREEN));
        curve.set_line_style(CurveLineStyle::None);
        curve.set_scatter_style(ScatterStyle::new(ScatterShape::Circle, 4.0));
        let mut surface = RecordingSurface::new();
        curve.draw(&mut surface, &PlotConfig::default());
        let commands: Vec<&DrawCommand> = surface.commands().collect();
        assert_eq!(commands.len(), 4);
        match commands[0] {
            DrawCommand::Polygon { points, pen, brush } => {
                assert_eq!(points.len(), 3);
                assert_eq!(*pen, Pen::NONE);
                assert_eq!(brush.color, Rgba::GREEN);
            }
            other => panic!("unexpected command {other:?}"),
        }
        match commands[1] {
            DrawCommand::Ellipse { center, pen, .. } => {
                assert_eq!(*center, Point::new(10.0, 90.0));
                assert_eq!(pen.color, Rgba::BLUE);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_draw_far_outside_points_dropped() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data_keys_values(&[5.0, 500.0, 600.0, 5.0], &[5.0, 5.0, 6.0, 6.0]);
        let mut surface = RecordingSurface::new();
        curve.draw(&mut surface, &PlotConfig::default());
        for command in surface.commands() {
            if let DrawCommand::Line { line, .. } = command {
                assert!(line.start.x <= 102.0 && line.end.x <= 102.0, "{line:?}");
            }
        }
    }

    #[test]
    fn test_draw_without_axis_is_noop() {
        let (k, v) = axes();
        let curve = peak(&k, &v);
        drop(v);
        let mut surface = RecordingSurface::new();
        curve.draw(&mut surface, &PlotConfig::default());
        assert!(surface.records().is_empty());
    }

    #[test]
    fn test_legend_icon() {
        let (k, v) = axes();
        let curve = peak(&k, &v);
        let mut surface = RecordingSurface::new();
        curve.draw_legend_icon(&mut surface, Rect::new(0.0, 0.0, 20.0, 10.0), &PlotConfig::default());
        match surface.commands().collect::<Vec<_>>().as_slice() {
            [DrawCommand::Line { line, .. }] => {
                assert_eq!(*line, Line::from_coords(0.0, 5.0, 25.0, 5.0));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_select_test_distance() {
        let (k, v) = axes();
        let curve = peak(&k, &v);
        let config = PlotConfig::default();
        let d = curve.select_test(Point::new(50.0, 70.0), false, &config).unwrap();
        assert_relative_eq!(d, 20.0 / 2.0_f64.sqrt(), epsilon = 1e-9);
        assert_eq!(curve.select_test(Point::new(10.0, 90.0), true, &config), Some(0.0));
    }

    #[test]
    fn test_select_test_rejections() {
        let (k, v) = axes();
        let mut curve = peak(&k, &v);
        let config = PlotConfig::default();
        assert_eq!(curve.select_test(Point::new(150.0, 50.0), false, &config), None);
        curve.base_mut().set_selectable(false);
        assert_eq!(curve.select_test(Point::new(50.0, 50.0), true, &config), None);
        assert!(curve.select_test(Point::new(50.0, 50.0), false, &config).is_some());
        curve.clear_data();
        assert_eq!(curve.select_test(Point::new(50.0, 50.0), false, &config), None);
    }

    #[test]
    fn test_select_test_single_point() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.add_data(7.0, 5.0, 5.0);
        let d = curve.select_test(Point::new(53.0, 54.0), false, &PlotConfig::default());
        assert_relative_eq!(d.unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_select_test_ignores_nan_gaps() {
        let (k, v) = axes();
        let nan = std::hint::black_box(0.0_f64) / std::hint::black_box(0.0_f64);
        let mut curve = Curve::new(&k, &v);
        curve.set_data(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, nan, 8.0], &[1.0, 2.0, nan, 8.0]);
        let config = PlotConfig::default();
        let d = curve.select_test(Point::new(15.0, 85.0), false, &config).unwrap();
        assert!(d < 1e-9, "distance {d}");

        let mut gap_only = Curve::new(&k, &v);
        gap_only.set_data_keys_values(&[5.0, nan], &[5.0, nan]);
        assert_eq!(gap_only.select_test(Point::new(50.0, 50.0), false, &config), None);

        let mut single = Curve::new(&k, &v);
        single.add_data(0.0, nan, nan);
        assert_eq!(single.select_test(Point::new(50.0, 50.0), false, &config), None);
    }

    #[test]
    fn test_ranges_skip_nan_and_honor_sign_domain() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data_keys_values(&[-2.0, 3.0, f64::NAN, 8.0], &[4.0, -1.0, 100.0, f64::NAN]);
        assert_eq!(curve.key_range(SignDomain::Both), Some(Range::new(-2.0, 3.0)));
        assert_eq!(curve.key_range(SignDomain::Positive), Some(Range::new(3.0, 3.0)));
        assert_eq!(curve.value_range(SignDomain::Negative), Some(Range::new(-1.0, -1.0)));
        curve.clear_data();
        assert_eq!(curve.value_range(SignDomain::Both), None);
    }

    #[test]
    fn test_rescale_axes() {
        let (k, v) = axes();
        let mut curve = Curve::new(&k, &v);
        curve.set_data_keys_values(&[-5.0, 20.0], &[2.0, 4.0]);
        curve.rescale_axes(false);
        assert_eq!(k.range(), Range::new(-5.0, 20.0));
        assert_eq!(v.range(), Range::new(2.0, 4.0));
    }
}
