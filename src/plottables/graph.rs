//! Graphs: one value per key, drawn in key order.
//!
//! Points are kept sorted by key, so a graph cannot loop back on itself; use
//! a [`Curve`](super::Curve) for that. Only the visible key span plus one
//! point on either side is processed per frame, which keeps lines leaving
//! the view at the correct angle.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::axis::{Axis, AxisPair, Orientation, ScaleType};
use crate::color::Rgba;
use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::geometry::{dist_sqr_to_segment, Line, Point, Rect};
use crate::plottables::{draw_line_data, draw_line_legend_icon, Plottable, PlottableBase};
use crate::range::{Range, RangeAccumulator, SignDomain};
use crate::render::DrawingSurface;
use crate::style::{Brush, BrushStyle, Pen, ScatterStyle};

/// One graph point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphData {
    /// Coordinate on the key axis; defines the drawing order.
    pub key: f64,
    /// Coordinate on the value axis. NaN leaves a gap in the line.
    pub value: f64,
}

impl GraphData {
    /// Create a graph point.
    #[must_use]
    pub const fn new(key: f64, value: f64) -> Self {
        Self { key, value }
    }
}

/// Graph points keyed by their key. Adding a point at an existing key
/// replaces the old one.
pub type GraphDataMap = BTreeMap<OrderedFloat<f64>, GraphData>;

/// How consecutive graph points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphLineStyle {
    /// Points are not connected; use a scatter style to see them.
    None,
    /// Straight lines between consecutive points.
    #[default]
    Line,
    /// Steps where each point's value holds to its left.
    StepLeft,
    /// Steps where each point's value holds to its right.
    StepRight,
    /// Steps centered between neighbouring keys.
    StepCenter,
    /// A line from the zero value to each point.
    Impulse,
}

/// A key/value graph plottable.
#[derive(Debug, Clone)]
pub struct Graph {
    base: PlottableBase,
    data: Rc<GraphDataMap>,
    scatter_style: ScatterStyle,
    line_style: GraphLineStyle,
}

impl Graph {
    /// Empty graph drawn with a blue line and no markers.
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
            data: Rc::new(GraphDataMap::new()),
            scatter_style: ScatterStyle::default(),
            line_style: GraphLineStyle::Line,
        }
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// The points, ordered by key.
    pub fn data(&self) -> &GraphDataMap {
        &self.data
    }

    /// Handle to the point container, shared until either side mutates it.
    pub fn shared_data(&self) -> Rc<GraphDataMap> {
        Rc::clone(&self.data)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the graph has no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replace the points with a copy of `data`.
    pub fn set_data_map(&mut self, data: &GraphDataMap) {
        self.data = Rc::new(data.clone());
    }

    /// Replace the points, taking ownership of `data`.
    pub fn set_data_map_owned(&mut self, data: GraphDataMap) {
        self.data = Rc::new(data);
    }

    /// Share `data`; the graph copies it on its next mutation.
    ///
    /// # Errors
    ///
    /// [`Error::SelfAssignment`] when `data` is the container this graph
    /// already holds.
    pub fn set_shared_data(&mut self, data: Rc<GraphDataMap>) -> Result<()> {
        if Rc::ptr_eq(&self.data, &data) {
            log::warn!("graph '{}' already owns this data container", self.base.name());
            return Err(Error::SelfAssignment("graph"));
        }
        self.data = data;
        Ok(())
    }

    /// Replace the points with pairs zipped from `keys` and `values`. Extra
    /// elements of the longer slice are ignored.
    pub fn set_data(&mut self, keys: &[f64], values: &[f64]) {
        let map = Rc::make_mut(&mut self.data);
        map.clear();
        insert_all(map, keys, values);
    }

    /// Merge the points of `data` into the graph.
    pub fn add_data_map(&mut self, data: &GraphDataMap) {
        Rc::make_mut(&mut self.data).extend(data.iter().map(|(&k, &point)| (k, point)));
    }

    /// Add one point.
    pub fn add_data_point(&mut self, point: GraphData) {
        Rc::make_mut(&mut self.data).insert(OrderedFloat(point.key), point);
    }

    /// Add one point given as key and value.
    pub fn add_data(&mut self, key: f64, value: f64) {
        self.add_data_point(GraphData::new(key, value));
    }

    /// Add pairs zipped from `keys` and `values`.
    pub fn add_data_vectors(&mut self, keys: &[f64], values: &[f64]) {
        insert_all(Rc::make_mut(&mut self.data), keys, values);
    }

    /// Remove every point with key below `key`.
    pub fn remove_data_before(&mut self, key: f64) {
        let bound = OrderedFloat(key);
        Rc::make_mut(&mut self.data).retain(|k, _| *k >= bound);
    }

    /// Remove every point with key above `key`.
    pub fn remove_data_after(&mut self, key: f64) {
        let bound = OrderedFloat(key);
        Rc::make_mut(&mut self.data).retain(|k, _| *k <= bound);
    }

    /// Remove points with `from < key <= to`. Does nothing when `from >= to`.
    pub fn remove_data_between(&mut self, from: f64, to: f64) {
        if from >= to || self.data.is_empty() {
            return;
        }
        let (from, to) = (OrderedFloat(from), OrderedFloat(to));
        Rc::make_mut(&mut self.data).retain(|k, _| *k <= from || *k > to);
    }

    /// Remove the point at exactly `key`.
    pub fn remove_data(&mut self, key: f64) {
        Rc::make_mut(&mut self.data).remove(&OrderedFloat(key));
    }

    // ========================================================================
    // Appearance
    // ========================================================================

    /// Marker drawn at each visible point.
    pub fn scatter_style(&self) -> &ScatterStyle {
        &self.scatter_style
    }

    /// Set the marker.
    pub fn set_scatter_style(&mut self, style: ScatterStyle) {
        self.scatter_style = style;
    }

    /// How points are connected.
    pub fn line_style(&self) -> GraphLineStyle {
        self.line_style
    }

    /// Set how points are connected.
    pub fn set_line_style(&mut self, style: GraphLineStyle) {
        self.line_style = style;
    }

    // ========================================================================
    // Pixel-space line data
    // ========================================================================

    /// Points inside the key axis range plus the nearest one outside on each
    /// side.
    fn visible_data(&self, axes: &AxisPair) -> Vec<GraphData> {
        let range = axes.key.range().normalized();
        if range.lower.is_nan() || range.upper.is_nan() {
            return Vec::new();
        }
        let (lower, upper) = (OrderedFloat(range.lower), OrderedFloat(range.upper));
        let below = self.data.range(..lower).next_back();
        let inside = self.data.range(lower..=upper);
        let above = self
            .data
            .range((Bound::Excluded(upper), Bound::Unbounded))
            .next();
        below
            .into_iter()
            .chain(inside)
            .chain(above)
            .map(|(_, point)| *point)
            .collect()
    }

    /// Pixel points for the line style. Impulses come as start/end pairs.
    fn line_pixels(&self, axes: &AxisPair, data: &[GraphData]) -> Vec<Point> {
        let Some(first) = data.first() else {
            return Vec::new();
        };
        let key_px = |p: &GraphData| axes.key.coord_to_pixel(p.key);
        let value_px = |p: &GraphData| axes.value.coord_to_pixel(p.value);
        let at = |key: f64, value: f64| pixel_point(axes, key, value);

        match self.line_style {
            GraphLineStyle::None => Vec::new(),
            GraphLineStyle::Line => data.iter().map(|p| at(key_px(p), value_px(p))).collect(),
            GraphLineStyle::StepLeft => {
                let mut last_value = value_px(first);
                let mut points = Vec::with_capacity(data.len() * 2);
                for p in data {
                    let key = key_px(p);
                    points.push(at(key, last_value));
                    last_value = value_px(p);
                    points.push(at(key, last_value));
                }
                points
            }
            GraphLineStyle::StepRight => {
                let mut last_key = key_px(first);
                let mut points = Vec::with_capacity(data.len() * 2);
                for p in data {
                    let value = value_px(p);
                    points.push(at(last_key, value));
                    last_key = key_px(p);
                    points.push(at(last_key, value));
                }
                points
            }
            GraphLineStyle::StepCenter => {
                let mut last_key = key_px(first);
                let mut last_value = value_px(first);
                let mut points = Vec::with_capacity(data.len() * 2);
                points.push(at(last_key, last_value));
                for p in &data[1..] {
                    let middle = (key_px(p) + last_key) * 0.5;
                    points.push(at(middle, last_value));
                    last_value = value_px(p);
                    last_key = key_px(p);
                    points.push(at(middle, last_value));
                }
                points.push(at(last_key, last_value));
                points
            }
            GraphLineStyle::Impulse => {
                let zero = axes.value.coord_to_pixel(0.0);
                data.iter()
                    .flat_map(|p| {
                        let key = key_px(p);
                        [at(key, zero), at(key, value_px(p))]
                    })
                    .collect()
            }
        }
    }

    /// Value pixel the fill closes on: the zero line, or on logarithmic value
    /// axes the axis rect edge lying towards zero.
    fn fill_base(axes: &AxisPair) -> f64 {
        match axes.value.scale_type() {
            ScaleType::Linear => axes.value.coord_to_pixel(0.0),
            ScaleType::Logarithmic => {
                let range = axes.value.range();
                let reversed = axes.value.range_reversed();
                let far = (range.upper < 0.0 && !reversed) || (range.upper > 0.0 && reversed);
                let rect = axes.key.axis_rect();
                match (axes.key.orientation(), far) {
                    (Orientation::Horizontal, true) => rect.top,
                    (Orientation::Horizontal, false) => rect.bottom,
                    (Orientation::Vertical, true) => rect.right,
                    (Orientation::Vertical, false) => rect.left,
                }
            }
        }
    }

    /// Fill polygon: the line closed on the fill base.
    fn fill_polygon(axes: &AxisPair, line: &[Point]) -> Vec<Point> {
        let mut polygon: Vec<Point> = line.iter().copied().filter(|p| !p.is_nan()).collect();
        let (Some(first), Some(last)) = (polygon.first().copied(), polygon.last().copied()) else {
            return polygon;
        };
        let base = Self::fill_base(axes);
        let key_of = |p: Point| match axes.key.orientation() {
            Orientation::Horizontal => p.x,
            Orientation::Vertical => p.y,
        };
        polygon.push(pixel_point(axes, key_of(last), base));
        polygon.push(pixel_point(axes, key_of(first), base));
        polygon
    }

    fn point_distance(&self, axes: &AxisPair, pos: Point) -> Option<f64> {
        let visible = self.visible_data(axes);
        if self.line_style == GraphLineStyle::None {
            return visible
                .iter()
                .map(|p| axes.coords_to_pixels(p.key, p.value).distance(pos))
                .filter(|d| !d.is_nan())
                .min_by(f64::total_cmp);
        }
        let line = self.line_pixels(axes, &visible);
        if let [only] = line.as_slice() {
            let distance = only.distance(pos);
            return (!distance.is_nan()).then_some(distance);
        }
        let segments: Vec<(Point, Point)> = if self.line_style == GraphLineStyle::Impulse {
            line.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
        } else {
            line.windows(2).map(|pair| (pair[0], pair[1])).collect()
        };
        segments
            .into_iter()
            .filter(|(a, b)| !a.is_nan() && !b.is_nan())
            .map(|(a, b)| dist_sqr_to_segment(a, b, pos))
            .filter(|d| !d.is_nan())
            .min_by(f64::total_cmp)
            .map(f64::sqrt)
    }

    fn data_range(&self, sign_domain: SignDomain, pick: impl Fn(&GraphData) -> f64) -> Option<Range> {
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

fn insert_all(map: &mut GraphDataMap, keys: &[f64], values: &[f64]) {
    for (&key, &value) in keys.iter().zip(values) {
        map.insert(OrderedFloat(key), GraphData::new(key, value));
    }
}

/// Pixel position of a key pixel and a value pixel.
fn pixel_point(axes: &AxisPair, key: f64, value: f64) -> Point {
    match axes.key.orientation() {
        Orientation::Horizontal => Point::new(key, value),
        Orientation::Vertical => Point::new(value, key),
    }
}

impl Plottable for Graph {
    fn base(&self) -> &PlottableBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlottableBase {
        &mut self.base
    }

    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        let Ok(axes) = self.base.axes() else {
            return;
        };
        if self.data.is_empty() || axes.key.range().size() <= 0.0 {
            return;
        }
        if self.line_style == GraphLineStyle::None && self.scatter_style.is_none() {
            return;
        }
        if log::log_enabled!(log::Level::Debug) {
            for point in self.data.values().filter(|p| p.key.is_infinite() || p.value.is_infinite()) {
                log::debug!("graph '{}': invalid data point at key {}", self.base.name(), point.key);
            }
        }
        let visible = self.visible_data(&axes);
        let line = self.line_pixels(&axes, &visible);

        surface.save();
        surface.set_clip_rect(axes.clip_rect());

        let brush = self.base.main_brush();
        if brush.is_visible() && self.line_style != GraphLineStyle::Impulse && !line.is_empty() {
            self.base.apply_fill_antialiasing(surface, config);
            surface.set_pen(Pen::NONE);
            surface.set_brush(brush);
            surface.draw_polygon(&Self::fill_polygon(&axes, &line));
        }

        let pen = self.base.main_pen();
        if pen.is_visible() {
            match self.line_style {
                GraphLineStyle::None => {}
                GraphLineStyle::Impulse => {
                    self.base.apply_default_antialiasing(surface, config);
                    surface.set_pen(pen);
                    surface.set_brush(Brush::NONE);
                    for pair in line.chunks_exact(2) {
                        if !pair[0].is_nan() && !pair[1].is_nan() {
                            surface.draw_line(Line::new(pair[0], pair[1]));
                        }
                    }
                }
                _ => {
                    self.base.apply_default_antialiasing(surface, config);
                    draw_line_data(surface, &line, pen, config);
                }
            }
        }

        if !self.scatter_style.is_none() {
            self.base.apply_scatters_antialiasing(surface, config);
            self.scatter_style.apply_to(surface, self.base.pen());
            for p in visible.iter().filter(|p| !p.value.is_nan()) {
                self.scatter_style.draw_shape_at(surface, axes.coords_to_pixels(p.key, p.value));
            }
        }
        surface.restore();
    }

    fn draw_legend_icon(&self, surface: &mut dyn DrawingSurface, rect: Rect, config: &PlotConfig) {
        let has_line = self.line_style != GraphLineStyle::None;
        draw_line_legend_icon(&self.base, has_line, &self.scatter_style, surface, rect, config);
    }

    fn select_test(&self, pos: Point, only_selectable: bool, _config: &PlotConfig) -> Option<f64> {
        if (only_selectable && !self.base.selectable()) || self.data.is_empty() {
            return None;
        }
        if self.line_style == GraphLineStyle::None && self.scatter_style.is_none() {
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

    fn vector_surface() -> RecordingSurface {
        RecordingSurface::new().with_modes(SurfaceModes {
            vectorized: true,
            no_caching: true,
        })
    }

    fn polylines(surface: &RecordingSurface) -> Vec<Vec<Point>> {
        surface
            .commands()
            .filter_map(|c| match c {
                DrawCommand::Polyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    fn keys(graph: &Graph) -> Vec<f64> {
        graph.data().keys().map(|k| k.0).collect()
    }

    fn stairs(k: &Rc<Axis>, v: &Rc<Axis>, style: GraphLineStyle) -> Graph {
        let mut graph = Graph::new(k, v);
        graph.set_data(&[2.0, 4.0, 6.0], &[1.0, 3.0, 2.0]);
        graph.set_line_style(style);
        graph
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_defaults() {
        let (k, v) = axes();
        let graph = Graph::new(&k, &v);
        assert!(graph.is_empty());
        assert_eq!(graph.line_style(), GraphLineStyle::Line);
        assert!(graph.scatter_style().is_none());
        assert_eq!(graph.base().pen().color, Rgba::BLUE);
    }

    #[test]
    fn test_set_data_sorts_by_key() {
        let (k, v) = axes();
        let mut graph = Graph::new(&k, &v);
        graph.set_data(&[3.0, 1.0, 2.0, 9.0], &[30.0, 10.0, 20.0]);
        assert_eq!(keys(&graph), vec![1.0, 2.0, 3.0]);
        graph.add_data(2.0, 99.0);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.data()[&OrderedFloat(2.0)].value, 99.0);
    }

    #[test]
    fn test_removal() {
        let (k, v) = axes();
        let mut graph = Graph::new(&k, &v);
        graph.add_data_vectors(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &[0.0; 6]);
        graph.remove_data_before(1.0);
        graph.remove_data_after(4.0);
        assert_eq!(keys(&graph), vec![1.0, 2.0, 3.0, 4.0]);
        graph.remove_data_between(1.0, 3.0);
        assert_eq!(keys(&graph), vec![1.0, 4.0]);
        graph.remove_data_between(4.0, 4.0);
        graph.remove_data(1.0);
        assert_eq!(keys(&graph), vec![4.0]);
    }

    #[test]
    fn test_self_assignment_rejected() {
        let (k, v) = axes();
        let mut graph = stairs(&k, &v, GraphLineStyle::Line);
        let own = graph.shared_data();
        assert!(matches!(graph.set_shared_data(own), Err(Error::SelfAssignment(_))));

        let mut other = Graph::new(&k, &v);
        other.set_shared_data(graph.shared_data()).unwrap();
        other.add_data(8.0, 1.0);
        assert_eq!(graph.len(), 3);
        assert_eq!(other.len(), 4);
    }

    #[test]
    fn test_step_left_line() {
        let (k, v) = axes();
        let graph = stairs(&k, &v, GraphLineStyle::StepLeft);
        let mut surface = vector_surface();
        graph.draw(&mut surface, &PlotConfig::default());
        assert_eq!(
            polylines(&surface),
            vec![vec![
                p(20.0, 90.0),
                p(20.0, 90.0),
                p(40.0, 90.0),
                p(40.0, 70.0),
                p(60.0, 70.0),
                p(60.0, 80.0)
            ]]
        );
    }

    #[test]
    fn test_step_right_line() {
        let (k, v) = axes();
        let graph = stairs(&k, &v, GraphLineStyle::StepRight);
        let mut surface = vector_surface();
        graph.draw(&mut surface, &PlotConfig::default());
        assert_eq!(
            polylines(&surface),
            vec![vec![
                p(20.0, 90.0),
                p(20.0, 90.0),
                p(20.0, 70.0),
                p(40.0, 70.0),
                p(40.0, 80.0),
                p(60.0, 80.0)
            ]]
        );
    }

    #[test]
    fn test_step_center_line() {
        let (k, v) = axes();
        let graph = stairs(&k, &v, GraphLineStyle::StepCenter);
        let mut surface = vector_surface();
        graph.draw(&mut surface, &PlotConfig::default());
        assert_eq!(
            polylines(&surface),
            vec![vec![
                p(20.0, 90.0),
                p(30.0, 90.0),
                p(30.0, 70.0),
                p(50.0, 70.0),
                p(50.0, 80.0),
                p(60.0, 80.0)
            ]]
        );
    }

    #[test]
    fn test_impulses_start_at_zero() {
        let (k, v) = axes();
        let graph = stairs(&k, &v, GraphLineStyle::Impulse);
        let mut surface = RecordingSurface::new();
        graph.draw(&mut surface, &PlotConfig::default());
        let lines: Vec<Line> = surface
            .commands()
            .filter_map(|c| match c {
                DrawCommand::Line { line, .. } => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                Line::from_coords(20.0, 100.0, 20.0, 90.0),
                Line::from_coords(40.0, 100.0, 40.0, 70.0),
                Line::from_coords(60.0, 100.0, 60.0, 80.0)
            ]
        );
    }

    #[test]
    fn test_fill_closes_on_zero_line() {
        let (k, v) = axes();
        let mut graph = stairs(&k, &v, GraphLineStyle::Line);
        graph.base_mut().set_brush(Brush::solid(Rgba::GREEN));
        let mut surface = vector_surface();
        graph.draw(&mut surface, &PlotConfig::default());
        match surface.commands().next() {
            Some(DrawCommand::Polygon { points, pen, .. }) => {
                assert_eq!(*pen, Pen::NONE);
                assert_eq!(
                    points,
                    &vec![
                        p(20.0, 90.0),
                        p(40.0, 70.0),
                        p(60.0, 80.0),
                        p(60.0, 100.0),
                        p(20.0, 100.0)
                    ]
                );
            }
            other => panic!("unexpected command {other:?}"),
        };
    }

    #[test]
    fn test_only_visible_span_plus_neighbours_is_drawn() {
        let (k, v) = axes();
        let mut graph = Graph::new(&k, &v);
        let keys: Vec<f64> = (-20_i32..=30).map(f64::from).collect();
        graph.set_data(&keys, &vec![5.0; keys.len()]);
        let mut surface = vector_surface();
        graph.draw(&mut surface, &PlotConfig::default());
        let lines = polylines(&surface);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 13);
        assert_eq!(lines[0][0], p(-10.0, 50.0));
        assert_eq!(lines[0][12], p(110.0, 50.0));
    }

    #[test]
    fn test_nan_value_splits_line_and_skips_scatter() {
        let (k, v) = axes();
        let mut graph = Graph::new(&k, &v);
        graph.set_data(&[1.0, 2.0, 3.0, 4.0, 5.0], &[1.0, 2.0, f64::NAN, 4.0, 5.0]);
        graph.set_scatter_style(ScatterStyle::new(ScatterShape::Circle, 4.0));
        let mut surface = vector_surface();
        graph.draw(&mut surface, &PlotConfig::default());
        let runs: Vec<usize> = polylines(&surface).iter().map(Vec::len).collect();
        assert_eq!(runs, vec![2, 2]);
        let markers = surface
            .commands()
            .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
            .count();
        assert_eq!(markers, 4);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_nothing_to_draw() {
        let (k, v) = axes();
        let mut graph = stairs(&k, &v, GraphLineStyle::None);
        let mut surface = RecordingSurface::new();
        graph.draw(&mut surface, &PlotConfig::default());
        assert!(surface.records().is_empty());
        assert_eq!(graph.select_test(p(40.0, 70.0), false, &PlotConfig::default()), None);

        graph.set_line_style(GraphLineStyle::Line);
        k.set_range(Range::new(3.0, 3.0));
        graph.draw(&mut surface, &PlotConfig::default());
        assert!(surface.records().is_empty());
    }

    #[test]
    fn test_select_test_line_and_steps() {
        let (k, v) = axes();
        let config = PlotConfig::default();
        let line = stairs(&k, &v, GraphLineStyle::Line);
        let d = line.select_test(p(30.0, 70.0), false, &config).unwrap();
        assert_relative_eq!(d, 10.0 / 2.0_f64.sqrt(), epsilon = 1e-9);

        let steps = stairs(&k, &v, GraphLineStyle::StepLeft);
        let d = steps.select_test(p(30.0, 95.0), false, &config).unwrap();
        assert_relative_eq!(d, 5.0, epsilon = 1e-9);
        assert_eq!(steps.select_test(p(150.0, 50.0), false, &config), None);
    }

    #[test]
    fn test_select_test_impulse_pairs_only() {
        let (k, v) = axes();
        let graph = stairs(&k, &v, GraphLineStyle::Impulse);
        // between two impulses, nearer to the first one
        let d = graph
            .select_test(p(28.0, 95.0), false, &PlotConfig::default())
            .unwrap();
        assert_relative_eq!(d, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_select_test_scatter_only() {
        let (k, v) = axes();
        let mut graph = stairs(&k, &v, GraphLineStyle::None);
        graph.set_scatter_style(ScatterStyle::new(ScatterShape::Disc, 5.0));
        let d = graph
            .select_test(p(43.0, 74.0), false, &PlotConfig::default())
            .unwrap();
        assert_relative_eq!(d, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_select_test_ignores_gap() {
        let (k, v) = axes();
        let nan = std::hint::black_box(0.0_f64) / std::hint::black_box(0.0_f64);
        let mut graph = Graph::new(&k, &v);
        graph.set_data(&[1.0, 2.0, 3.0], &[1.0, 2.0, nan]);
        let d = graph
            .select_test(p(15.0, 85.0), false, &PlotConfig::default())
            .unwrap();
        assert!(d < 1e-9, "distance {d}");
    }

    #[test]
    fn test_ranges() {
        let (k, v) = axes();
        let mut graph = Graph::new(&k, &v);
        graph.set_data(&[-3.0, 1.0, 4.0, 7.0], &[2.0, -5.0, f64::NAN, 8.0]);
        assert_eq!(graph.key_range(SignDomain::Both), Some(Range::new(-3.0, 7.0)));
        assert_eq!(graph.key_range(SignDomain::Negative), Some(Range::new(-3.0, -3.0)));
        assert_eq!(graph.value_range(SignDomain::Positive), Some(Range::new(2.0, 8.0)));
        graph.clear_data();
        assert_eq!(graph.key_range(SignDomain::Both), None);
    }
}
