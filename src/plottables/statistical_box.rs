//! A single box-and-whisker summary of a sample.

use std::rc::Rc;

use crate::axis::{Axis, AxisPair};
use crate::color::Rgba;
use crate::config::PlotConfig;
use crate::geometry::{Line, Point, Rect};
use crate::plottables::{Plottable, PlottableBase};
use crate::range::{Range, RangeAccumulator, SignDomain};
use crate::render::DrawingSurface;
use crate::style::{Brush, Pen, PenStyle, ScatterShape, ScatterStyle};

/// Five-number summary plus outliers, positioned at `key`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticalBoxData {
    /// Position on the key axis.
    pub key: f64,
    /// Lower whisker end.
    pub minimum: f64,
    /// Lower edge of the box.
    pub lower_quartile: f64,
    /// Median line.
    pub median: f64,
    /// Upper edge of the box.
    pub upper_quartile: f64,
    /// Upper whisker end.
    pub maximum: f64,
    /// Values drawn as individual markers.
    pub outliers: Vec<f64>,
}

/// Box-and-whisker plottable.
///
/// The box spans the quartiles and is `width` key units wide. Whiskers run
/// from the box to the minimum and maximum and end in bars `whisker_width`
/// key units wide.
#[derive(Debug, Clone)]
pub struct StatisticalBox {
    base: PlottableBase,
    data: StatisticalBoxData,
    width: f64,
    whisker_width: f64,
    whisker_pen: Pen,
    whisker_bar_pen: Pen,
    median_pen: Pen,
    outlier_style: ScatterStyle,
}

impl StatisticalBox {
    /// All-zero box with dashed whiskers and blue circle outliers.
    pub fn new(key_axis: &Rc<Axis>, value_axis: &Rc<Axis>) -> Self {
        let mut base = PlottableBase::new(key_axis, value_axis);
        base.set_pen(Pen::solid(Rgba::BLACK));
        base.set_selected_pen(Pen::solid(Rgba::BLUE).with_width(2.5));
        base.set_brush(Brush::NONE);
        base.set_selected_brush(Brush::NONE);
        Self {
            base,
            data: StatisticalBoxData::default(),
            width: 0.5,
            whisker_width: 0.2,
            whisker_pen: Pen::new(Rgba::BLACK, 0.0, PenStyle::Dash),
            whisker_bar_pen: Pen::solid(Rgba::BLACK),
            median_pen: Pen::solid(Rgba::BLACK).with_width(3.0),
            outlier_style: ScatterStyle::with_color(ScatterShape::Circle, Rgba::BLUE, 6.0),
        }
    }

    /// The summary values.
    pub fn data(&self) -> &StatisticalBoxData {
        &self.data
    }

    /// Set key and all five summary values at once. Outliers are kept.
    pub fn set_data(
        &mut self,
        key: f64,
        minimum: f64,
        lower_quartile: f64,
        median: f64,
        upper_quartile: f64,
        maximum: f64,
    ) {
        self.data = StatisticalBoxData {
            key,
            minimum,
            lower_quartile,
            median,
            upper_quartile,
            maximum,
            outliers: std::mem::take(&mut self.data.outliers),
        };
    }

    /// Set the key position.
    pub fn set_key(&mut self, key: f64) {
        self.data.key = key;
    }

    /// Set the lower whisker end.
    pub fn set_minimum(&mut self, value: f64) {
        self.data.minimum = value;
    }

    /// Set the lower box edge.
    pub fn set_lower_quartile(&mut self, value: f64) {
        self.data.lower_quartile = value;
    }

    /// Set the median.
    pub fn set_median(&mut self, value: f64) {
        self.data.median = value;
    }

    /// Set the upper box edge.
    pub fn set_upper_quartile(&mut self, value: f64) {
        self.data.upper_quartile = value;
    }

    /// Set the upper whisker end.
    pub fn set_maximum(&mut self, value: f64) {
        self.data.maximum = value;
    }

    /// Replace the outliers.
    pub fn set_outliers(&mut self, values: Vec<f64>) {
        self.data.outliers = values;
    }

    /// Box width in key units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Set the box width in key units.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Whisker bar width in key units.
    pub fn whisker_width(&self) -> f64 {
        self.whisker_width
    }

    /// Set the whisker bar width in key units.
    pub fn set_whisker_width(&mut self, width: f64) {
        self.whisker_width = width;
    }

    /// Pen of the whisker backbones.
    pub fn whisker_pen(&self) -> Pen {
        self.whisker_pen
    }

    /// Set the pen of the whisker backbones.
    pub fn set_whisker_pen(&mut self, pen: Pen) {
        self.whisker_pen = pen;
    }

    /// Pen of the whisker end bars.
    pub fn whisker_bar_pen(&self) -> Pen {
        self.whisker_bar_pen
    }

    /// Set the pen of the whisker end bars.
    pub fn set_whisker_bar_pen(&mut self, pen: Pen) {
        self.whisker_bar_pen = pen;
    }

    /// Pen of the median line.
    pub fn median_pen(&self) -> Pen {
        self.median_pen
    }

    /// Set the pen of the median line.
    pub fn set_median_pen(&mut self, pen: Pen) {
        self.median_pen = pen;
    }

    /// Marker for outliers.
    pub fn outlier_style(&self) -> &ScatterStyle {
        &self.outlier_style
    }

    /// Set the marker for outliers.
    pub fn set_outlier_style(&mut self, style: ScatterStyle) {
        self.outlier_style = style;
    }

    fn key_span(&self, half_width: f64) -> (f64, f64) {
        (self.data.key - half_width, self.data.key + half_width)
    }

    fn quartile_box(&self, axes: &AxisPair) -> Rect {
        let (left, right) = self.key_span(self.width * 0.5);
        Rect::from_corners(
            axes.coords_to_pixels(left, self.data.upper_quartile),
            axes.coords_to_pixels(right, self.data.lower_quartile),
        )
    }

    fn draw_whiskers(&self, surface: &mut dyn DrawingSurface, axes: &AxisPair, config: &PlotConfig) {
        let d = &self.data;
        let px = |key, value| axes.coords_to_pixels(key, value);
        let (left, right) = self.key_span(self.whisker_width * 0.5);
        self.base.apply_error_bars_antialiasing(surface, config);
        surface.set_pen(self.whisker_pen);
        surface.draw_line(Line::new(px(d.key, d.lower_quartile), px(d.key, d.minimum)));
        surface.draw_line(Line::new(px(d.key, d.upper_quartile), px(d.key, d.maximum)));
        surface.set_pen(self.whisker_bar_pen);
        surface.draw_line(Line::new(px(left, d.minimum), px(right, d.minimum)));
        surface.draw_line(Line::new(px(left, d.maximum), px(right, d.maximum)));
    }

    fn has_invalid_data(&self) -> bool {
        let d = &self.data;
        [d.key, d.minimum, d.lower_quartile, d.median, d.upper_quartile, d.maximum]
            .iter()
            .chain(&d.outliers)
            .any(|v| !v.is_finite())
    }
}

impl Plottable for StatisticalBox {
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
        if self.has_invalid_data() {
            log::debug!(
                "statistical box '{}' at key {} has invalid data",
                self.base.name(),
                self.data.key
            );
        }
        surface.save();
        surface.set_clip_rect(axes.clip_rect());

        let quartile_box = self.quartile_box(&axes);
        self.base.apply_default_antialiasing(surface, config);
        surface.set_pen(self.base.main_pen());
        surface.set_brush(self.base.main_brush());
        surface.draw_rect(quartile_box);

        // median is clipped to the box
        surface.save();
        surface.set_clip_rect(quartile_box);
        let (left, right) = self.key_span(self.width * 0.5);
        surface.set_pen(self.median_pen);
        surface.draw_line(Line::new(
            axes.coords_to_pixels(left, self.data.median),
            axes.coords_to_pixels(right, self.data.median),
        ));
        surface.restore();

        self.draw_whiskers(surface, &axes, config);

        self.base.apply_scatters_antialiasing(surface, config);
        self.outlier_style.apply_to(surface, self.base.main_pen());
        for &outlier in &self.data.outliers {
            let pos = axes.coords_to_pixels(self.data.key, outlier);
            self.outlier_style.draw_shape_at(surface, pos);
        }
        surface.restore();
    }

    fn draw_legend_icon(&self, surface: &mut dyn DrawingSurface, rect: Rect, config: &PlotConfig) {
        surface.save();
        self.base.apply_default_antialiasing(surface, config);
        surface.set_pen(self.base.pen());
        surface.set_brush(self.base.brush());
        let (w, h) = (rect.width() * 0.67, rect.height() * 0.67);
        let center = rect.center();
        surface.draw_rect(Rect::from_xywh(center.x - w / 2.0, center.y - h / 2.0, w, h));
        surface.restore();
    }

    fn select_test(&self, pos: Point, only_selectable: bool, config: &PlotConfig) -> Option<f64> {
        if only_selectable && !self.base.selectable() {
            return None;
        }
        let axes = self.base.axes().ok()?;
        if !axes.key.axis_rect().contains(pos) {
            return None;
        }
        let (pos_key, pos_value) = axes.pixels_to_coords(pos);
        let (left, right) = self.key_span(self.width * 0.5);
        let d = &self.data;
        if Range::new(left, right).normalized().contains(pos_key)
            && Range::new(d.lower_quartile, d.upper_quartile).normalized().contains(pos_value)
        {
            return Some(config.selection_tolerance * 0.99);
        }
        if Range::new(d.minimum, d.maximum).normalized().contains(pos_value) {
            return Some((axes.key.coord_to_pixel(d.key) - axes.key.coord_to_pixel(pos_key)).abs());
        }
        None
    }

    /// The box's key extent. In a signed domain, a box straddling zero
    /// contributes the half on the admitted side of its key.
    fn key_range(&self, sign_domain: SignDomain) -> Option<Range> {
        let key = self.data.key;
        let (lower, upper) = self.key_span(self.width * 0.5);
        match sign_domain {
            SignDomain::Both => Some(Range::new(lower, upper)),
            SignDomain::Negative if upper < 0.0 => Some(Range::new(lower, upper)),
            SignDomain::Negative if key < 0.0 => Some(Range::new(lower, key)),
            SignDomain::Positive if lower > 0.0 => Some(Range::new(lower, upper)),
            SignDomain::Positive if key > 0.0 => Some(Range::new(key, upper)),
            SignDomain::Negative | SignDomain::Positive => None,
        }
    }

    fn value_range(&self, sign_domain: SignDomain) -> Option<Range> {
        let d = &self.data;
        let mut acc = RangeAccumulator::default();
        [d.maximum, d.upper_quartile, d.median, d.lower_quartile, d.minimum]
            .iter()
            .chain(&d.outliers)
            .filter(|v| !v.is_nan() && sign_domain.admits(**v))
            .for_each(|&v| acc.add(v));
        acc.finish()
    }

    /// Reset key and summary to zero and drop the outliers.
    fn clear_data(&mut self) {
        self.data = StatisticalBoxData::default();
    }
}
