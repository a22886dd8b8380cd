//! Scatter markers drawn at data points.
//!
//! A [`ScatterStyle`] bundles a marker shape with its size, pen, brush and,
//! for the pixmap and custom shapes, the image or path to draw. Plottables
//! call [`ScatterStyle::apply_to`] once and then [`ScatterStyle::draw_shape`]
//! for every point.

use crate::color::Rgba;
use crate::geometry::{Line, Point, Rect};
use crate::render::DrawingSurface;
use crate::style::{Brush, PainterPath, Pen, PenStyle, Pixmap};

/// Marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScatterShape {
    /// No marker.
    #[default]
    None,
    /// A single pixel.
    Dot,
    /// An x.
    Cross,
    /// A +.
    Plus,
    /// Circle outline.
    Circle,
    /// Circle filled with the pen color.
    Disc,
    /// Square.
    Square,
    /// Diamond outline.
    Diamond,
    /// Plus and cross combined.
    Star,
    /// Upward triangle.
    Triangle,
    /// Downward triangle.
    TriangleInverted,
    /// Square with a cross inside.
    CrossSquare,
    /// Square with a plus inside.
    PlusSquare,
    /// Circle with a cross inside.
    CrossCircle,
    /// Circle with a plus inside.
    PlusCircle,
    /// Peace sign.
    Peace,
    /// The style's pixmap, centered on the point.
    Pixmap,
    /// The style's custom path, scaled by `size / 6`.
    Custom,
}

/// Visual description of a scatter marker.
///
/// The pen may be left undefined, in which case the pen passed to
/// [`apply_to`](Self::apply_to) is used. This lets a plottable draw markers in
/// its line color without the style knowing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterStyle {
    shape: ScatterShape,
    size: f64,
    pen: Pen,
    brush: Brush,
    pen_defined: bool,
    pixmap: Option<Pixmap>,
    custom_path: PainterPath,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self::new(ScatterShape::None, 6.0)
    }
}

impl ScatterStyle {
    /// Shape and size with undefined pen and no brush.
    #[must_use]
    pub fn new(shape: ScatterShape, size: f64) -> Self {
        Self {
            shape,
            size,
            pen: Pen::NONE,
            brush: Brush::NONE,
            pen_defined: false,
            pixmap: None,
            custom_path: PainterPath::new(),
        }
    }

    /// Outline in `color`, no fill.
    #[must_use]
    pub fn with_color(shape: ScatterShape, color: Rgba, size: f64) -> Self {
        Self {
            pen: Pen::solid(color),
            pen_defined: true,
            ..Self::new(shape, size)
        }
    }

    /// Outline in `color`, solid `fill`.
    #[must_use]
    pub fn with_fill(shape: ScatterShape, color: Rgba, fill: Rgba, size: f64) -> Self {
        Self {
            brush: Brush::solid(fill),
            ..Self::with_color(shape, color, size)
        }
    }

    /// Explicit pen and brush. The pen counts as defined unless its style is
    /// [`PenStyle::NoPen`].
    #[must_use]
    pub fn with_pen_brush(shape: ScatterShape, pen: Pen, brush: Brush, size: f64) -> Self {
        Self {
            pen,
            brush,
            pen_defined: pen.style != PenStyle::NoPen,
            ..Self::new(shape, size)
        }
    }

    /// Draw `pixmap` at every point.
    #[must_use]
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap: Some(pixmap),
            ..Self::new(ScatterShape::Pixmap, 5.0)
        }
    }

    /// Draw `path` at every point, scaled so that a 6-unit path spans `size`
    /// pixels.
    #[must_use]
    pub fn from_custom_path(path: PainterPath, pen: Pen, brush: Brush, size: f64) -> Self {
        Self {
            custom_path: path,
            ..Self::with_pen_brush(ScatterShape::Custom, pen, brush, size)
        }
    }

    /// Marker shape.
    #[must_use]
    pub fn shape(&self) -> ScatterShape {
        self.shape
    }

    /// Pixel diameter of the marker.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Own pen; only meaningful if [`is_pen_defined`](Self::is_pen_defined).
    #[must_use]
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Fill brush.
    #[must_use]
    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Image for [`ScatterShape::Pixmap`].
    #[must_use]
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Path for [`ScatterShape::Custom`].
    #[must_use]
    pub fn custom_path(&self) -> &PainterPath {
        &self.custom_path
    }

    /// Whether the style carries its own pen.
    #[must_use]
    pub fn is_pen_defined(&self) -> bool {
        self.pen_defined
    }

    /// Whether no marker is drawn.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.shape == ScatterShape::None
    }

    /// Set the pixel diameter.
    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    /// Set the marker shape.
    pub fn set_shape(&mut self, shape: ScatterShape) {
        self.shape = shape;
    }

    /// Set the pen; the pen counts as defined afterwards, even [`Pen::NONE`].
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen_defined = true;
        self.pen = pen;
    }

    /// Set the fill brush.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Set the image and switch to [`ScatterShape::Pixmap`].
    pub fn set_pixmap(&mut self, pixmap: Pixmap) {
        self.shape = ScatterShape::Pixmap;
        self.pixmap = Some(pixmap);
    }

    /// Set the path and switch to [`ScatterShape::Custom`].
    pub fn set_custom_path(&mut self, path: PainterPath) {
        self.shape = ScatterShape::Custom;
        self.custom_path = path;
    }

    /// Load pen and brush into `surface`. An undefined pen falls back to
    /// `default_pen`; the brush is never inherited.
    pub fn apply_to(&self, surface: &mut dyn DrawingSurface, default_pen: Pen) {
        surface.set_pen(if self.pen_defined { self.pen } else { default_pen });
        surface.set_brush(self.brush);
    }

    /// Draw one marker centered on `pos` with the surface's current pen and
    /// brush.
    pub fn draw_shape_at(&self, surface: &mut dyn DrawingSurface, pos: Point) {
        self.draw_shape(surface, pos.x, pos.y);
    }

    /// Draw one marker centered on `(x, y)`. Pen and brush are left as they
    /// were.
    pub fn draw_shape(&self, surface: &mut dyn DrawingSurface, x: f64, y: f64) {
        let w = self.size / 2.0;
        let square = Rect::from_xywh(x - w, y - w, self.size, self.size);
        let center = Point::new(x, y);
        match self.shape {
            ScatterShape::None => {}
            ScatterShape::Dot => line(surface, x, y, x + 0.0001, y),
            ScatterShape::Cross => {
                line(surface, x - w, y - w, x + w, y + w);
                line(surface, x - w, y + w, x + w, y - w);
            }
            ScatterShape::Plus => {
                line(surface, x - w, y, x + w, y);
                line(surface, x, y + w, x, y - w);
            }
            ScatterShape::Circle => surface.draw_ellipse(center, w, w),
            ScatterShape::Disc => {
                let brush = surface.brush();
                surface.set_brush(Brush::solid(surface.pen().color));
                surface.draw_ellipse(center, w, w);
                surface.set_brush(brush);
            }
            ScatterShape::Square => surface.draw_rect(square),
            ScatterShape::Diamond => {
                line(surface, x - w, y, x, y - w);
                line(surface, x, y - w, x + w, y);
                line(surface, x + w, y, x, y + w);
                line(surface, x, y + w, x - w, y);
            }
            ScatterShape::Star => {
                let d = w * 0.707;
                line(surface, x - w, y, x + w, y);
                line(surface, x, y + w, x, y - w);
                line(surface, x - d, y - d, x + d, y + d);
                line(surface, x - d, y + d, x + d, y - d);
            }
            ScatterShape::Triangle => {
                let (base, apex) = (y + 0.755 * w, y - 0.977 * w);
                line(surface, x - w, base, x + w, base);
                line(surface, x + w, base, x, apex);
                line(surface, x, apex, x - w, base);
            }
            ScatterShape::TriangleInverted => {
                let (base, apex) = (y - 0.755 * w, y + 0.977 * w);
                line(surface, x - w, base, x + w, base);
                line(surface, x + w, base, x, apex);
                line(surface, x, apex, x - w, base);
            }
            ScatterShape::CrossSquare => {
                line(surface, x - w, y - w, x + w * 0.95, y + w * 0.95);
                line(surface, x - w, y + w * 0.95, x + w * 0.95, y - w);
                surface.draw_rect(square);
            }
            ScatterShape::PlusSquare => {
                line(surface, x - w, y, x + w * 0.95, y);
                line(surface, x, y + w, x, y - w);
                surface.draw_rect(square);
            }
            ScatterShape::CrossCircle => {
                let (a, b) = (w * 0.707, w * 0.670);
                line(surface, x - a, y - a, x + b, y + b);
                line(surface, x - a, y + b, x + b, y - a);
                surface.draw_ellipse(center, w, w);
            }
            ScatterShape::PlusCircle => {
                line(surface, x - w, y, x + w, y);
                line(surface, x, y + w, x, y - w);
                surface.draw_ellipse(center, w, w);
            }
            ScatterShape::Peace => {
                let d = w * 0.707;
                line(surface, x, y - w, x, y + w);
                line(surface, x, y, x - d, y + d);
                line(surface, x, y, x + d, y + d);
                surface.draw_ellipse(center, w, w);
            }
            ScatterShape::Pixmap => {
                if let Some(pixmap) = &self.pixmap {
                    let top_left = Point::new(
                        x - f64::from(pixmap.width()) * 0.5,
                        y - f64::from(pixmap.height()) * 0.5,
                    );
                    surface.draw_pixmap(top_left, pixmap);
                }
            }
            ScatterShape::Custom => {
                let old = surface.transform();
                surface.translate(x, y);
                surface.scale(self.size / 6.0, self.size / 6.0);
                surface.draw_path(&self.custom_path);
                surface.set_transform(old);
            }
        }
    }
}

fn line(surface: &mut dyn DrawingSurface, x0: f64, y0: f64, x1: f64, y1: f64) {
    surface.draw_line(Line::from_coords(x0, y0, x1, y1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_style() {
        let style = ScatterStyle::default();
        assert!(style.is_none());
        assert_eq!(style.size(), 6.0);
        assert!(!style.is_pen_defined());
    }

    #[test]
    fn test_constructors_pen_defined() {
        assert!(!ScatterStyle::new(ScatterShape::Circle, 6.0).is_pen_defined());
        assert!(ScatterStyle::with_color(ScatterShape::Circle, Rgba::RED, 6.0).is_pen_defined());
        let filled = ScatterStyle::with_fill(ScatterShape::Square, Rgba::RED, Rgba::BLUE, 4.0);
        assert!(filled.is_pen_defined());
        assert_eq!(filled.brush(), Brush::solid(Rgba::BLUE));
        assert!(!ScatterStyle::with_pen_brush(ScatterShape::Disc, Pen::NONE, Brush::NONE, 6.0)
            .is_pen_defined());
        let pixmap = ScatterStyle::from_pixmap(Pixmap::new(3, 3).unwrap());
        assert_eq!(pixmap.shape(), ScatterShape::Pixmap);
        assert_eq!(pixmap.size(), 5.0);
    }

    #[test]
    fn test_set_pen_defines_even_none() {
        let mut style = ScatterStyle::new(ScatterShape::Plus, 6.0);
        style.set_pen(Pen::NONE);
        assert!(style.is_pen_defined());
    }

    #[test]
    fn test_setters_force_shape() {
        let mut style = ScatterStyle::default();
        style.set_pixmap(Pixmap::new(1, 1).unwrap());
        assert_eq!(style.shape(), ScatterShape::Pixmap);
        style.set_custom_path(PainterPath::new());
        assert_eq!(style.shape(), ScatterShape::Custom);
    }

    #[test]
    fn test_undefined_pen_inherits_default() {
        let style = ScatterStyle::new(ScatterShape::Circle, 6.0);
        let mut surface = RecordingSurface::new();
        surface.set_brush(Brush::solid(Rgba::GREEN));
        let default_pen = Pen::solid(Rgba::RED).with_width(2.0);
        style.apply_to(&mut surface, default_pen);
        assert_eq!(surface.pen(), default_pen);
        assert_eq!(surface.brush(), Brush::NONE);
    }

    #[test]
    fn test_defined_pen_wins() {
        let style = ScatterStyle::with_color(ScatterShape::Circle, Rgba::BLUE, 6.0);
        let mut surface = RecordingSurface::new();
        style.apply_to(&mut surface, Pen::solid(Rgba::RED));
        assert_eq!(surface.pen().color, Rgba::BLUE);
    }

    #[test]
    fn test_disc_restores_brush() {
        let style = ScatterStyle::new(ScatterShape::Disc, 10.0);
        let mut surface = RecordingSurface::new();
        surface.set_pen(Pen::solid(Rgba::RED));
        style.draw_shape(&mut surface, 5.0, 5.0);
        assert_eq!(surface.brush(), Brush::NONE);
        match surface.commands().next() {
            Some(DrawCommand::Ellipse { rx, brush, .. }) => {
                assert_eq!(*rx, 5.0);
                assert_eq!(brush.color, Rgba::RED);
            }
            other => panic!("unexpected command {other:?}"),
        };
    }

    #[test]
    fn test_shape_command_counts() {
        let counts = [
            (ScatterShape::None, 0),
            (ScatterShape::Dot, 1),
            (ScatterShape::Cross, 2),
            (ScatterShape::Diamond, 4),
            (ScatterShape::Star, 4),
            (ScatterShape::Triangle, 3),
            (ScatterShape::CrossSquare, 3),
            (ScatterShape::Peace, 4),
        ];
        for (shape, expected) in counts {
            let mut surface = RecordingSurface::new();
            ScatterStyle::new(shape, 6.0).draw_shape(&mut surface, 0.0, 0.0);
            assert_eq!(surface.records().len(), expected, "{shape:?}");
        }
    }

    #[test]
    fn test_triangle_geometry() {
        let mut surface = RecordingSurface::new();
        ScatterStyle::new(ScatterShape::Triangle, 10.0).draw_shape(&mut surface, 0.0, 0.0);
        match surface.commands().next() {
            Some(DrawCommand::Line { line, .. }) => {
                assert_relative_eq!(line.start.x, -5.0);
                assert_relative_eq!(line.start.y, 3.775);
                assert_relative_eq!(line.end.y, 3.775);
            }
            other => panic!("unexpected command {other:?}"),
        };
    }

    #[test]
    fn test_pixmap_centered() {
        let style = ScatterStyle::from_pixmap(Pixmap::new(4, 2).unwrap());
        let mut surface = RecordingSurface::new();
        style.draw_shape(&mut surface, 10.0, 10.0);
        assert!(matches!(
            surface.commands().next(),
            Some(DrawCommand::Pixmap { top_left, .. }) if *top_left == Point::new(8.0, 9.0)
        ));
    }

    #[test]
    fn test_custom_path_scaled_and_transform_restored() {
        let mut path = PainterPath::new();
        path.move_to(Point::new(-3.0, 0.0)).line_to(Point::new(3.0, 0.0));
        let style = ScatterStyle::from_custom_path(path, Pen::solid(Rgba::BLACK), Brush::NONE, 12.0);
        let mut surface = RecordingSurface::new();
        style.draw_shape(&mut surface, 100.0, 50.0);
        assert!(surface.transform().is_identity());
        match surface.commands().next() {
            Some(DrawCommand::Path { path, .. }) => {
                assert_eq!(
                    path.elements()[1],
                    crate::style::PathElement::LineTo(Point::new(106.0, 50.0))
                );
            }
            other => panic!("unexpected command {other:?}"),
        };
    }
}
