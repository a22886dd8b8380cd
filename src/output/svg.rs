//! SVG output surface.
//!
//! Implements [`DrawingSurface`] by collecting SVG elements in device
//! coordinates. Clip rectangles become `<clipPath>` definitions, pixmaps are
//! embedded as base64 PNG images.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Line, Point, Rect, Transform};
use crate::render::{DrawingSurface, StateStack, SurfaceModes};
use crate::style::{Brush, PainterPath, Pen, Pixmap};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Stroke, fill and clip attributes shared by all shape elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Stroke, `None` when the pen draws nothing.
    pub stroke: Option<Pen>,
    /// Fill color, `None` when the brush fills nothing.
    pub fill: Option<Rgba>,
    /// Index of the `<clipPath>` definition.
    pub clip: Option<usize>,
    /// Render without antialiasing.
    pub crisp: bool,
}

impl Paint {
    fn is_visible(&self) -> bool {
        self.stroke.is_some() || self.fill.is_some()
    }
}

/// An SVG element in device coordinates.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        paint: Paint,
    },
    /// Polyline, or polygon when closed
    Polyline {
        points: Vec<Point>,
        closed: bool,
        paint: Paint,
    },
    /// Path (SVG path data)
    Path { d: String, paint: Paint },
    /// Rectangle
    Rect { rect: Rect, paint: Paint },
    /// Ellipse
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        paint: Paint,
    },
    /// Embedded raster image (base64 PNG data URI)
    Image {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
        data: String,
        clip: Option<usize>,
    },
}

/// Vector drawing surface producing an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    state: StateStack,
    elements: Vec<SvgElement>,
    /// Distinct clip rects, referenced by index as `clip{index}`.
    clips: Vec<Rect>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl SvgSurface {
    /// Create an empty document with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            state: StateStack::default(),
            elements: Vec::new(),
            clips: Vec::new(),
        }
    }

    /// Create a document showing a rendered pixmap as an embedded image.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_pixmap(pixmap: &Pixmap) -> Result<Self> {
        let mut surface = Self::new(pixmap.width(), pixmap.height());
        // the image provides the background
        surface.background = None;
        surface.elements.push(SvgElement::Image {
            x: 0.0,
            y: 0.0,
            width: pixmap.width(),
            height: pixmap.height(),
            data: png_data_uri(pixmap)?,
            clip: None,
        });
        Ok(surface)
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// `(width, height)` of the document.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Elements drawn so far.
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if !self.clips.is_empty() {
            svg.push_str("  <defs>\n");
            for (index, clip) in self.clips.iter().enumerate() {
                let _ = writeln!(
                    svg,
                    r#"    <clipPath id="clip{index}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    clip.left,
                    clip.top,
                    clip.width(),
                    clip.height()
                );
            }
            svg.push_str("  </defs>\n");
        }

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }

    fn clip_index(&mut self) -> Option<usize> {
        let clip = self.state.current().clip?;
        if let Some(index) = self.clips.iter().position(|c| *c == clip) {
            return Some(index);
        }
        self.clips.push(clip);
        Some(self.clips.len() - 1)
    }

    fn paint(&mut self, filled: bool) -> Paint {
        let state = *self.state.current();
        Paint {
            stroke: state.pen.is_visible().then_some(state.pen),
            fill: (filled && state.brush.is_visible()).then_some(state.brush.color),
            clip: self.clip_index(),
            crisp: !state.antialiasing,
        }
    }

    fn push_shape(&mut self, filled: bool, build: impl FnOnce(Paint) -> SvgElement) {
        let paint = self.paint(filled);
        if paint.is_visible() {
            self.elements.push(build(paint));
        }
    }
}

fn png_data_uri(pixmap: &Pixmap) -> Result<String> {
    let png_bytes = super::PngEncoder::to_bytes(pixmap)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png_bytes)))
}

impl DrawingSurface for SvgSurface {
    fn pen(&self) -> Pen {
        self.state.current().pen
    }

    fn set_pen(&mut self, pen: Pen) {
        self.state.current_mut().pen = pen;
    }

    fn brush(&self) -> Brush {
        self.state.current().brush
    }

    fn set_brush(&mut self, brush: Brush) {
        self.state.current_mut().brush = brush;
    }

    fn antialiasing(&self) -> bool {
        self.state.current().antialiasing
    }

    fn set_antialiasing(&mut self, enabled: bool) {
        self.state.current_mut().antialiasing = enabled;
    }

    fn modes(&self) -> SurfaceModes {
        SurfaceModes {
            vectorized: true,
            no_caching: true,
        }
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn transform(&self) -> Transform {
        self.state.current().transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.state.current_mut().transform = transform;
    }

    fn clip_rect(&self) -> Option<Rect> {
        self.state.current().clip
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.state.clip_to(rect);
    }

    fn draw_line(&mut self, line: Line) {
        let (a, b) = (self.state.map(line.start), self.state.map(line.end));
        if a.is_nan() || b.is_nan() {
            return;
        }
        self.push_shape(false, |paint| SvgElement::Line {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            paint,
        });
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        let points = finite_points(self.state.map_all(points));
        if points.len() < 2 {
            return;
        }
        self.push_shape(false, |paint| SvgElement::Polyline {
            points,
            closed: false,
            paint,
        });
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        let points = finite_points(self.state.map_all(points));
        if points.len() < 2 {
            return;
        }
        self.push_shape(true, |paint| SvgElement::Polyline {
            points,
            closed: true,
            paint,
        });
    }

    fn draw_path(&mut self, path: &PainterPath) {
        if path.is_empty() {
            return;
        }
        let d = path.transformed(&self.transform()).to_svg_data();
        self.push_shape(true, |paint| SvgElement::Path { d, paint });
    }

    fn draw_rect(&mut self, rect: Rect) {
        let rect = Rect::from_corners(
            self.state.map(rect.top_left()),
            self.state.map(rect.bottom_right()),
        );
        self.push_shape(true, |paint| SvgElement::Rect { rect, paint });
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        let t = self.transform();
        let c = t.map(center);
        if c.is_nan() {
            return;
        }
        let (rx, ry) = ((rx * t.sx).abs(), (ry * t.sy).abs());
        self.push_shape(true, |paint| SvgElement::Ellipse {
            cx: c.x,
            cy: c.y,
            rx,
            ry,
            paint,
        });
    }

    fn draw_pixmap(&mut self, top_left: Point, pixmap: &Pixmap) {
        let origin = self.state.map(top_left);
        let data = match png_data_uri(pixmap) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("skipping pixmap that could not be encoded: {err}");
                return;
            }
        };
        let clip = self.clip_index();
        self.elements.push(SvgElement::Image {
            x: origin.x,
            y: origin.y,
            width: pixmap.width(),
            height: pixmap.height(),
            data,
            clip,
        });
    }
}

fn finite_points(points: Vec<Point>) -> Vec<Point> {
    if points.iter().all(|p| !p.is_nan()) {
        return points;
    }
    log::debug!("dropping NaN vertices from SVG polyline");
    points.into_iter().filter(|p| !p.is_nan()).collect()
}

/// Attribute string for a paint.
fn paint_attrs(paint: &Paint) -> String {
    let mut attrs = String::new();
    let fill = paint.fill.map_or_else(|| "none".to_string(), Rgba::to_css);
    let _ = write!(attrs, r#" fill="{fill}""#);
    if let Some(pen) = paint.stroke {
        let width = pen.effective_width();
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{width}""#,
            pen.color.to_css()
        );
        if let Some(pattern) = pen.style.dash_pattern() {
            let dashes: Vec<String> = pattern.iter().map(|d| (d * width).to_string()).collect();
            let _ = write!(attrs, r#" stroke-dasharray="{}""#, dashes.join(","));
        }
    }
    if let Some(index) = paint.clip {
        let _ = write!(attrs, r#" clip-path="url(#clip{index})""#);
    }
    if paint.crisp {
        attrs.push_str(r#" shape-rendering="crispEdges""#);
    }
    attrs
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            paint,
        } => format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"{}/>"#,
            paint_attrs(paint)
        ),
        SvgElement::Polyline {
            points,
            closed,
            paint,
        } => {
            let points_str: String = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            let tag = if *closed { "polygon" } else { "polyline" };
            format!(r#"<{tag} points="{points_str}"{}/>"#, paint_attrs(paint))
        }
        SvgElement::Path { d, paint } => {
            format!(r#"<path d="{d}"{}/>"#, paint_attrs(paint))
        }
        SvgElement::Rect { rect, paint } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            rect.left,
            rect.top,
            rect.width(),
            rect.height(),
            paint_attrs(paint)
        ),
        SvgElement::Ellipse {
            cx,
            cy,
            rx,
            ry,
            paint,
        } => format!(
            r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}"{}/>"#,
            paint_attrs(paint)
        ),
        SvgElement::Image {
            x,
            y,
            width,
            height,
            data,
            clip,
        } => {
            let clip_attr = clip
                .map(|index| format!(r#" clip-path="url(#clip{index})""#))
                .unwrap_or_default();
            format!(
                r#"<image x="{x}" y="{y}" width="{width}" height="{height}" xlink:href="{data}"{clip_attr}/>"#
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PenStyle;

    #[test]
    fn test_svg_surface_new() {
        let svg = SvgSurface::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_svg_surface_is_vectorized() {
        let modes = SvgSurface::default().modes();
        assert!(modes.vectorized);
        assert!(modes.no_caching);
    }

    #[test]
    fn test_svg_line() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_pen(Pen::solid(Rgba::BLACK).with_width(2.0));
        surface.draw_line(Line::from_coords(0.0, 0.0, 100.0, 100.0));
        let svg = surface.render();

        assert!(svg.contains(r#"<line x1="0" y1="0" x2="100" y2="100""#));
        assert!(svg.contains("stroke-width=\"2\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_svg_dashed_pen() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_pen(Pen::solid(Rgba::BLACK).with_style(PenStyle::Dash));
        surface.draw_line(Line::from_coords(0.0, 0.0, 10.0, 0.0));
        assert!(surface.render().contains("stroke-dasharray=\"4,2\""));
    }

    #[test]
    fn test_svg_polyline_and_polygon() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
        ];
        let mut surface = SvgSurface::new(100, 100);
        surface.set_pen(Pen::solid(Rgba::GREEN));
        surface.draw_polyline(&points);
        surface.set_brush(Brush::solid(Rgba::RED));
        surface.draw_polygon(&points);
        let svg = surface.render();

        assert!(svg.contains(r#"<polyline points="0,0 50,100 100,0" fill="none""#));
        assert!(svg.contains(r#"<polygon points="0,0 50,100 100,0" fill="rgb(255,0,0)""#));
    }

    #[test]
    fn test_svg_invisible_shapes_are_skipped() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_pen(Pen::NONE);
        surface.draw_line(Line::from_coords(0.0, 0.0, 10.0, 10.0));
        surface.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(surface.elements().is_empty());
    }

    #[test]
    fn test_svg_transform_applies() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_brush(Brush::solid(Rgba::BLUE));
        surface.translate(10.0, 20.0);
        surface.scale(2.0, 2.0);
        surface.draw_rect(Rect::new(1.0, 1.0, 3.0, 2.0));
        surface.draw_ellipse(Point::new(0.0, 0.0), 5.0, 3.0);
        let svg = surface.render();

        assert!(svg.contains(r#"<rect x="12" y="22" width="4" height="2""#));
        assert!(svg.contains(r#"<ellipse cx="10" cy="20" rx="10" ry="6""#));
    }

    #[test]
    fn test_svg_clip_paths_are_shared() {
        let mut surface = SvgSurface::new(100, 100);
        surface.save();
        surface.set_clip_rect(Rect::new(10.0, 10.0, 50.0, 50.0));
        surface.draw_line(Line::from_coords(0.0, 0.0, 100.0, 100.0));
        surface.draw_line(Line::from_coords(100.0, 0.0, 0.0, 100.0));
        surface.restore();
        surface.draw_line(Line::from_coords(0.0, 50.0, 100.0, 50.0));
        let svg = surface.render();

        assert_eq!(svg.matches("<clipPath").count(), 1);
        assert!(svg.contains(r#"<clipPath id="clip0"><rect x="10" y="10" width="40" height="40"/>"#));
        assert_eq!(svg.matches("clip-path=\"url(#clip0)\"").count(), 2);
    }

    #[test]
    fn test_svg_crisp_edges_without_antialiasing() {
        let mut surface = SvgSurface::new(100, 100);
        surface.draw_line(Line::from_coords(0.0, 0.0, 1.0, 1.0));
        surface.set_antialiasing(true);
        surface.draw_line(Line::from_coords(0.0, 0.0, 1.0, 1.0));
        let svg = surface.render();
        assert_eq!(svg.matches("crispEdges").count(), 1);
    }

    #[test]
    fn test_svg_path() {
        let mut path = PainterPath::new();
        path.move_to(Point::new(10.0, 10.0)).line_to(Point::new(90.0, 90.0));
        let mut surface = SvgSurface::new(100, 100);
        surface.draw_path(&path);
        let svg = surface.render();

        assert!(svg.contains("<path"));
        assert!(svg.contains("d=\"M10.000,10.000 L90.000,90.000\""));
    }

    #[test]
    fn test_svg_pixmap_embedded() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(Rgba::RED);
        let mut surface = SvgSurface::new(100, 100);
        surface.draw_pixmap(Point::new(5.0, 6.0), &pixmap);
        let svg = surface.render();

        assert!(svg.contains(r#"<image x="5" y="6" width="2" height="2""#));
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_svg_from_pixmap() {
        let pixmap = Pixmap::new(10, 10).unwrap();
        let svg = SvgSurface::from_pixmap(&pixmap).unwrap().render();

        assert!(svg.contains("<image"));
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_svg_nan_vertices_dropped() {
        let mut surface = SvgSurface::new(100, 100);
        surface.draw_polyline(&[
            Point::new(0.0, 0.0),
            Point::NAN,
            Point::new(10.0, 10.0),
        ]);
        match surface.elements() {
            [SvgElement::Polyline { points, .. }] => assert_eq!(points.len(), 2),
            other => panic!("unexpected elements {other:?}"),
        }
    }

    #[test]
    fn test_svg_write_to_file() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_brush(Brush::solid(Rgba::BLUE));
        surface.draw_rect(Rect::new(10.0, 10.0, 90.0, 90.0));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        surface.write_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("</svg>"));
    }
}
