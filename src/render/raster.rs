//! Software rasterizer surface drawing into a [`Pixmap`].
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line** when antialiasing is on
//! - **Bresenham's Line** otherwise
//! - **Even-odd scanline fill** for polygons, rectangles, ellipses and paths
//!
//! Dash patterns are rasterized as solid strokes.
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Line, Point, Rect, Transform};
use crate::render::surface::{DrawingSurface, StateStack, SurfaceModes};
use crate::style::{Brush, PainterPath, PathElement, Pen, Pixmap};

/// Line segments per quarter of an ellipse or per Bézier curve when
/// flattening.
const FLATTEN_STEPS: usize = 16;

/// Surface that rasterizes into an RGBA pixmap.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    target: Pixmap,
    state: StateStack,
}

impl RasterSurface {
    /// Create a transparent raster surface.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            target: Pixmap::new(width, height)?,
            state: StateStack::default(),
        })
    }

    /// Fill every pixel with `color`, ignoring the clip.
    pub fn clear(&mut self, color: Rgba) {
        self.target.fill(color);
    }

    /// Rendered image.
    pub fn pixmap(&self) -> &Pixmap {
        &self.target
    }

    /// Consume the surface and return the rendered image.
    pub fn into_pixmap(self) -> Pixmap {
        self.target
    }

    fn device_bounds(&self) -> Rect {
        let full = Rect::new(
            0.0,
            0.0,
            f64::from(self.target.width()),
            f64::from(self.target.height()),
        );
        match self.state.current().clip {
            Some(clip) => full.intersected(&clip).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
            None => full,
        }
    }

    /// Blend one pixel if it lies inside the clip.
    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: Rgba, intensity: f64) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(clip) = self.state.current().clip {
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            if px < clip.left || px > clip.right || py < clip.top || py > clip.bottom {
                return;
            }
        }
        let alpha = (f64::from(color.a) * intensity.clamp(0.0, 1.0)).round() as u8;
        if alpha > 0 {
            self.target.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
        }
    }

    /// Bresenham line between device points.
    fn line_aliased(&mut self, a: Point, b: Point, color: Rgba) {
        let (x0, y0) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.plot(x, y, color, 1.0);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Wu line between device points.
    fn line_antialiased(&mut self, a: Point, b: Point, color: Rgba) {
        let steep = (b.y - a.y).abs() > (b.x - a.x).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (a.y, a.x, b.y, b.x)
        } else {
            (a.x, a.y, b.x, b.y)
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        let dx = x1 - x0;
        let gradient = if dx.abs() < f64::EPSILON {
            1.0
        } else {
            (y1 - y0) / dx
        };
        let put = |s: &mut Self, major: i64, minor: i64, intensity: f64| {
            if steep {
                s.plot(minor, major, color, intensity);
            } else {
                s.plot(major, minor, color, intensity);
            }
        };

        let xend = x0.round();
        let yend = y0 + gradient * (xend - x0);
        let xgap = rfpart(x0 + 0.5);
        let xpxl1 = xend as i64;
        put(self, xpxl1, yend.floor() as i64, rfpart(yend) * xgap);
        put(self, xpxl1, yend.floor() as i64 + 1, fpart(yend) * xgap);
        let mut intery = yend + gradient;

        let xend = x1.round();
        let yend = y1 + gradient * (xend - x1);
        let xgap = fpart(x1 + 0.5);
        let xpxl2 = xend as i64;
        put(self, xpxl2, yend.floor() as i64, rfpart(yend) * xgap);
        put(self, xpxl2, yend.floor() as i64 + 1, fpart(yend) * xgap);

        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i64;
            put(self, x, ipart, rfpart(intery));
            put(self, x, ipart + 1, fpart(intery));
            intery += gradient;
        }
    }

    /// Stroke a device-space segment with the current pen.
    fn stroke_segment(&mut self, a: Point, b: Point) {
        let pen = self.state.current().pen;
        if !pen.is_visible() || a.is_nan() || b.is_nan() {
            return;
        }
        let width = pen.effective_width();
        let normal = (b - a).perpendicular().normalized();
        // thick pens are built from parallel one-pixel passes
        let passes = width.round().max(1.0) as i64;
        for i in 0..passes {
            let offset = i as f64 - (passes - 1) as f64 / 2.0;
            let (pa, pb) = (a + normal * offset, b + normal * offset);
            if self.state.current().antialiasing {
                self.line_antialiased(pa, pb, pen.color);
            } else {
                self.line_aliased(pa, pb, pen.color);
            }
        }
    }

    fn stroke_device_polyline(&mut self, points: &[Point], closed: bool) {
        for pair in points.windows(2) {
            self.stroke_segment(pair[0], pair[1]);
        }
        if closed && points.len() > 2 {
            self.stroke_segment(points[points.len() - 1], points[0]);
        }
    }

    /// Even-odd fill of one or more closed device-space rings.
    fn fill_device_rings(&mut self, rings: &[Vec<Point>], brush: Brush) {
        if !brush.is_visible() {
            return;
        }
        let bounds = self.device_bounds();
        let (mut top, mut bottom) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in rings.iter().flatten().filter(|p| !p.is_nan()) {
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }
        let y_start = top.max(bounds.top).floor().max(0.0) as i64;
        let y_end = bottom.min(bounds.bottom).ceil() as i64;
        let mut crossings = Vec::new();
        for y in y_start..y_end {
            let sample = y as f64 + 0.5;
            crossings.clear();
            for ring in rings {
                let n = ring.len();
                for i in 0..n {
                    let (a, b) = (ring[i], ring[(i + 1) % n]);
                    if a.is_nan() || b.is_nan() {
                        continue;
                    }
                    if (a.y <= sample) != (b.y <= sample) {
                        crossings.push(a.x + (sample - a.y) / (b.y - a.y) * (b.x - a.x));
                    }
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                let x_start = (span[0] - 0.5).ceil().max(bounds.left.floor()) as i64;
                let x_end = (span[1] - 0.5).floor().min(bounds.right.ceil() - 1.0) as i64;
                for x in x_start..=x_end {
                    self.plot(x, y, brush.color, 1.0);
                }
            }
        }
    }

    fn fill_and_stroke(&mut self, rings: &[Vec<Point>], closed: bool) {
        let brush = self.state.current().brush;
        self.fill_device_rings(rings, brush);
        for ring in rings {
            self.stroke_device_polyline(ring, closed);
        }
    }
}

#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

/// Flatten a path into device-space rings, one per subpath.
fn flatten_path(path: &PainterPath, transform: &Transform) -> (Vec<Vec<Point>>, bool) {
    let mut rings: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut closed = false;
    for element in path.elements() {
        match *element {
            PathElement::MoveTo(p) => {
                if current.len() > 1 {
                    rings.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push(transform.map(p));
            }
            PathElement::LineTo(p) => current.push(transform.map(p)),
            PathElement::CubicTo(c1, c2, end) => {
                let start = current.last().copied().unwrap_or_else(|| transform.map(c1));
                let (c1, c2, end) = (transform.map(c1), transform.map(c2), transform.map(end));
                for step in 1..=FLATTEN_STEPS {
                    let t = step as f64 / FLATTEN_STEPS as f64;
                    let u = 1.0 - t;
                    current.push(
                        start * (u * u * u)
                            + c1 * (3.0 * u * u * t)
                            + c2 * (3.0 * u * t * t)
                            + end * (t * t * t),
                    );
                }
            }
            PathElement::Close => closed = true,
        }
    }
    if current.len() > 1 {
        rings.push(current);
    }
    (rings, closed)
}

impl DrawingSurface for RasterSurface {
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
        SurfaceModes::default()
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
        self.stroke_segment(a, b);
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        let points = self.state.map_all(points);
        self.stroke_device_polyline(&points, false);
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        let ring = self.state.map_all(points);
        self.fill_and_stroke(&[ring], true);
    }

    fn draw_path(&mut self, path: &PainterPath) {
        let (rings, closed) = flatten_path(path, &self.transform());
        let brush = self.state.current().brush;
        self.fill_device_rings(&rings, brush);
        for ring in &rings {
            self.stroke_device_polyline(ring, closed);
        }
    }

    fn draw_rect(&mut self, rect: Rect) {
        let ring = self.state.map_all(&[
            rect.top_left(),
            rect.top_right(),
            rect.bottom_right(),
            rect.bottom_left(),
        ]);
        self.fill_and_stroke(&[ring], true);
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        let steps = FLATTEN_STEPS * 4;
        let ring: Vec<Point> = (0..steps)
            .map(|i| {
                let angle = i as f64 / steps as f64 * std::f64::consts::TAU;
                self.state.map(Point::new(
                    center.x + rx * angle.cos(),
                    center.y + ry * angle.sin(),
                ))
            })
            .collect();
        self.fill_and_stroke(&[ring], true);
    }

    fn draw_pixmap(&mut self, top_left: Point, pixmap: &Pixmap) {
        let origin = self.state.map(top_left).rounded();
        for y in 0..pixmap.height() {
            for x in 0..pixmap.width() {
                if let Some(color) = pixmap.get_pixel(x, y) {
                    self.plot(
                        origin.x as i64 + i64::from(x),
                        origin.y as i64 + i64::from(y),
                        color,
                        1.0,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> RasterSurface {
        let mut s = RasterSurface::new(100, 100).expect("surface creation should succeed");
        s.clear(Rgba::WHITE);
        s
    }

    #[test]
    fn test_line_horizontal() {
        let mut s = surface();
        s.set_pen(Pen::solid(Rgba::BLACK));
        s.draw_line(Line::from_coords(10.0, 50.0, 90.0, 50.0));
        assert_eq!(s.pixmap().get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(s.pixmap().get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(s.pixmap().get_pixel(90, 50), Some(Rgba::BLACK));
        assert_eq!(s.pixmap().get_pixel(50, 52), Some(Rgba::WHITE));
    }

    #[test]
    fn test_line_antialiased_touches_pixels() {
        let mut s = surface();
        s.set_antialiasing(true);
        s.set_pen(Pen::solid(Rgba::BLACK));
        s.draw_line(Line::from_coords(10.0, 10.0, 90.0, 60.0));
        let px = s.pixmap().get_pixel(50, 35).unwrap();
        assert!(px.r < 255);
    }

    #[test]
    fn test_no_pen_draws_nothing() {
        let mut s = surface();
        s.set_pen(Pen::NONE);
        s.draw_line(Line::from_coords(0.0, 0.0, 99.0, 99.0));
        assert!(s.pixmap().pixels().chunks_exact(4).all(|p| p == Rgba::WHITE.to_array()));
    }

    #[test]
    fn test_rect_fill_respects_clip() {
        let mut s = surface();
        s.set_pen(Pen::NONE);
        s.set_brush(Brush::solid(Rgba::RED));
        s.set_clip_rect(Rect::new(0.0, 0.0, 50.0, 100.0));
        s.draw_rect(Rect::new(20.0, 20.0, 80.0, 80.0));
        assert_eq!(s.pixmap().get_pixel(30, 30), Some(Rgba::RED));
        assert_eq!(s.pixmap().get_pixel(60, 30), Some(Rgba::WHITE));
        assert_eq!(s.pixmap().get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_ellipse_fill() {
        let mut s = surface();
        s.set_pen(Pen::NONE);
        s.set_brush(Brush::solid(Rgba::BLUE));
        s.draw_ellipse(Point::new(50.0, 50.0), 10.0, 10.0);
        assert_eq!(s.pixmap().get_pixel(50, 50), Some(Rgba::BLUE));
        assert_eq!(s.pixmap().get_pixel(50, 70), Some(Rgba::WHITE));
    }

    #[test]
    fn test_pixmap_blit_with_translation() {
        let mut s = surface();
        let mut pm = Pixmap::new(2, 2).unwrap();
        pm.fill(Rgba::GREEN);
        s.translate(5.0, 5.0);
        s.draw_pixmap(Point::new(1.0, 1.0), &pm);
        assert_eq!(s.pixmap().get_pixel(6, 6), Some(Rgba::GREEN));
        assert_eq!(s.pixmap().get_pixel(7, 7), Some(Rgba::GREEN));
        assert_eq!(s.pixmap().get_pixel(8, 8), Some(Rgba::WHITE));
    }

    #[test]
    fn test_path_fill() {
        let mut s = surface();
        s.set_pen(Pen::NONE);
        s.set_brush(Brush::solid(Rgba::RED));
        let mut path = PainterPath::new();
        path.move_to(Point::new(10.0, 10.0))
            .line_to(Point::new(40.0, 10.0))
            .line_to(Point::new(40.0, 40.0))
            .line_to(Point::new(10.0, 40.0))
            .close();
        s.draw_path(&path);
        assert_eq!(s.pixmap().get_pixel(25, 25), Some(Rgba::RED));
        assert_eq!(s.pixmap().get_pixel(45, 25), Some(Rgba::WHITE));
    }

    #[test]
    fn test_raster_is_not_vectorized() {
        assert!(!surface().modes().vectorized);
    }
}
