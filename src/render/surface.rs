//! The drawing surface abstraction every plottable and item renders through.

use crate::geometry::{Line, Point, Rect, Transform};
use crate::style::{Brush, PainterPath, Pen, Pixmap};

/// Capabilities of a surface that influence how plottables choose to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceModes {
    /// Output is a vector format (SVG, PDF); segment-wise line drawing would
    /// break dash patterns and bloat the output.
    pub vectorized: bool,
    /// Output is drawn once and not cached as a pixmap.
    pub no_caching: bool,
}

/// A stateful 2D painter.
///
/// Pen, brush, antialiasing, transform and clip persist across calls until
/// changed. `save` pushes that state and `restore` pops it.
pub trait DrawingSurface {
    /// Current pen.
    fn pen(&self) -> Pen;

    /// Replace the pen.
    fn set_pen(&mut self, pen: Pen);

    /// Current brush.
    fn brush(&self) -> Brush;

    /// Replace the brush.
    fn set_brush(&mut self, brush: Brush);

    /// Whether antialiasing is on.
    fn antialiasing(&self) -> bool;

    /// Turn antialiasing on or off.
    fn set_antialiasing(&mut self, enabled: bool);

    /// Output capabilities.
    fn modes(&self) -> SurfaceModes;

    /// Push the current state.
    fn save(&mut self);

    /// Pop the most recently saved state.
    fn restore(&mut self);

    /// Current coordinate transform.
    fn transform(&self) -> Transform;

    /// Replace the coordinate transform.
    fn set_transform(&mut self, transform: Transform);

    /// Translate subsequent drawing.
    fn translate(&mut self, dx: f64, dy: f64) {
        let t = self.transform().translated(dx, dy);
        self.set_transform(t);
    }

    /// Scale subsequent drawing.
    fn scale(&mut self, sx: f64, sy: f64) {
        let t = self.transform().scaled(sx, sy);
        self.set_transform(t);
    }

    /// Active clip rectangle in device pixels, `None` when unclipped.
    fn clip_rect(&self) -> Option<Rect>;

    /// Intersect the clip with `rect` (given in device pixels).
    fn set_clip_rect(&mut self, rect: Rect);

    /// Stroke a line with the pen.
    fn draw_line(&mut self, line: Line);

    /// Stroke connected segments with the pen.
    fn draw_polyline(&mut self, points: &[Point]);

    /// Fill with the brush and stroke with the pen a closed polygon.
    fn draw_polygon(&mut self, points: &[Point]);

    /// Fill and stroke a path.
    fn draw_path(&mut self, path: &PainterPath);

    /// Fill and stroke a rectangle.
    fn draw_rect(&mut self, rect: Rect);

    /// Fill and stroke an ellipse.
    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64);

    /// Draw a pixmap with its top-left corner at `top_left`.
    fn draw_pixmap(&mut self, top_left: Point, pixmap: &Pixmap);

    /// Fill a rectangle with `brush` without stroking and without changing
    /// the current pen or brush.
    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.save();
        self.set_pen(Pen::NONE);
        self.set_brush(brush);
        self.draw_rect(rect);
        self.restore();
    }
}

/// The state a surface saves and restores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    /// Stroke.
    pub pen: Pen,
    /// Fill.
    pub brush: Brush,
    /// Antialiasing switch.
    pub antialiasing: bool,
    /// Coordinate transform.
    pub transform: Transform,
    /// Clip in device pixels.
    pub clip: Option<Rect>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            pen: Pen::default(),
            brush: Brush::NONE,
            antialiasing: false,
            transform: Transform::IDENTITY,
            clip: None,
        }
    }
}

/// Current surface state plus the stack of saved states; shared by the
/// surface implementations in this crate.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: SurfaceState,
    saved: Vec<SurfaceState>,
}

impl StateStack {
    /// Current state.
    pub fn current(&self) -> &SurfaceState {
        &self.current
    }

    /// Mutable current state.
    pub fn current_mut(&mut self) -> &mut SurfaceState {
        &mut self.current
    }

    /// Push a copy of the current state.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state; unbalanced calls are logged and ignored.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.current = state,
            None => log::warn!("restore called without matching save"),
        }
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Intersect the clip with `rect`. An empty intersection clips everything.
    pub fn clip_to(&mut self, rect: Rect) {
        let rect = rect.normalized();
        self.current.clip = Some(match self.current.clip {
            Some(clip) => clip
                .intersected(&rect)
                .unwrap_or_else(|| Rect::new(rect.left, rect.top, rect.left, rect.top)),
            None => rect,
        });
    }

    /// Map a point through the current transform.
    pub fn map(&self, p: Point) -> Point {
        self.current.transform.map(p)
    }

    /// Map a slice of points through the current transform.
    pub fn map_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.map(*p)).collect()
    }
}
