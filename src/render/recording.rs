//! A surface that records draw calls instead of producing pixels.
//!
//! Useful for testing what plottables and items draw, and as a display list
//! that can be replayed onto another surface.

use crate::geometry::{Line, Point, Rect, Transform};
use crate::render::surface::{DrawingSurface, StateStack, SurfaceModes};
use crate::style::{Brush, PainterPath, Pen, Pixmap};

/// One recorded draw call, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    Line {
        line: Line,
        pen: Pen,
    },
    Polyline {
        points: Vec<Point>,
        pen: Pen,
    },
    Polygon {
        points: Vec<Point>,
        pen: Pen,
        brush: Brush,
    },
    Path {
        path: PainterPath,
        pen: Pen,
        brush: Brush,
    },
    Rect {
        rect: Rect,
        pen: Pen,
        brush: Brush,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        pen: Pen,
        brush: Brush,
    },
    Pixmap {
        top_left: Point,
        pixmap: Pixmap,
    },
}

/// A draw call together with the clip and antialiasing in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    /// The call.
    pub command: DrawCommand,
    /// Device clip rect at the time of the call.
    pub clip: Option<Rect>,
    /// Antialiasing switch at the time of the call.
    pub antialiasing: bool,
}

/// Surface that stores every draw call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: StateStack,
    modes: SurfaceModes,
    records: Vec<Recorded>,
}

impl RecordingSurface {
    /// Create an unclipped raster-like recording surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the given capabilities from [`DrawingSurface::modes`].
    #[must_use]
    pub fn with_modes(mut self, modes: SurfaceModes) -> Self {
        self.modes = modes;
        self
    }

    /// Start with a clip rect.
    #[must_use]
    pub fn with_clip(mut self, rect: Rect) -> Self {
        self.state.clip_to(rect);
        self
    }

    /// All recorded calls.
    pub fn records(&self) -> &[Recorded] {
        &self.records
    }

    /// Recorded commands without their context.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.records.iter().map(|r| &r.command)
    }

    /// Forget all recorded calls; state is kept.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Depth of the save stack, `0` when every save was restored.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    /// Replay the recording onto another surface.
    pub fn replay(&self, target: &mut dyn DrawingSurface) {
        for record in &self.records {
            target.save();
            if let Some(clip) = record.clip {
                target.set_clip_rect(clip);
            }
            target.set_antialiasing(record.antialiasing);
            match &record.command {
                DrawCommand::Line { line, pen } => {
                    target.set_pen(*pen);
                    target.draw_line(*line);
                }
                DrawCommand::Polyline { points, pen } => {
                    target.set_pen(*pen);
                    target.draw_polyline(points);
                }
                DrawCommand::Polygon { points, pen, brush } => {
                    target.set_pen(*pen);
                    target.set_brush(*brush);
                    target.draw_polygon(points);
                }
                DrawCommand::Path { path, pen, brush } => {
                    target.set_pen(*pen);
                    target.set_brush(*brush);
                    target.draw_path(path);
                }
                DrawCommand::Rect { rect, pen, brush } => {
                    target.set_pen(*pen);
                    target.set_brush(*brush);
                    target.draw_rect(*rect);
                }
                DrawCommand::Ellipse {
                    center,
                    rx,
                    ry,
                    pen,
                    brush,
                } => {
                    target.set_pen(*pen);
                    target.set_brush(*brush);
                    target.draw_ellipse(*center, *rx, *ry);
                }
                DrawCommand::Pixmap { top_left, pixmap } => target.draw_pixmap(*top_left, pixmap),
            }
            target.restore();
        }
    }

    fn push(&mut self, command: DrawCommand) {
        let state = self.state.current();
        self.records.push(Recorded {
            command,
            clip: state.clip,
            antialiasing: state.antialiasing,
        });
    }
}

impl DrawingSurface for RecordingSurface {
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
        self.modes
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
        let line = Line::new(self.state.map(line.start), self.state.map(line.end));
        let pen = self.pen();
        self.push(DrawCommand::Line { line, pen });
    }

    fn draw_polyline(&mut self, points: &[Point]) {
        let points = self.state.map_all(points);
        let pen = self.pen();
        self.push(DrawCommand::Polyline { points, pen });
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        let points = self.state.map_all(points);
        let (pen, brush) = (self.pen(), self.brush());
        self.push(DrawCommand::Polygon { points, pen, brush });
    }

    fn draw_path(&mut self, path: &PainterPath) {
        let path = path.transformed(&self.transform());
        let (pen, brush) = (self.pen(), self.brush());
        self.push(DrawCommand::Path { path, pen, brush });
    }

    fn draw_rect(&mut self, rect: Rect) {
        let rect = Rect::from_corners(
            self.state.map(rect.top_left()),
            self.state.map(rect.bottom_right()),
        );
        let (pen, brush) = (self.pen(), self.brush());
        self.push(DrawCommand::Rect { rect, pen, brush });
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        let t = self.transform();
        let (pen, brush) = (self.pen(), self.brush());
        self.push(DrawCommand::Ellipse {
            center: t.map(center),
            rx: rx * t.sx.abs(),
            ry: ry * t.sy.abs(),
            pen,
            brush,
        });
    }

    fn draw_pixmap(&mut self, top_left: Point, pixmap: &Pixmap) {
        let top_left = self.state.map(top_left);
        self.push(DrawCommand::Pixmap {
            top_left,
            pixmap: pixmap.clone(),
        });
    }
}
