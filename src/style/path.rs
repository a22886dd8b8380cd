//! Vector paths made of line and cubic Bézier segments.

use std::fmt::Write as FmtWrite;

use crate::geometry::{Point, Transform};

/// One element of a [`PainterPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Cubic Bézier from the current point with two control points.
    CubicTo(Point, Point, Point),
    /// Close the current subpath.
    Close,
}

/// A sequence of subpaths, drawn with the current pen and brush.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PainterPath {
    elements: Vec<PathElement>,
}

impl PainterPath {
    /// Create an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subpath at `p`.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.elements.push(PathElement::MoveTo(p));
        self
    }

    /// Add a line to `p`.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.elements.push(PathElement::LineTo(p));
        self
    }

    /// Add a cubic Bézier to `end`.
    pub fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) -> &mut Self {
        self.elements.push(PathElement::CubicTo(c1, c2, end));
        self
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathElement::Close);
        self
    }

    /// Path elements in order.
    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Whether the path has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Copy with every point mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Self {
        let map = |p: Point| transform.map(p);
        let elements = self
            .elements
            .iter()
            .map(|e| match *e {
                PathElement::MoveTo(p) => PathElement::MoveTo(map(p)),
                PathElement::LineTo(p) => PathElement::LineTo(map(p)),
                PathElement::CubicTo(c1, c2, end) => PathElement::CubicTo(map(c1), map(c2), map(end)),
                PathElement::Close => PathElement::Close,
            })
            .collect();
        Self { elements }
    }

    /// SVG path data (`d` attribute).
    #[must_use]
    pub fn to_svg_data(&self) -> String {
        let mut d = String::with_capacity(self.elements.len() * 16);
        for element in &self.elements {
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = match element {
                PathElement::MoveTo(p) => write!(d, "M{:.3},{:.3}", p.x, p.y),
                PathElement::LineTo(p) => write!(d, "L{:.3},{:.3}", p.x, p.y),
                PathElement::CubicTo(c1, c2, e) => write!(
                    d,
                    "C{:.3},{:.3} {:.3},{:.3} {:.3},{:.3}",
                    c1.x, c1.y, c2.x, c2.y, e.x, e.y
                ),
                PathElement::Close => write!(d, "Z"),
            };
        }
        d
    }
}
