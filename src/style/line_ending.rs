//! Decorations drawn at the ends of line items: arrows, bars, discs.

use crate::geometry::{Line, Point};
use crate::render::DrawingSurface;
use crate::style::Brush;

/// Shape of a line ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEndingStyle {
    /// Plain line end.
    #[default]
    None,
    /// Filled triangle.
    FlatArrow,
    /// Filled arrow with an indented back.
    SpikeArrow,
    /// Two strokes forming an open arrow.
    LineArrow,
    /// Filled circle.
    Disc,
    /// Filled square.
    Square,
    /// Filled diamond.
    Diamond,
    /// Perpendicular bar.
    Bar,
    /// Perpendicular bar on one side only.
    HalfBar,
    /// Slightly slanted bar.
    SkewedBar,
}

/// A line ending with its dimensions.
///
/// `width` runs across the line and `length` along it. An inverted ending
/// points back along the line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineEnding {
    /// Shape.
    pub style: LineEndingStyle,
    /// Extent across the line in pixels.
    pub width: f64,
    /// Extent along the line in pixels.
    pub length: f64,
    /// Flip the ending to point back along the line.
    pub inverted: bool,
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::new(LineEndingStyle::None)
    }
}

impl From<LineEndingStyle> for LineEnding {
    fn from(style: LineEndingStyle) -> Self {
        Self::new(style)
    }
}

impl LineEnding {
    /// Ending of `style` with width 8 and length 10.
    #[must_use]
    pub const fn new(style: LineEndingStyle) -> Self {
        Self {
            style,
            width: 8.0,
            length: 10.0,
            inverted: false,
        }
    }

    /// Set the width.
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the length.
    #[must_use]
    pub const fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set the inverted flag.
    #[must_use]
    pub const fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.style == LineEndingStyle::None
    }

    /// Maximum distance from the line end that the decoration may reach.
    /// Used to widen clip rects so endings just outside stay visible.
    #[must_use]
    pub fn bounding_distance(&self) -> f64 {
        match self.style {
            LineEndingStyle::None => 0.0,
            LineEndingStyle::FlatArrow
            | LineEndingStyle::SpikeArrow
            | LineEndingStyle::LineArrow
            | LineEndingStyle::SkewedBar => self.width.hypot(self.length),
            LineEndingStyle::Disc
            | LineEndingStyle::Square
            | LineEndingStyle::Diamond
            | LineEndingStyle::Bar
            | LineEndingStyle::HalfBar => self.width * 1.42,
        }
    }

    /// Draw the ending at `pos`, pointing along `dir`, with the surface's
    /// current pen. Filled shapes use the pen color; the brush is restored.
    pub fn draw(&self, surface: &mut dyn DrawingSurface, pos: Point, dir: Point) {
        if self.is_none() {
            return;
        }
        let sign = if self.inverted { -1.0 } else { 1.0 };
        let mut unit = dir.normalized();
        if unit == Point::ORIGIN {
            unit = Point::new(1.0, 0.0);
        }
        let length_vec = unit * (self.length * sign);
        let width_vec = unit.perpendicular() * (self.width * 0.5 * sign);

        let brush = surface.brush();
        surface.set_brush(Brush::solid(surface.pen().color));
        match self.style {
            LineEndingStyle::None => {}
            LineEndingStyle::FlatArrow => surface.draw_polygon(&[
                pos,
                pos - length_vec + width_vec,
                pos - length_vec - width_vec,
            ]),
            LineEndingStyle::SpikeArrow => surface.draw_polygon(&[
                pos,
                pos - length_vec + width_vec,
                pos - length_vec * 0.8,
                pos - length_vec - width_vec,
            ]),
            LineEndingStyle::LineArrow => surface.draw_polyline(&[
                pos - length_vec + width_vec,
                pos,
                pos - length_vec - width_vec,
            ]),
            LineEndingStyle::Disc => {
                surface.draw_ellipse(pos, self.width * 0.5, self.width * 0.5);
            }
            LineEndingStyle::Square => {
                let across = width_vec.perpendicular();
                surface.draw_polygon(&[
                    pos - width_vec - across,
                    pos - width_vec + across,
                    pos + width_vec + across,
                    pos + width_vec - across,
                ]);
            }
            LineEndingStyle::Diamond => {
                let across = width_vec.perpendicular();
                surface.draw_polygon(&[pos - across, pos - width_vec, pos + across, pos + width_vec]);
            }
            LineEndingStyle::Bar => surface.draw_line(Line::new(pos + width_vec, pos - width_vec)),
            LineEndingStyle::HalfBar => surface.draw_line(Line::new(pos + width_vec, pos)),
            LineEndingStyle::SkewedBar => surface.draw_line(Line::new(
                pos + width_vec + length_vec * 0.2,
                pos - width_vec - length_vec * 0.2,
            )),
        }
        surface.set_brush(brush);
    }
}
