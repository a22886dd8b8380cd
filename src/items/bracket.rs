//! Brackets that embrace a span between two positions.
//!
//! The bracket opens away from the span: with `left` to the left of `right`
//! on screen, it opens downward. `length` is how far, in pixels, it reaches
//! from the span.

use crate::config::PlotConfig;
use crate::geometry::{dist_sqr_to_segment, Line, Point, Rect};
use crate::items::{clip_rect, Item, ItemBase, ItemPosition};
use crate::render::DrawingSurface;
use crate::style::{Brush, PainterPath, Pen};

/// Shape of a bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BracketStyle {
    /// Three straight strokes with right angles.
    Square,
    /// Like square, with rounded corners.
    Round,
    /// Curly brace.
    Curly,
    /// Filled curly brace with varying stroke width.
    #[default]
    Calligraphic,
}

/// Pixel-space construction vectors of a bracket.
#[derive(Debug, Clone, Copy)]
struct Frame {
    center: Point,
    width: Point,
    length: Point,
}

/// Bracket item spanning `left` to `right`.
#[derive(Debug, Clone)]
pub struct Bracket {
    base: ItemBase,
    left: ItemPosition,
    right: ItemPosition,
    length: f64,
    style: BracketStyle,
}

impl Default for Bracket {
    fn default() -> Self {
        Self::new(ItemPosition::absolute(0.0, 0.0), ItemPosition::absolute(1.0, 1.0))
    }
}

impl Bracket {
    /// Calligraphic bracket of length 8.
    pub fn new(left: ItemPosition, right: ItemPosition) -> Self {
        Self {
            base: ItemBase::default(),
            left,
            right,
            length: 8.0,
            style: BracketStyle::Calligraphic,
        }
    }

    /// Left end of the span.
    pub fn left(&self) -> &ItemPosition {
        &self.left
    }

    /// Mutable left end of the span.
    pub fn left_mut(&mut self) -> &mut ItemPosition {
        &mut self.left
    }

    /// Right end of the span.
    pub fn right(&self) -> &ItemPosition {
        &self.right
    }

    /// Mutable right end of the span.
    pub fn right_mut(&mut self) -> &mut ItemPosition {
        &mut self.right
    }

    /// Reach from the span in pixels.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Set the reach from the span in pixels. For calligraphic brackets this
    /// also controls the apparent stroke weight.
    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    /// Shape.
    pub fn style(&self) -> BracketStyle {
        self.style
    }

    /// Set the shape.
    pub fn set_style(&mut self, style: BracketStyle) {
        self.style = style;
    }

    /// Pixel position of the bracket tip, where connecting items attach.
    /// A degenerate bracket reports its left position.
    pub fn center(&self) -> Option<Point> {
        let left = self.left.pixel_point().ok()?;
        let right = self.right.pixel_point().ok()?;
        Some(Self::frame(left, right, self.length).map_or(left, |f| f.center))
    }

    fn frame(left: Point, right: Point, length: f64) -> Option<Frame> {
        if left.rounded() == right.rounded() {
            return None;
        }
        let width = (right - left) * 0.5;
        let length = width.perpendicular().normalized() * length;
        Some(Frame {
            center: (left + right) * 0.5 - length,
            width,
            length,
        })
    }

    fn path(&self, f: Frame) -> PainterPath {
        let Frame {
            center: c,
            width: w,
            length: l,
        } = f;
        let mut path = PainterPath::new();
        match self.style {
            BracketStyle::Square => {}
            BracketStyle::Round => {
                path.move_to(c + w + l)
                    .cubic_to(c + w, c + w, c)
                    .cubic_to(c - w, c - w, c - w + l);
            }
            BracketStyle::Curly => {
                path.move_to(c + w + l)
                    .cubic_to(c + w - l * 0.8, c + w * 0.4 + l, c)
                    .cubic_to(c - w * 0.4 + l, c - w - l * 0.8, c - w + l);
            }
            BracketStyle::Calligraphic => {
                path.move_to(c + w + l)
                    .cubic_to(c + w - l * 0.8, c + w * 0.4 + l * 0.8, c)
                    .cubic_to(c - w * 0.4 + l * 0.8, c - w - l * 0.8, c - w + l)
                    .cubic_to(c - w - l * 0.5, c - w * 0.2 + l * 1.2, c + l * 0.2)
                    .cubic_to(c + w * 0.2 + l * 1.2, c + w - l * 0.5, c + w + l);
            }
        }
        path
    }
}

impl Item for Bracket {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        let (Ok(left), Ok(right)) = (self.left.pixel_point(), self.right.pixel_point()) else {
            return;
        };
        let Some(f) = Self::frame(left, right, self.length) else {
            return;
        };
        let pen = self.base.main_pen();
        let corners = [left, right, right - f.length, left - f.length].map(Point::rounded);
        let bounds = corners[1..]
            .iter()
            .fold(Rect::from_corners(corners[0], corners[0]), |r, &p| {
                Rect::new(r.left.min(p.x), r.top.min(p.y), r.right.max(p.x), r.bottom.max(p.y))
            });
        if !clip_rect(surface, config).padded(pen.width).intersects(&bounds) {
            return;
        }

        surface.save();
        self.base.apply_antialiasing(surface, config);
        surface.set_pen(pen);
        let (c, w, l) = (f.center, f.width, f.length);
        match self.style {
            BracketStyle::Square => {
                surface.draw_line(Line::new(c + w, c - w));
                surface.draw_line(Line::new(c + w, c + w + l));
                surface.draw_line(Line::new(c - w, c - w + l));
            }
            BracketStyle::Round | BracketStyle::Curly => {
                surface.set_brush(Brush::NONE);
                surface.draw_path(&self.path(f));
            }
            BracketStyle::Calligraphic => {
                surface.set_pen(Pen::NONE);
                surface.set_brush(Brush::solid(pen.color));
                surface.draw_path(&self.path(f));
            }
        }
        surface.restore();
    }

    fn select_test(&self, pos: Point, only_selectable: bool, _config: &PlotConfig) -> Option<f64> {
        if self.base.rejects_selection(only_selectable) {
            return None;
        }
        let left = self.left.pixel_point().ok()?;
        let right = self.right.pixel_point().ok()?;
        let Frame {
            center: c,
            width: w,
            length: l,
        } = Self::frame(left, right, self.length)?;
        let segments = match self.style {
            BracketStyle::Square | BracketStyle::Round => vec![
                (c - w, c + w),
                (c - w + l, c - w),
                (c + w + l, c + w),
            ],
            BracketStyle::Curly | BracketStyle::Calligraphic => vec![
                (c - w * 0.75 + l * 0.15, c + l * 0.3),
                (c - w + l * 0.7, c - w * 0.75 + l * 0.15),
                (c + w * 0.75 + l * 0.15, c + l * 0.3),
                (c + w + l * 0.7, c + w * 0.75 + l * 0.15),
            ],
        };
        segments
            .iter()
            .map(|&(a, b)| dist_sqr_to_segment(a, b, pos))
            .min_by(f64::total_cmp)
            .map(f64::sqrt)
    }
}
