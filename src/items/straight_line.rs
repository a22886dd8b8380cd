//! A line through two points, extending infinitely in both directions.

use crate::config::PlotConfig;
use crate::geometry::{dist_to_straight_line, rect_clipped_straight_line, Point};
use crate::items::{clip_rect, Item, ItemBase, ItemPosition};
use crate::render::DrawingSurface;

/// Infinite straight line through `point1` and `point2`.
#[derive(Debug, Clone)]
pub struct StraightLine {
    base: ItemBase,
    point1: ItemPosition,
    point2: ItemPosition,
}

impl Default for StraightLine {
    fn default() -> Self {
        Self::new(ItemPosition::absolute(0.0, 0.0), ItemPosition::absolute(1.0, 1.0))
    }
}

impl StraightLine {
    /// Line through the two positions with a black pen.
    pub fn new(point1: ItemPosition, point2: ItemPosition) -> Self {
        Self {
            base: ItemBase::default(),
            point1,
            point2,
        }
    }

    /// First defining position.
    pub fn point1(&self) -> &ItemPosition {
        &self.point1
    }

    /// Mutable first defining position.
    pub fn point1_mut(&mut self) -> &mut ItemPosition {
        &mut self.point1
    }

    /// Second defining position.
    pub fn point2(&self) -> &ItemPosition {
        &self.point2
    }

    /// Mutable second defining position.
    pub fn point2_mut(&mut self) -> &mut ItemPosition {
        &mut self.point2
    }

    fn base_and_direction(&self) -> Option<(Point, Point)> {
        let start = self.point1.pixel_point().ok()?;
        let end = self.point2.pixel_point().ok()?;
        Some((start, end - start))
    }
}

impl Item for StraightLine {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        let Some((base, vec)) = self.base_and_direction() else {
            return;
        };
        let pen = self.base.main_pen();
        let clip = clip_rect(surface, config).padded(pen.width);
        if let Some(line) = rect_clipped_straight_line(base, vec, &clip) {
            surface.save();
            self.base.apply_antialiasing(surface, config);
            surface.set_pen(pen);
            surface.draw_line(line);
            surface.restore();
        }
    }

    fn select_test(&self, pos: Point, only_selectable: bool, _config: &PlotConfig) -> Option<f64> {
        if self.base.rejects_selection(only_selectable) {
            return None;
        }
        let (base, vec) = self.base_and_direction()?;
        dist_to_straight_line(base, vec, pos)
    }
}
