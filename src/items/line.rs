//! A segment between two positions, optionally with arrow heads.

use crate::config::PlotConfig;
use crate::geometry::{dist_sqr_to_segment, rect_clipped_line, Point};
use crate::items::{clip_rect, Item, ItemBase, ItemPosition};
use crate::render::DrawingSurface;
use crate::style::LineEnding;

/// Line from `start` to `end`. The head decorates `end`, the tail `start`.
#[derive(Debug, Clone)]
pub struct LineItem {
    base: ItemBase,
    start: ItemPosition,
    end: ItemPosition,
    head: LineEnding,
    tail: LineEnding,
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new(ItemPosition::absolute(0.0, 0.0), ItemPosition::absolute(1.0, 1.0))
    }
}

impl LineItem {
    /// Undecorated line with a black pen.
    pub fn new(start: ItemPosition, end: ItemPosition) -> Self {
        Self {
            base: ItemBase::default(),
            start,
            end,
            head: LineEnding::default(),
            tail: LineEnding::default(),
        }
    }

    /// Start position.
    pub fn start(&self) -> &ItemPosition {
        &self.start
    }

    /// Mutable start position.
    pub fn start_mut(&mut self) -> &mut ItemPosition {
        &mut self.start
    }

    /// End position.
    pub fn end(&self) -> &ItemPosition {
        &self.end
    }

    /// Mutable end position.
    pub fn end_mut(&mut self) -> &mut ItemPosition {
        &mut self.end
    }

    /// Ending at `end`.
    pub fn head(&self) -> LineEnding {
        self.head
    }

    /// Set the ending at `end`.
    pub fn set_head(&mut self, head: impl Into<LineEnding>) {
        self.head = head.into();
    }

    /// Ending at `start`.
    pub fn tail(&self) -> LineEnding {
        self.tail
    }

    /// Set the ending at `start`.
    pub fn set_tail(&mut self, tail: impl Into<LineEnding>) {
        self.tail = tail.into();
    }

    fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.start.pixel_point().ok()?, self.end.pixel_point().ok()?))
    }
}

impl Item for LineItem {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        let Some((start, end)) = self.endpoints() else {
            return;
        };
        if start.rounded() == end.rounded() {
            return;
        }
        let pen = self.base.main_pen();
        let pad = self
            .head
            .bounding_distance()
            .max(self.tail.bounding_distance())
            .max(pen.width);
        let Some(line) = rect_clipped_line(start, end, &clip_rect(surface, config).padded(pad))
        else {
            return;
        };
        surface.save();
        self.base.apply_antialiasing(surface, config);
        surface.set_pen(pen);
        surface.draw_line(line);
        if !self.tail.is_none() {
            self.tail.draw(surface, start, start - end);
        }
        if !self.head.is_none() {
            self.head.draw(surface, end, end - start);
        }
        surface.restore();
    }

    fn select_test(&self, pos: Point, only_selectable: bool, _config: &PlotConfig) -> Option<f64> {
        if self.base.rejects_selection(only_selectable) {
            return None;
        }
        let (start, end) = self.endpoints()?;
        Some(dist_sqr_to_segment(start, end, pos).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::geometry::{Line, Rect};
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::style::{LineEndingStyle, Pen};

    fn surface() -> RecordingSurface {
        RecordingSurface::new().with_clip(Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn test_draw_line_with_head() {
        let mut item = LineItem::new(
            ItemPosition::absolute(10.0, 10.0),
            ItemPosition::absolute(50.0, 10.0),
        );
        item.set_head(LineEndingStyle::FlatArrow);
        item.base_mut().set_pen(Pen::solid(Rgba::RED));
        let mut surface = surface();
        item.draw(&mut surface, &PlotConfig::default());
        let commands: Vec<&DrawCommand> = surface.commands().collect();
        assert_eq!(commands.len(), 2);
        match commands[0] {
            DrawCommand::Line { line, .. } => {
                assert_eq!(*line, Line::from_coords(10.0, 10.0, 50.0, 10.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
        match commands[1] {
            DrawCommand::Polygon { points, brush, .. } => {
                assert_eq!(points[0], Point::new(50.0, 10.0));
                assert_eq!(brush.color, Rgba::RED);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_tail_points_backwards() {
        let mut item = LineItem::new(
            ItemPosition::absolute(10.0, 10.0),
            ItemPosition::absolute(50.0, 10.0),
        );
        item.set_tail(LineEnding::new(LineEndingStyle::FlatArrow).with_length(4.0));
        let mut surface = surface();
        item.draw(&mut surface, &PlotConfig::default());
        match surface.commands().nth(1) {
            Some(DrawCommand::Polygon { points, .. }) => {
                assert_eq!(points[0], Point::new(10.0, 10.0));
                assert_eq!(points[1].x, 14.0);
            }
            other => panic!("unexpected command {other:?}"),
        };
    }

    #[test]
    fn test_draw_clips_to_padded_rect() {
        let item = LineItem::new(
            ItemPosition::absolute(50.0, 50.0),
            ItemPosition::absolute(500.0, 50.0),
        );
        let mut surface = surface();
        item.draw(&mut surface, &PlotConfig::default());
        match surface.commands().next() {
            Some(DrawCommand::Line { line, .. }) => {
                let ends = [line.start, line.end];
                assert!(ends.contains(&Point::new(50.0, 50.0)));
                assert!(ends.contains(&Point::new(101.0, 50.0)));
            }
            other => panic!("unexpected command {other:?}"),
        };
    }

    #[test]
    fn test_same_pixel_draws_nothing() {
        let item = LineItem::new(
            ItemPosition::absolute(10.2, 10.0),
            ItemPosition::absolute(9.8, 10.1),
        );
        let mut surface = surface();
        item.draw(&mut surface, &PlotConfig::default());
        assert!(surface.records().is_empty());
    }

    #[test]
    fn test_select_test_segment_distance() {
        let item = LineItem::new(
            ItemPosition::absolute(0.0, 0.0),
            ItemPosition::absolute(10.0, 0.0),
        );
        let config = PlotConfig::default();
        assert_eq!(item.select_test(Point::new(5.0, 3.0), false, &config), Some(3.0));
        assert_eq!(item.select_test(Point::new(14.0, 3.0), false, &config), Some(5.0));
    }
}
