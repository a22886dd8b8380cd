//! A raster image placed on the plot.
//!
//! Unscaled, the image keeps its own size with its top-left corner at
//! `top_left`. Scaled, it is fitted between `top_left` and `bottom_right`;
//! when `top_left` lies below or to the right of `bottom_right` the image is
//! mirrored accordingly.

use crate::color::Rgba;
use crate::config::PlotConfig;
use crate::geometry::{Point, Rect};
use crate::items::{clip_rect, rect_select_test, Item, ItemBase, ItemPosition};
use crate::render::DrawingSurface;
use crate::style::{scale_size, AspectRatioMode, Brush, Pen, Pixmap};

/// Anchor points on the border of a pixmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PixmapAnchor {
    Top,
    TopRight,
    Right,
    Bottom,
    BottomLeft,
    Left,
}

/// Where and how the image lands in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    rect: Rect,
    flip_horizontal: bool,
    flip_vertical: bool,
}

/// Pixmap item.
#[derive(Debug, Clone)]
pub struct PixmapItem {
    base: ItemBase,
    top_left: ItemPosition,
    bottom_right: ItemPosition,
    pixmap: Option<Pixmap>,
    scaled: bool,
    aspect_ratio_mode: AspectRatioMode,
}

impl Default for PixmapItem {
    fn default() -> Self {
        Self::new(ItemPosition::absolute(0.0, 1.0), ItemPosition::absolute(1.0, 0.0))
    }
}

impl PixmapItem {
    /// Empty, unscaled item without a border.
    pub fn new(top_left: ItemPosition, bottom_right: ItemPosition) -> Self {
        let mut base = ItemBase::default();
        base.set_pen(Pen::NONE);
        base.set_selected_pen(Pen::solid(Rgba::BLUE));
        Self {
            base,
            top_left,
            bottom_right,
            pixmap: None,
            scaled: false,
            aspect_ratio_mode: AspectRatioMode::Keep,
        }
    }

    /// First corner.
    pub fn top_left(&self) -> &ItemPosition {
        &self.top_left
    }

    /// Mutable first corner.
    pub fn top_left_mut(&mut self) -> &mut ItemPosition {
        &mut self.top_left
    }

    /// Second corner; only used when scaling.
    pub fn bottom_right(&self) -> &ItemPosition {
        &self.bottom_right
    }

    /// Mutable second corner.
    pub fn bottom_right_mut(&mut self) -> &mut ItemPosition {
        &mut self.bottom_right
    }

    /// The image, if one was set.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Set the image.
    pub fn set_pixmap(&mut self, pixmap: Pixmap) {
        self.pixmap = Some(pixmap);
    }

    /// Whether the image is fitted between the two corners.
    pub fn scaled(&self) -> bool {
        self.scaled
    }

    /// Aspect handling when scaling.
    pub fn aspect_ratio_mode(&self) -> AspectRatioMode {
        self.aspect_ratio_mode
    }

    /// Enable or disable scaling and choose how the aspect ratio is treated.
    pub fn set_scaled(&mut self, scaled: bool, mode: AspectRatioMode) {
        self.scaled = scaled;
        self.aspect_ratio_mode = mode;
    }

    fn pixmap_size(&self) -> (u32, u32) {
        self.pixmap.as_ref().map_or((0, 0), Pixmap::size)
    }

    /// Tight, normalized rect the image is drawn in.
    fn placement(&self) -> Option<Placement> {
        let p1 = self.top_left.pixel_point().ok()?.rounded();
        let p2 = self.bottom_right.pixel_point().ok()?.rounded();
        let mut placement = Placement {
            rect: Rect::new(p1.x, p1.y, p1.x, p1.y),
            flip_horizontal: false,
            flip_vertical: false,
        };
        if p1 == p2 {
            return Some(placement);
        }
        let (width, height) = if self.scaled {
            let mut origin = p1;
            let (mut w, mut h) = (p2.x - p1.x, p2.y - p1.y);
            if w < 0.0 {
                placement.flip_horizontal = true;
                w = -w;
                origin.x = p2.x;
            }
            if h < 0.0 {
                placement.flip_vertical = true;
                h = -h;
                origin.y = p2.y;
            }
            placement.rect = Rect::new(origin.x, origin.y, origin.x, origin.y);
            let fitted = scale_size(self.pixmap_size(), (w as u32, h as u32), self.aspect_ratio_mode);
            (f64::from(fitted.0), f64::from(fitted.1))
        } else {
            let (w, h) = self.pixmap_size();
            (f64::from(w), f64::from(h))
        };
        placement.rect.right += width;
        placement.rect.bottom += height;
        Some(placement)
    }

    /// Image as it is drawn: resampled and mirrored when scaling.
    fn rendered_pixmap(&self, placement: &Placement) -> Option<Pixmap> {
        let pixmap = self.pixmap.as_ref()?;
        if !self.scaled {
            return Some(pixmap.clone());
        }
        let resized = pixmap.scaled(
            placement.rect.width() as u32,
            placement.rect.height() as u32,
        )?;
        Some(resized.mirrored(placement.flip_horizontal, placement.flip_vertical))
    }

    /// Pixel position of `anchor`, following any mirroring.
    pub fn anchor(&self, anchor: PixmapAnchor) -> Option<Point> {
        let placement = self.placement()?;
        let mut r = placement.rect;
        if placement.flip_horizontal {
            std::mem::swap(&mut r.left, &mut r.right);
        }
        if placement.flip_vertical {
            std::mem::swap(&mut r.top, &mut r.bottom);
        }
        Some(match anchor {
            PixmapAnchor::Top => (r.top_left() + r.top_right()) * 0.5,
            PixmapAnchor::TopRight => r.top_right(),
            PixmapAnchor::Right => (r.top_right() + r.bottom_right()) * 0.5,
            PixmapAnchor::Bottom => (r.bottom_left() + r.bottom_right()) * 0.5,
            PixmapAnchor::BottomLeft => r.bottom_left(),
            PixmapAnchor::Left => (r.top_left() + r.bottom_left()) * 0.5,
        })
    }
}

impl Item for PixmapItem {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn draw(&self, surface: &mut dyn DrawingSurface, config: &PlotConfig) {
        let Some(placement) = self.placement() else {
            return;
        };
        let pen = self.base.main_pen();
        let pad = if pen.is_visible() { pen.width } else { 0.0 };
        if !placement.rect.padded(pad).intersects(&clip_rect(surface, config)) {
            return;
        }
        surface.save();
        self.base.apply_antialiasing(surface, config);
        if let Some(image) = self.rendered_pixmap(&placement) {
            surface.draw_pixmap(placement.rect.top_left(), &image);
        }
        if pen.is_visible() {
            surface.set_pen(pen);
            surface.set_brush(Brush::NONE);
            surface.draw_rect(placement.rect);
        }
        surface.restore();
    }

    fn select_test(&self, pos: Point, only_selectable: bool, config: &PlotConfig) -> Option<f64> {
        if self.base.rejects_selection(only_selectable) {
            return None;
        }
        let placement = self.placement()?;
        Some(rect_select_test(&placement.rect, pos, true, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};

    fn image() -> Pixmap {
        let mut pixmap = Pixmap::new(4, 2).unwrap();
        pixmap.set_pixel(0, 0, Rgba::RED);
        pixmap
    }

    fn item(tl: (f64, f64), br: (f64, f64)) -> PixmapItem {
        let mut item = PixmapItem::new(
            ItemPosition::absolute(tl.0, tl.1),
            ItemPosition::absolute(br.0, br.1),
        );
        item.set_pixmap(image());
        item
    }

    #[test]
    fn test_defaults() {
        let item = PixmapItem::default();
        assert!(!item.scaled());
        assert_eq!(item.aspect_ratio_mode(), AspectRatioMode::Keep);
        assert_eq!(item.base().pen(), Pen::NONE);
        assert!(item.pixmap().is_none());
    }

    #[test]
    fn test_unscaled_uses_pixmap_size() {
        let item = item((10.4, 20.0), (100.0, 100.0));
        let placement = item.placement().unwrap();
        assert_eq!(placement.rect, Rect::new(10.0, 20.0, 14.0, 22.0));
    }

    #[test]
    fn test_scaled_keeps_aspect() {
        let mut item = item((0.0, 0.0), (40.0, 40.0));
        item.set_scaled(true, AspectRatioMode::Keep);
        assert_eq!(item.placement().unwrap().rect, Rect::new(0.0, 0.0, 40.0, 20.0));
        item.set_scaled(true, AspectRatioMode::Ignore);
        assert_eq!(item.placement().unwrap().rect, Rect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_scaled_flips_when_reversed() {
        let mut item = item((40.0, 0.0), (0.0, 20.0));
        item.set_scaled(true, AspectRatioMode::Ignore);
        let placement = item.placement().unwrap();
        assert_eq!(placement.rect, Rect::new(0.0, 0.0, 40.0, 20.0));
        assert!(placement.flip_horizontal);
        assert!(!placement.flip_vertical);

        let drawn = item.rendered_pixmap(&placement).unwrap();
        assert_eq!(drawn.size(), (40, 20));
        assert_eq!(drawn.get_pixel(39, 0), Some(Rgba::RED));
        assert_eq!(item.anchor(PixmapAnchor::TopRight), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_draw_pixmap_and_border() {
        let mut item = item((10.0, 10.0), (0.0, 0.0));
        item.base_mut().set_pen(Pen::solid(Rgba::BLACK));
        let mut surface = RecordingSurface::new().with_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        item.draw(&mut surface, &PlotConfig::default());
        match surface.commands().collect::<Vec<_>>().as_slice() {
            [DrawCommand::Pixmap { top_left, pixmap }, DrawCommand::Rect { rect, .. }] => {
                assert_eq!(*top_left, Point::new(10.0, 10.0));
                assert_eq!(pixmap.size(), (4, 2));
                assert_eq!(*rect, Rect::new(10.0, 10.0, 14.0, 12.0));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_draw_outside_clip_skipped() {
        let item = item((500.0, 500.0), (0.0, 0.0));
        let mut surface = RecordingSurface::new().with_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        item.draw(&mut surface, &PlotConfig::default());
        assert!(surface.records().is_empty());
    }

    #[test]
    fn test_select_test_filled() {
        let mut item = item((0.0, 0.0), (40.0, 40.0));
        item.set_scaled(true, AspectRatioMode::Ignore);
        let config = PlotConfig::default();
        assert_eq!(
            item.select_test(Point::new(20.0, 20.0), false, &config),
            Some(config.selection_tolerance * 0.99)
        );
        assert_eq!(item.select_test(Point::new(20.0, 45.0), false, &config), Some(5.0));
        item.base_mut().set_selectable(false);
        assert_eq!(item.select_test(Point::new(20.0, 20.0), true, &config), None);
    }
}
