//! Region clipping for curve polylines.
//!
//! A curve can hold millions of points, most of them far outside the visible
//! rectangle. Drawing every segment is wasteful, but simply dropping
//! off-screen points would make the remaining segments cut across the
//! visible area. [`optimize_curve`] walks the pixel-space points once and
//! emits a polyline that looks the same inside the rectangle:
//!
//! - points inside the rectangle are kept
//! - segments entering or leaving are shortened to the boundary
//! - segments crossing the rectangle from outside are replaced by the two
//!   boundary crossings
//! - segments that stay outside are routed along the rectangle corners
//!
//! The series is treated as closed: the segment from the last point back to
//! the first is handled too, with the points it needs appended at the end.
//!
//! NaN points classify as inside and pass through unchanged, so they keep
//! acting as line breaks.

use crate::geometry::{farthest_pair, fuzzy_is_null, Point, Rect};
use crate::plottables::region::{classify_region, Region};

// ============================================================================
// Boundary projection
// ============================================================================

/// Point where the segment between `other` (outside, in `other_region`) and
/// `inside` crosses the boundary of `rect`.
///
/// For corner regions the top or bottom edge is tried first; when that
/// crossing falls beside the rectangle the left or right edge is used.
#[must_use]
pub fn optimized_point(other_region: Region, other: Point, inside: Point, rect: &Rect) -> Point {
    let d = inside - other;
    let x_at = |edge_y: f64| other.x + d.x / d.y * (edge_y - other.y);
    let y_at = |edge_x: f64| other.y + d.y / d.x * (edge_x - other.x);
    let edge_first = |edge_y: f64, fallback_x: f64| {
        let x = x_at(edge_y);
        if x < rect.left || x > rect.right {
            Point::new(fallback_x, y_at(fallback_x))
        } else {
            Point::new(x, edge_y)
        }
    };
    match other_region {
        Region::TopLeft => edge_first(rect.top, rect.left),
        Region::BottomLeft => edge_first(rect.bottom, rect.left),
        Region::TopRight => edge_first(rect.top, rect.right),
        Region::BottomRight => edge_first(rect.bottom, rect.right),
        Region::Left => Point::new(rect.left, y_at(rect.left)),
        Region::Right => Point::new(rect.right, y_at(rect.right)),
        Region::Top => Point::new(x_at(rect.top), rect.top),
        Region::Bottom => Point::new(x_at(rect.bottom), rect.bottom),
        Region::Inside => rect.top_left(),
    }
}

// ============================================================================
// Corner routing
// ============================================================================

/// Corner points that route a segment from `prev` to `current` around the
/// outside of `rect`, assuming it does not cross the rectangle.
///
/// Some transitions repeat a corner; the repeated point keeps the shape of
/// the polyline stable when the following point is projected. For the four
/// diagonal transitions between opposite corners the side the segment passes
/// on decides which corners are used.
#[must_use]
pub fn optimized_corner_points(
    prev_region: Region,
    current_region: Region,
    prev: Point,
    current: Point,
    rect: &Rect,
) -> Vec<Point> {
    let (lt, lb) = (rect.top_left(), rect.bottom_left());
    let (rt, rb) = (rect.top_right(), rect.bottom_right());
    // whether the segment's line is below the rect at `x`
    let passes_below = |x: f64| {
        let slope = (current.y - prev.y) / (current.x - prev.x);
        slope * (x - current.x) + current.y > rect.bottom
    };
    match (prev_region.number(), current_region.number()) {
        (1, 2 | 4) | (2 | 4 | 5, 1) => vec![lt],
        (1, 3) => vec![lt, lb],
        (1, 7) => vec![lt, rt],
        (1, 6) => vec![lt, lb, lb],
        (1, 8) => vec![lt, rt, rt],
        (1, 9) if passes_below(rect.left) => vec![lt, lb, lb, rb],
        (1, 9) => vec![lt, rt, rt, rb],

        (2 | 6 | 5, 3) | (3, 2 | 6) => vec![lb],
        (2, 4) | (4, 2) => vec![lt, lt],
        (2, 6) | (6, 2) => vec![lb, lb],
        (2, 7) => vec![lt, lt, rt],
        (2, 9) => vec![lb, lb, rb],

        (3, 1) => vec![lb, lt],
        (3, 9) => vec![lb, rb],
        (3, 4) => vec![lb, lt, lt],
        (3, 8) => vec![lb, rb, rb],
        (3, 7) if passes_below(rect.right) => vec![lb, rb, rb, rt],
        (3, 7) => vec![lb, lt, lt, rt],

        (4 | 5 | 8, 7) | (7, 4 | 8) => vec![rt],
        (4, 8) | (8, 4) => vec![rt, rt],
        (4, 3) => vec![lt, lt, lb],
        (4, 9) => vec![rt, rt, rb],

        (5 | 6 | 8, 9) | (9, 6 | 8) => vec![rb],

        (6, 8) | (8, 6) => vec![rb, rb],
        (6, 1) => vec![lb, lb, lt],
        (6, 7) => vec![rb, rb, rt],

        (7, 1) => vec![rt, lt],
        (7, 9) => vec![rt, rb],
        (7, 2) => vec![rt, lt, lt],
        (7, 6) => vec![rt, rb, rb],
        (7, 3) if passes_below(rect.right) => vec![rt, rb, rb, lb],
        (7, 3) => vec![rt, lt, lt, lb],

        (8, 1) => vec![rt, rt, lt],
        (8, 3) => vec![rb, rb, lb],

        (9, 3) => vec![rb, lb],
        (9, 7) => vec![rb, rt],
        (9, 2) => vec![rb, lb, lb],
        (9, 4) => vec![rb, rt, rt],
        (9, 1) if passes_below(rect.left) => vec![rb, lb, lb, lt],
        (9, 1) => vec![rb, rt, rt, lt],

        _ => Vec::new(),
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Whether a segment between two outside regions can cross the rectangle at
/// all. `false` is definitive, `true` needs [`traverse`] to confirm.
#[must_use]
pub fn may_traverse(prev_region: Region, current_region: Region) -> bool {
    !matches!(
        (prev_region.number(), current_region.number()),
        (1, 2 | 3 | 4 | 7)
            | (2, 1 | 3)
            | (3, 1 | 2 | 6 | 9)
            | (4, 1 | 7)
            | (5, _)
            | (6, 3 | 9)
            | (7, 1 | 4 | 8 | 9)
            | (8, 7 | 9)
            | (9, 3 | 6 | 7 | 8)
    )
}

/// Entry and exit points of the segment `prev`..`current` on the boundary of
/// `rect`, ordered along the segment. `None` when the line misses the
/// rectangle. A line touching only a corner yields that corner twice.
///
/// Only meaningful when both points are outside and [`may_traverse`]
/// allowed the transition: axis-parallel segments are assumed to cross.
#[must_use]
pub fn traverse(prev: Point, current: Point, rect: &Rect) -> Option<(Point, Point)> {
    let d = current - prev;
    let mut hits = Vec::with_capacity(4);
    if fuzzy_is_null(d.x) {
        hits.push(Point::new(current.x, rect.bottom));
        hits.push(Point::new(current.x, rect.top));
    } else if fuzzy_is_null(d.y) {
        hits.push(Point::new(rect.left, current.y));
        hits.push(Point::new(rect.right, current.y));
    } else {
        let x_per_y = d.x / d.y;
        for edge_y in [rect.top, rect.bottom] {
            let gamma = prev.x + (edge_y - prev.y) * x_per_y;
            if gamma >= rect.left && gamma <= rect.right {
                hits.push(Point::new(gamma, edge_y));
            }
        }
        let y_per_x = 1.0 / x_per_y;
        for edge_x in [rect.left, rect.right] {
            let gamma = prev.y + (edge_x - prev.x) * y_per_x;
            if gamma >= rect.top && gamma <= rect.bottom {
                hits.push(Point::new(edge_x, gamma));
            }
        }
    }

    let pair = farthest_pair(&hits)?;
    if d.dot(pair.end - pair.start) < 0.0 {
        Some((pair.end, pair.start))
    } else {
        Some((pair.start, pair.end))
    }
}

/// Corners to insert before the entry point and after the exit point of a
/// traversing segment that also skips over a corner region.
#[must_use]
pub fn traverse_corner_points(
    prev_region: Region,
    current_region: Region,
    rect: &Rect,
) -> (Vec<Point>, Vec<Point>) {
    let (lt, lb) = (rect.top_left(), rect.bottom_left());
    let (rt, rb) = (rect.top_right(), rect.bottom_right());
    match (prev_region.number(), current_region.number()) {
        (1, 6 | 8) => (vec![lt], vec![]),
        (1, 9) => (vec![lt], vec![rb]),
        (2, 7) | (6, 7) => (vec![], vec![rt]),
        (2, 9) | (4, 9) => (vec![], vec![rb]),
        (3, 4 | 8) => (vec![lb], vec![]),
        (3, 7) => (vec![lb], vec![rt]),
        (4, 3) | (8, 3) => (vec![], vec![lb]),
        (6, 1) | (8, 1) => (vec![], vec![lt]),
        (7, 2 | 6) => (vec![rt], vec![]),
        (7, 3) => (vec![rt], vec![lb]),
        (9, 2 | 4) => (vec![rb], vec![]),
        (9, 1) => (vec![rb], vec![lt]),
        _ => (Vec::new(), Vec::new()),
    }
}

// ============================================================================
// Polyline optimization
// ============================================================================

/// Optimize pixel-space curve points against the visible `rect`.
///
/// The output draws identically inside `rect` while skipping work for
/// everything outside it. Runs in O(n).
#[must_use]
pub fn optimize_curve(points: &[Point], rect: &Rect) -> Vec<Point> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len());
    // points closing the segment from the last point back to the first
    let mut trailing = Vec::new();
    let mut prev = last;
    let mut prev_region = classify_region(last.x, last.y, rect);

    for (i, &current) in points.iter().enumerate() {
        let first = i == 0;
        let current_region = classify_region(current.x, current.y, rect);
        if current_region == prev_region {
            if current_region == Region::Inside {
                out.push(current);
            }
        } else if current_region == Region::Inside {
            let entry = optimized_point(prev_region, prev, current, rect);
            if first {
                trailing.push(entry);
            } else {
                out.push(entry);
            }
            out.push(current);
        } else if prev_region == Region::Inside {
            out.push(optimized_point(current_region, current, prev, rect));
            out.extend(optimized_corner_points(
                prev_region,
                current_region,
                prev,
                current,
                rect,
            ));
        } else if let Some((cross_a, cross_b)) = may_traverse(prev_region, current_region)
            .then(|| traverse(prev, current, rect))
            .flatten()
        {
            let (before, after) = traverse_corner_points(prev_region, current_region, rect);
            if first {
                out.push(cross_b);
                out.extend(after);
                trailing.extend(before);
                trailing.push(cross_a);
            } else {
                out.extend(before);
                out.push(cross_a);
                out.push(cross_b);
                out.extend(after);
            }
        } else {
            out.extend(optimized_corner_points(
                prev_region,
                current_region,
                prev,
                current,
                rect,
            ));
        }
        prev = current;
        prev_region = current_region;
    }
    out.extend(trailing);
    out
}
