//! Geometric primitives for plotting.
//!
//! Points double as 2D vectors. Rectangles use screen convention: `top` is
//! numerically smaller than `bottom`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Values with magnitude at or below this are treated as zero.
pub const FUZZY_EPSILON: f64 = 1e-12;

/// Whether `value` is zero within [`FUZZY_EPSILON`].
#[must_use]
pub fn fuzzy_is_null(value: f64) -> bool {
    value.abs() <= FUZZY_EPSILON
}

/// A 2D point (or vector) in pixel or plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// A point with both coordinates NaN, used as a line break marker.
    pub const NAN: Self = Self::new(f64::NAN, f64::NAN);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether either coordinate is NaN.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Squared vector length.
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Vector length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or the zero vector when the length is
    /// (fuzzily) zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if fuzzy_is_null(len) {
            Self::ORIGIN
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// The vector rotated by 90 degrees: `(-y, x)`.
    #[must_use]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Round both coordinates to the nearest integer pixel.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Get the length of the line.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Vector from start to end.
    #[must_use]
    pub fn direction(&self) -> Point {
        self.end - self.start
    }
}

/// An axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge (numerically smallest y).
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge (numerically largest y).
    pub bottom: f64,
}

impl Rect {
    /// Create a rectangle from its edges.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from position and size.
    #[must_use]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Create a normalized rectangle spanning two arbitrary corner points.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Width (`right - left`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height (`bottom - top`).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Top-left corner.
    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Top-right corner.
    #[must_use]
    pub fn top_right(&self) -> Point {
        Point::new(self.right, self.top)
    }

    /// Bottom-left corner.
    #[must_use]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Whether the point lies inside or on the border.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Whether the two rectangles overlap (touching edges count).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Overlapping part of two rectangles, if any.
    #[must_use]
    pub fn intersected(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        ))
    }

    /// Move each edge by the given offsets.
    #[must_use]
    pub fn adjusted(&self, dl: f64, dt: f64, dr: f64, db: f64) -> Self {
        Self::new(self.left + dl, self.top + dt, self.right + dr, self.bottom + db)
    }

    /// Grow (or with a negative margin, shrink) every edge outward.
    #[must_use]
    pub fn padded(&self, margin: f64) -> Self {
        self.adjusted(-margin, -margin, margin, margin)
    }

    /// Copy with `left <= right` and `top <= bottom`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::from_corners(self.top_left(), self.bottom_right())
    }

    /// Whether width or height is zero or negative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Affine transform restricted to axis-aligned scale followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Horizontal scale factor.
    pub sx: f64,
    /// Vertical scale factor.
    pub sy: f64,
    /// Horizontal translation.
    pub dx: f64,
    /// Vertical translation.
    pub dy: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        sy: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Prepend a translation (applied before the current transform).
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            dx: self.dx + dx * self.sx,
            dy: self.dy + dy * self.sy,
            ..self
        }
    }

    /// Prepend a scale (applied before the current transform).
    #[must_use]
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self {
            sx: self.sx * sx,
            sy: self.sy * sy,
            ..self
        }
    }

    /// Map a point through the transform.
    #[must_use]
    pub fn map(&self, p: Point) -> Point {
        Point::new(p.x * self.sx + self.dx, p.y * self.sy + self.dy)
    }

    /// Whether this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Squared distance from `point` to the segment `start`..`end`.
///
/// A segment of (fuzzily) zero length degrades to point distance.
#[must_use]
pub fn dist_sqr_to_segment(start: Point, end: Point, point: Point) -> f64 {
    let a = start;
    let b = end;
    let p = point;
    let v = b - a;
    let v_length_sqr = v.length_squared();
    if !fuzzy_is_null(v_length_sqr) {
        let mu = v.dot(p - a) / v_length_sqr;
        if mu < 0.0 {
            (a - p).length_squared()
        } else if mu > 1.0 {
            (b - p).length_squared()
        } else {
            ((a + v * mu) - p).length_squared()
        }
    } else {
        (a - p).length_squared()
    }
}

/// Perpendicular distance of `point` to the infinite line through `base` with
/// direction `vec`. `None` when `vec` has zero length.
#[must_use]
pub fn dist_to_straight_line(base: Point, vec: Point, point: Point) -> Option<f64> {
    let len = vec.length();
    if len == 0.0 || len.is_nan() {
        return None;
    }
    Some(((base.y - point.y) * vec.x - (base.x - point.x) * vec.y).abs() / len)
}

/// From a list of candidate boundary points, the pair furthest apart.
pub(crate) fn farthest_pair(points: &[Point]) -> Option<Line> {
    match points.len() {
        0 | 1 => None,
        2 => Some(Line::new(points[0], points[1])),
        _ => {
            let mut best: Option<(Point, Point)> = None;
            let mut dist_sqr_max = 0.0;
            for (i, a) in points.iter().enumerate() {
                for b in &points[i + 1..] {
                    let dist_sqr = (*a - *b).length_squared();
                    if dist_sqr > dist_sqr_max {
                        best = Some((*a, *b));
                        dist_sqr_max = dist_sqr;
                    }
                }
            }
            // all candidates coincide: the line only touches a corner, so the
            // pair degenerates to that corner
            let (a, b) = best.unwrap_or((points[0], points[0]));
            Some(Line::new(a, b))
        }
    }
}

/// Part of the infinite line through `base` with direction `vec` that lies in
/// `rect`. `None` when the direction is zero or the line misses the rect.
#[must_use]
pub fn rect_clipped_straight_line(base: Point, vec: Point, rect: &Rect) -> Option<Line> {
    if vec.x == 0.0 && vec.y == 0.0 {
        return None;
    }
    let width = rect.width();
    let height = rect.height();
    if fuzzy_is_null(vec.x) {
        // vertical
        let gamma = base.x - rect.left + (rect.top - base.y) * vec.x / vec.y;
        return (gamma >= 0.0 && gamma <= width).then(|| {
            Line::from_coords(rect.left + gamma, rect.top, rect.left + gamma, rect.bottom)
        });
    }
    if fuzzy_is_null(vec.y) {
        // horizontal
        let gamma = base.y - rect.top + (rect.left - base.x) * vec.y / vec.x;
        return (gamma >= 0.0 && gamma <= height).then(|| {
            Line::from_coords(rect.left, rect.top + gamma, rect.right, rect.top + gamma)
        });
    }

    let mut candidates = Vec::with_capacity(4);
    for by in [rect.top, rect.bottom] {
        let gamma = base.x - rect.left + (by - base.y) * vec.x / vec.y;
        if gamma >= 0.0 && gamma <= width {
            candidates.push(Point::new(rect.left + gamma, by));
        }
    }
    for bx in [rect.left, rect.right] {
        let gamma = base.y - rect.top + (bx - base.x) * vec.y / vec.x;
        if gamma >= 0.0 && gamma <= height {
            candidates.push(Point::new(bx, rect.top + gamma));
        }
    }
    farthest_pair(&candidates)
}

/// Part of the segment `start`..`end` that lies in `rect`, or `None` when the
/// segment is entirely outside.
#[must_use]
pub fn rect_clipped_line(start: Point, end: Point, rect: &Rect) -> Option<Line> {
    let contains_start = rect.contains(start);
    let contains_end = rect.contains(end);
    if contains_start && contains_end {
        return Some(Line::new(start, end));
    }

    let base = start;
    let vec = end - start;
    let width = rect.width();
    let height = rect.height();
    let mut candidates = Vec::with_capacity(4);

    if !fuzzy_is_null(vec.y) {
        // not horizontal
        for by in [rect.top, rect.bottom] {
            let mu = (by - base.y) / vec.y;
            if (0.0..=1.0).contains(&mu) {
                let gamma = base.x - rect.left + mu * vec.x;
                if gamma >= 0.0 && gamma <= width {
                    candidates.push(Point::new(rect.left + gamma, by));
                }
            }
        }
    }
    if !fuzzy_is_null(vec.x) {
        // not vertical
        for bx in [rect.left, rect.right] {
            let mu = (bx - base.x) / vec.x;
            if (0.0..=1.0).contains(&mu) {
                let gamma = base.y - rect.top + mu * vec.y;
                if gamma >= 0.0 && gamma <= height {
                    candidates.push(Point::new(bx, rect.top + gamma));
                }
            }
        }
    }
    if contains_start {
        candidates.push(start);
    }
    if contains_end {
        candidates.push(end);
    }
    farthest_pair(&candidates)
}
