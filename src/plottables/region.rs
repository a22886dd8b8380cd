//! The 3x3 partition of the plane around a clip rectangle.
//!
//! Regions are numbered column by column, with 5 the rectangle itself:
//!
//! ```text
//!   1 | 4 | 7
//!  ---+---+---
//!   2 | 5 | 8
//!  ---+---+---
//!   3 | 6 | 9
//! ```
//!
//! "Top" is the numerically smaller y (screen convention).

use crate::geometry::Rect;

/// One of the nine zones around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Region {
    /// Left of and above the rectangle.
    TopLeft = 1,
    /// Left of the rectangle.
    Left = 2,
    /// Left of and below the rectangle.
    BottomLeft = 3,
    /// Above the rectangle.
    Top = 4,
    /// Inside the rectangle, boundary included.
    Inside = 5,
    /// Below the rectangle.
    Bottom = 6,
    /// Right of and above the rectangle.
    TopRight = 7,
    /// Right of the rectangle.
    Right = 8,
    /// Right of and below the rectangle.
    BottomRight = 9,
}

impl Region {
    /// Region number, 1 to 9.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Whether this is one of the four corner regions.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::BottomLeft | Self::TopRight | Self::BottomRight
        )
    }
}

/// Classify `(x, y)` against `rect`.
///
/// Coordinates on the boundary count as inside. NaN compares false on every
/// test and therefore lands in [`Region::Inside`].
#[must_use]
pub fn classify_region(x: f64, y: f64, rect: &Rect) -> Region {
    if x < rect.left {
        if y < rect.top {
            Region::TopLeft
        } else if y > rect.bottom {
            Region::BottomLeft
        } else {
            Region::Left
        }
    } else if x > rect.right {
        if y < rect.top {
            Region::TopRight
        } else if y > rect.bottom {
            Region::BottomRight
        } else {
            Region::Right
        }
    } else if y < rect.top {
        Region::Top
    } else if y > rect.bottom {
        Region::Bottom
    } else {
        Region::Inside
    }
}
