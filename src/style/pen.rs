//! Stroke and fill descriptions.

use crate::color::Rgba;

/// Dash pattern of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PenStyle {
    /// Nothing is stroked.
    NoPen,
    /// Continuous line.
    #[default]
    Solid,
    /// Dashes.
    Dash,
    /// Dots.
    Dot,
    /// Alternating dash and dot.
    DashDot,
    /// Dash followed by two dots.
    DashDotDot,
}

impl PenStyle {
    /// SVG `stroke-dasharray` pattern in multiples of the pen width, `None`
    /// for solid lines.
    #[must_use]
    pub fn dash_pattern(self) -> Option<&'static [f64]> {
        match self {
            Self::NoPen | Self::Solid => None,
            Self::Dash => Some(&[4.0, 2.0]),
            Self::Dot => Some(&[1.0, 2.0]),
            Self::DashDot => Some(&[4.0, 2.0, 1.0, 2.0]),
            Self::DashDotDot => Some(&[4.0, 2.0, 1.0, 2.0, 1.0, 2.0]),
        }
    }
}

/// How outlines are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pen {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width in pixels; `0` means hairline (one pixel).
    pub width: f64,
    /// Dash pattern.
    pub style: PenStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self::solid(Rgba::BLACK)
    }
}

impl Pen {
    /// A pen that draws nothing.
    pub const NONE: Self = Self {
        color: Rgba::BLACK,
        width: 1.0,
        style: PenStyle::NoPen,
    };

    /// Create a pen.
    #[must_use]
    pub const fn new(color: Rgba, width: f64, style: PenStyle) -> Self {
        Self {
            color,
            width,
            style,
        }
    }

    /// Solid one-pixel pen.
    #[must_use]
    pub const fn solid(color: Rgba) -> Self {
        Self::new(color, 1.0, PenStyle::Solid)
    }

    /// Copy with another width.
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Copy with another dash pattern.
    #[must_use]
    pub const fn with_style(mut self, style: PenStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether stroking with this pen leaves a mark.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.style != PenStyle::NoPen && !self.color.is_transparent()
    }

    /// Width actually covered on screen: hairlines count as one pixel.
    #[must_use]
    pub fn effective_width(&self) -> f64 {
        if self.width > 0.0 {
            self.width
        } else {
            1.0
        }
    }
}

/// Fill pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrushStyle {
    /// Nothing is filled.
    #[default]
    NoBrush,
    /// Uniform fill.
    Solid,
}

/// How areas are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Brush {
    /// Fill color.
    pub color: Rgba,
    /// Fill pattern.
    pub style: BrushStyle,
}

impl Brush {
    /// A brush that fills nothing.
    pub const NONE: Self = Self {
        color: Rgba::BLACK,
        style: BrushStyle::NoBrush,
    };

    /// Uniform fill with `color`.
    #[must_use]
    pub const fn solid(color: Rgba) -> Self {
        Self {
            color,
            style: BrushStyle::Solid,
        }
    }

    /// Whether filling with this brush leaves a mark.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.style != BrushStyle::NoBrush && !self.color.is_transparent()
    }
}
