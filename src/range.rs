//! Closed value intervals and sign domains for range queries.

/// A closed interval `[lower, upper]` in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Range {
    /// Smallest span an axis range may have.
    pub const MIN_SIZE: f64 = 1e-280;
    /// Largest magnitude of a bound or span.
    pub const MAX_SIZE: f64 = 1e250;

    /// Create a range.
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `upper - lower`.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.upper + self.lower) * 0.5
    }

    /// Whether `value` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Copy with `lower <= upper`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.lower > self.upper {
            Self::new(self.upper, self.lower)
        } else {
            *self
        }
    }

    /// Grow the range so it also covers `value`.
    pub fn expand(&mut self, value: f64) {
        if value < self.lower {
            self.lower = value;
        }
        if value > self.upper {
            self.upper = value;
        }
    }

    /// Whether the range can be displayed by an axis: finite, not collapsed
    /// and not absurdly large.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let span = (self.upper - self.lower).abs();
        self.lower > -Self::MAX_SIZE
            && self.upper < Self::MAX_SIZE
            && span > Self::MIN_SIZE
            && span < Self::MAX_SIZE
    }

    /// Smallest range covering both ranges.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.lower.min(other.lower), self.upper.max(other.upper))
    }
}

/// Restricts range queries to part of the number line, used when fitting
/// logarithmic axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignDomain {
    /// Strictly negative values only.
    Negative,
    /// All values.
    #[default]
    Both,
    /// Strictly positive values only.
    Positive,
}

impl SignDomain {
    /// Whether `value` belongs to this domain.
    #[must_use]
    pub fn admits(self, value: f64) -> bool {
        match self {
            Self::Both => true,
            Self::Negative => value < 0.0,
            Self::Positive => value > 0.0,
        }
    }
}

/// Accumulates the extent of a stream of values, `None` until the first value.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RangeAccumulator {
    range: Option<Range>,
}

impl RangeAccumulator {
    pub(crate) fn add(&mut self, value: f64) {
        match &mut self.range {
            Some(range) => range.expand(value),
            None => self.range = Some(Range::new(value, value)),
        }
    }

    pub(crate) fn finish(self) -> Option<Range> {
        self.range
    }
}
