//! Small value types shared across the pipeline

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// Observed intensity bounds of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityRange {
    pub min: u16,
    pub max: u16,
}

impl IntensityRange {
    #[must_use]
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Widen the range to include `value`
    #[inline]
    #[must_use]
    pub fn include(self, value: u16) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Union of two ranges
    #[inline]
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// Scale factor mapping `max - min` onto 1.0, `None` for a degenerate range
    #[inline]
    #[must_use]
    pub fn factor(&self) -> Option<f64> {
        if self.is_degenerate() {
            None
        } else {
            Some(1.0 / f64::from(self.max - self.min))
        }
    }
}

impl fmt::Display for IntensityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min={min}, max={max}", min = self.min, max = self.max)
    }
}
