//! Two-pass min-max normalization
//!
//! The first pass finds the intensity range, the second rescales every pixel
//! to `(v - min) / (max - min)`. Both passes read the grid in scan order, so
//! output index `i` corresponds to `grid.values()[i]`.

use crate::error::NormalizeError;
use crate::grid::IntensityGrid;
use crate::types::IntensityRange;
use rayon::prelude::*;

/// Identity element for range reduction
const EMPTY_RANGE: IntensityRange = IntensityRange {
    min: u16::MAX,
    max: u16::MIN,
};

/// Normalized values together with the range they were scaled by
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub range: IntensityRange,
    pub values: Vec<f64>,
}

/// Find the smallest and largest intensity in the grid
///
/// # Errors
///
/// Returns `EmptyInput` if the grid has zero width or height
pub fn compute_range(grid: &IntensityGrid) -> Result<IntensityRange, NormalizeError> {
    ensure_not_empty(grid)?;

    Ok(grid
        .values()
        .iter()
        .fold(EMPTY_RANGE, |range, &value| range.include(value)))
}

/// Same result as [`compute_range`], reduced from per-thread partial ranges
///
/// # Errors
///
/// Returns `EmptyInput` if the grid has zero width or height
pub fn compute_range_par(grid: &IntensityGrid) -> Result<IntensityRange, NormalizeError> {
    ensure_not_empty(grid)?;

    Ok(grid
        .values()
        .par_iter()
        .fold(|| EMPTY_RANGE, |range, &value| range.include(value))
        .reduce(|| EMPTY_RANGE, IntensityRange::merge))
}

/// Rescale every intensity into [0.0, 1.0] using `range`
///
/// # Errors
///
/// Returns `EmptyInput` for an empty grid and `DegenerateRange` when
/// `range.min == range.max`
pub fn normalize(grid: &IntensityGrid, range: IntensityRange) -> Result<Vec<f64>, NormalizeError> {
    let factor = scale_factor(grid, range)?;

    Ok(grid
        .values()
        .iter()
        .map(|&value| rescale(value, range, factor))
        .collect())
}

/// Parallel [`normalize`]; output order matches the sequential version
///
/// # Errors
///
/// Same conditions as [`normalize`]
pub fn normalize_par(
    grid: &IntensityGrid,
    range: IntensityRange,
) -> Result<Vec<f64>, NormalizeError> {
    let factor = scale_factor(grid, range)?;

    Ok(grid
        .values()
        .par_iter()
        .map(|&value| rescale(value, range, factor))
        .collect())
}

/// Run both passes
///
/// # Errors
///
/// Returns `EmptyInput` or `DegenerateRange` as the individual passes do
pub fn normalize_grid(grid: &IntensityGrid, parallel: bool) -> Result<Normalized, NormalizeError> {
    let (range, values) = if parallel {
        let range = compute_range_par(grid)?;
        (range, normalize_par(grid, range)?)
    } else {
        let range = compute_range(grid)?;
        (range, normalize(grid, range)?)
    };

    tracing::debug!(%range, count = values.len(), parallel, "normalized grid");

    Ok(Normalized { range, values })
}

fn ensure_not_empty(grid: &IntensityGrid) -> Result<(), NormalizeError> {
    if grid.is_empty() {
        return Err(NormalizeError::EmptyInput {
            width: grid.width(),
            height: grid.height(),
        });
    }
    Ok(())
}

fn scale_factor(grid: &IntensityGrid, range: IntensityRange) -> Result<f64, NormalizeError> {
    ensure_not_empty(grid)?;

    range
        .factor()
        .ok_or(NormalizeError::DegenerateRange { value: range.min })
}

#[inline]
fn rescale(value: u16, range: IntensityRange, factor: f64) -> f64 {
    // `d * (1.0 / d)` can land one ulp below 1.0, so the max is pinned
    if value >= range.max {
        return 1.0;
    }
    ((f64::from(value) - f64::from(range.min)) * factor).clamp(0.0, 1.0)
}
