//! decode -> compute range -> normalize -> serialize

use crate::error::NormalizeError;
use crate::grid::load_grid;
use crate::normalize::normalize_grid;
use crate::output::{OutputFormat, derive_output_path, write_output};
use crate::types::{Dimensions, IntensityRange};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub input: PathBuf,
    /// Explicit output path, derived from `input` when `None`
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub parallel: bool,
}

impl PipelineOptions {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            format: OutputFormat::default(),
            parallel: false,
        }
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input, self.format))
    }
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub dimensions: Dimensions,
    pub range: IntensityRange,
    pub count: usize,
    pub output: PathBuf,
}

/// Normalize one image file and write its value buffer
///
/// Nothing is written unless every stage succeeds.
///
/// # Errors
///
/// Returns the first failing stage's error: `Decode`, `EmptyInput`,
/// `DegenerateRange` or `Write`
pub fn run(options: &PipelineOptions) -> Result<Summary, NormalizeError> {
    // Stage 1: Decode
    let grid = load_grid(&options.input)?;
    let dimensions = grid.dimensions();
    tracing::debug!(input = %options.input.display(), %dimensions, "loaded grid");

    // Stage 2 + 3: Range scan and rescale
    let normalized = normalize_grid(&grid, options.parallel)?;
    drop(grid);

    // Stage 4: Serialize
    let output = options.output_path();
    write_output(&output, &normalized.values, options.format)?;
    tracing::info!(output = %output.display(), "wrote {} values", normalized.values.len());

    Ok(Summary {
        dimensions,
        range: normalized.range,
        count: normalized.values.len(),
        output,
    })
}
