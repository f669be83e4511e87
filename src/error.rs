use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a normalization run
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// No input path on the command line
    #[error("No input image given")]
    MissingArgument,

    /// The image library could not open or parse the file
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image has zero width or zero height
    #[error("Image is empty ({width}x{height})")]
    EmptyInput { width: usize, height: usize },

    /// Every pixel shares one intensity, so min-max rescaling is undefined
    #[error("Cannot normalize a constant image: every pixel has intensity {value}")]
    DegenerateRange { value: u16 },

    /// Grid data length disagrees with its declared dimensions
    #[error("Grid shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Output file could not be created, written or moved into place
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
