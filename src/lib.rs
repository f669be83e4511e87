pub mod cli;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod types;

// Re-export commonly used items
pub use error::NormalizeError;
pub use grid::IntensityGrid;
pub use normalize::{compute_range, normalize, normalize_grid};
pub use report::print_summary;
