use crate::output::OutputFormat;
use crate::pipeline::PipelineOptions;
use clap::Parser;
use std::path::PathBuf;

/// Normalize a grayscale image to [0, 1] and dump the values as a flat buffer
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image file to normalize
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output path (default: input name up to its first '.', plus the format extension)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Run both scans on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Log pipeline stages
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Pipeline settings for this invocation, `None` when no input was given
    #[must_use]
    pub fn pipeline_options(&self) -> Option<PipelineOptions> {
        let input = self.file.clone()?;
        Some(PipelineOptions {
            input,
            output: self.output.clone(),
            format: self.format,
            parallel: self.parallel,
        })
    }
}
