use crate::pipeline::Summary;
use std::io::{self, Write};

/// Print the run summary to stdout
pub fn print_summary(summary: &Summary) {
    let _ = write_summary(&mut io::stdout().lock(), summary);
}

/// Write dimensions, intensity bounds, value count and output path, one `label: value` per line
///
/// # Errors
///
/// Propagates writer errors
pub fn write_summary<W: Write>(writer: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(writer, "{:20}: {}", "Dimensions", summary.dimensions)?;
    writeln!(writer, "{:20}: {}", "Min Intensity", summary.range.min)?;
    writeln!(writer, "{:20}: {}", "Max Intensity", summary.range.max)?;
    writeln!(writer, "{:20}: {}", "Values", summary.count)?;
    writeln!(writer, "{:20}: {}", "Output", summary.output.display())
}
