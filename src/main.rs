use anyhow::anyhow;
use clap::{CommandFactory, Parser};
use heightbuf::NormalizeError;
use heightbuf::cli::Args;
use heightbuf::pipeline::{self, Summary};
use tracing::Level;

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Warning: {e}");
    }

    match process(&args) {
        Ok(summary) => heightbuf::print_summary(&summary),
        Err(e) => {
            if matches!(e, NormalizeError::MissingArgument) {
                let _ = Args::command().print_help();
                println!();
            }
            println!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

fn process(args: &Args) -> Result<Summary, NormalizeError> {
    let options = args.pipeline_options().ok_or(NormalizeError::MissingArgument)?;
    pipeline::run(&options)
}
