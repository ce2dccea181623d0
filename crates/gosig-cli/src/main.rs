use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use gosig_core::config::CliOverrides;
use gosig_core::{BatchError, GosigConfig, GosigErrorCode};

#[derive(Parser)]
#[command(
    name = "gosig",
    version,
    about = "Extract simplified signatures of Go functions for test generation"
)]
struct Cli {
    /// Request document listing the files and functions to analyze
    #[arg(long)]
    targets: PathBuf,

    /// Where to write the JSON report
    #[arg(long)]
    results: PathBuf,

    /// TOML config file (defaults to gosig.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject source files larger than this many bytes
    #[arg(long)]
    max_file_size: Option<u64>,
}

fn main() -> ExitCode {
    gosig_core::tracing::init_tracing();
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.diagnostic());
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<(), BatchError> {
    let overrides = CliOverrides {
        max_file_size: cli.max_file_size,
    };
    let config = GosigConfig::load(Path::new("."), cli.config.as_deref(), Some(&overrides))?;
    let report = gosig_analysis::run(&cli.targets, &cli.results, &config.analysis)?;
    tracing::debug!(files = report.results.len(), "done");
    Ok(())
}
