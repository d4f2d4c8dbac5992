use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{error, info};

use meeting_tools::logging;
use meeting_tools::split::{self, clean, SplitJob};

#[derive(Parser)]
#[command(
    name = "split_records",
    about = "Generate 1 JSON file per REQUEST_ID found in the target file."
)]
struct Cli {
    /// Client code used in the file name, e.g. TYC
    client: String,
    /// Working files directory
    #[arg(value_name = "PATH")]
    directory: PathBuf,
    /// Target file to be parsed
    file: String,
    /// Remove the target file after processing
    #[arg(short, long)]
    clean: bool,
    /// Turn on progress output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_console(cli.verbose)?;

    let job = SplitJob {
        client: cli.client,
        directory: cli.directory,
        file: cli.file,
        date: Local::now().date_naive(),
    };

    // a source that exists but could not be read is never cleaned up
    let cleanable = match split::split_file(&job) {
        Ok(report) => {
            info!(
                written = report.written,
                skipped = report.skipped,
                failed = report.failed,
                "Split complete"
            );
            true
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            error!("File not found: {}", job.source_path().display());
            true
        }
        Err(err) => {
            error!("Unable to read {}: {}", job.source_path().display(), err);
            false
        }
    };

    if cli.clean {
        if cleanable {
            clean::remove_source(&job.source_path());
        } else {
            error!("Source file kept: {}", job.source_path().display());
        }
    }
    Ok(())
}
