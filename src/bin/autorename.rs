//! autorename - rename a drop folder once it has gone quiet.
//!
//! Usage:
//!   autorename FOLDER                       Watch FOLDER with default timings
//!   autorename FOLDER -g 60 -i 5            One minute grace, checked every 5s
//!   autorename FOLDER -s 10 -z 3            Number sessions from 010

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use dropfolder::logging::{self, LogTarget};
use dropfolder_watch::{Renamer, RenamerConfig};

#[derive(Parser)]
#[command(
    name = "autorename",
    version,
    about = "Rename a folder after it has seen no changes for a grace period",
    long_about = "autorename watches a folder and, once nothing under it has changed for \
                  the grace period, renames it to FOLDER_<run>_<sequence>. It then waits \
                  for a new folder with the original name and starts over.\n\n\
                  Exits 0 when interrupted while waiting, 1 when interrupted mid-watch."
)]
struct Cli {
    /// Folder to watch and eventually rename with a suffix of _<run>_00, _<run>_01 etc.
    folder: PathBuf,

    /// Seconds between checks for the folder and for inactivity
    #[arg(short, long, default_value_t = 10)]
    interval: u64,

    /// Seconds without changes before the folder is renamed
    #[arg(short, long = "grace_period", default_value_t = 600)]
    grace_period: u64,

    /// First sequence number used in the suffix
    #[arg(short, long = "sequence_offset", default_value_t = 0)]
    sequence_offset: u64,

    /// Minimum number of digits in the sequence number
    #[arg(short = 'z', long = "leading_zeros", default_value_t = 2)]
    leading_zeros: usize,

    /// Also log every modification
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn renamer_config(&self) -> Result<RenamerConfig> {
        RenamerConfig::builder()
            .root(&self.folder)
            .interval(Duration::from_secs(self.interval))
            .grace_period(Duration::from_secs(self.grace_period))
            .sequence_offset(self.sequence_offset)
            .leading_zeros(self.leading_zeros)
            .build()
            .context("Invalid arguments")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose, LogTarget::Stdout);

    let config = cli.renamer_config()?;
    let mut renamer = Renamer::new(&config).context("Failed to set up watcher")?;
    debug!("Run id {}", renamer.stamp().run_id);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let interrupted = renamer.run(&cancel).await.context("Watcher failed")?;
    std::process::exit(interrupted.exit_code());
}
