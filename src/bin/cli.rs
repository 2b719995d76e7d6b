// src/bin/cli.rs
//
//! CLI for mirroring hours of a GLM product from the public archive.
//!
//! Examples:
//! ```bash
//! glm-sync --year 2020 --month 8 --start-day 14 --base-path ./mirror
//! glm-sync --year 2020 --month 8 --start-day 14 --end-day 15 --base-path ./mirror
//! glm-sync --year 2020 --month 8 --start-day 14 --start-hour 0 --end-hour 5 --base-path ./mirror
//! glm-sync --year 2020 --month 8 --start-day 14 --product GLM-L2-LCFA --bucket noaa-goes16 --base-path ./mirror
//! ```
//!
//! Files already present locally are skipped, so interrupting a run and
//! starting it again is safe.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use glmsync::constants::{DEFAULT_BUCKET, DEFAULT_PRODUCT};
use glmsync::{sync_all, SyncConfig};

#[derive(Parser)]
#[command(author, version, about = "Mirror GLM hours from the public archive into a local tree")]
struct Cli {
    /// Year to fetch (e.g. 2020)
    #[arg(long)]
    year: u16,

    /// Month to fetch (1-12)
    #[arg(long)]
    month: u8,

    /// First day of the range (1-31)
    #[arg(long)]
    start_day: u8,

    /// Last day of the range; defaults to START_DAY
    #[arg(long)]
    end_day: Option<u8>,

    /// First hour of each day (0-23)
    #[arg(long, default_value_t = 0)]
    start_hour: u8,

    /// Last hour of each day (0-23)
    #[arg(long, default_value_t = 23)]
    end_hour: u8,

    /// Product prefix under the bucket
    #[arg(long, default_value = DEFAULT_PRODUCT)]
    product: String,

    /// Source bucket
    #[arg(long, default_value = DEFAULT_BUCKET)]
    bucket: String,

    /// Local directory the mirror is rooted at
    #[arg(long)]
    base_path: PathBuf,

    /// Turn up log verbosity, counts the number of v's
    #[arg(short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity: -v = Debug, -vv = Trace",
    )]
    verbose: u8,
}

fn main() -> Result<()> {
    // Loads any variables from .env file that are not already set
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialise logging once, based on how many `-v` flags were given.
    // Per-object progress is the tool's normal output, so info is the floor.
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let cfg = SyncConfig {
        bucket: cli.bucket,
        product: cli.product,
        year: cli.year,
        month: cli.month,
        start_day: cli.start_day,
        end_day: cli.end_day.unwrap_or(cli.start_day),
        start_hour: cli.start_hour,
        end_hour: cli.end_hour,
        base_path: cli.base_path,
    };

    let t0 = Instant::now();
    let outcome = sync_all(&cfg)?;
    println!(
        "{} object(s) listed, {} downloaded ({} bytes), {} already present ({:.2?})",
        outcome.listed,
        outcome.downloaded,
        outcome.bytes,
        outcome.skipped,
        t0.elapsed()
    );
    Ok(())
}
