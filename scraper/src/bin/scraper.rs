use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use tiktok_scraper::config::{
    DEFAULT_ACCOUNT, DEFAULT_BASE_URL, DEFAULT_DESCRIPTION_LIMIT, DEFAULT_MAX_ITEMS,
    DEFAULT_OUTPUT_DIR, DEFAULT_PROGRAM, DEFAULT_TIMEOUT_SECS,
};
use tiktok_scraper::{Collector, CollectorConfig};

/// Collect metadata for a creator's most recent videos and save it as CSV
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Account whose videos are listed
    #[arg(long, env = "TIKTOK_USERNAME", default_value = DEFAULT_ACCOUNT)]
    username: String,

    /// Maximum number of videos to collect
    #[arg(long, env = "MAX_VIDEOS", default_value_t = DEFAULT_MAX_ITEMS as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    max_videos: u64,

    /// Directory the CSV file is written to
    #[arg(long, env = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Give up on yt-dlp after this many seconds
    #[arg(long, env = "SCRAPER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Descriptions are cut to this many characters
    #[arg(long, env = "DESCRIPTION_LIMIT", default_value_t = DEFAULT_DESCRIPTION_LIMIT as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    description_limit: u64,

    /// yt-dlp executable
    #[arg(long, env = "YTDLP_BIN", default_value = DEFAULT_PROGRAM)]
    ytdlp_bin: String,

    /// Platform root used to build the profile URL
    #[arg(long, env = "PROFILE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl Cli {
    fn into_config(self) -> CollectorConfig {
        CollectorConfig {
            account: self.username,
            max_items: to_usize(self.max_videos),
            timeout: Duration::from_secs(self.timeout_secs),
            output_dir: self.output_dir,
            description_limit: to_usize(self.description_limit),
            program: self.ytdlp_bin,
            base_url: self.base_url,
        }
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

fn run(cli: Cli) -> Result<PathBuf> {
    let collector = Collector::new(cli.into_config()).context("Invalid configuration")?;
    let path = collector.run().context("Scrape failed")?;
    Ok(path)
}

/// Logs a fatal error and maps the outcome to the process exit status.
fn exit_status(result: Result<PathBuf>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            1
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    std::process::exit(exit_status(run(cli)));
}
