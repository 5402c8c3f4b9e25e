use std::path::PathBuf;

use chrono::Local;

use crate::config::CollectorConfig;
use crate::error::ScrapeError;
use crate::export::write_csv;
use crate::process::run_with_timeout;
use crate::record::{parse_output, VideoRecord};
use crate::reporter::{LogReporter, Reporter};
use crate::ytdlp::{command_line, profile_listing_command};

const BANNER: &str = "==================================================";
const URL_PREVIEW_CHARS: usize = 50;

/// Collects a profile's recent videos through yt-dlp and exports them to CSV.
///
/// The pipeline is strictly linear: invoke the tool, parse its output,
/// write the file. Only unparseable lines are recovered from; every other
/// failure ends the run.
#[derive(Debug)]
pub struct Collector<R = LogReporter> {
    config: CollectorConfig,
    reporter: R,
}

impl Collector<LogReporter> {
    pub fn new(config: CollectorConfig) -> Result<Self, ScrapeError> {
        Collector::with_reporter(config, LogReporter)
    }
}

impl<R: Reporter> Collector<R> {
    pub fn with_reporter(config: CollectorConfig, reporter: R) -> Result<Self, ScrapeError> {
        config.validate()?;
        Ok(Collector { config, reporter })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Runs the extraction tool and returns at most `max_items` records.
    pub fn fetch_videos(&self) -> Result<Vec<VideoRecord>, ScrapeError> {
        let config = &self.config;
        let url = config.profile_url();

        self.reporter
            .info(&format!("Starting scrape for user: {}", config.account_name()));
        self.reporter.info(&format!("Executing yt-dlp for {}", url));
        self.reporter.info("This may take a few minutes...");

        let cmd = profile_listing_command(config).cmd();
        self.reporter.debug(&format!("Running: {}", command_line(&cmd)));
        let output = match run_with_timeout(cmd, config.timeout) {
            Ok(output) => output,
            Err(err) => {
                self.reporter.error(&err.to_string());
                return Err(err);
            }
        };

        if !output.success() {
            self.reporter
                .error(&format!("yt-dlp error: {}", output.stderr.trim_end()));
            return Err(ScrapeError::Extraction {
                program: config.program.clone(),
                code: output.status.code(),
                stderr: output.stderr,
            });
        }

        let mut extracted = 0;
        let parsed = parse_output(
            &output.stdout,
            config.max_items,
            config.description_limit,
            |outcome| match outcome {
                Ok(record) => {
                    extracted += 1;
                    self.reporter.info(&format!(
                        "Extracted video {}: {}...",
                        extracted,
                        preview(&record.url)
                    ));
                }
                Err(skip) => self
                    .reporter
                    .warn(&format!("Failed to parse JSON line: {}", skip)),
            },
        );

        self.reporter.info(&format!(
            "Successfully retrieved {} videos",
            parsed.records.len()
        ));
        Ok(parsed.records)
    }

    /// Writes `records` to `{account}_{YYYYMMDD_HHMMSS}.csv` in the output directory.
    pub fn export_csv(&self, records: &[VideoRecord]) -> Result<PathBuf, ScrapeError> {
        let result = write_csv(
            &self.config.output_dir,
            self.config.account_name(),
            &Local::now(),
            records,
        );
        match &result {
            Ok(path) => self
                .reporter
                .info(&format!("Data exported successfully to: {}", path.display())),
            Err(err) => self
                .reporter
                .error(&format!("Error exporting to CSV: {}", err)),
        }
        result
    }

    /// Fetches and exports. No videos still produces a header-only file.
    pub fn run(&self) -> Result<PathBuf, ScrapeError> {
        self.reporter.info(BANNER);
        self.reporter.info("TikTok Scraper Started (using yt-dlp)");
        self.reporter.info(BANNER);

        let records = self.fetch_videos()?;
        if records.is_empty() {
            self.reporter
                .warn("No videos were scraped. Check if the username is correct.");
        }

        let path = self.export_csv(&records)?;

        self.reporter.info(BANNER);
        self.reporter.info("Scraping completed!");
        self.reporter.info(&format!("Total videos: {}", records.len()));
        self.reporter
            .info(&format!("Output file: {}", path.display()));
        self.reporter.info(BANNER);

        Ok(path)
    }
}

fn preview(url: &str) -> &str {
    crate::record::truncate_chars(url, URL_PREVIEW_CHARS)
}
