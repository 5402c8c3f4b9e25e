pub mod collector;
pub mod config;
pub mod error;
pub mod export;
pub mod process;
pub mod record;
pub mod reporter;
pub mod ytdlp;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::collector::Collector;
pub use crate::config::CollectorConfig;
pub use crate::error::ScrapeError;
pub use crate::export::{csv_file_name, write_csv, CSV_HEADER};
pub use crate::record::{parse_line, parse_output, ParseSkip, SkipReason, VideoRecord};
pub use crate::reporter::{LogReporter, Reporter};
