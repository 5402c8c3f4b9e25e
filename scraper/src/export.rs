use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{Terminator, WriterBuilder};

use crate::error::ScrapeError;
use crate::record::VideoRecord;

pub const CSV_HEADER: [&str; 6] = ["url", "description", "thumbnail", "views", "likes", "comments"];

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn sanitize_filename(input: &str) -> String {
    // Replace characters that are problematic in filenames
    let sanitized = input
        .replace(&['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'][..], "_")
        .trim()
        .trim_matches('.')
        .to_string();

    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized
    }
}

/// `{account}_{YYYYMMDD_HHMMSS}.csv`
pub fn csv_file_name(account: &str, generated_at: &DateTime<Local>) -> String {
    format!(
        "{}_{}.csv",
        sanitize_filename(account),
        generated_at.format(TIMESTAMP_FORMAT)
    )
}

/// Writes `records` under `output_dir`, creating the directory if needed.
/// The header row is always written, even when there are no records.
pub fn write_csv(
    output_dir: &Path,
    account: &str,
    generated_at: &DateTime<Local>,
    records: &[VideoRecord],
) -> Result<PathBuf, ScrapeError> {
    fs::create_dir_all(output_dir).map_err(|e| ScrapeError::write(output_dir, e))?;

    let path = output_dir.join(csv_file_name(account, generated_at));
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(&path)
        .map_err(|e| ScrapeError::write(&path, e))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ScrapeError::write(&path, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| ScrapeError::write(&path, e))?;
    }
    writer.flush().map_err(|e| ScrapeError::write(&path, e))?;

    Ok(path)
}
