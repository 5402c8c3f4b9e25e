use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const NO_DESCRIPTION: &str = "No description";

/// One normalized row of video metadata. Field order is the CSV column order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub url: String,
    pub description: String,
    pub thumbnail: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// A line of tool output that was passed over. Never fatal.
#[derive(Debug, Error)]
#[error("line {line}: {reason}")]
pub struct ParseSkip {
    /// 1-based line number in the tool's stdout
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object")]
    NotAnObject,
}

/// Result of reading a whole stdout capture.
#[derive(Debug, Default)]
pub struct ParsedOutput {
    pub records: Vec<VideoRecord>,
    pub skipped: Vec<ParseSkip>,
}

/// Keeps at most `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Turns one line of `--dump-json` output into a record.
pub fn parse_line(
    line: &str,
    line_number: usize,
    description_limit: usize,
) -> Result<VideoRecord, ParseSkip> {
    let skip = |reason| ParseSkip {
        line: line_number,
        reason,
    };

    let value: Value = serde_json::from_str(line).map_err(|e| skip(SkipReason::Json(e)))?;
    let Value::Object(fields) = value else {
        return Err(skip(SkipReason::NotAnObject));
    };

    let description = text_field(&fields, "description").unwrap_or(NO_DESCRIPTION);

    Ok(VideoRecord {
        url: text_field(&fields, "webpage_url").unwrap_or_default().to_string(),
        description: truncate_chars(description, description_limit).to_string(),
        thumbnail: text_field(&fields, "thumbnail").unwrap_or_default().to_string(),
        views: count_field(&fields, "view_count"),
        likes: count_field(&fields, "like_count"),
        comments: count_field(&fields, "comment_count"),
    })
}

/// Parses every non-blank line, stopping once `max_items` records are held.
///
/// Each outcome is handed to `on_line` as soon as it is decided so callers can
/// report progress; skipped lines are also kept in the returned `ParsedOutput`.
pub fn parse_output<F>(
    stdout: &str,
    max_items: usize,
    description_limit: usize,
    mut on_line: F,
) -> ParsedOutput
where
    F: FnMut(&Result<VideoRecord, ParseSkip>),
{
    let mut parsed = ParsedOutput::default();
    if max_items == 0 {
        return parsed;
    }

    for (idx, line) in stdout.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = parse_line(line, idx + 1, description_limit);
        on_line(&outcome);
        match outcome {
            Ok(record) => parsed.records.push(record),
            Err(skip) => parsed.skipped.push(skip),
        }

        if parsed.records.len() >= max_items {
            break;
        }
    }

    parsed
}

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn count_field(fields: &Map<String, Value>, key: &str) -> u64 {
    match fields.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| match n.as_f64() {
            Some(f) if f.is_finite() && f >= 0.0 => f as u64,
            _ => 0,
        }),
        _ => 0,
    }
}
