use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Fatal failures of a scrape. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed with {}", describe_exit(.code))]
    Extraction {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} timed out after {} seconds", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("return code {}", code),
        None => "no return code (terminated by signal)".to_string(),
    }
}

impl ScrapeError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        ScrapeError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}
