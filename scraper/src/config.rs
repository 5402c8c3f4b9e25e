use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScrapeError;

pub const DEFAULT_ACCOUNT: &str = "hugodecrypte";
pub const DEFAULT_MAX_ITEMS: usize = 10;
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 200;
pub const DEFAULT_PROGRAM: &str = "yt-dlp";
pub const DEFAULT_BASE_URL: &str = "https://www.tiktok.com";

/// Everything a single collection run needs to know.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Platform username, with or without a leading `@`
    pub account: String,
    /// Upper bound on the number of records returned
    pub max_items: usize,
    /// Wall-clock limit for the extraction tool
    pub timeout: Duration,
    /// Directory the CSV file is written into, created on demand
    pub output_dir: PathBuf,
    /// Descriptions longer than this many characters are cut
    pub description_limit: usize,
    /// Extraction tool executable
    pub program: String,
    /// Platform root the profile URL is built from
    pub base_url: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            account: DEFAULT_ACCOUNT.to_string(),
            max_items: DEFAULT_MAX_ITEMS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            program: DEFAULT_PROGRAM.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl CollectorConfig {
    pub fn new(account: &str) -> Self {
        CollectorConfig {
            account: account.to_string(),
            ..Default::default()
        }
    }

    /// Account name without surrounding whitespace or a leading `@`.
    pub fn account_name(&self) -> &str {
        let trimmed = self.account.trim();
        trimmed.strip_prefix('@').unwrap_or(trimmed)
    }

    pub fn profile_url(&self) -> String {
        format!(
            "{}/@{}",
            self.base_url.trim_end_matches('/'),
            self.account_name()
        )
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.account_name().is_empty() {
            return Err(ScrapeError::Config("account must not be empty".to_string()));
        }
        if self.max_items == 0 {
            return Err(ScrapeError::Config(
                "maximum item count must be at least 1".to_string(),
            ));
        }
        if self.description_limit == 0 {
            return Err(ScrapeError::Config(
                "description limit must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ScrapeError::Config("timeout must be non-zero".to_string()));
        }
        if self.program.trim().is_empty() {
            return Err(ScrapeError::Config(
                "extraction tool path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::default();
        assert_eq!(config.account, "hugodecrypte");
        assert_eq!(config.max_items, 10);
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert_eq!(config.description_limit, 200);
        assert_eq!(config.program, "yt-dlp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_url() {
        let config = CollectorConfig::new("someone");
        assert_eq!(config.profile_url(), "https://www.tiktok.com/@someone");
    }

    #[test]
    fn test_profile_url_strips_at_sign_and_slash() {
        let mut config = CollectorConfig::new(" @someone ");
        config.base_url = "https://example.com/".to_string();
        assert_eq!(config.account_name(), "someone");
        assert_eq!(config.profile_url(), "https://example.com/@someone");
    }

    #[test]
    fn test_validate_rejects_empty_account() {
        assert!(CollectorConfig::new("@").validate().is_err());
        assert!(CollectorConfig::new("   ").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_bounds() {
        let mut config = CollectorConfig::default();
        config.max_items = 0;
        assert!(config.validate().is_err());

        let mut config = CollectorConfig::default();
        config.description_limit = 0;
        assert!(config.validate().is_err());

        let mut config = CollectorConfig::default();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
