//! Loading the record collection from its configured location.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use attune_core::{missing_dimensions, Record};
use backon::{ExponentialBuilder, Retryable};
use reqwest::Client;

use crate::config::Config;
use crate::error::{SourceError, SourceResult};
use crate::tsv::parse_records;

const USER_AGENT: &str = "attune/0.1.0 (https://github.com/oxur/attune)";

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// An http(s) URL serving TSV.
    Remote(String),
    /// A TSV file on disk.
    File(PathBuf),
}

impl RecordSource {
    /// Classify a location string: anything with an http(s) scheme is remote.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl FromStr for RecordSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and decodes the record collection.
///
/// Remote fetches retry transient failures (timeouts, connection errors,
/// 5xx and 429 responses) with exponential backoff.
#[derive(Debug, Clone)]
pub struct Loader {
    http: Client,
    max_retries: usize,
    min_delay: Duration,
}

impl Loader {
    /// Create a loader from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config) -> SourceResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            max_retries: config.max_retries,
            min_delay: Duration::from_millis(500),
        })
    }

    /// Override the first backoff delay.
    #[must_use]
    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        self
    }

    /// Load the whole collection, in source order.
    pub async fn load(&self, source: &RecordSource) -> SourceResult<Vec<Record>> {
        log::info!("Loading records from {}", source);

        let text = match source {
            RecordSource::Remote(url) => self.fetch(url).await?,
            RecordSource::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })?;
                // Decoded the way reqwest decodes a response body.
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };

        let records = parse_records(&text)?;
        report_incomplete(&records);
        Ok(records)
    }

    async fn fetch(&self, url: &str) -> SourceResult<String> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_times(self.max_retries);

        (|| self.fetch_once(url))
            .retry(backoff)
            .when(SourceError::is_transient)
            .notify(|err, delay| {
                log::warn!("Fetching {} failed ({}), retrying in {:?}", url, err, delay);
            })
            .await
    }

    async fn fetch_once(&self, url: &str) -> SourceResult<String> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

fn report_incomplete(records: &[Record]) {
    let mut incomplete = 0;
    for record in records {
        let missing = missing_dimensions(record);
        if !missing.is_empty() {
            incomplete += 1;
            log::debug!(
                "Excluding {} - {}: no numeric {:?}",
                record.name,
                record.artist,
                missing
            );
        }
    }

    log::info!(
        "Loaded {} records ({} incomplete)",
        records.len(),
        incomplete
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_locations() {
        assert_eq!(
            RecordSource::parse("https://example.com/a.tsv"),
            RecordSource::Remote("https://example.com/a.tsv".to_string())
        );
        assert_eq!(
            RecordSource::parse("HTTP://example.com/a.tsv"),
            RecordSource::Remote("HTTP://example.com/a.tsv".to_string())
        );
    }

    #[test]
    fn test_parse_file_locations() {
        assert_eq!(
            RecordSource::parse("./songs.tsv"),
            RecordSource::File(PathBuf::from("./songs.tsv"))
        );
        assert_eq!(
            "/data/https.tsv".parse::<RecordSource>().unwrap(),
            RecordSource::File(PathBuf::from("/data/https.tsv"))
        );
    }

    #[test]
    fn test_display_round_trips_location() {
        let source = RecordSource::parse("https://example.com/a.tsv");
        assert_eq!(source.to_string(), "https://example.com/a.tsv");
    }

    #[test]
    fn test_loader_creation() {
        let loader = Loader::new(&Config::default());
        assert!(loader.is_ok());
    }
}
