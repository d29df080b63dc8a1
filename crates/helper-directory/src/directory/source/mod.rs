mod parser;

use super::normalizer::normalize;
use super::record::HelperRecord;
use crate::config::SourceConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use parser::RawHelperRow;

/// Failure to obtain a usable record set.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to fetch data: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch data: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("invalid helper payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid helper CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read helper export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid helper payload: {0}")]
    UnexpectedShape(&'static str),
    #[error("helper payload is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("No data available in the response")]
    Empty,
}

/// Anything able to produce raw spreadsheet rows.
#[async_trait]
pub trait HelperSource: Debug + Send + Sync {
    /// Human-readable origin, used in logs and CLI output.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<RawHelperRow>, SourceError>;
}

/// SheetBest (or compatible) HTTP endpoint returning a JSON array of rows.
#[derive(Debug, Clone)]
pub struct HttpHelperSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpHelperSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl HelperSource for HttpHelperSource {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch(&self) -> Result<Vec<RawHelperRow>, SourceError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "helper source rejected request");
            return Err(SourceError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        parser::parse_json_rows(&body)
    }
}

/// A saved JSON export of the sheet (same shape as the API response).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl HelperSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<RawHelperRow>, SourceError> {
        let body = tokio::fs::read(&self.path).await?;
        parser::parse_json_rows(&body)
    }
}

/// A CSV download of the sheet with the original column headers.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl HelperSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<RawHelperRow>, SourceError> {
        let body = tokio::fs::read(&self.path).await?;
        parser::parse_csv_rows(Cursor::new(body))
    }
}

/// Picks the file decoder from the extension; anything but `.csv` is read as JSON.
pub fn file_source<P: AsRef<Path>>(path: P) -> Box<dyn HelperSource> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Box::new(CsvFileSource::new(path))
    } else {
        Box::new(JsonFileSource::new(path))
    }
}

/// Fetches raw rows and normalizes them into records aged as of `today`.
pub async fn load_records(
    source: &dyn HelperSource,
    today: NaiveDate,
) -> Result<Vec<HelperRecord>, SourceError> {
    let rows = source.fetch().await?;
    let records: Vec<HelperRecord> = rows.into_iter().map(|row| normalize(row, today)).collect();
    info!(source = %source.describe(), count = records.len(), "helper records loaded");
    Ok(records)
}
