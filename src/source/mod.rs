pub mod file;
pub mod http;
pub mod memory;

use crate::config::SnapshotLocation;
use crate::forecast::types::ForecastMap;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("Timed out waiting for {selector:?} on {url}")]
    SelectorMissing { selector: String, url: String },
    #[error("Invalid selector: {0:?}")]
    InvalidSelector(String),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("Snapshot is not a JSON object")]
    NotAnObject,
    #[error("Reading snapshot failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads pages the way a browser would present them.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Returns the markup of `url` once an element matching `wait_for` is present.
    async fn render(&self, url: &str, wait_for: &str) -> Result<String, RenderError>;
}

/// Previously published forecast the fresh scrape is merged with.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<ForecastMap, SnapshotError>;
}

pub fn snapshot_source(
    location: &SnapshotLocation,
    timeout: Duration,
) -> Result<Box<dyn SnapshotSource>, SnapshotError> {
    Ok(match location {
        SnapshotLocation::Remote(url) => Box::new(http::HttpSnapshot::new(url, timeout)?),
        SnapshotLocation::Local(path) => Box::new(file::FileSnapshot::new(path)),
        SnapshotLocation::Disabled => Box::new(memory::StaticSnapshot::default()),
    })
}

fn parse_snapshot(value: serde_json::Value) -> Result<ForecastMap, SnapshotError> {
    ForecastMap::from_json(value).ok_or(SnapshotError::NotAnObject)
}
