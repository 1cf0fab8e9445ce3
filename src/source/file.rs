use super::{parse_snapshot, SnapshotError, SnapshotSource};
use crate::forecast::types::ForecastMap;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Snapshot kept in a local JSON file, usually the last written full forecast.
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshot {
    async fn fetch(&self) -> Result<ForecastMap, SnapshotError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        parse_snapshot(value)
    }
}
