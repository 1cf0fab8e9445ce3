use crate::forecast::types::ForecastMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("{0} does not hold a JSON object")]
    NotAnObject(PathBuf),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Rewrites `path` with `value` as 4-space indented JSON, non-ASCII text kept as is.
///
/// The document is serialized before the file is opened, so a failure leaves the old file intact.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }
    fs::write(path, buf).map_err(io_error(path))
}

pub fn read_forecast(path: &Path) -> Result<ForecastMap, OutputError> {
    let raw = fs::read_to_string(path).map_err(io_error(path))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    ForecastMap::from_json(value).ok_or_else(|| OutputError::NotAnObject(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::ForecastKey;

    #[test]
    fn test_write_creates_directory_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("forecast.json");
        let mut map = ForecastMap::new();
        map.insert("02.01.2025".parse::<ForecastKey>().unwrap(), "Śnieg, **-2°C**".to_string());

        write_json(&path, &map).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n    \"02.01.2025\": \"Śnieg, **-2°C**\"\n}");
    }

    #[test]
    fn test_read_back_what_was_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.json");
        let mut map = ForecastMap::new();
        map.insert("02.01.2025N".parse::<ForecastKey>().unwrap(), "Mróz".to_string());
        map.insert("01.01.2025".parse::<ForecastKey>().unwrap(), "Słońce".to_string());

        write_json(&path, &map).unwrap();

        assert_eq!(read_forecast(&path).unwrap(), map);
    }

    #[test]
    fn test_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(read_forecast(&missing), Err(OutputError::Io { .. })));

        let list = dir.path().join("list.json");
        fs::write(&list, "[]").unwrap();
        assert!(matches!(read_forecast(&list), Err(OutputError::NotAnObject(_))));
    }
}
