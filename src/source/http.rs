use super::{parse_snapshot, PageRenderer, RenderError, SnapshotError, SnapshotSource};
use crate::forecast::types::ForecastMap;
use crate::scrape;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = "SlaskForecast/1.0";

/// Renders pages by fetching their server-side markup. Scripts are not executed.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(timeout: Duration) -> Result<Self, RenderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str, wait_for: &str) -> Result<String, RenderError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        if !scrape::contains_selector(&body, wait_for)? {
            return Err(RenderError::SelectorMissing {
                selector: wait_for.to_string(),
                url: url.to_string(),
            });
        }
        Ok(body)
    }
}

/// Snapshot published as JSON at a URL.
pub struct HttpSnapshot {
    client: Client,
    url: String,
}

impl HttpSnapshot {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SnapshotError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshot {
    async fn fetch(&self) -> Result<ForecastMap, SnapshotError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::Status(status));
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        parse_snapshot(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::ForecastKey;
    use crate::source::memory::serve_once;

    fn snapshot(url: &str) -> HttpSnapshot {
        HttpSnapshot::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_published_forecast() {
        let url = serve_once("200 OK", r#"{"02.01.2025": "Śnieg", "03.01.2025N": 5}"#).await;

        let map = snapshot(&url).fetch().await.unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"02.01.2025".parse::<ForecastKey>().unwrap()), Some("Śnieg"));
    }

    #[tokio::test]
    async fn test_not_found_is_a_status_error() {
        let url = serve_once("404 Not Found", "").await;

        let err = snapshot(&url).fetch().await.unwrap_err();

        assert!(matches!(err, SnapshotError::Status(status) if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_non_object_body_is_rejected() {
        let url = serve_once("200 OK", "[1]").await;

        let err = snapshot(&url).fetch().await.unwrap_err();

        assert!(matches!(err, SnapshotError::NotAnObject));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let url = serve_once("200 OK", "{bad").await;

        let err = snapshot(&url).fetch().await.unwrap_err();

        assert!(matches!(err, SnapshotError::JsonParsing(_)));
    }
}
