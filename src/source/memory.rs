use super::{SnapshotError, SnapshotSource};
use crate::forecast::types::ForecastMap;
use async_trait::async_trait;

/// Snapshot held in memory. The default one is empty and stands in for a disabled source.
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshot(pub ForecastMap);

#[async_trait]
impl SnapshotSource for StaticSnapshot {
    async fn fetch(&self) -> Result<ForecastMap, SnapshotError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
pub use pages::StaticPages;

#[cfg(test)]
mod pages {
    use crate::scrape;
    use crate::source::{PageRenderer, RenderError};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Serves fixed markup per URL.
    #[derive(Debug, Clone, Default)]
    pub struct StaticPages {
        pages: HashMap<String, String>,
    }

    impl StaticPages {
        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    #[async_trait]
    impl PageRenderer for StaticPages {
        async fn render(&self, url: &str, wait_for: &str) -> Result<String, RenderError> {
            let missing = || RenderError::SelectorMissing {
                selector: wait_for.to_string(),
                url: url.to_string(),
            };
            let html = self.pages.get(url).ok_or_else(missing)?;
            if !scrape::contains_selector(html, wait_for)? {
                return Err(missing());
            }
            Ok(html.clone())
        }
    }
}

/// Answers a single HTTP request on a local port with `status` and `body`, returning the URL.
#[cfg(test)]
pub async fn serve_once(status: &'static str, body: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/forecast.json")
}

/// Snapshot source that always fails, for exercising the absorbed-failure path.
#[cfg(test)]
pub struct FailingSnapshot;

#[cfg(test)]
#[async_trait]
impl SnapshotSource for FailingSnapshot {
    async fn fetch(&self) -> Result<ForecastMap, SnapshotError> {
        Err(SnapshotError::NotAnObject)
    }
}
