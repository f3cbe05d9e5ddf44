//! # Modlist Feed Client
//!
//! Downloads the authoritative modlist feed (a JSON array) over HTTP.
//! Fetches are never cached; every call goes to the network.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::error::BotError;
use crate::domain::traits::FeedFetcher;
use crate::domain::types::FeedEntry;

pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    /// The timeout bounds the whole request, body included.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wabbabot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn unavailable(err: reqwest::Error) -> BotError {
    if err.is_timeout() {
        BotError::FeedUnavailable("request timed out".to_string())
    } else {
        BotError::FeedUnavailable(err.to_string())
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, BotError> {
        tracing::debug!("Fetching modlist feed from {}", url);
        let entries = self
            .client
            .get(url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<Vec<FeedEntry>>()
            .await
            .map_err(unavailable)?;
        tracing::debug!("Modlist feed has {} entries", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn fetcher() -> HttpFeedFetcher {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        HttpFeedFetcher::with_client(client)
    }

    /// Serves exactly one HTTP response on a local port.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/modlists.json")
    }

    #[tokio::test]
    async fn test_fetch_parses_feed() {
        let url = serve_once(
            "200 OK",
            r#"[{"title":"Cool","version":"1.0","links":{"machineURL":"abc123","image":"i","readme":"r"}},{"title":"Bare"}]"#,
        )
        .await;
        let fetcher = fetcher();

        let entries = fetcher.fetch(&url).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].machine_id(), Some("abc123"));
        assert_eq!(entries[1].machine_id(), None);
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let url = serve_once("503 Service Unavailable", "{}").await;
        let fetcher = fetcher();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, BotError::FeedUnavailable(_)));
    }

    #[tokio::test]
    async fn test_non_array_body_is_unavailable() {
        let url = serve_once("200 OK", r#"{"not":"a list"}"#).await;
        let fetcher = fetcher();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, BotError::FeedUnavailable(_)));
    }
}
