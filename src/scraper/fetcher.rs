use crate::model::FetchError;
use crate::scraper::traits::PolicyFetcher;
use crate::utils::robots_url;

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Plain HTTP client for the site's robots.txt.
pub struct RobotsFetcher {
    client: Client,
}

impl RobotsFetcher {
    pub fn new(user_agent: Option<&str>, timeout: Duration) -> Result<Self, FetchError> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua.to_string());
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self { client })
    }

    async fn get(&self, robots: &Url) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self.client.get(robots.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl PolicyFetcher for RobotsFetcher {
    async fn fetch_policy(&self, url: &Url) -> String {
        let robots = match robots_url(url) {
            Ok(u) => u,
            Err(e) => {
                warn!("Cannot derive robots.txt URL from {}: {}", url, e);
                return String::new();
            }
        };

        match self.get(&robots).await {
            Ok((StatusCode::OK, body)) => {
                info!("Fetched {}", robots);
                debug!("robots.txt contents:\n{}", body);
                body
            }
            Ok((status, _)) => {
                info!("robots.txt not found ({}), assuming no restrictions", status);
                String::new()
            }
            Err(e) => {
                warn!("Error fetching robots.txt, assuming no restrictions: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one connection: `/robots.txt` gets `status` + `body`, anything else 404.
    async fn serve_once(status: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]);

            let (status, body) = if request.starts_with("GET /robots.txt ") {
                (status, body)
            } else {
                ("404 Not Found", "")
            };
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        Url::parse(&format!("http://{addr}/tourism-database/stats/inbound/")).unwrap()
    }

    // Loopback only; ignore any proxy set in the environment.
    fn fetcher() -> RobotsFetcher {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        RobotsFetcher { client }
    }

    #[test]
    fn builds_with_custom_user_agent() {
        assert!(RobotsFetcher::new(Some("TourismStatsBot/0.1"), Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn returns_body_on_200() {
        let url = serve_once("200 OK", "User-agent: *\nDisallow: /private/\n").await;
        let policy = fetcher().fetch_policy(&url).await;
        assert_eq!(policy, "User-agent: *\nDisallow: /private/\n");
    }

    #[tokio::test]
    async fn non_200_is_empty_policy() {
        let url = serve_once("500 Internal Server Error", "Disallow: /").await;
        assert_eq!(fetcher().fetch_policy(&url).await, "");
    }

    #[tokio::test]
    async fn connection_failure_is_empty_policy() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/stats/")).unwrap();
        assert_eq!(fetcher().fetch_policy(&url).await, "");
    }
}
