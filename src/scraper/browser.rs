use crate::config::BrowserConfig as LaunchConfig;
use crate::model::FetchError;
use crate::scraper::traits::RenderedFetcher;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};
use url::Url;

const TABLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Headless Chromium fetcher. A browser is launched per fetch and closed afterwards.
pub struct BrowserFetcher {
    config: LaunchConfig,
}

impl BrowserFetcher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    fn chrome_binary(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config.chrome_path {
            return Some(path.clone());
        }
        std::env::var("CHROME_BIN")
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.exists())
    }

    async fn launch(&self) -> Result<Browser, FetchError> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if let Some(bin) = self.chrome_binary() {
            info!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        let config = builder
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .build()
            .map_err(|e| FetchError::BrowserError(format!("browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::BrowserError(format!("failed to launch browser: {e}")))?;

        // The CDP handler must be polled for the connection to make progress.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("Browser CDP handler stopped: {:?}", event);
                    break;
                }
            }
        });

        Ok(browser)
    }

    async fn render(&self, browser: &Browser, url: &Url) -> Result<String, FetchError> {
        let page = browser
            .new_page(url.as_str())
            .await
            .map_err(|e| FetchError::HttpError(format!("failed to navigate to {url}: {e}")))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| FetchError::HttpError(format!("navigation to {url} failed: {e}")))?;

        self.wait_for_table(&page).await;

        let html = page
            .content()
            .await
            .map_err(|e| FetchError::BrowserError(format!("failed to read page content: {e}")))?;

        if let Err(e) = page.close().await {
            debug!("Page close failed: {}", e);
        }
        Ok(html)
    }

    /// Polls until a `<table>` exists or the wait budget runs out. The page is
    /// returned either way; a missing table is handled by the parser.
    async fn wait_for_table(&self, page: &Page) {
        let deadline = Instant::now() + Duration::from_secs(self.config.table_wait_seconds);
        loop {
            if page.find_element("table").await.is_ok() {
                debug!("Table rendered");
                return;
            }
            if Instant::now() >= deadline {
                warn!("No table appeared within {}s", self.config.table_wait_seconds);
                return;
            }
            sleep(TABLE_POLL_INTERVAL).await;
        }
    }
}

#[async_trait::async_trait]
impl RenderedFetcher for BrowserFetcher {
    /// Launch and render share one deadline of `timeout`.
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String, FetchError> {
        let deadline = Instant::now() + timeout;

        let mut browser = match tokio::time::timeout_at(deadline, self.launch()).await {
            Ok(launched) => launched?,
            Err(_) => return Err(FetchError::Timeout(timeout.as_secs())),
        };

        let result = tokio::time::timeout_at(deadline, self.render(&browser, url)).await;

        if let Err(e) = browser.close().await {
            debug!("Browser close failed: {}", e);
        }
        if let Err(e) = browser.wait().await {
            debug!("Waiting for browser exit failed: {}", e);
        }

        match result {
            Ok(inner) => inner,
            Err(_) => Err(FetchError::Timeout(timeout.as_secs())),
        }
    }
}
