use crate::model::FetchError;
use std::time::Duration;
use url::Url;

/// Fetches a page with client-side script executed, returning the rendered DOM.
#[async_trait::async_trait]
pub trait RenderedFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String, FetchError>;
}

/// Fetches the robots.txt governing `url`. Never fails: any problem yields an empty policy.
#[async_trait::async_trait]
pub trait PolicyFetcher: Send + Sync {
    async fn fetch_policy(&self, url: &Url) -> String;
}
