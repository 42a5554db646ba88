use crate::config::AppConfig;
use crate::model::{FetchError, PipelineError, StoredRecord};
use crate::parser::{is_allowed, TableParser};
use crate::scraper::{PolicyFetcher, RenderedFetcher};
use crate::storage::TourismStorage;
use crate::utils::host_slug;

use std::fs;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};
use url::Url;

const PREVIEW_ROWS: usize = 5;

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    /// robots.txt forbids the target path; nothing was fetched.
    Disallowed,
    /// The page had no usable rows; the store was not touched.
    NoData,
    /// Records were stored; these are the rows read back.
    Completed(Vec<StoredRecord>),
}

pub struct Pipeline<'a, F, P> {
    config: &'a AppConfig,
    fetcher: F,
    policy: P,
    parser: TableParser,
}

impl<'a, F: RenderedFetcher, P: PolicyFetcher> Pipeline<'a, F, P> {
    pub fn new(config: &'a AppConfig, fetcher: F, policy: P) -> Self {
        Self {
            config,
            fetcher,
            policy,
            parser: TableParser::new(config.count_suffix.clone()),
        }
    }

    /// permission check → pause → rendered fetch → extract → persist → read back.
    pub async fn run(&self, storage: &mut TourismStorage) -> Result<RunOutcome, PipelineError> {
        let url = Url::parse(&self.config.target_url)?;
        info!("Scraping data from {}", url);

        let policy_text = self.policy.fetch_policy(&url).await;
        if !is_allowed(&url, &policy_text) {
            warn!("robots.txt disallows scraping {}, stopping", url.path());
            return Ok(RunOutcome::Disallowed);
        }

        sleep(self.config.request_pause()).await;

        info!("Rendering page...");
        let render_timeout = self.config.render_timeout();
        let html = timeout(render_timeout, self.fetcher.fetch(&url, render_timeout))
            .await
            .map_err(|_| FetchError::Timeout(render_timeout.as_secs()))??;

        info!("Parsing HTML...");
        let records = self.parser.parse(&html)?;
        if records.is_empty() {
            self.save_debug_html(&html, &url);
            warn!("No data extracted, nothing will be stored");
            return Ok(RunOutcome::NoData);
        }

        storage.replace_all(&records)?;

        info!("Store now holds {} rows", storage.count()?);
        let rows = storage.load_all()?;
        for row in rows.iter().take(PREVIEW_ROWS) {
            info!(
                "  {:>3} | {} | {}",
                row.id, row.country_name, row.number_of_foreigners
            );
        }

        Ok(RunOutcome::Completed(rows))
    }

    /// Keeps the rendered page around for inspection when nothing could be extracted.
    fn save_debug_html(&self, html: &str, url: &Url) {
        let folder = &self.config.debug_html_dir;
        if let Err(e) = fs::create_dir_all(folder) {
            warn!("Failed to create debug folder: {}", e);
            return;
        }
        let filename = folder.join(format!("debug-{}.html", host_slug(url)));
        if let Err(e) = fs::write(&filename, html) {
            warn!("Failed to write debug HTML: {}", e);
        } else {
            info!("Saved debug HTML: {}", filename.display());
        }
    }
}
