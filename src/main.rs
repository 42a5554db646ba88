mod config;
mod model;
mod normalizer;
mod parser;
mod pipeline;
mod reporter;
mod scraper;
mod storage;
mod utils;

use config::{load_config_or_default, AppConfig};
use model::PipelineError;
use pipeline::{Pipeline, RunOutcome};
use reporter::{ChartRenderer, ChartSpec, WindowRenderer};
use crate::scraper::{BrowserFetcher, RobotsFetcher};
use storage::TourismStorage;
use tracing::{error, info};

const CONFIG_PATH: &str = "config.json";

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config = match load_config_or_default(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = runtime.block_on(scrape(&config));
    drop(runtime);

    match outcome {
        Ok(RunOutcome::Completed(rows)) => {
            let chart = ChartSpec::from_records(&rows, &config.chart);
            if let Err(e) = WindowRenderer::new(config.chart.clone()).render(&chart) {
                error!("Chart rendering failed: {}", e);
                std::process::exit(1);
            }
        }
        Ok(RunOutcome::Disallowed) => {
            info!("Scraping is disallowed by robots.txt. Exiting.");
        }
        Ok(RunOutcome::NoData) => {
            info!("No data could be retrieved, the database was not updated.");
        }
        Err(e) => {
            error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Opens the store, then runs the scrape against the real robots.txt and headless browser.
async fn scrape(config: &AppConfig) -> Result<RunOutcome, PipelineError> {
    let mut storage = TourismStorage::new(&config.db_path)?;
    info!("Database ready at {}", config.db_path.display());

    let policy = RobotsFetcher::new(config.user_agent.as_deref(), config.http_timeout())?;
    let fetcher = BrowserFetcher::new(config.browser.clone());

    Pipeline::new(config, fetcher, policy).run(&mut storage).await
}
