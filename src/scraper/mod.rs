pub mod browser;
pub mod fetcher;
pub mod traits;

pub use browser::BrowserFetcher;
pub use fetcher::RobotsFetcher;
pub use traits::{PolicyFetcher, RenderedFetcher};
