// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod input;
pub mod parsers;
pub mod results;
pub mod sink;
pub mod utils;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use crawlers::catalog::CatalogSearchEngine;
pub use crawlers::renderer::PageRenderer;
pub use crawlers::web::WebDriverRenderer;
pub use error::ScrapeError;
pub use results::{Availability, ProductRecord, SearchRequest};
pub use sink::RecordSink;

/// Tally of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
}

/// Main builder for a catalog scrape run
pub struct Scrapers {
    config: ScraperConfig,
}

impl Scrapers {
    /// Create a new builder with the given configuration
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self, ScrapeError> {
        Ok(Self::new(ScraperConfig::from_file(path)?))
    }

    /// Load configuration from a string
    pub fn from_config_str(config_str: &str) -> Result<Self, ScrapeError> {
        Ok(Self::new(ScraperConfig::from_json(config_str)?))
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, webdriver_url: impl Into<String>) -> Self {
        self.config.webdriver_url = webdriver_url.into();
        self
    }

    /// Set the ceiling on listing pages scanned per request
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the CSV file the requests are read from
    pub fn with_input(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// Set the JSON file records are written to
    pub fn with_output(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Load the requests and process them one by one against the live site
    pub async fn run(self) -> Result<BatchSummary, ScrapeError> {
        let requests = input::load_requests(&self.config.input_path)?;
        let mut sink = RecordSink::new(self.config.output_path.clone());
        let renderer = WebDriverRenderer::new(&self.config);
        let engine = CatalogSearchEngine::new(renderer, self.config)?;

        Ok(run_requests(&engine, &mut sink, requests).await)
    }
}

/// Processes requests sequentially; a failing request is logged and skipped
pub async fn run_requests<R, I>(
    engine: &CatalogSearchEngine<R>,
    sink: &mut RecordSink,
    requests: I,
) -> BatchSummary
where
    R: PageRenderer,
    I: IntoIterator<Item = SearchRequest>,
{
    let mut summary = BatchSummary::default();

    for request in requests {
        ::log::info!("Searching for product: {}", request.product_name);

        match engine
            .search(sink, &request.brand_name, &request.product_name)
            .await
        {
            Ok(Some(_)) => summary.found += 1,
            Ok(None) => summary.not_found += 1,
            Err(e) => {
                ::log::error!(
                    "Error while scraping (Product -> {}): {}",
                    request.product_name,
                    e
                );
                summary.failed += 1;
            }
        }
    }

    ::log::info!(
        "Run complete - {} found, {} not found, {} failed",
        summary.found,
        summary.not_found,
        summary.failed
    );
    summary
}
