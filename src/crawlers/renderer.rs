use crate::error::ScrapeError;
use async_trait::async_trait;

/// Turns a URL into the final HTML of the fully rendered page
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render `url` and return the page source after scripts have run.
    ///
    /// Every call is independent: implementations acquire whatever resource
    /// they need and release it before returning, on success or failure.
    async fn render(&self, url: &str) -> Result<String, ScrapeError>;
}
