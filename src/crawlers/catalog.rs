use crate::config::{CompiledSelectors, ScraperConfig};
use crate::crawlers::renderer::PageRenderer;
use crate::crawlers::walker::{PaginationWalker, WalkOutcome};
use crate::error::ScrapeError;
use crate::parsers::PageContext;
use crate::parsers::listing::{BrandLookup, find_brand_link};
use crate::results::ProductRecord;
use crate::sink::RecordSink;

/// Entry point for one catalog: resolves the brand from the navigation menu
/// and hands the brand page to a [`PaginationWalker`].
pub struct CatalogSearchEngine<R: PageRenderer> {
    renderer: R,
    config: ScraperConfig,
    selectors: CompiledSelectors,
}

impl<R: PageRenderer> CatalogSearchEngine<R> {
    /// Builds an engine, rejecting configuration whose selectors do not parse
    pub fn new(renderer: R, config: ScraperConfig) -> Result<Self, ScrapeError> {
        config.validate()?;
        let selectors = CompiledSelectors::compile(&config.selectors)?;
        Ok(Self {
            renderer,
            config,
            selectors,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Looks for `product_name` under `brand_name`.
    ///
    /// Returns `Ok(None)` when the menu, the brand or the product cannot be
    /// found. A found product has already been appended to `sink`.
    pub async fn search(
        &self,
        sink: &mut RecordSink,
        brand_name: &str,
        product_name: &str,
    ) -> Result<Option<ProductRecord>, ScrapeError> {
        let Some(brand_url) = self.brand_url(brand_name).await? else {
            return Ok(None);
        };

        ::log::info!("Brand '{}' found. Link: {}", brand_name, brand_url);

        let outcome = PaginationWalker::new(&self.renderer, sink, &self.config, &self.selectors)
            .walk(&brand_url, product_name)
            .await?;

        Ok(match outcome {
            WalkOutcome::Found(record) => Some(record),
            WalkOutcome::Exhausted => None,
        })
    }

    async fn brand_url(&self, brand_name: &str) -> Result<Option<String>, ScrapeError> {
        let base_url = &self.config.base_url;
        let html = self.renderer.render(base_url).await?;
        let lookup = {
            let page = PageContext::new(base_url, html)?;
            find_brand_link(&page, brand_name, &self.selectors)
        };

        match lookup {
            BrandLookup::Found(url) => Ok(Some(url)),
            BrandLookup::MenuMissing => {
                ::log::warn!("Navigation menu missing on {}", base_url);
                Ok(None)
            }
            BrandLookup::NotListed => {
                ::log::info!("Brand '{}' not found in navigation menu", brand_name);
                Ok(None)
            }
        }
    }
}
