use crate::config::{CompiledSelectors, ScraperConfig};
use crate::crawlers::renderer::PageRenderer;
use crate::error::ScrapeError;
use crate::parsers::listing::{find_next_page, find_product};
use crate::parsers::product::extract_product;
use crate::parsers::PageContext;
use crate::results::{ProductCandidate, ProductRecord};
use crate::sink::RecordSink;
use std::collections::HashSet;

/// Where a walk over a brand's listing pages currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum WalkState {
    /// Next listing page to fetch and scan
    Scanning(String),
    /// The product was found and its record persisted
    Found(ProductRecord),
    /// No page in the chain listed the product
    Exhausted,
}

/// Terminal result of a walk
#[derive(Debug, Clone, PartialEq)]
pub enum WalkOutcome {
    Found(ProductRecord),
    Exhausted,
}

/// What a single listing page told us
#[derive(Debug)]
enum PageScan {
    Hit(ProductCandidate),
    Next(String),
    End,
}

/// Follows a brand's `next` chain until the product turns up or the chain ends.
///
/// Pages are scanned strictly in chain order and never revisited. A next
/// link pointing back at a scanned page, or more than `max_pages` pages,
/// ends the walk as exhausted.
pub struct PaginationWalker<'a, R: PageRenderer + ?Sized> {
    renderer: &'a R,
    sink: &'a mut RecordSink,
    config: &'a ScraperConfig,
    selectors: &'a CompiledSelectors,
}

impl<'a, R: PageRenderer + ?Sized> PaginationWalker<'a, R> {
    pub fn new(
        renderer: &'a R,
        sink: &'a mut RecordSink,
        config: &'a ScraperConfig,
        selectors: &'a CompiledSelectors,
    ) -> Self {
        Self {
            renderer,
            sink,
            config,
            selectors,
        }
    }

    /// Walks from `brand_url` looking for `product_name`.
    ///
    /// On a match the detail page is fetched, its record appended to the
    /// sink, and the walk stops.
    pub async fn walk(
        &mut self,
        brand_url: &str,
        product_name: &str,
    ) -> Result<WalkOutcome, ScrapeError> {
        let mut visited = HashSet::new();
        let mut state = WalkState::Scanning(brand_url.to_string());

        loop {
            state = match state {
                WalkState::Scanning(url) => {
                    if visited.len() >= self.config.max_pages {
                        ::log::warn!(
                            "Stopping after {} listing pages without finding '{}'",
                            visited.len(),
                            product_name
                        );
                        WalkState::Exhausted
                    } else {
                        visited.insert(url.clone());
                        self.scan(&url, product_name, &visited).await?
                    }
                }
                WalkState::Found(record) => return Ok(WalkOutcome::Found(record)),
                WalkState::Exhausted => {
                    ::log::info!("Product '{}' not found on any page.", product_name);
                    return Ok(WalkOutcome::Exhausted);
                }
            };
        }
    }

    /// Fetches one listing page and decides the next state
    async fn scan(
        &mut self,
        url: &str,
        product_name: &str,
        visited: &HashSet<String>,
    ) -> Result<WalkState, ScrapeError> {
        let html = self.renderer.render(url).await?;
        let scan = scan_listing(url, html, product_name, self.selectors)?;

        match scan {
            PageScan::Hit(candidate) => {
                ::log::info!(
                    "Product '{}' found. Link: {}",
                    candidate.declared_name,
                    candidate.detail_link
                );
                let record = self.extract(&candidate).await?;
                self.sink.append(record.clone())?;
                ::log::info!("Product information added to results");
                Ok(WalkState::Found(record))
            }
            PageScan::Next(next) if visited.contains(&next) => {
                ::log::warn!("Next link on {} points back to {}, stopping", url, next);
                Ok(WalkState::Exhausted)
            }
            PageScan::Next(next) => {
                ::log::info!("Product not found on {}, moving to {}", url, next);
                Ok(WalkState::Scanning(next))
            }
            PageScan::End => {
                ::log::info!("Product not found on {} and no next page", url);
                Ok(WalkState::Exhausted)
            }
        }
    }

    async fn extract(&self, candidate: &ProductCandidate) -> Result<ProductRecord, ScrapeError> {
        let html = self.renderer.render(&candidate.detail_link).await?;
        let page = PageContext::new(&candidate.detail_link, html)?;
        Ok(extract_product(
            &page.document,
            candidate,
            self.config,
            self.selectors,
        ))
    }
}

fn scan_listing(
    url: &str,
    html: String,
    product_name: &str,
    selectors: &CompiledSelectors,
) -> Result<PageScan, ScrapeError> {
    let page = PageContext::new(url, html)?;

    if let Some(candidate) = find_product(&page, product_name, selectors) {
        return Ok(PageScan::Hit(candidate));
    }

    Ok(match find_next_page(&page, selectors) {
        Some(next) => PageScan::Next(next),
        None => PageScan::End,
    })
}
