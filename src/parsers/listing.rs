//! Queries against navigation and listing pages: brand lookup, product
//! matching and the forward pagination pointer.

use crate::config::CompiledSelectors;
use crate::parsers::{PageContext, element_text};
use crate::results::ProductCandidate;
use crate::utils::{name_contains, normalize_name};

/// Outcome of looking a brand up in the navigation menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandLookup {
    /// The navigation region itself is not on the page
    MenuMissing,
    /// The menu exists but no link text mentions the brand
    NotListed,
    /// Absolute URL of the brand's landing page
    Found(String),
}

/// Finds the first link in the navigation menu whose visible text contains `brand`
pub fn find_brand_link(
    page: &PageContext,
    brand: &str,
    selectors: &CompiledSelectors,
) -> BrandLookup {
    let Some(menu) = page.document.find_first(&selectors.menu) else {
        return BrandLookup::MenuMissing;
    };

    for link in menu.select(&selectors.brand_link) {
        if !name_contains(&element_text(link), brand) {
            continue;
        }
        if let Some(url) = link.value().attr("href").and_then(|h| page.resolve(h)) {
            return BrandLookup::Found(url);
        }
    }

    BrandLookup::NotListed
}

/// Scans listing entries in document order and returns the first whose
/// declared name contains `target` (case-insensitive).
///
/// Entries without a name attribute or without a detail link are skipped.
pub fn find_product(
    page: &PageContext,
    target: &str,
    selectors: &CompiledSelectors,
) -> Option<ProductCandidate> {
    let target = normalize_name(target);

    for entry in page.document.find_all(&selectors.listing_entry) {
        let Some(declared) = entry.value().attr(&selectors.product_name_attr) else {
            ::log::debug!("Listing entry without a product name on {}", page.url);
            continue;
        };

        if !normalize_name(declared).contains(&target) {
            continue;
        }

        let detail_link = entry
            .select(&selectors.detail_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| page.resolve(href));

        match detail_link {
            Some(detail_link) => {
                return Some(ProductCandidate {
                    declared_name: declared.trim().to_string(),
                    detail_link,
                });
            }
            None => {
                ::log::warn!(
                    "Listing entry '{}' matched but has no detail link on {}",
                    declared.trim(),
                    page.url
                );
            }
        }
    }

    None
}

/// The page's forward pagination pointer, resolved to an absolute URL
pub fn find_next_page(page: &PageContext, selectors: &CompiledSelectors) -> Option<String> {
    page.document
        .find_first(&selectors.next_page)
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| page.resolve(href))
}
