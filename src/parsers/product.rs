//! Field extractors for product detail pages. A missing element leaves the
//! field unset; none of these fail.

use crate::config::{CompiledSelectors, ScraperConfig};
use crate::parsers::{Document, element_text};
use crate::results::{Availability, ProductCandidate, ProductRecord};
use std::collections::HashMap;

/// Trimmed text of the price element, if present and non-empty
pub fn extract_price(doc: &Document, selectors: &CompiledSelectors) -> Option<String> {
    doc.find_first(&selectors.price)
        .map(element_text)
        .filter(|price| !price.is_empty())
}

/// `Available` when the in-stock marker is present, `Unknown` otherwise
pub fn extract_availability(doc: &Document, selectors: &CompiledSelectors) -> Availability {
    if doc.contains(&selectors.in_stock) {
        Availability::Available
    } else {
        Availability::Unknown
    }
}

/// Key/value pairs from the specification table.
///
/// A page without the table yields an empty map. Rows with fewer than two
/// cells are ignored and a repeated key keeps its last value.
pub fn extract_specs(doc: &Document, selectors: &CompiledSelectors) -> HashMap<String, String> {
    let mut specs = HashMap::new();

    for row in doc.find_all(&selectors.spec_rows) {
        let mut cells = row.select(&selectors.cell);
        let (Some(key), Some(value)) = (cells.next(), cells.next()) else {
            continue;
        };
        specs.insert(element_text(key), element_text(value));
    }

    specs
}

/// Runs every extractor over a detail page and assembles the record
pub fn extract_product(
    doc: &Document,
    candidate: &ProductCandidate,
    config: &ScraperConfig,
    selectors: &CompiledSelectors,
) -> ProductRecord {
    let price = extract_price(doc, selectors);
    match &price {
        Some(price) => ::log::info!("Product Price: {}", price),
        None => ::log::info!("Product price not found on the product page."),
    }

    let availability = extract_availability(doc, selectors);
    if availability.is_available() {
        ::log::info!("Product Availability: Available");
    } else {
        ::log::info!("Product availability not found on the product page.");
    }

    let mut specs = extract_specs(doc, selectors);
    if specs.is_empty() {
        ::log::info!("No specification table on {}", candidate.detail_link);
    }

    ProductRecord {
        name: candidate.declared_name.clone(),
        link: candidate.detail_link.clone(),
        price,
        availability,
        needle_size: specs.remove(&config.needle_size_label),
        composition: specs.remove(&config.composition_label),
        source_site: config.site_name.clone(),
    }
}
