use crate::config::CompiledSelectors;
use crate::fixtures::{listing_page, menu_page};
use crate::parsers::PageContext;
use crate::parsers::listing::{BrandLookup, find_brand_link, find_next_page, find_product};

#[cfg(test)]
mod matcher_tests {
    use super::*;

    const PAGE_URL: &str = "https://shop.example/drops/";

    fn page(html: String) -> PageContext {
        PageContext::new(PAGE_URL, html).unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let page = page(listing_page(
            &[
                ("Merino Wool 50g", "https://shop.example/merino-50"),
                ("Alpaca Blend", "https://shop.example/alpaca"),
            ],
            None,
        ));
        let selectors = CompiledSelectors::default();

        let candidate = find_product(&page, "merino", &selectors).unwrap();
        assert_eq!(candidate.detail_link, "https://shop.example/merino-50");
        assert_eq!(candidate.declared_name, "Merino Wool 50g");

        assert!(find_product(&page, "silk", &selectors).is_none());
    }

    #[test]
    fn test_multiple_matches_take_document_order() {
        let page = page(listing_page(
            &[
                ("Baby Merino Rosa", "/baby-merino-rosa"),
                ("Baby Merino Blau", "/baby-merino-blau"),
            ],
            None,
        ));
        let candidate = find_product(&page, "BABY MERINO", &CompiledSelectors::default()).unwrap();
        assert_eq!(candidate.detail_link, "https://shop.example/baby-merino-rosa");
    }

    #[test]
    fn test_target_is_trimmed_before_matching() {
        let page = page(listing_page(&[("Alpaca Blend", "/alpaca")], None));
        assert!(find_product(&page, "  alpaca  ", &CompiledSelectors::default()).is_some());
    }

    #[test]
    fn test_entry_without_link_is_skipped() {
        let html = r#"<html><body>
            <div class="innerproductlist" data-productname="Merino Classic"></div>
            <div class="innerproductlist" data-productname="Merino Extra">
              <a class="productlist-imgholder" href="/merino-extra"></a>
            </div>
            <div class="innerproductlist"><a class="productlist-imgholder" href="/nameless"></a></div>
        </body></html>"#;
        let page = page(html.to_string());
        let candidate = find_product(&page, "merino", &CompiledSelectors::default()).unwrap();
        assert_eq!(candidate.detail_link, "https://shop.example/merino-extra");
    }

    #[test]
    fn test_page_without_entries() {
        let page = page("<html><body><p>Keine Produkte</p></body></html>".to_string());
        assert!(find_product(&page, "merino", &CompiledSelectors::default()).is_none());
    }
}

#[cfg(test)]
mod pagination_tests {
    use super::*;

    #[test]
    fn test_next_link_resolved_against_page() {
        let page = PageContext::new(
            "https://shop.example/drops/",
            listing_page(&[("Alpaca Blend", "/alpaca")], Some("?page=2")),
        )
        .unwrap();
        assert_eq!(
            find_next_page(&page, &CompiledSelectors::default()).as_deref(),
            Some("https://shop.example/drops/?page=2")
        );
    }

    #[test]
    fn test_numbered_page_links_are_not_a_next_link() {
        // The fixture always renders a numbered paging block; only <link rel="next"> counts.
        let page = PageContext::new(
            "https://shop.example/drops/",
            listing_page(&[("Alpaca Blend", "/alpaca")], None),
        )
        .unwrap();
        assert_eq!(find_next_page(&page, &CompiledSelectors::default()), None);
    }
}

#[cfg(test)]
mod brand_tests {
    use super::*;

    fn home(html: String) -> PageContext {
        PageContext::new("https://shop.example/", html).unwrap()
    }

    #[test]
    fn test_brand_link_found_case_insensitive() {
        let page = home(menu_page(&[
            ("Lana Grossa", "/lana-grossa"),
            ("DROPS Design", "/drops"),
        ]));
        assert_eq!(
            find_brand_link(&page, "drops", &CompiledSelectors::default()),
            BrandLookup::Found("https://shop.example/drops".to_string())
        );
    }

    #[test]
    fn test_brand_not_listed() {
        let page = home(menu_page(&[("Lana Grossa", "/lana-grossa")]));
        assert_eq!(
            find_brand_link(&page, "Schachenmayr", &CompiledSelectors::default()),
            BrandLookup::NotListed
        );
    }

    #[test]
    fn test_menu_missing() {
        let page = home(r#"<html><body><a href="/drops">DROPS</a></body></html>"#.to_string());
        assert_eq!(
            find_brand_link(&page, "drops", &CompiledSelectors::default()),
            BrandLookup::MenuMissing
        );
    }
}
