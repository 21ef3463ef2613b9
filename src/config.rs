use crate::error::ScrapeError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// CSS selectors and attribute names describing the vendor's page layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Navigation region holding the brand links
    #[serde(default = "default_menu")]
    pub menu: String,

    /// Brand links inside the navigation region
    #[serde(default = "default_brand_link")]
    pub brand_link: String,

    /// One product tile on a listing page
    #[serde(default = "default_listing_entry")]
    pub listing_entry: String,

    /// Attribute on a listing entry carrying the declared product name
    #[serde(default = "default_product_name_attr")]
    pub product_name_attr: String,

    /// Detail-page link inside a listing entry
    #[serde(default = "default_detail_link")]
    pub detail_link: String,

    /// Forward pagination pointer
    #[serde(default = "default_next_page")]
    pub next_page: String,

    /// Price amount on a detail page
    #[serde(default = "default_price")]
    pub price: String,

    /// "In stock" marker on a detail page
    #[serde(default = "default_in_stock")]
    pub in_stock: String,

    /// Rows of the specification table on a detail page
    #[serde(default = "default_spec_rows")]
    pub spec_rows: String,
}

/// Configuration for a catalog scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Top-level page exposing the brand navigation menu
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value written to the `Website` field of every record
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Budget for rendering a single page, in seconds
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    /// Ceiling on listing pages scanned per request
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// CSV file with `Brand` and `Name` columns
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// JSON file rewritten on every find
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Diagnostic log file
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Spec-table label holding the needle size
    #[serde(default = "default_needle_size_label")]
    pub needle_size_label: String,

    /// Spec-table label holding the composition
    #[serde(default = "default_composition_label")]
    pub composition_label: String,

    #[serde(default)]
    pub selectors: SiteSelectors,
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrapeError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScrapeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make every request fail
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.max_pages == 0 {
            return Err(ScrapeError::Config("max_pages must be at least 1".into()));
        }
        if self.render_timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "render_timeout_secs must be at least 1".into(),
            ));
        }
        url::Url::parse(&self.base_url).map_err(|source| ScrapeError::Url {
            url: self.base_url.clone(),
            source,
        })?;
        Ok(())
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site_name: default_site_name(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            render_timeout_secs: default_render_timeout_secs(),
            max_pages: default_max_pages(),
            input_path: default_input_path(),
            output_path: default_output_path(),
            log_path: default_log_path(),
            needle_size_label: default_needle_size_label(),
            composition_label: default_composition_label(),
            selectors: SiteSelectors::default(),
        }
    }
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            menu: default_menu(),
            brand_link: default_brand_link(),
            listing_entry: default_listing_entry(),
            product_name_attr: default_product_name_attr(),
            detail_link: default_detail_link(),
            next_page: default_next_page(),
            price: default_price(),
            in_stock: default_in_stock(),
            spec_rows: default_spec_rows(),
        }
    }
}

/// Selectors parsed once per run
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub menu: Selector,
    pub brand_link: Selector,
    pub listing_entry: Selector,
    pub product_name_attr: String,
    pub detail_link: Selector,
    pub next_page: Selector,
    pub price: Selector,
    pub in_stock: Selector,
    pub spec_rows: Selector,
    pub cell: Selector,
}

impl CompiledSelectors {
    pub fn compile(selectors: &SiteSelectors) -> Result<Self, ScrapeError> {
        Ok(Self {
            menu: parse_selector(&selectors.menu)?,
            brand_link: parse_selector(&selectors.brand_link)?,
            listing_entry: parse_selector(&selectors.listing_entry)?,
            product_name_attr: selectors.product_name_attr.clone(),
            detail_link: parse_selector(&selectors.detail_link)?,
            next_page: parse_selector(&selectors.next_page)?,
            price: parse_selector(&selectors.price)?,
            in_stock: parse_selector(&selectors.in_stock)?,
            spec_rows: parse_selector(&selectors.spec_rows)?,
            cell: parse_selector("td")?,
        })
    }
}

impl Default for CompiledSelectors {
    fn default() -> Self {
        Self::compile(&SiteSelectors::default()).expect("Default selectors should be valid")
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn default_base_url() -> String {
    "https://www.wollplatz.de/".to_string()
}

fn default_site_name() -> String {
    "Wollplatz".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_render_timeout_secs() -> u64 {
    45
}

fn default_max_pages() -> usize {
    100
}

fn default_input_path() -> PathBuf {
    PathBuf::from("products.csv")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("scrape_wollplatz.log")
}

fn default_needle_size_label() -> String {
    "Nadelstärke".to_string()
}

fn default_composition_label() -> String {
    "Zusammenstellung".to_string()
}

fn default_menu() -> String {
    "nav#menubar101".to_string()
}

fn default_brand_link() -> String {
    "a[href]".to_string()
}

fn default_listing_entry() -> String {
    "div.innerproductlist".to_string()
}

fn default_product_name_attr() -> String {
    "data-productname".to_string()
}

fn default_detail_link() -> String {
    "a.productlist-imgholder".to_string()
}

fn default_next_page() -> String {
    r#"link[rel="next"][href]"#.to_string()
}

fn default_price() -> String {
    "span.product-price-amount".to_string()
}

fn default_in_stock() -> String {
    "span.stock-green".to_string()
}

fn default_spec_rows() -> String {
    "div#pdetailTableSpecs table tr".to_string()
}
