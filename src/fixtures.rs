//! HTML builders and an in-memory renderer shared by the unit tests.

use crate::crawlers::renderer::PageRenderer;
use crate::error::ScrapeError;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const BASE_URL: &str = "https://shop.example/";

/// Navigation page with the given (text, href) brand links
pub fn menu_page(links: &[(&str, &str)]) -> String {
    let items = links
        .iter()
        .map(|(text, href)| format!(r#"<li><a href="{href}">{text}</a></li>"#))
        .collect::<String>();
    format!(
        r#"<html><body><nav id="menubar101"><ul>{items}</ul></nav><main>Welcome</main></body></html>"#
    )
}

/// Listing page with (declared name, detail href) entries and an optional next link
pub fn listing_page(entries: &[(&str, &str)], next: Option<&str>) -> String {
    let head = next
        .map(|href| format!(r#"<link rel="next" href="{href}">"#))
        .unwrap_or_default();
    let tiles = entries
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<div class="innerproductlist" data-productname="{name}">
                     <a class="productlist-imgholder" href="{href}"><img src="x.png"></a>
                     <span class="productlist-title">{name}</span>
                   </div>"#
            )
        })
        .collect::<String>();
    format!(
        r#"<html><head><title>Brand</title>{head}</head><body><div class="productlist">{tiles}</div>
           <div class="paging"><a href="?page=1">1</a><a href="?page=2">2</a></div></body></html>"#
    )
}

/// Detail page; `specs` rows are rendered under the specification container
pub fn detail_page(price: Option<&str>, in_stock: bool, specs: Option<&[(&str, &str)]>) -> String {
    let price = price
        .map(|p| format!(r#"<span class="product-price-amount"> {p} </span>"#))
        .unwrap_or_default();
    let stock = if in_stock {
        r#"<span class="stock-green">Auf Lager</span>"#
    } else {
        ""
    };
    let table = specs
        .map(|rows| {
            let rows = rows
                .iter()
                .map(|(k, v)| format!("<tr><td> {k} </td><td>\n{v}\n</td></tr>"))
                .collect::<String>();
            format!(r#"<div id="pdetailTableSpecs"><table><tbody>{rows}</tbody></table></div>"#)
        })
        .unwrap_or_default();
    format!(r#"<html><body><h1>Product</h1>{price}{stock}{table}</body></html>"#)
}

/// Serves pages from a map and records every fetch in order
#[derive(Default)]
pub struct MockRenderer {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    fetches: Mutex<Vec<String>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl PageRenderer for MockRenderer {
    async fn render(&self, url: &str) -> Result<String, ScrapeError> {
        self.fetches.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            return Err(ScrapeError::Render {
                url: url.to_string(),
                reason: "connection reset".to_string(),
            });
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Render {
                url: url.to_string(),
                reason: "no such page".to_string(),
            })
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(::log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Collects log messages per thread so parallel tests don't see each other
struct CaptureLogger;

impl ::log::Log for CaptureLogger {
    fn enabled(&self, _: &::log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &::log::Record<'_>) {
        CAPTURED.with(|lines| {
            lines
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Installs the capturing logger (once per process) and clears this thread's buffer
pub fn capture_logs() {
    let _ = ::log::set_logger(&LOGGER);
    ::log::set_max_level(::log::LevelFilter::Trace);
    CAPTURED.with(|lines| lines.borrow_mut().clear());
}

/// Level and message of everything logged on this thread since the last `capture_logs`
pub fn captured_logs() -> Vec<(::log::Level, String)> {
    CAPTURED.with(|lines| lines.borrow().clone())
}
