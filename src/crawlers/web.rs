use crate::config::ScraperConfig;
use crate::crawlers::renderer::PageRenderer;
use crate::error::ScrapeError;
use async_trait::async_trait;
use fantoccini::error::NewSessionError;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tokio::time::{Duration, Instant, timeout, timeout_at};

/// WebDriver endpoints tried when the configured one refuses a session
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Budget for closing a session once rendering has finished or timed out
const CLOSE_GRACE: Duration = Duration::from_secs(10);

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Renders pages through a WebDriver browser session.
///
/// A fresh session is opened for every page and closed before `render`
/// returns, whatever the outcome. Connecting and loading share one
/// `render_timeout` budget.
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    webdriver_url: String,
    headless: bool,
    render_timeout: Duration,
}

impl WebDriverRenderer {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            render_timeout: Duration::from_secs(config.render_timeout_secs),
        }
    }

    fn capabilities() -> fantoccini::wd::Capabilities {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": ["--headless=new", "--disable-gpu"] }),
        );
        caps.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
        caps
    }

    async fn try_connect(&self, webdriver_url: &str) -> Result<Client, NewSessionError> {
        let mut builder = ClientBuilder::native();
        if self.headless {
            builder.capabilities(Self::capabilities());
        }
        builder.connect(webdriver_url).await
    }

    fn timed_out(&self, url: &str) -> ScrapeError {
        ScrapeError::Timeout {
            url: url.to_string(),
            secs: self.render_timeout.as_secs(),
        }
    }

    /// Connects to the configured WebDriver, then to the common local fallbacks
    async fn connect(&self) -> Result<Client, ScrapeError> {
        let primary_error = match self.try_connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Ok(client);
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS {
            if url == self.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = self.try_connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Session(primary_error))
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    async fn render(&self, url: &str) -> Result<String, ScrapeError> {
        let deadline = Instant::now() + self.render_timeout;

        let client = match timeout_at(deadline, self.connect()).await {
            Ok(client) => client?,
            Err(_) => return Err(self.timed_out(url)),
        };

        let result = match timeout_at(deadline, load_and_scroll(&client, url)).await {
            Ok(result) => result,
            Err(_) => Err(self.timed_out(url)),
        };

        match timeout(CLOSE_GRACE, client.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => ::log::warn!("Failed to close WebDriver session after {}: {}", url, e),
            Err(_) => ::log::warn!("Timed out closing WebDriver session after {}", url),
        }

        result
    }
}

/// Navigates, scrolls to the bottom so lazy content loads, and returns the source
async fn load_and_scroll(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let started = std::time::Instant::now();

    client.goto(url).await.inspect_err(|e| {
        log_navigation_error(e, "accessing", url);
    })?;

    if let Err(e) = client.execute(SCROLL_TO_BOTTOM, Vec::new()).await {
        ::log::debug!("Could not scroll {}: {}", url, e);
    }

    let html = client.source().await.inspect_err(|e| {
        log_navigation_error(e, "getting source for", url);
    })?;

    ::log::debug!(
        "Rendered {} in {:.2} seconds",
        url,
        started.elapsed().as_secs_f64()
    );
    non_empty_source(url, html)
}

/// A blank source means the browser never loaded the page
fn non_empty_source(url: &str, html: String) -> Result<String, ScrapeError> {
    if html.trim().is_empty() {
        return Err(ScrapeError::Render {
            url: url.to_string(),
            reason: "browser returned an empty page source".to_string(),
        });
    }
    Ok(html)
}

fn log_navigation_error(error: &fantoccini::error::CmdError, context: &str, url: &str) {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed {} {}: {}", context, url, error);
    }
}
