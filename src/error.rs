/// Errors raised while locating and extracting products.
///
/// Structural misses (absent price, absent next link, unknown brand) are not
/// errors; they surface as `None` or an exhausted walk.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// No WebDriver session could be opened.
    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A WebDriver command failed while rendering a page.
    #[error("WebDriver command error: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    /// Rendering a page took longer than the configured budget.
    #[error("Timed out after {secs}s rendering {url}")]
    Timeout { url: String, secs: u64 },

    /// A page rendered without usable content, such as an empty source.
    /// Custom `PageRenderer` implementations report their own failures here.
    #[error("Render error for {url}: {reason}")]
    Render { url: String, reason: String },

    /// A URL could not be parsed or resolved.
    #[error("Invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A configured CSS selector does not parse.
    #[error("Invalid CSS selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
