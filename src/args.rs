use clap::Parser;
use std::path::PathBuf;
use yarn_finder::ScraperConfig;

#[derive(Parser, Debug)]
#[command(name = "yarn-finder")]
#[command(about = "Finds products on a catalog site by brand and name and records their details")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (site URL, selectors, spec labels, paths)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV file with `Brand` and `Name` columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON file rewritten with every product found
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Diagnostic log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// WebDriver endpoint (overrides WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Maximum listing pages scanned per product
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Seconds allowed for rendering a single page
    #[arg(long)]
    pub render_timeout: Option<u64>,

    /// Show the browser window instead of running headless
    #[arg(long, default_value_t = false)]
    pub headed: bool,
}

impl Args {
    /// Layers environment and command-line overrides on top of `config`
    pub fn apply(&self, mut config: ScraperConfig) -> ScraperConfig {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        if let Some(path) = &self.input {
            config.input_path = path.clone();
        }
        if let Some(path) = &self.output {
            config.output_path = path.clone();
        }
        if let Some(path) = &self.log_file {
            config.log_path = path.clone();
        }
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(secs) = self.render_timeout {
            config.render_timeout_secs = secs;
        }
        if self.headed {
            config.headless = false;
        }
        config
    }
}
