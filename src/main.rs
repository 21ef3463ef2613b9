use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use yarn_finder::{ScraperConfig, Scrapers};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ScraperConfig::default(),
    };
    let config = args.apply(config);

    if let Err(e) = init_logging(&config.log_path) {
        eprintln!("Failed to open log file {}: {}", config.log_path.display(), e);
        return ExitCode::FAILURE;
    }

    println!("Note: rendering requires a WebDriver server (e.g., ChromeDriver).");
    println!("Set WEBDRIVER_URL or --webdriver-url if not using {}", config.webdriver_url);

    ::log::info!(
        "Starting run against {} with requests from {}",
        config.base_url,
        config.input_path.display()
    );

    let output_path = config.output_path.clone();
    let start_time = std::time::Instant::now();

    match Scrapers::new(config).run().await {
        Ok(summary) => {
            let duration = start_time.elapsed();
            ::log::info!("Finished in {:.2} seconds", duration.as_secs_f64());
            println!(
                "{} found, {} not found, {} failed - results in {}",
                summary.found,
                summary.not_found,
                summary.failed,
                output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Run aborted: {}", e);
            eprintln!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sends timestamped log lines to `path`, appending to earlier runs
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .init();

    Ok(())
}
