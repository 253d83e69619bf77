use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info};

use news_export::config::AppConfig;
use news_export::data::SpreadsheetExporter;
use news_export::services::{NaverSearchService, SearchProvider};
use news_export::utils::logging::init_tracing;

fn main() {
    // Logging depends on MODE, so configuration errors go straight to stderr
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.mode);
    info!("Search keyword: {}", config.keyword);

    if let Err(e) = run(&config) {
        error!("Failed to export search results: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<()> {
    let service = NaverSearchService::from_config(config);
    let items = service
        .search_by_keyword(&config.keyword)
        .with_context(|| format!("search for '{}' failed", config.keyword))?;

    let path = config.output_path(Utc::now());
    SpreadsheetExporter::export(&config.keyword, &items, &path)
        .context("writing the spreadsheet failed")?;

    info!("Spreadsheet saved: {}", path.display());
    Ok(())
}
