pub mod catalog;
pub mod config;
pub mod play;
pub mod search;

use crate::output::Output;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use reelhub_config::{Config, CredentialStore, PathManager};
use reelhub_core::{Catalog, CatalogLoader, ViewWindows};
use reelhub_models::UnifiedMovieRecord;
use reelhub_sources::{CatalogSource, SourceFactoryRegistry};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Config plus the sources built from it, shared by the catalog commands
pub struct AppContext {
    pub config: Config,
    pub sources: Vec<Arc<dyn CatalogSource>>,
}

impl AppContext {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path_manager = PathManager::default();
        let config_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path_manager.config_file());

        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config.validate().map_err(|e| {
            eyre!(
                "Invalid configuration in {}: {}. Run 'reelhub config init' to write a starting config",
                config_file.display(),
                e
            )
        })?;

        let credentials_file = path_manager.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        let registry = SourceFactoryRegistry::new();
        registry
            .validate_all_configs(&config)
            .map_err(|e| eyre!("Configuration validation failed: {}", e))?;
        let sources = registry
            .create_all_sources(&config, &credentials)
            .map_err(|e| eyre!("Failed to create sources: {}", e))?;

        tracing::debug!(
            "Created {} sources: {}",
            sources.len(),
            sources.iter().map(|s| s.source_name()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self { config, sources })
    }

    pub fn loader(&self) -> CatalogLoader {
        CatalogLoader::new(self.sources.clone()).with_windows(ViewWindows::from(&self.config.catalog))
    }

    /// Load the catalog behind a spinner and report sources that failed
    pub async fn load_catalog(&self, output: &Output) -> Catalog {
        let spinner = Spinner::start(output, "Loading catalog...");
        let catalog = self.loader().load().await;
        spinner.finish();

        for failure in catalog.report().failures() {
            output.warn(format!(
                "{} unavailable: {}",
                failure.source_name,
                failure.error.as_deref().unwrap_or("unknown error")
            ));
        }
        catalog
    }
}

/// Spinner on interactive terminals, nothing otherwise
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(output: &Output, msg: &str) -> Self {
        if !output.is_human() || output.is_quiet() || !is_interactive() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

pub fn records_table(title: &str, records: &[UnifiedMovieRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Year"),
        Cell::new("Rating"),
        Cell::new("Source"),
        Cell::new("Added"),
        Cell::new("ID"),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.title),
            Cell::new(record.year.as_deref().unwrap_or("-")),
            Cell::new(record.rating.as_deref().unwrap_or("-")),
            Cell::new(record.source.as_str()),
            Cell::new(format_timestamp(record.timestamp)),
            Cell::new(&record.id),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn format_timestamp(millis: i64) -> String {
    if millis == 0 {
        return "-".to_string();
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
