use futures::future::join_all;
use reelhub_config::CatalogConfig;
use reelhub_models::{SourceKind, UnifiedMovieRecord};
use reelhub_sources::CatalogSource;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::error::InitializationError;

/// How the merged catalog is split into display sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindows {
    pub hero: usize,
    pub new: usize,
}

impl Default for ViewWindows {
    fn default() -> Self {
        Self { hero: 10, new: 5 }
    }
}

impl From<&CatalogConfig> for ViewWindows {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            hero: config.hero_size,
            new: config.new_size,
        }
    }
}

/// Result of one source's fetch during a load
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub source_name: String,
    pub kind: SourceKind,
    /// Lookup-only sources take part in the load but never list records
    pub listing: bool,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub sources: Vec<SourceOutcome>,
    /// Records dropped because an earlier record already used their id
    pub duplicates_dropped: usize,
    #[serde(skip)]
    pub duration: Duration,
}

impl LoadReport {
    pub fn failures(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.sources.iter().filter(|s| s.error.is_some())
    }

    /// Sources that contribute catalog records
    pub fn listing_sources(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.sources.iter().filter(|s| s.listing)
    }

    /// True when at least one listing source ran and every one of them failed
    pub fn all_failed(&self) -> bool {
        let mut listing = self.listing_sources().peekable();
        listing.peek().is_some() && listing.all(|s| s.error.is_some())
    }
}

/// Display sections over the merged catalog; `new` and `recommended` together cover every record
#[derive(Debug, Clone, Copy)]
pub struct CatalogViews<'a> {
    pub hero: &'a [UnifiedMovieRecord],
    pub new: &'a [UnifiedMovieRecord],
    pub recommended: &'a [UnifiedMovieRecord],
}

/// The merged, newest-first catalog produced by one load
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<UnifiedMovieRecord>,
    report: LoadReport,
    windows: ViewWindows,
}

impl Catalog {
    /// Build a catalog directly from records, applying the same ordering as a load
    pub fn from_records(records: Vec<UnifiedMovieRecord>, windows: ViewWindows) -> Self {
        let (records, duplicates_dropped) = merge_records(records);
        Self {
            records,
            report: LoadReport {
                duplicates_dropped,
                ..LoadReport::default()
            },
            windows,
        }
    }

    pub fn records(&self) -> &[UnifiedMovieRecord] {
        &self.records
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&UnifiedMovieRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn views(&self) -> CatalogViews<'_> {
        let len = self.records.len();
        let hero_end = self.windows.hero.min(len);
        let new_end = self.windows.new.min(len);
        CatalogViews {
            hero: &self.records[..hero_end],
            new: &self.records[..new_end],
            recommended: &self.records[new_end..],
        }
    }

    /// Fails when the load left nothing to show and no listing source succeeded.
    ///
    /// A lookup-only source on its own counts as no sources at all.
    pub fn ensure_initialized(&self) -> Result<(), InitializationError> {
        if !self.records.is_empty() {
            return Ok(());
        }
        if self.report.listing_sources().next().is_none() {
            return Err(InitializationError::NoSources);
        }
        if self.report.all_failed() {
            let failures = self
                .report
                .listing_sources()
                .filter(|s| s.error.is_some())
                .map(|s| format!("{}: {}", s.source_name, s.error.as_deref().unwrap_or("unknown error")))
                .collect();
            return Err(InitializationError::AllSourcesFailed { failures });
        }
        Ok(())
    }
}

/// Fans out to every source concurrently and merges what comes back
pub struct CatalogLoader {
    sources: Vec<Arc<dyn CatalogSource>>,
    windows: ViewWindows,
}

impl CatalogLoader {
    pub fn new(sources: Vec<Arc<dyn CatalogSource>>) -> Self {
        Self {
            sources,
            windows: ViewWindows::default(),
        }
    }

    pub fn with_windows(mut self, windows: ViewWindows) -> Self {
        self.windows = windows;
        self
    }

    pub fn sources(&self) -> &[Arc<dyn CatalogSource>] {
        &self.sources
    }

    /// Load the catalog. Individual source failures only shrink the result.
    #[instrument(skip(self), fields(sources = self.sources.len()))]
    pub async fn load(&self) -> Catalog {
        let start = Instant::now();
        info!("Loading catalog from {} sources", self.sources.len());

        let contributions = join_all(self.sources.iter().map(|source| source.fetch())).await;

        let mut outcomes = Vec::with_capacity(contributions.len());
        let mut records = Vec::new();
        for contribution in contributions {
            outcomes.push(SourceOutcome {
                source_name: contribution.source_name.clone(),
                kind: contribution.kind,
                listing: contribution.listing,
                records: contribution.records.len(),
                error: contribution.error.as_ref().map(|e| e.to_string()),
            });
            records.extend(contribution.records);
        }

        let (records, duplicates_dropped) = merge_records(records);
        let report = LoadReport {
            sources: outcomes,
            duplicates_dropped,
            duration: start.elapsed(),
        };

        let failed = report.failures().count();
        if failed > 0 {
            warn!("{} of {} sources failed during catalog load", failed, report.sources.len());
        }
        info!(
            "Catalog loaded: {} records in {:.2}s",
            records.len(),
            report.duration.as_secs_f64()
        );

        Catalog {
            records,
            report,
            windows: self.windows,
        }
    }
}

/// Newest first, ties keep source order, later duplicate ids are dropped
fn merge_records(mut records: Vec<UnifiedMovieRecord>) -> (Vec<UnifiedMovieRecord>, usize) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut seen = HashSet::with_capacity(records.len());
    let before = records.len();
    records.retain(|record| {
        if seen.insert(record.id.clone()) {
            true
        } else {
            debug!("Dropping duplicate catalog id {}", record.id);
            false
        }
    });

    let dropped = before - records.len();
    if dropped > 0 {
        warn!("Dropped {} records with duplicate ids", dropped);
    }
    (records, dropped)
}
