use reelhub_models::{SourceKind, UnifiedMovieRecord};
use reelhub_sources::{CatalogSource, MetadataLookup};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::catalog::Catalog;

/// A blank query means no search is active, which is not the same as zero matches
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Inactive,
    Results(SearchResults),
}

impl SearchOutcome {
    pub fn is_active(&self) -> bool {
        matches!(self, SearchOutcome::Results(_))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    /// Catalog matches, in catalog order
    pub local: Vec<UnifiedMovieRecord>,
    /// Metadata-source matches
    pub remote: Vec<UnifiedMovieRecord>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.local.len() + self.remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }

    /// Local matches followed by remote matches
    pub fn into_records(self) -> Vec<UnifiedMovieRecord> {
        let mut records = self.local;
        records.extend(self.remote);
        records
    }
}

pub struct SearchFederator {
    sources: Vec<Arc<dyn CatalogSource>>,
    dedupe_by_title: bool,
}

impl SearchFederator {
    pub fn new(sources: Vec<Arc<dyn CatalogSource>>) -> Self {
        Self {
            sources,
            dedupe_by_title: false,
        }
    }

    /// Drop remote records whose title already appears among the local matches
    pub fn with_dedupe_by_title(mut self, dedupe_by_title: bool) -> Self {
        self.dedupe_by_title = dedupe_by_title;
        self
    }

    #[instrument(skip(self, catalog))]
    pub async fn search(&self, catalog: &Catalog, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Inactive;
        }

        let needle = query.to_lowercase();
        let local: Vec<UnifiedMovieRecord> = catalog
            .records()
            .iter()
            .filter(|r| r.title_matches(&needle))
            .cloned()
            .collect();

        let mut remote = self.search_remote(query).await;
        if self.dedupe_by_title {
            let titles: HashSet<String> = local.iter().map(|r| r.title.to_lowercase()).collect();
            remote.retain(|r| !titles.contains(&r.title.to_lowercase()));
        }

        debug!("Search '{}': {} local, {} remote", query, local.len(), remote.len());
        SearchOutcome::Results(SearchResults { local, remote })
    }

    async fn search_remote(&self, query: &str) -> Vec<UnifiedMovieRecord> {
        let Some(lookup) = self.metadata_lookup() else {
            return Vec::new();
        };

        match lookup.search_titles(query).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Remote search failed, showing local matches only: {}", e);
                Vec::new()
            }
        }
    }

    fn metadata_lookup(&self) -> Option<&dyn MetadataLookup> {
        self.sources
            .iter()
            .filter(|s| s.kind() == SourceKind::MetadataEnrichment)
            .find_map(|s| s.as_metadata_lookup())
    }
}
