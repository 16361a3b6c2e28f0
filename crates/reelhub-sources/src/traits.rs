use async_trait::async_trait;
use reelhub_models::{SourceKind, UnifiedMovieRecord};
use tracing::{debug, warn};

use crate::capabilities::CapabilityRegistry;
use crate::error::SourceError;

/// What one source added to a catalog load
#[derive(Debug)]
pub struct SourceContribution {
    pub source_name: String,
    pub kind: SourceKind,
    pub records: Vec<UnifiedMovieRecord>,
    /// False for lookup-only sources, whose empty contribution says nothing about the catalog
    pub listing: bool,
    /// Set when the fetch failed and the contribution was emptied
    pub error: Option<SourceError>,
}

impl SourceContribution {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync + CapabilityRegistry {
    fn source_name(&self) -> &str;

    fn kind(&self) -> SourceKind;

    /// Whether this source contributes catalog records at all
    fn lists_records(&self) -> bool {
        true
    }

    /// Fetch and normalize this source's listing
    async fn fetch_records(&self) -> Result<Vec<UnifiedMovieRecord>, SourceError>;

    /// Never fails: any error becomes an empty contribution
    async fn fetch(&self) -> SourceContribution {
        match self.fetch_records().await {
            Ok(records) => {
                debug!("{}: fetched {} records", self.source_name(), records.len());
                SourceContribution {
                    source_name: self.source_name().to_string(),
                    kind: self.kind(),
                    records,
                    listing: self.lists_records(),
                    error: None,
                }
            }
            Err(e) => {
                warn!("{}: fetch failed, contributing no records: {}", self.source_name(), e);
                SourceContribution {
                    source_name: self.source_name().to_string(),
                    kind: self.kind(),
                    records: Vec::new(),
                    listing: self.lists_records(),
                    error: Some(e),
                }
            }
        }
    }
}
