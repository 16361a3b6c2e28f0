use async_trait::async_trait;
use reelhub_models::{MetadataOverlay, SourceKind, UnifiedMovieRecord};
use std::sync::Arc;
use tracing::debug;

use crate::capabilities::{CapabilityRegistry, MetadataLookup};
use crate::error::SourceError;
use crate::metadata::api::{self, SearchResponse};
use crate::traits::CatalogSource;
use crate::transport::JsonTransport;

/// Metadata-enrichment API. Lookup only: it lists nothing on its own.
pub struct MetadataClient {
    transport: Arc<dyn JsonTransport>,
    search_endpoint: String,
    image_base: String,
    api_key: String,
}

impl MetadataClient {
    pub fn new(
        transport: Arc<dyn JsonTransport>,
        search_endpoint: String,
        image_base: String,
        api_key: String,
    ) -> Self {
        Self {
            transport,
            search_endpoint,
            image_base,
            api_key,
        }
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, SourceError> {
        let url = api::search_url(&self.search_endpoint, &self.api_key, query);
        let body = self.transport.get_json(&url).await?;
        Ok(serde_json::from_value(body)?)
    }
}

impl CapabilityRegistry for MetadataClient {
    fn as_metadata_lookup(&self) -> Option<&dyn MetadataLookup> {
        Some(self)
    }
}

#[async_trait]
impl CatalogSource for MetadataClient {
    fn source_name(&self) -> &str {
        "metadata-enrichment"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::MetadataEnrichment
    }

    fn lists_records(&self) -> bool {
        false
    }

    async fn fetch_records(&self) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl MetadataLookup for MetadataClient {
    async fn search_titles(&self, query: &str) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        let response = self.search(query).await?;
        let records = api::map_search_hits(response, &self.image_base);
        debug!("Metadata: {} hits for '{}'", records.len(), query);
        Ok(records)
    }

    async fn lookup_overlay(&self, title: &str) -> Result<Option<MetadataOverlay>, SourceError> {
        let response = self.search(title).await?;
        Ok(api::first_overlay(&response, &self.image_base))
    }
}
