use async_trait::async_trait;
use futures::future::join_all;
use reelhub_models::{SourceKind, UnifiedMovieRecord};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::capabilities::CapabilityRegistry;
use crate::error::SourceError;
use crate::spreadsheet::api;
use crate::traits::CatalogSource;
use crate::transport::{redact_url, JsonTransport};

/// Spreadsheet-backed listing spread over one or more independent endpoints
pub struct SpreadsheetClient {
    transport: Arc<dyn JsonTransport>,
    endpoints: Vec<String>,
}

impl SpreadsheetClient {
    pub fn new(transport: Arc<dyn JsonTransport>, endpoints: Vec<String>) -> Self {
        let endpoints = endpoints
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self { transport, endpoints }
    }

    async fn fetch_endpoint(&self, endpoint: &str) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        let body = self.transport.get_json(endpoint).await?;
        let rows = api::parse_rows(body)?;
        debug!("Spreadsheet: {} rows from {}", rows.len(), redact_url(endpoint));
        Ok(api::map_rows(rows))
    }
}

impl CapabilityRegistry for SpreadsheetClient {}

#[async_trait]
impl CatalogSource for SpreadsheetClient {
    fn source_name(&self) -> &str {
        "spreadsheet"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Spreadsheet
    }

    async fn fetch_records(&self) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        if self.endpoints.is_empty() {
            return Err(SourceError::NotConfigured("spreadsheet endpoints".to_string()));
        }

        let results = join_all(self.endpoints.iter().map(|e| self.fetch_endpoint(e))).await;

        // Endpoints fail independently; the adapter only fails when every one did
        let mut records = Vec::new();
        let mut last_error = None;
        let mut any_succeeded = false;
        for (endpoint, result) in self.endpoints.iter().zip(results) {
            match result {
                Ok(rows) => {
                    any_succeeded = true;
                    records.extend(rows);
                }
                Err(e) => {
                    warn!("Spreadsheet: endpoint {} failed: {}", redact_url(endpoint), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !any_succeeded => Err(e),
            _ => Ok(records),
        }
    }
}
