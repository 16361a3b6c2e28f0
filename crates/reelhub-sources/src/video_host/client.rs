use async_trait::async_trait;
use reelhub_models::{SourceKind, UnifiedMovieRecord};
use std::sync::Arc;

use crate::capabilities::CapabilityRegistry;
use crate::error::SourceError;
use crate::traits::CatalogSource;
use crate::transport::JsonTransport;
use crate::video_host::api::{self, FileListResponse};

pub struct VideoHostClient {
    transport: Arc<dyn JsonTransport>,
    list_endpoint: String,
    api_key: String,
}

impl VideoHostClient {
    pub fn new(transport: Arc<dyn JsonTransport>, list_endpoint: String, api_key: String) -> Self {
        Self {
            transport,
            list_endpoint,
            api_key,
        }
    }
}

impl CapabilityRegistry for VideoHostClient {}

#[async_trait]
impl CatalogSource for VideoHostClient {
    fn source_name(&self) -> &str {
        "video-host"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::VideoHost
    }

    async fn fetch_records(&self) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        let url = api::list_url(&self.list_endpoint, &self.api_key);
        let body = self.transport.get_json(&url).await?;
        let response: FileListResponse = serde_json::from_value(body)?;
        api::map_file_list(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StaticTransport;
    use serde_json::json;

    const LIST: &str = "https://doodapi.co/api/file/list";

    #[tokio::test]
    async fn test_fetch_sends_api_key() {
        let transport = Arc::new(StaticTransport::new().with_json(
            "https://doodapi.co/api/file/list?key=k1",
            json!({ "status": 200, "result": { "files": [{ "file_code": "abc123", "title": "Clip" }] } }),
        ));
        let client = VideoHostClient::new(transport.clone(), LIST.to_string(), "k1".to_string());

        let records = client.fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "dood-abc123");
        assert_eq!(transport.calls(), vec!["https://doodapi.co/api/file/list?key=k1"]);
    }

    #[tokio::test]
    async fn test_shape_mismatch_contributes_nothing() {
        let transport = Arc::new(StaticTransport::new().with_json(
            "https://doodapi.co/api/file/list?key=k1",
            json!({ "result": { "files": [{ "title": "missing file code" }] } }),
        ));
        let client = VideoHostClient::new(transport, LIST.to_string(), "k1".to_string());

        let contribution = client.fetch().await;
        assert!(contribution.failed());
        assert!(matches!(contribution.error, Some(SourceError::Parse(_))));
        assert!(contribution.records.is_empty());
    }
}
