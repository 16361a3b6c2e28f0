use async_trait::async_trait;
use reelhub_models::{SourceKind, UnifiedMovieRecord};
use std::sync::Arc;
use tracing::debug;

use crate::capabilities::{CapabilityRegistry, FileLocator};
use crate::channel_feed::api::{self, FileResponse, UpdatesResponse};
use crate::error::SourceError;
use crate::traits::CatalogSource;
use crate::transport::JsonTransport;

/// Messaging-platform channel read through the bot API
pub struct ChannelFeedClient {
    transport: Arc<dyn JsonTransport>,
    api_base: String,
    bot_token: String,
    channel_id: String,
}

impl ChannelFeedClient {
    pub fn new(
        transport: Arc<dyn JsonTransport>,
        api_base: String,
        bot_token: String,
        channel_id: String,
    ) -> Self {
        Self {
            transport,
            api_base,
            bot_token,
            channel_id,
        }
    }
}

impl CapabilityRegistry for ChannelFeedClient {
    fn as_file_locator(&self) -> Option<&dyn FileLocator> {
        Some(self)
    }
}

#[async_trait]
impl CatalogSource for ChannelFeedClient {
    fn source_name(&self) -> &str {
        "channel-feed"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::ChannelFeed
    }

    async fn fetch_records(&self) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
        let url = api::updates_url(&self.api_base, &self.bot_token);
        let body = self.transport.get_json(&url).await?;
        let response: UpdatesResponse = serde_json::from_value(body)?;
        let total = response.result.len();
        let records = api::map_updates(response, &self.channel_id)?;
        debug!("Channel feed: kept {} of {} updates", records.len(), total);
        Ok(records)
    }
}

#[async_trait]
impl FileLocator for ChannelFeedClient {
    async fn describe_file(&self, file_id: &str) -> Result<String, SourceError> {
        let url = api::get_file_url(&self.api_base, &self.bot_token, file_id);
        let body = self.transport.get_json(&url).await?;
        let response: FileResponse = serde_json::from_value(body)?;
        api::file_path(response)
    }

    fn file_url(&self, file_path: &str) -> String {
        api::download_url(&self.api_base, &self.bot_token, file_path)
    }
}
