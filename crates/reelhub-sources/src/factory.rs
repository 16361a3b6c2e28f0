//! Source factory pattern for creating catalog sources from configuration
//!
//! Centralizes source construction so the loader, resolver and search paths
//! all work from the same ordered set of sources.

use anyhow::Result;
use reelhub_config::{Config, CredentialStore};
use std::sync::Arc;

use crate::traits::CatalogSource;
use crate::transport::{HttpTransport, JsonTransport};

/// Factory trait for creating catalog sources from configuration
pub trait SourceFactory: Send + Sync {
    /// The name of the source this factory creates
    fn source_name(&self) -> &str;

    /// Create a source instance from configuration
    /// Returns None if the source is not enabled
    fn create_source(
        &self,
        config: &Config,
        credentials: &CredentialStore,
        transport: Arc<dyn JsonTransport>,
    ) -> Result<Option<Arc<dyn CatalogSource>>>;

    /// Validate that the source configuration is valid
    /// This is called before attempting to create the source
    fn validate_config(&self, config: &Config) -> Result<()>;
}

/// Registry of source factories, kept in registration order
pub struct SourceFactoryRegistry {
    factories: Vec<Box<dyn SourceFactory>>,
}

impl SourceFactoryRegistry {
    /// Create a new registry with all built-in factories registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: Vec::new(),
        };

        registry.register(Box::new(spreadsheet::SpreadsheetSourceFactory));
        registry.register(Box::new(video_host::VideoHostSourceFactory));
        registry.register(Box::new(channel_feed::ChannelFeedSourceFactory));
        registry.register(Box::new(metadata::MetadataSourceFactory));

        registry
    }

    /// Register a new factory, replacing any factory with the same name
    pub fn register(&mut self, factory: Box<dyn SourceFactory>) {
        self.factories.retain(|f| f.source_name() != factory.source_name());
        self.factories.push(factory);
    }

    /// Create all enabled sources over a shared HTTP transport
    pub fn create_all_sources(
        &self,
        config: &Config,
        credentials: &CredentialStore,
    ) -> Result<Vec<Arc<dyn CatalogSource>>> {
        let transport: Arc<dyn JsonTransport> = Arc::new(HttpTransport::new(config.http.timeout())?);
        self.create_all_sources_with_transport(config, credentials, transport)
    }

    pub fn create_all_sources_with_transport(
        &self,
        config: &Config,
        credentials: &CredentialStore,
        transport: Arc<dyn JsonTransport>,
    ) -> Result<Vec<Arc<dyn CatalogSource>>> {
        let mut sources = Vec::new();

        for factory in &self.factories {
            if let Some(source) = factory.create_source(config, credentials, transport.clone())? {
                sources.push(source);
            }
        }

        Ok(sources)
    }

    /// Validate all source configurations
    pub fn validate_all_configs(&self, config: &Config) -> Result<()> {
        for factory in &self.factories {
            factory.validate_config(config)?;
        }
        Ok(())
    }

    /// Get all registered factory names
    pub fn registered_sources(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.source_name()).collect()
    }

    /// Check if a source is registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.iter().any(|f| f.source_name() == name)
    }
}

impl Default for SourceFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Factory implementations for each source
mod spreadsheet {
    use super::*;
    use crate::spreadsheet::SpreadsheetClient;

    pub struct SpreadsheetSourceFactory;

    impl SourceFactory for SpreadsheetSourceFactory {
        fn source_name(&self) -> &str {
            "spreadsheet"
        }

        fn create_source(
            &self,
            config: &Config,
            _credentials: &CredentialStore,
            transport: Arc<dyn JsonTransport>,
        ) -> Result<Option<Arc<dyn CatalogSource>>> {
            if !config.spreadsheet.enabled {
                return Ok(None);
            }
            Ok(Some(Arc::new(SpreadsheetClient::new(
                transport,
                config.spreadsheet.endpoints.clone(),
            ))))
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if config.spreadsheet.enabled && config.spreadsheet.endpoints.iter().all(|e| e.trim().is_empty()) {
                return Err(anyhow::anyhow!("Spreadsheet is enabled but no endpoints are configured"));
            }
            Ok(())
        }
    }
}

mod video_host {
    use super::*;
    use crate::video_host::VideoHostClient;

    pub struct VideoHostSourceFactory;

    impl SourceFactory for VideoHostSourceFactory {
        fn source_name(&self) -> &str {
            "video-host"
        }

        fn create_source(
            &self,
            config: &Config,
            credentials: &CredentialStore,
            transport: Arc<dyn JsonTransport>,
        ) -> Result<Option<Arc<dyn CatalogSource>>> {
            if !config.video_host.enabled {
                return Ok(None);
            }
            let api_key = credentials
                .get_video_host_api_key()
                .ok_or_else(|| anyhow::anyhow!("Video host API key not found in credentials. Run 'reelhub config credential video_host_api_key' first"))?
                .clone();

            Ok(Some(Arc::new(VideoHostClient::new(
                transport,
                config.video_host.list_endpoint.clone(),
                api_key,
            ))))
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if config.video_host.enabled && config.video_host.list_endpoint.is_empty() {
                return Err(anyhow::anyhow!("Video host is enabled but list_endpoint is not configured"));
            }
            Ok(())
        }
    }
}

mod channel_feed {
    use super::*;
    use crate::channel_feed::ChannelFeedClient;

    pub struct ChannelFeedSourceFactory;

    impl SourceFactory for ChannelFeedSourceFactory {
        fn source_name(&self) -> &str {
            "channel-feed"
        }

        fn create_source(
            &self,
            config: &Config,
            credentials: &CredentialStore,
            transport: Arc<dyn JsonTransport>,
        ) -> Result<Option<Arc<dyn CatalogSource>>> {
            if !config.channel_feed.enabled {
                return Ok(None);
            }
            let bot_token = credentials
                .get_channel_bot_token()
                .ok_or_else(|| anyhow::anyhow!("Channel bot token not found in credentials. Run 'reelhub config credential channel_bot_token' first"))?
                .clone();

            Ok(Some(Arc::new(ChannelFeedClient::new(
                transport,
                config.channel_feed.api_base.clone(),
                bot_token,
                config.channel_feed.channel_id.clone(),
            ))))
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if config.channel_feed.enabled && config.channel_feed.channel_id.trim().is_empty() {
                return Err(anyhow::anyhow!("Channel feed is enabled but channel_id is not configured"));
            }
            Ok(())
        }
    }
}

mod metadata {
    use super::*;
    use crate::metadata::MetadataClient;

    pub struct MetadataSourceFactory;

    impl SourceFactory for MetadataSourceFactory {
        fn source_name(&self) -> &str {
            "metadata-enrichment"
        }

        fn create_source(
            &self,
            config: &Config,
            credentials: &CredentialStore,
            transport: Arc<dyn JsonTransport>,
        ) -> Result<Option<Arc<dyn CatalogSource>>> {
            if !config.metadata.enabled {
                return Ok(None);
            }
            let api_key = credentials
                .get_metadata_api_key()
                .ok_or_else(|| anyhow::anyhow!("Metadata API key not found in credentials. Run 'reelhub config credential metadata_api_key' first"))?
                .clone();

            Ok(Some(Arc::new(MetadataClient::new(
                transport,
                config.metadata.search_endpoint.clone(),
                config.metadata.image_base.clone(),
                api_key,
            ))))
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if config.metadata.enabled && config.metadata.search_endpoint.is_empty() {
                return Err(anyhow::anyhow!("Metadata source is enabled but search_endpoint is not configured"));
            }
            Ok(())
        }
    }
}
