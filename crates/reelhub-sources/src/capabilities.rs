//! Capability traits for catalog sources
//!
//! Sources declare what they can do beyond listing records, so the playback
//! and search paths never need to know concrete client types.

use async_trait::async_trait;
use reelhub_models::{MetadataOverlay, UnifiedMovieRecord};

use crate::error::SourceError;

/// Registry pattern for reaching optional capabilities through trait objects
pub trait CapabilityRegistry: Send + Sync {
    /// Get a reference to FileLocator capability if supported
    fn as_file_locator(&self) -> Option<&dyn FileLocator> {
        None
    }

    /// Get a reference to MetadataLookup capability if supported
    fn as_metadata_lookup(&self) -> Option<&dyn MetadataLookup> {
        None
    }

    fn supports_file_location(&self) -> bool {
        self.as_file_locator().is_some()
    }

    fn supports_metadata_lookup(&self) -> bool {
        self.as_metadata_lookup().is_some()
    }
}

/// Sources whose records point at files that need a second lookup before playback
#[async_trait]
pub trait FileLocator: Send + Sync {
    /// Ask the source where a file lives
    ///
    /// # Returns
    /// * `Ok(path)` - The source-relative file path
    /// * `Err(SourceError::Rejected)` - The source answered but refused the request
    /// * `Err(_)` - Transport or response-shape failure
    async fn describe_file(&self, file_id: &str) -> Result<String, SourceError>;

    /// Build the final playable URL for a described file path
    fn file_url(&self, file_path: &str) -> String;
}

/// Sources that can search titles and provide display metadata
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Free-text title search, mapped into unified records
    async fn search_titles(&self, query: &str) -> Result<Vec<UnifiedMovieRecord>, SourceError>;

    /// Metadata for the best match of `title`, or `None` when nothing matched
    async fn lookup_overlay(&self, title: &str) -> Result<Option<MetadataOverlay>, SourceError>;
}
