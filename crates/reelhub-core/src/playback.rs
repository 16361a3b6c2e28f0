use reelhub_models::{PlaybackMetadata, SourceKind, SourceRef, UnifiedMovieRecord};
use reelhub_sources::{CatalogSource, FileLocator, MetadataLookup};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::ResolutionError;

/// Turns a catalog record into something a player can load
pub struct PlaybackResolver {
    sources: Vec<Arc<dyn CatalogSource>>,
    embed_base: String,
}

impl PlaybackResolver {
    pub fn new(sources: Vec<Arc<dyn CatalogSource>>, embed_base: impl Into<String>) -> Self {
        Self {
            sources,
            embed_base: embed_base.into(),
        }
    }

    /// Resolve the playable URL for `record`.
    ///
    /// Spreadsheet and video-host records resolve without I/O. Channel-feed
    /// records make exactly one describe call against the feed.
    #[instrument(skip(self, record), fields(id = %record.id, source = %record.source))]
    pub async fn resolve(&self, record: &UnifiedMovieRecord) -> Result<String, ResolutionError> {
        let url = match record.source {
            SourceKind::Spreadsheet => match &record.source_ref {
                SourceRef::DirectUrl { url } => url.clone(),
                _ => return Err(missing_reference(record)),
            },
            SourceKind::VideoHost => match &record.source_ref {
                SourceRef::FileCode { code } => format!("{}{}", self.embed_base, code),
                _ => return Err(missing_reference(record)),
            },
            SourceKind::ChannelFeed => {
                let file_id = match &record.source_ref {
                    SourceRef::ChannelFile { file_id } => file_id,
                    _ => return Err(missing_reference(record)),
                };
                let locator = self.file_locator().ok_or_else(|| ResolutionError::NoFileLocator {
                    id: record.id.clone(),
                })?;
                let file_path = locator.describe_file(file_id).await?;
                locator.file_url(&file_path)
            }
            SourceKind::MetadataEnrichment => match &record.source_ref {
                SourceRef::DirectUrl { url } => url.clone(),
                _ => {
                    return Err(ResolutionError::Unplayable {
                        id: record.id.clone(),
                    })
                }
            },
        };

        info!("Resolved playback for {}", record.id);
        Ok(url)
    }

    /// Display metadata for `record`, overlaid with a title lookup when one succeeds
    pub async fn enrich(&self, record: &UnifiedMovieRecord) -> PlaybackMetadata {
        let mut metadata = PlaybackMetadata::from_record(record);

        let Some(lookup) = self.metadata_lookup() else {
            return metadata;
        };

        match lookup.lookup_overlay(&record.title).await {
            Ok(Some(overlay)) => metadata.apply(&overlay),
            Ok(None) => debug!("No metadata match for '{}'", record.title),
            Err(e) => debug!("Metadata enrichment failed for '{}': {}", record.title, e),
        }
        metadata
    }

    fn file_locator(&self) -> Option<&dyn FileLocator> {
        self.sources
            .iter()
            .filter(|s| s.kind() == SourceKind::ChannelFeed)
            .find_map(|s| s.as_file_locator())
    }

    fn metadata_lookup(&self) -> Option<&dyn MetadataLookup> {
        self.sources
            .iter()
            .filter(|s| s.kind() == SourceKind::MetadataEnrichment)
            .find_map(|s| s.as_metadata_lookup())
    }
}

fn missing_reference(record: &UnifiedMovieRecord) -> ResolutionError {
    ResolutionError::MissingReference {
        id: record.id.clone(),
        source_kind: record.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dood, sheet, telegram, FakeSource};
    use reelhub_models::MetadataOverlay;
    use reelhub_sources::SourceError;
    use std::time::Duration;

    const EMBED_BASE: &str = "https://doodstream.com/e/";

    fn resolver_with(sources: Vec<Arc<FakeSource>>) -> PlaybackResolver {
        PlaybackResolver::new(
            sources.into_iter().map(|s| s as Arc<dyn CatalogSource>).collect(),
            EMBED_BASE,
        )
    }

    fn channel(file_path: Result<&str, ()>) -> Arc<FakeSource> {
        Arc::new(FakeSource::new("channel-feed", SourceKind::ChannelFeed, Vec::new()).with_file_path(file_path))
    }

    #[tokio::test]
    async fn test_video_host_is_templated_without_io() {
        let feed = channel(Ok("videos"));
        let resolver = resolver_with(vec![feed.clone()]);

        let url = resolver.resolve(&dood("abc123", "Clip", 0)).await.unwrap();
        assert_eq!(url, "https://doodstream.com/e/abc123");
        assert_eq!(feed.describe_calls(), 0);
    }

    #[tokio::test]
    async fn test_spreadsheet_url_is_used_as_is() {
        let resolver = resolver_with(Vec::new());
        let url = resolver.resolve(&sheet("1", "Heat", 0)).await.unwrap();
        assert_eq!(url, "https://cdn.example/1.mp4");
    }

    #[tokio::test]
    async fn test_channel_feed_makes_one_describe_call() {
        let feed = channel(Ok("videos"));
        let resolver = resolver_with(vec![feed.clone()]);

        let url = resolver.resolve(&telegram("5", "BAADf", 0)).await.unwrap();
        assert_eq!(url, "https://files.example/file/botTOKEN/videos/BAADf");
        assert_eq!(feed.describe_calls(), 1);
    }

    #[tokio::test]
    async fn test_channel_feed_not_ok_fails() {
        let feed = channel(Err(()));
        let resolver = resolver_with(vec![feed.clone()]);

        let err = resolver.resolve(&telegram("5", "BAADf", 0)).await.unwrap_err();
        assert!(matches!(err, ResolutionError::Describe(SourceError::Rejected(_))));
        assert_eq!(feed.describe_calls(), 1);
    }

    #[tokio::test]
    async fn test_channel_feed_without_locator() {
        let resolver = resolver_with(Vec::new());
        let err = resolver.resolve(&telegram("5", "BAADf", 0)).await.unwrap_err();
        assert!(matches!(err, ResolutionError::NoFileLocator { .. }));
    }

    #[tokio::test]
    async fn test_missing_reference() {
        let resolver = resolver_with(Vec::new());
        let record = UnifiedMovieRecord::new(SourceKind::VideoHost, "abc", "Clip");
        let err = resolver.resolve(&record).await.unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::MissingReference {
                source_kind: SourceKind::VideoHost,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_search_records_without_url_are_unplayable() {
        let resolver = resolver_with(Vec::new());
        let record = UnifiedMovieRecord::new(SourceKind::MetadataEnrichment, "603", "The Matrix");
        let err = resolver.resolve(&record).await.unwrap_err();
        assert!(matches!(err, ResolutionError::Unplayable { .. }));

        let playable = record.with_source_ref(SourceRef::direct_url(Some("https://cdn.example/m.mp4".to_string())));
        assert_eq!(resolver.resolve(&playable).await.unwrap(), "https://cdn.example/m.mp4");
    }

    #[tokio::test]
    async fn test_enrich_applies_overlay() {
        let metadata = Arc::new(
            FakeSource::new("metadata-enrichment", SourceKind::MetadataEnrichment, Vec::new()).with_overlay(Ok(Some(
                MetadataOverlay {
                    year: Some("1999".to_string()),
                    rating: Some("8.2".to_string()),
                    poster: None,
                },
            ))),
        );
        let resolver = resolver_with(vec![metadata]);

        let enriched = resolver.enrich(&dood("abc", "The Matrix", 0)).await;
        assert_eq!(enriched.title, "The Matrix");
        assert_eq!(enriched.year, "1999");
        assert_eq!(enriched.rating, "8.2");
        assert_eq!(enriched.genre, "Movie");
    }

    #[tokio::test]
    async fn test_enrich_failure_is_silent() {
        let metadata = Arc::new(
            FakeSource::new("metadata-enrichment", SourceKind::MetadataEnrichment, Vec::new()).with_overlay(Err(())),
        );
        let resolver = resolver_with(vec![metadata]);

        let record = sheet("1", "Heat", 0).with_year(Some("1995".to_string()));
        let enriched = resolver.enrich(&record).await;
        assert_eq!(enriched.year, "1995");
        assert_eq!(enriched.rating, "N/A");
    }

    #[tokio::test]
    async fn test_resolve_does_not_wait_on_metadata() {
        let metadata = Arc::new(
            FakeSource::new("metadata-enrichment", SourceKind::MetadataEnrichment, Vec::new()).with_stalled_overlay(),
        );
        let resolver = resolver_with(vec![channel(Ok("videos")), metadata]);
        let record = dood("abc123", "Clip", 0);

        let url = tokio::time::timeout(Duration::from_secs(5), resolver.resolve(&record))
            .await
            .expect("resolve waited on the metadata source")
            .unwrap();
        assert_eq!(url, "https://doodstream.com/e/abc123");

        // The overlay is what hangs; it stays separate from the URL
        let enrich = tokio::time::timeout(Duration::from_millis(50), resolver.enrich(&record)).await;
        assert!(enrich.is_err());
    }
}
