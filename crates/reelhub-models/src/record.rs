use serde::{Deserialize, Serialize};

use crate::source::SourceKind;
use crate::source_ref::SourceRef;

/// The common shape every source adapter normalizes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedMovieRecord {
    /// Globally unique, namespaced by the source prefix (`sheet-42`, `dood-abc123`)
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    pub source: SourceKind,
    /// Epoch millis; 0 when the source did not provide one
    pub timestamp: i64,
    pub source_ref: SourceRef,
}

impl UnifiedMovieRecord {
    pub fn new(source: SourceKind, native_id: &str, title: impl Into<String>) -> Self {
        Self {
            id: Self::namespaced_id(source, native_id),
            title: title.into(),
            year: None,
            poster: None,
            rating: None,
            source,
            timestamp: 0,
            source_ref: SourceRef::Unresolved,
        }
    }

    pub fn namespaced_id(source: SourceKind, native_id: &str) -> String {
        format!("{}-{}", source.id_prefix(), native_id)
    }

    pub fn with_year(mut self, year: Option<String>) -> Self {
        self.year = year.filter(|y| !y.trim().is_empty());
        self
    }

    pub fn with_poster(mut self, poster: Option<String>) -> Self {
        self.poster = poster.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_rating(mut self, rating: Option<String>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_source_ref(mut self, source_ref: SourceRef) -> Self {
        self.source_ref = source_ref;
        self
    }

    /// Case-insensitive substring match against the title
    pub fn title_matches(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_ids_do_not_collide_across_sources() {
        let sheet = UnifiedMovieRecord::new(SourceKind::Spreadsheet, "42", "A");
        let dood = UnifiedMovieRecord::new(SourceKind::VideoHost, "42", "A");
        assert_eq!(sheet.id, "sheet-42");
        assert_eq!(dood.id, "dood-42");
        assert_ne!(sheet.id, dood.id);
    }

    #[test]
    fn test_defaults() {
        let record = UnifiedMovieRecord::new(SourceKind::ChannelFeed, "7", "Clip")
            .with_year(Some("".to_string()))
            .with_poster(None);
        assert_eq!(record.timestamp, 0);
        assert_eq!(record.year, None);
        assert_eq!(record.source_ref, SourceRef::Unresolved);
    }

    #[test]
    fn test_title_matches_is_case_insensitive() {
        let record = UnifiedMovieRecord::new(SourceKind::Spreadsheet, "1", "The Matrix");
        assert!(record.title_matches("matrix"));
        assert!(!record.title_matches("Matrix"));
        assert!(!record.title_matches("inception"));
    }

    #[test]
    fn test_serialized_shape() {
        let record = UnifiedMovieRecord::new(SourceKind::VideoHost, "abc123", "Clip")
            .with_timestamp(300)
            .with_source_ref(SourceRef::file_code("abc123"));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["source"], "video-host");
        assert_eq!(value["source_ref"]["type"], "file_code");
        assert_eq!(value["source_ref"]["code"], "abc123");
        assert!(value.get("year").is_none());
    }
}
