use serde::{Deserialize, Serialize};

use crate::record::UnifiedMovieRecord;

const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_GENRE: &str = "Movie";

/// Display metadata shown alongside a playing title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackMetadata {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub rating: String,
}

/// Best-effort metadata looked up by title after playback starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataOverlay {
    pub year: Option<String>,
    pub rating: Option<String>,
    pub poster: Option<String>,
}

impl PlaybackMetadata {
    pub fn from_record(record: &UnifiedMovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            year: record.year.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            genre: DEFAULT_GENRE.to_string(),
            rating: record.rating.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    /// Overwrite only the fields the overlay actually carries
    pub fn apply(&mut self, overlay: &MetadataOverlay) {
        if let Some(year) = &overlay.year {
            self.year = year.clone();
        }
        if let Some(rating) = &overlay.rating {
            self.rating = rating.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceKind;

    #[test]
    fn test_from_record_fills_placeholders() {
        let record = UnifiedMovieRecord::new(SourceKind::Spreadsheet, "1", "Heat");
        let meta = PlaybackMetadata::from_record(&record);
        assert_eq!(meta.year, "N/A");
        assert_eq!(meta.rating, "N/A");
        assert_eq!(meta.genre, "Movie");
    }

    #[test]
    fn test_apply_keeps_missing_fields() {
        let record = UnifiedMovieRecord::new(SourceKind::Spreadsheet, "1", "Heat")
            .with_year(Some("1995".to_string()));
        let mut meta = PlaybackMetadata::from_record(&record);
        meta.apply(&MetadataOverlay {
            year: None,
            rating: Some("8.3".to_string()),
            poster: None,
        });
        assert_eq!(meta.year, "1995");
        assert_eq!(meta.rating, "8.3");
    }
}
