use reelhub_models::{SourceKind, SourceRef, UnifiedMovieRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;
use crate::timestamps::epoch_millis;

/// Sheet cells come back as strings or numbers depending on the column format
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(serde_json::Number),
}

impl Cell {
    fn into_text(self) -> Option<String> {
        let text = match self {
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => n.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub id: Option<Cell>,
    #[serde(default)]
    pub title: Option<Cell>,
    #[serde(default)]
    pub year: Option<Cell>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default, rename = "videoUrl")]
    pub video_url: Option<String>,
}

/// Decode a sheet response row by row; a malformed row is dropped on its own
pub fn parse_rows(body: Value) -> Result<Vec<SheetRow>, SourceError> {
    let Value::Array(values) = body else {
        return Err(SourceError::Parse("expected a JSON array of rows".to_string()));
    };

    let mut rows = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<SheetRow>(value) {
            Ok(row) => rows.push(row),
            Err(e) => debug!("Spreadsheet: skipping malformed row {}: {}", index, e),
        }
    }
    Ok(rows)
}

/// Map sheet rows into unified records, skipping rows with no id or title
pub fn map_rows(rows: Vec<SheetRow>) -> Vec<UnifiedMovieRecord> {
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(id) = row.id.and_then(Cell::into_text) else {
            debug!("Spreadsheet: skipping row without id");
            continue;
        };
        let Some(title) = row.title.and_then(Cell::into_text) else {
            debug!("Spreadsheet: skipping row {} without title", id);
            continue;
        };

        let timestamp = row.timestamp.as_ref().map(epoch_millis).unwrap_or(0);

        records.push(
            UnifiedMovieRecord::new(SourceKind::Spreadsheet, &id, title)
                .with_year(row.year.and_then(Cell::into_text))
                .with_poster(row.poster)
                .with_timestamp(timestamp)
                .with_source_ref(SourceRef::direct_url(row.video_url)),
        );
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<SheetRow> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_map_rows() {
        let records = map_rows(rows(json!([
            {
                "id": "42",
                "title": "The Matrix",
                "year": "1999",
                "poster": "https://img.example/matrix.jpg",
                "timestamp": "2024-01-01 10:00:00",
                "videoUrl": "https://cdn.example/matrix.mp4"
            },
            { "id": 7, "title": 1917, "timestamp": 100 }
        ])));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "sheet-42");
        assert_eq!(records[0].year.as_deref(), Some("1999"));
        assert_eq!(records[0].timestamp, 1_704_103_200_000);
        assert_eq!(
            records[0].source_ref,
            SourceRef::DirectUrl { url: "https://cdn.example/matrix.mp4".to_string() }
        );

        assert_eq!(records[1].id, "sheet-7");
        assert_eq!(records[1].title, "1917");
        assert_eq!(records[1].timestamp, 100);
        assert_eq!(records[1].source_ref, SourceRef::Unresolved);
        assert!(records.iter().all(|r| r.source == SourceKind::Spreadsheet));
    }

    #[test]
    fn test_rows_without_id_or_title_are_skipped() {
        let records = map_rows(rows(json!([
            { "title": "No id" },
            { "id": "3", "title": "  " },
            { "id": "4", "title": "Kept" }
        ])));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "sheet-4");
    }

    #[test]
    fn test_malformed_row_does_not_drop_the_sheet() {
        let rows = parse_rows(json!([
            { "id": "1", "title": "Bad poster", "poster": 5 },
            { "id": "2", "title": "Bad url", "videoUrl": ["x"] },
            { "id": "3", "title": "Kept", "videoUrl": "https://cdn.example/3.mp4" }
        ]))
        .unwrap();

        let records = map_rows(rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "sheet-3");
    }

    #[test]
    fn test_non_array_body_is_a_parse_error() {
        assert!(matches!(parse_rows(json!({ "error": "quota" })), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_missing_timestamp_defaults_to_zero() {
        let records = map_rows(rows(json!([{ "id": "1", "title": "Undated" }])));
        assert_eq!(records[0].timestamp, 0);
    }
}
