use reelhub_models::{SourceKind, SourceRef, UnifiedMovieRecord};
use serde::Deserialize;

use crate::error::SourceError;
use crate::timestamps::epoch_millis_from_str;

#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<FileListResult>,
}

#[derive(Debug, Deserialize)]
pub struct FileListResult {
    #[serde(default)]
    pub files: Option<Vec<HostedFile>>,
}

#[derive(Debug, Deserialize)]
pub struct HostedFile {
    pub file_code: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub single_img: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub uploaded: Option<String>,
}

pub fn list_url(list_endpoint: &str, api_key: &str) -> String {
    format!("{}?key={}", list_endpoint, urlencoding::encode(api_key))
}

/// Map a file listing into unified records.
///
/// A non-200 `status` is a rejection; a response without `result.files` is an
/// empty listing.
pub fn map_file_list(response: FileListResponse) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
    if let Some(status) = response.status {
        if status != 200 {
            return Err(SourceError::Rejected(format!(
                "status {}: {}",
                status,
                response.msg.unwrap_or_default()
            )));
        }
    }

    let files = response.result.and_then(|r| r.files).unwrap_or_default();

    Ok(files
        .into_iter()
        .filter(|f| !f.file_code.is_empty())
        .map(|file| {
            let title = file
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| file.file_code.clone());
            let timestamp = file.uploaded.as_deref().map(epoch_millis_from_str).unwrap_or(0);

            UnifiedMovieRecord::new(SourceKind::VideoHost, &file.file_code, title)
                .with_poster(file.single_img)
                .with_timestamp(timestamp)
                .with_source_ref(SourceRef::file_code(file.file_code))
        })
        .collect())
}
