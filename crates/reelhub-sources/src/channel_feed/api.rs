use reelhub_models::{SourceKind, SourceRef, UnifiedMovieRecord};
use serde::Deserialize;

use crate::error::SourceError;

const FALLBACK_TITLE: &str = "Telegram Video";

#[derive(Debug, Deserialize)]
pub struct UpdatesResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub channel_post: Option<ChannelPost>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelPost {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub caption: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub video: Option<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FileResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub result: Option<FileInfo>,
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub file_path: Option<String>,
}

pub fn updates_url(api_base: &str, bot_token: &str) -> String {
    format!("{}/bot{}/getUpdates", api_base.trim_end_matches('/'), bot_token)
}

pub fn get_file_url(api_base: &str, bot_token: &str, file_id: &str) -> String {
    format!(
        "{}/bot{}/getFile?file_id={}",
        api_base.trim_end_matches('/'),
        bot_token,
        urlencoding::encode(file_id)
    )
}

pub fn download_url(api_base: &str, bot_token: &str, file_path: &str) -> String {
    format!(
        "{}/file/bot{}/{}",
        api_base.trim_end_matches('/'),
        bot_token,
        file_path.trim_start_matches('/')
    )
}

/// Keep only video posts from the configured channel
pub fn map_updates(response: UpdatesResponse, channel_id: &str) -> Result<Vec<UnifiedMovieRecord>, SourceError> {
    if response.ok == Some(false) {
        return Err(SourceError::Rejected(
            response.description.unwrap_or_else(|| "getUpdates returned ok=false".to_string()),
        ));
    }

    let channel_id = channel_id.trim();

    Ok(response
        .result
        .into_iter()
        .filter_map(|update| update.channel_post)
        .filter(|post| post.chat.id.to_string() == channel_id)
        .filter_map(|post| {
            let video = post.video?;
            if video.file_id.is_empty() {
                return None;
            }
            let title = post
                .caption
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_TITLE.to_string());

            Some(
                UnifiedMovieRecord::new(SourceKind::ChannelFeed, &post.message_id.to_string(), title)
                    .with_timestamp(post.date.saturating_mul(1000))
                    .with_source_ref(SourceRef::channel_file(video.file_id)),
            )
        })
        .collect())
}

/// Pull the file path out of a describe-file response
pub fn file_path(response: FileResponse) -> Result<String, SourceError> {
    if !response.ok {
        return Err(SourceError::Rejected(
            response.description.unwrap_or_else(|| "getFile returned ok=false".to_string()),
        ));
    }

    response
        .result
        .and_then(|r| r.file_path)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| SourceError::Parse("getFile response has no file_path".to_string()))
}
