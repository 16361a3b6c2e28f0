use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spreadsheet: SpreadsheetConfig,
    #[serde(default)]
    pub video_host: VideoHostConfig,
    #[serde(default)]
    pub channel_feed: ChannelFeedConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Spreadsheet-backed API: each endpoint returns a JSON array of rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadsheetConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoHostConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_video_host_list_endpoint")]
    pub list_endpoint: String,
    #[serde(default = "default_video_host_embed_base")]
    pub embed_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelFeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_channel_api_base")]
    pub api_base: String,
    /// Posts from any other chat are discarded
    #[serde(default)]
    pub channel_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metadata_search_endpoint")]
    pub search_endpoint: String,
    #[serde(default = "default_metadata_image_base")]
    pub image_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpConfig {
    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_hero_size")]
    pub hero_size: usize,
    #[serde(default = "default_new_size")]
    pub new_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    /// Drop remote hits whose title already appears among the local matches
    #[serde(default)]
    pub dedupe_by_title: bool,
}

fn default_true() -> bool {
    true
}

fn default_video_host_list_endpoint() -> String {
    "https://doodapi.co/api/file/list".to_string()
}

fn default_video_host_embed_base() -> String {
    "https://doodstream.com/e/".to_string()
}

fn default_channel_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_metadata_search_endpoint() -> String {
    "https://api.themoviedb.org/3/search/movie".to_string()
}

fn default_metadata_image_base() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_hero_size() -> usize {
    10
}

fn default_new_size() -> usize {
    5
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            endpoints: Vec::new(),
        }
    }
}

impl Default for VideoHostConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            list_endpoint: default_video_host_list_endpoint(),
            embed_base: default_video_host_embed_base(),
        }
    }
}

impl Default for ChannelFeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_base: default_channel_api_base(),
            channel_id: String::new(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            search_endpoint: default_metadata_search_endpoint(),
            image_base: default_metadata_image_base(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            hero_size: default_hero_size(),
            new_size: default_new_size(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.spreadsheet.enabled && self.spreadsheet.endpoints.iter().all(|e| e.trim().is_empty()) {
            return Err(anyhow::anyhow!("Spreadsheet source is enabled but no endpoints are configured"));
        }

        if self.video_host.enabled {
            if self.video_host.list_endpoint.is_empty() {
                return Err(anyhow::anyhow!("Video host is enabled but list_endpoint is empty"));
            }
            if self.video_host.embed_base.is_empty() {
                return Err(anyhow::anyhow!("Video host is enabled but embed_base is empty"));
            }
        }

        if self.channel_feed.enabled && self.channel_feed.channel_id.trim().is_empty() {
            return Err(anyhow::anyhow!("Channel feed is enabled but channel_id is not configured"));
        }

        if self.metadata.enabled && self.metadata.search_endpoint.is_empty() {
            return Err(anyhow::anyhow!("Metadata source is enabled but search_endpoint is empty"));
        }

        if self.catalog.hero_size == 0 {
            return Err(anyhow::anyhow!("catalog.hero_size must be at least 1"));
        }

        if self.http.timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("http.timeout_secs must be positive when set"));
        }

        Ok(())
    }

    /// Names of the sources switched on in this config
    pub fn enabled_sources(&self) -> Vec<&'static str> {
        let mut sources = Vec::new();
        if self.spreadsheet.enabled {
            sources.push("spreadsheet");
        }
        if self.video_host.enabled {
            sources.push("video-host");
        }
        if self.channel_feed.enabled {
            sources.push("channel-feed");
        }
        if self.metadata.enabled {
            sources.push("metadata-enrichment");
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.spreadsheet.endpoints = vec!["https://sheets.example/api/v1/one".to_string()];
        config.channel_feed.channel_id = "-1001".to_string();
        config
    }

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = valid_config();
        config.http.timeout_secs = Some(15);
        config.search.dedupe_by_title = true;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.spreadsheet.endpoints, config.spreadsheet.endpoints);
        assert_eq!(loaded.channel_feed.channel_id, "-1001");
        assert_eq!(loaded.http.timeout_secs, Some(15));
        assert!(loaded.search.dedupe_by_title);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [spreadsheet]
            endpoints = ["https://sheets.example/a", "https://sheets.example/b"]

            [channel_feed]
            channel_id = "-1003142437900"
            "#,
        )
        .unwrap();

        assert!(config.spreadsheet.enabled);
        assert_eq!(config.spreadsheet.endpoints.len(), 2);
        assert_eq!(config.video_host.embed_base, "https://doodstream.com/e/");
        assert_eq!(config.catalog.hero_size, 10);
        assert_eq!(config.catalog.new_size, 5);
        assert_eq!(config.http.timeout(), None);
        assert!(!config.search.dedupe_by_title);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config = valid_config();
        assert!(config.validate().is_ok());

        config.channel_feed.channel_id = " ".to_string();
        assert!(config.validate().is_err());

        config = valid_config();
        config.http.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config = valid_config();
        config.catalog.hero_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_sources_skip_validation() {
        let mut config = Config::default();
        config.spreadsheet.enabled = false;
        config.channel_feed.enabled = false;
        assert!(config.validate().is_ok());
        assert_eq!(config.enabled_sources(), vec!["video-host", "metadata-enrichment"]);
    }
}
