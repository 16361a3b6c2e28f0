use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const VIDEO_HOST_API_KEY: &str = "video_host_api_key";
const METADATA_API_KEY: &str = "metadata_api_key";
const CHANNEL_BOT_TOKEN: &str = "channel_bot_token";

/// Every credential the sources know how to use
pub const CREDENTIAL_KEYS: [&str; 3] = [VIDEO_HOST_API_KEY, METADATA_API_KEY, CHANNEL_BOT_TOKEN];

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Static API credentials kept apart from `config.toml`
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_video_host_api_key(&self) -> Option<&String> {
        self.get(VIDEO_HOST_API_KEY)
    }

    pub fn set_video_host_api_key(&mut self, key: String) {
        self.set(VIDEO_HOST_API_KEY.to_string(), key);
    }

    pub fn get_metadata_api_key(&self) -> Option<&String> {
        self.get(METADATA_API_KEY)
    }

    pub fn set_metadata_api_key(&mut self, key: String) {
        self.set(METADATA_API_KEY.to_string(), key);
    }

    pub fn get_channel_bot_token(&self) -> Option<&String> {
        self.get(CHANNEL_BOT_TOKEN)
    }

    pub fn set_channel_bot_token(&mut self, token: String) {
        self.set(CHANNEL_BOT_TOKEN.to_string(), token);
    }

    pub fn get_all_keys(&self) -> Vec<String> {
        self.credentials.keys().cloned().collect()
    }
}
