pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CatalogConfig, ChannelFeedConfig, Config, HttpConfig, MetadataConfig, SearchConfig, SpreadsheetConfig, VideoHostConfig};
pub use credentials::{CredentialStore, CREDENTIAL_KEYS};
pub use paths::{PathManager, HOME_ENV};
