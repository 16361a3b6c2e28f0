use anyhow::Result;
use std::path::{Path, PathBuf};

/// Overrides where reelhub keeps its config, credentials and logs
pub const HOME_ENV: &str = "REELHUB_HOME";

/// Locations of the files reelhub reads and writes
#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    /// `$REELHUB_HOME` when set, otherwise the platform config and data directories
    pub fn new() -> Result<Self> {
        Self::resolve(std::env::var_os(HOME_ENV).map(PathBuf::from))
    }

    /// Everything under one directory, logs in `logs/`
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    fn resolve(home: Option<PathBuf>) -> Result<Self> {
        if let Some(home) = home.filter(|h| !h.as_os_str().is_empty()) {
            return Ok(Self::with_base(home));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory; set {}", HOME_ENV))?
            .join("reelhub");
        let log_dir = dirs::data_local_dir()
            .map(|d| d.join("reelhub").join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));

        Ok(Self { config_dir, log_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("reelhub.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_base(".reelhub"))
    }
}
