//! Local settings: server credentials, helper tool versions and HTTP options
//!
//! Stored in `~/.config/nexmove/settings.yaml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SettingsError;

/// Timeout applied to every HTTP request unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Credentials keyed by server (repository) id
    #[serde(default)]
    pub servers: Vec<Server>,

    /// Pinned versions of the Maven plugins used by the `maven` transport
    #[serde(default)]
    pub tools: ToolVersions,

    #[serde(default)]
    pub http: HttpSettings,
}

impl Settings {
    /// Load settings from the default location; a missing file means empty settings
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::default_path()?;
        Self::load_or_default(&path)
    }

    /// Load from a path, falling back to defaults if it doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save to a specific path. The file holds passwords, so it is created `0600` on Unix.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |message: String| SettingsError::Write {
            path: path.to_path_buf(),
            message,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let content = serde_yaml::to_string(self).map_err(|e| write_err(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut options = std::fs::OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(path).map_err(|e| write_err(e.to_string()))?;
            std::io::Write::write_all(&mut file, content.as_bytes())
                .map_err(|e| write_err(e.to_string()))?;
            Ok(())
        }

        #[cfg(not(unix))]
        {
            std::fs::write(path, content).map_err(|e| write_err(e.to_string()))
        }
    }

    /// Get default settings path
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let config_dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(config_dir.join("nexmove").join("settings.yaml"))
    }

    /// Get a server entry by id
    pub fn server(&self, id: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.id == id)
    }
}

/// Credentials for one server id
#[derive(Clone, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub username: String,
    /// Plain text, or `${env.NAME}` to read from the environment
    pub password: String,
}

impl Server {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Maven plugin versions for the `maven` transport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolVersions {
    #[serde(default)]
    pub dependency_plugin: Option<String>,

    #[serde(default)]
    pub deploy_plugin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
