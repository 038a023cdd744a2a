/// CLI configuration
use catbox_client::{
    CatboxConfig, LitterboxDuration, DEFAULT_ALBUM_CHUNK_SIZE, DEFAULT_ALBUM_DELAY,
    DEFAULT_ALBUM_URL, DEFAULT_API_URL, DEFAULT_FILE_URL, DEFAULT_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "catbox.toml";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration file not found: {0}")]
    Missing(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Account userhash (get yours at https://catbox.moe/user/manage.php)
    #[serde(default)]
    pub userhash: Option<String>,

    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_album")]
    pub album: AlbumSettings,

    #[serde(default)]
    pub litterbox: LitterboxSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default = "default_file_url")]
    pub file_url: String,

    #[serde(default = "default_album_url")]
    pub album_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumSettings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LitterboxSettings {
    #[serde(default)]
    pub duration: LitterboxDuration,
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `catbox.toml` is read if
    /// present. `CATBOX_*` variables override file values, with `__`
    /// between nested keys (e.g. `CATBOX_API__TIMEOUT_SECS`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`CliConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Missing(path.display().to_string()));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Values stay strings so the userhash is passed through untouched
        settings = settings.add_source(
            config::Environment::with_prefix("CATBOX")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config: CliConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.album.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "album.chunk_size must be at least 1".to_string(),
            ));
        }

        if matches!(self.userhash.as_deref(), Some(hash) if hash.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "userhash is set but empty (unset CATBOX_USERHASH for anonymous use)".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the client configuration.
    pub fn into_client_config(self) -> CatboxConfig {
        CatboxConfig {
            api_url: self.api.url,
            file_url: self.api.file_url,
            album_url: self.api.album_url,
            userhash: self.userhash,
            timeout: Duration::from_secs(self.api.timeout_secs),
            album_chunk_size: self.album.chunk_size,
            album_delay: Duration::from_millis(self.album.delay_ms),
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_api_url(),
        file_url: default_file_url(),
        album_url: default_album_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_file_url() -> String {
    DEFAULT_FILE_URL.to_string()
}

fn default_album_url() -> String {
    DEFAULT_ALBUM_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_album() -> AlbumSettings {
    AlbumSettings {
        chunk_size: default_chunk_size(),
        delay_ms: default_delay_ms(),
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_ALBUM_CHUNK_SIZE
}

fn default_delay_ms() -> u64 {
    DEFAULT_ALBUM_DELAY.as_millis() as u64
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            userhash: None,
            api: default_api(),
            album: default_album(),
            litterbox: LitterboxSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_client() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());

        let client = config.into_client_config();
        assert_eq!(client.api_url, DEFAULT_API_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
        assert_eq!(client.album_chunk_size, DEFAULT_ALBUM_CHUNK_SIZE);
        assert_eq!(client.album_delay, DEFAULT_ALBUM_DELAY);
        assert!(client.userhash.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
userhash = "abc123hash"

[api]
timeout_secs = 5

[album]
chunk_size = 10
delay_ms = 250

[litterbox]
duration = "24h"
"#
        )
        .unwrap();

        let config = CliConfig::load_with_env(Some(file.path()), Some(config::Map::new())).unwrap();
        assert_eq!(config.userhash.as_deref(), Some("abc123hash"));
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.album.chunk_size, 10);
        assert_eq!(config.litterbox.duration, LitterboxDuration::OneDay);

        let client = config.into_client_config();
        assert_eq!(client.album_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_env_userhash_kept_verbatim() {
        let mut env = config::Map::new();
        env.insert("CATBOX_USERHASH".to_string(), "00123".to_string());
        env.insert("CATBOX_API__TIMEOUT_SECS".to_string(), "7".to_string());
        env.insert("CATBOX_ALBUM__CHUNK_SIZE".to_string(), "4".to_string());

        let config = CliConfig::load_with_env(None, Some(env)).unwrap();
        assert_eq!(config.userhash.as_deref(), Some("00123"));
        assert_eq!(config.api.timeout_secs, 7);
        assert_eq!(config.album.chunk_size, 4);
    }

    #[test]
    fn test_env_userhash_not_reinterpreted() {
        for hash in ["1e5", "true", "0.50"] {
            let mut env = config::Map::new();
            env.insert("CATBOX_USERHASH".to_string(), hash.to_string());

            let config = CliConfig::load_with_env(None, Some(env)).unwrap();
            assert_eq!(config.userhash.as_deref(), Some(hash));
        }
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "userhash = \"from-file\"").unwrap();

        let mut env = config::Map::new();
        env.insert("CATBOX_USERHASH".to_string(), "from-env".to_string());

        let config = CliConfig::load_with_env(Some(file.path()), Some(env)).unwrap();
        assert_eq!(config.userhash.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = CliConfig::load(Some(Path::new("/definitely/not/here/catbox.toml")));
        assert!(matches!(result, Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut config = CliConfig::default();
        config.album.chunk_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_userhash_rejected() {
        let mut config = CliConfig::default();
        config.userhash = Some("  ".to_string());
        assert!(config.validate().is_err());
    }
}
