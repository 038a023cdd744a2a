//! Types for Catbox API requests and client configuration.

use crate::error::{CatboxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Catbox API endpoint shared by every request type.
pub const DEFAULT_API_URL: &str = "https://catbox.moe/user/api.php";
/// Base URL of hosted files.
pub const DEFAULT_FILE_URL: &str = "https://files.catbox.moe";
/// Base URL of albums.
pub const DEFAULT_ALBUM_URL: &str = "https://catbox.moe/c";
/// Per-request timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Uploads sent concurrently per album chunk.
pub const DEFAULT_ALBUM_CHUNK_SIZE: usize = 50;
/// Pause between album chunks.
pub const DEFAULT_ALBUM_DELAY: Duration = Duration::from_millis(1500);

/// Configuration for a [`CatboxClient`](crate::CatboxClient).
#[derive(Debug, Clone)]
pub struct CatboxConfig {
    /// API endpoint (e.g., "https://catbox.moe/user/api.php")
    pub api_url: String,
    /// Prefix of hosted file URLs, used for shortcode extraction
    pub file_url: String,
    /// Prefix of album URLs, used for shortcode extraction
    pub album_url: String,
    /// Account userhash for authenticated uploads and album management
    pub userhash: Option<String>,
    /// Default per-request timeout
    pub timeout: Duration,
    /// Default number of concurrent uploads per album chunk
    pub album_chunk_size: usize,
    /// Default pause between album chunks
    pub album_delay: Duration,
}

impl Default for CatboxConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            file_url: DEFAULT_FILE_URL.to_string(),
            album_url: DEFAULT_ALBUM_URL.to_string(),
            userhash: None,
            timeout: DEFAULT_TIMEOUT,
            album_chunk_size: DEFAULT_ALBUM_CHUNK_SIZE,
            album_delay: DEFAULT_ALBUM_DELAY,
        }
    }
}

impl CatboxConfig {
    /// Anonymous configuration against the public service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration authenticated with a userhash.
    pub fn with_userhash(userhash: impl Into<String>) -> Self {
        Self {
            userhash: Some(userhash.into()),
            ..Self::default()
        }
    }

    /// Point the client at a different API endpoint.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn album_chunk_size(mut self, chunk_size: usize) -> Self {
        self.album_chunk_size = chunk_size;
        self
    }

    pub fn album_delay(mut self, delay: Duration) -> Self {
        self.album_delay = delay;
        self
    }
}

// =============================================================================
// Litterbox
// =============================================================================

/// How long Litterbox keeps a temporary upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LitterboxDuration {
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "72h")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
}

impl LitterboxDuration {
    pub const ALL: [LitterboxDuration; 5] = [
        LitterboxDuration::OneHour,
        LitterboxDuration::TwelveHours,
        LitterboxDuration::OneDay,
        LitterboxDuration::ThreeDays,
        LitterboxDuration::OneWeek,
    ];

    /// Value sent in the `time` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            LitterboxDuration::OneHour => "1h",
            LitterboxDuration::TwelveHours => "12h",
            LitterboxDuration::OneDay => "24h",
            LitterboxDuration::ThreeDays => "72h",
            LitterboxDuration::OneWeek => "1w",
        }
    }
}

impl fmt::Display for LitterboxDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LitterboxDuration {
    type Err = CatboxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| {
                CatboxError::Config(format!(
                    "Invalid Litterbox duration '{}' (expected 1h, 12h, 24h, 72h or 1w)",
                    s
                ))
            })
    }
}

// =============================================================================
// Upload Types
// =============================================================================

/// Content to upload: a file on disk or an in-memory buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadInput {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl UploadInput {
    /// File name sent with the upload.
    ///
    /// An explicit name always wins. Paths fall back to their last
    /// component, split on both `/` and `\`; buffers have nothing to fall
    /// back to.
    pub fn file_name(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(name) = explicit {
            return Ok(name.to_string());
        }

        match self {
            UploadInput::Path(path) => path
                .to_str()
                .and_then(|p| p.rsplit(|c: char| c == '/' || c == '\\').find(|s| !s.is_empty()))
                .filter(|n| *n != "." && *n != "..")
                .map(str::to_string)
                .ok_or_else(|| {
                    CatboxError::Config(format!(
                        "Cannot infer a file name from {}",
                        path.display()
                    ))
                }),
            UploadInput::Bytes(_) => Err(CatboxError::Config(
                "A file name is required when uploading bytes".to_string(),
            )),
        }
    }

    /// Load the content to upload.
    pub(crate) async fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            UploadInput::Path(path) => match tokio::fs::read(&path).await {
                Ok(contents) => Ok(contents),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(CatboxError::FileNotFound(path.display().to_string()))
                }
                Err(e) => Err(e.into()),
            },
            UploadInput::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<PathBuf> for UploadInput {
    fn from(path: PathBuf) -> Self {
        UploadInput::Path(path)
    }
}

impl From<&Path> for UploadInput {
    fn from(path: &Path) -> Self {
        UploadInput::Path(path.to_path_buf())
    }
}

impl From<&str> for UploadInput {
    fn from(path: &str) -> Self {
        UploadInput::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for UploadInput {
    fn from(bytes: Vec<u8>) -> Self {
        UploadInput::Bytes(bytes)
    }
}

impl From<&[u8]> for UploadInput {
    fn from(bytes: &[u8]) -> Self {
        UploadInput::Bytes(bytes.to_vec())
    }
}

/// Settings for a chunked album upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Timeout applied to each individual upload
    pub timeout: Duration,
    /// Uploads sent concurrently per chunk
    pub chunk_size: usize,
    /// Pause between chunks
    pub delay: Duration,
}

impl BatchOptions {
    pub fn new(timeout: Duration, chunk_size: usize, delay: Duration) -> Self {
        Self {
            timeout,
            chunk_size,
            delay,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(CatboxError::Config(
                "Album chunk size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_ALBUM_CHUNK_SIZE, DEFAULT_ALBUM_DELAY)
    }
}

impl From<&CatboxConfig> for BatchOptions {
    fn from(config: &CatboxConfig) -> Self {
        Self::new(config.timeout, config.album_chunk_size, config.album_delay)
    }
}
