//! Main Catbox client.

use crate::error::{CatboxError, Result};
use crate::types::{BatchOptions, CatboxConfig};
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the Catbox file hosting API.
///
/// Holds an optional userhash and is otherwise stateless, so one client can
/// be cloned into as many tasks as needed.
///
/// # Example
///
/// ```ignore
/// use catbox_client::{CatboxClient, CatboxConfig, UploadInput};
///
/// let client = CatboxClient::new(CatboxConfig::with_userhash("my-userhash"))?;
/// let url = client.upload_file(UploadInput::from("cat.png"), None, None).await?;
/// println!("Hosted at {}", url);
/// ```
#[derive(Clone, Debug)]
pub struct CatboxClient {
    http: Client,
    config: Arc<CatboxConfig>,
}

impl CatboxClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatboxConfig) -> Result<Self> {
        if !config.api_url.starts_with("http://") && !config.api_url.starts_with("https://") {
            return Err(CatboxError::Config(format!(
                "API URL must start with http:// or https:// (got '{}')",
                config.api_url
            )));
        }

        let normalized_config = CatboxConfig {
            file_url: config.file_url.trim_end_matches('/').to_string(),
            album_url: config.album_url.trim_end_matches('/').to_string(),
            ..config
        };

        // Timeouts are set per request
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("catbox-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatboxError::Service(e.to_string()))?;

        Ok(Self {
            http,
            config: Arc::new(normalized_config),
        })
    }

    /// Client configuration.
    pub fn config(&self) -> &CatboxConfig {
        &self.config
    }

    /// Check if the client carries a userhash.
    pub fn is_authenticated(&self) -> bool {
        self.config.userhash.is_some()
    }

    /// Batch settings derived from the client configuration.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::from(self.config.as_ref())
    }

    /// Reduce a Catbox file or album URL to its shortcode.
    ///
    /// URLs from other hosts are returned unchanged.
    pub fn shortcode_from_url<'u>(&self, url: &'u str) -> &'u str {
        extract_shortcode(url, &[&self.config.file_url, &self.config.album_url])
    }

    pub(crate) fn require_userhash(&self) -> Result<&str> {
        self.config
            .userhash
            .as_deref()
            .ok_or_else(CatboxError::missing_userhash)
    }

    pub(crate) fn timeout_or_default(&self, timeout: Option<Duration>) -> Duration {
        timeout.unwrap_or(self.config.timeout)
    }

    /// POST a multipart form to the API endpoint.
    pub(crate) async fn post_form(&self, form: Form, timeout: Duration) -> Result<Response> {
        debug!(url = %self.config.api_url, timeout_secs = timeout.as_secs_f64(), "Posting form");

        self.http
            .post(&self.config.api_url)
            .timeout(timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CatboxError::from_request(e, timeout))
    }
}

/// Read a successful response body as trimmed text.
pub(crate) async fn response_text(response: Response, timeout: Duration) -> Result<String> {
    let text = response
        .text()
        .await
        .map_err(|e| CatboxError::from_request(e, timeout))?;
    Ok(text.trim().to_string())
}

/// Turn a non-2xx response into [`CatboxError::Http`].
pub(crate) async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(CatboxError::Http {
        status: status.as_u16(),
        message: message.trim().to_string(),
    })
}

/// Strip any of `prefixes` from `url`, leaving the trailing path segment.
///
/// A URL that starts with none of the prefixes is returned as-is.
pub fn extract_shortcode<'u>(url: &'u str, prefixes: &[&str]) -> &'u str {
    if prefixes.iter().any(|prefix| url.starts_with(prefix)) {
        url.rsplit('/').next().unwrap_or(url)
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_ALBUM_URL, DEFAULT_FILE_URL};

    #[test]
    fn test_api_url_validation() {
        assert!(CatboxClient::new(CatboxConfig::new()).is_ok());
        assert!(CatboxClient::new(CatboxConfig::new().api_url("http://localhost:8080")).is_ok());

        assert!(CatboxClient::new(CatboxConfig::new().api_url("")).is_err());
        assert!(CatboxClient::new(CatboxConfig::new().api_url("catbox.moe")).is_err());
        assert!(CatboxClient::new(CatboxConfig::new().api_url("ftp://catbox.moe")).is_err());
    }

    #[test]
    fn test_extract_shortcode() {
        let prefixes = [DEFAULT_FILE_URL, DEFAULT_ALBUM_URL];
        assert_eq!(
            extract_shortcode("https://files.catbox.moe/abc123", &prefixes),
            "abc123"
        );
        assert_eq!(
            extract_shortcode("https://catbox.moe/c/xyz789", &prefixes),
            "xyz789"
        );
        assert_eq!(
            extract_shortcode("https://example.com/abc123", &prefixes),
            "https://example.com/abc123"
        );
        assert_eq!(extract_shortcode("abc123.png", &prefixes), "abc123.png");
    }

    #[test]
    fn test_shortcode_uses_normalized_hosts() {
        let mut config = CatboxConfig::new();
        config.file_url = "https://files.example.org/".to_string();
        let client = CatboxClient::new(config).expect("valid config");

        assert_eq!(
            client.shortcode_from_url("https://files.example.org/q1w2e3.jpg"),
            "q1w2e3.jpg"
        );
        assert_eq!(
            client.shortcode_from_url("https://catbox.moe/c/album1"),
            "album1"
        );
    }

    #[test]
    fn test_authentication_state() {
        let anonymous = CatboxClient::new(CatboxConfig::new()).unwrap();
        assert!(!anonymous.is_authenticated());
        assert!(matches!(
            anonymous.require_userhash(),
            Err(CatboxError::Config(_))
        ));

        let authed = CatboxClient::new(CatboxConfig::with_userhash("hash")).unwrap();
        assert!(authed.is_authenticated());
        assert_eq!(authed.require_userhash().unwrap(), "hash");
    }
}
