//! Configuration management for the WordPress REST SDK.
//!
//! This module provides a centralized configuration system that enables:
//! - Type-safe configuration management
//! - Environment variable integration (optionally through a `.env` file)
//! - Builder pattern for easy setup
//! - Configuration validation
//!
//! ## Usage
//!
//! ```rust
//! use wordpress_pub_rs::config::{Config, HttpConfig, MediaConfig, SiteConfig};
//!
//! let config = Config::builder()
//!     .site(SiteConfig::new("https://blog.example.com", "editor", "app-pass"))
//!     .http(HttpConfig::builder().request_timeout_secs(60).build())
//!     .media(MediaConfig::builder().default_format("png".to_string()).build())
//!     .build();
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Result, WordPressError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Main configuration structure for the WordPress SDK.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Site location and basic-auth credentials
    pub site: SiteConfig,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// Media upload configuration
    pub media: MediaConfig,
}

/// Site URL and credentials. Immutable once a client is built from it.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    /// Base URL of the site, e.g. `https://blog.example.com`
    pub site_url: String,
    pub username: String,
    /// Account password or application password
    pub password: String,
}

/// HTTP client configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: transport default)
    pub request_timeout_secs: Option<u64>,
    /// Connection timeout in seconds (default: transport default)
    pub connect_timeout_secs: Option<u64>,
    /// User agent string for requests
    pub user_agent: String,
}

/// Media upload configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Encoding remote images are converted to (default: "webp")
    pub default_format: String,
    /// Maximum allowed size of a downloaded remote image in bytes (default: 20MB)
    pub max_download_size: u64,
    /// Maximum allowed size of an uploaded file in bytes (default: 64MB)
    pub max_upload_size: u64,
}

impl SiteConfig {
    pub fn new(
        site_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("site_url", &self.site_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: None,
            connect_timeout_secs: None,
            user_agent: format!("wordpress-pub-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            default_format: "webp".to_string(),
            max_download_size: 20 * 1024 * 1024, // 20MB
            max_upload_size: 64 * 1024 * 1024,   // 64MB
        }
    }
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Creates a configuration for one site with default HTTP and media settings.
    pub fn for_site(
        site_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site: SiteConfig::new(site_url, username, password),
            ..Default::default()
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// `WORDPRESS_SITE_URL`, `WORDPRESS_USERNAME` and `WORDPRESS_PASSWORD` are
    /// required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            site: SiteConfig::new(
                required_var("WORDPRESS_SITE_URL")?,
                required_var("WORDPRESS_USERNAME")?,
                required_var("WORDPRESS_PASSWORD")?,
            ),
            ..Default::default()
        };

        // HTTP settings
        if let Ok(val) = std::env::var("WORDPRESS_REQUEST_TIMEOUT") {
            config.http.request_timeout_secs = Some(val.parse().map_err(|_| {
                WordPressError::config_error("Invalid WORDPRESS_REQUEST_TIMEOUT value")
            })?);
        }

        if let Ok(val) = std::env::var("WORDPRESS_CONNECT_TIMEOUT") {
            config.http.connect_timeout_secs = Some(val.parse().map_err(|_| {
                WordPressError::config_error("Invalid WORDPRESS_CONNECT_TIMEOUT value")
            })?);
        }

        // Media settings
        if let Ok(val) = std::env::var("WORDPRESS_MEDIA_FORMAT") {
            config.media.default_format = val;
        }

        if let Ok(val) = std::env::var("WORDPRESS_MAX_DOWNLOAD_SIZE") {
            config.media.max_download_size = val.parse().map_err(|_| {
                WordPressError::config_error("Invalid WORDPRESS_MAX_DOWNLOAD_SIZE value")
            })?;
        }

        if let Ok(val) = std::env::var("WORDPRESS_MAX_UPLOAD_SIZE") {
            config.media.max_upload_size = val.parse().map_err(|_| {
                WordPressError::config_error("Invalid WORDPRESS_MAX_UPLOAD_SIZE value")
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads a `.env` file from the current directory (if any), then reads
    /// the environment like [`Config::from_env`].
    pub fn from_dotenv() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => {
                return Err(WordPressError::config_error(format!(
                    "Failed to load .env file: {e}"
                )));
            }
        }
        Self::from_env()
    }

    /// Validates the configuration for consistency and constraints.
    pub fn validate(&self) -> Result<()> {
        crate::utils::validate_credentials(
            &self.site.site_url,
            &self.site.username,
            &self.site.password,
        )
        .map_err(|reason| WordPressError::InvalidCredentials { reason })?;

        if self.http.request_timeout_secs == Some(0) {
            return Err(WordPressError::config_error(
                "request_timeout_secs must be greater than 0",
            ));
        }

        if self.http.connect_timeout_secs == Some(0) {
            return Err(WordPressError::config_error(
                "connect_timeout_secs must be greater than 0",
            ));
        }

        if self.media.max_download_size == 0 {
            return Err(WordPressError::config_error(
                "max_download_size must be greater than 0",
            ));
        }

        if self.media.max_upload_size == 0 {
            return Err(WordPressError::config_error(
                "max_upload_size must be greater than 0",
            ));
        }

        self.media.default_format.parse::<crate::convert::UploadFormat>()?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.http.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.http.connect_timeout_secs.map(Duration::from_secs)
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| WordPressError::config_error(format!("{name} is not set")))
}

/// Builder for creating Config instances.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    site: Option<SiteConfig>,
    http: Option<HttpConfig>,
    media: Option<MediaConfig>,
}

impl ConfigBuilder {
    /// Sets the site configuration.
    pub fn site(mut self, site: SiteConfig) -> Self {
        self.site = Some(site);
        self
    }

    /// Sets the HTTP configuration.
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the media configuration.
    pub fn media(mut self, media: MediaConfig) -> Self {
        self.media = Some(media);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Config {
        Config {
            site: self.site.unwrap_or_default(),
            http: self.http.unwrap_or_default(),
            media: self.media.unwrap_or_default(),
        }
    }
}

impl HttpConfig {
    /// Creates a new HTTP config builder.
    pub fn builder() -> HttpConfigBuilder {
        HttpConfigBuilder::default()
    }
}

impl MediaConfig {
    /// Creates a new media config builder.
    pub fn builder() -> MediaConfigBuilder {
        MediaConfigBuilder::default()
    }
}

/// Builder for HttpConfig.
#[derive(Debug, Default)]
pub struct HttpConfigBuilder {
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl HttpConfigBuilder {
    pub fn request_timeout_secs(mut self, timeout: u64) -> Self {
        self.request_timeout_secs = Some(timeout);
        self
    }

    pub fn connect_timeout_secs(mut self, timeout: u64) -> Self {
        self.connect_timeout_secs = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: String) -> Self {
        self.user_agent = Some(agent);
        self
    }

    pub fn build(self) -> HttpConfig {
        let default = HttpConfig::default();
        HttpConfig {
            request_timeout_secs: self.request_timeout_secs.or(default.request_timeout_secs),
            connect_timeout_secs: self.connect_timeout_secs.or(default.connect_timeout_secs),
            user_agent: self.user_agent.unwrap_or(default.user_agent),
        }
    }
}

/// Builder for MediaConfig.
#[derive(Debug, Default)]
pub struct MediaConfigBuilder {
    default_format: Option<String>,
    max_download_size: Option<u64>,
    max_upload_size: Option<u64>,
}

impl MediaConfigBuilder {
    pub fn default_format(mut self, format: String) -> Self {
        self.default_format = Some(format);
        self
    }

    pub fn max_download_size(mut self, size: u64) -> Self {
        self.max_download_size = Some(size);
        self
    }

    pub fn max_upload_size(mut self, size: u64) -> Self {
        self.max_upload_size = Some(size);
        self
    }

    pub fn build(self) -> MediaConfig {
        let default = MediaConfig::default();
        MediaConfig {
            default_format: self.default_format.unwrap_or(default.default_format),
            max_download_size: self.max_download_size.unwrap_or(default.max_download_size),
            max_upload_size: self.max_upload_size.unwrap_or(default.max_upload_size),
        }
    }
}
