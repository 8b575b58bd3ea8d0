//! Client configuration management.
//!
//! Holds the platform connection settings (base URL, tenant, credentials,
//! transport knobs) and logging preferences. Configuration is persisted as
//! TOML on disk and is immutable once a client has been built from it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{C8yError, C8yResult};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Platform connection settings.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Platform connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Platform URL, e.g. "https://tenant.example.com".
    #[serde(default)]
    pub base_url: String,

    /// Tenant id. When set, the basic-auth user becomes `tenant/username`.
    #[serde(default)]
    pub tenant: String,

    /// Login name.
    #[serde(default)]
    pub username: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Request timeout in milliseconds, enforced by the transport.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Whether the transport accepts invalid TLS certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Vendor segment of the typed media types.
    #[serde(default = "default_vendor")]
    pub vendor: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

/// Basic-auth credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub tenant: Option<String>,
    pub username: String,
    pub password: String,
}

// Default value functions for serde

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_vendor() -> String {
    constants::DEFAULT_MEDIA_VENDOR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            tenant: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_ms: default_timeout(),
            accept_invalid_certs: false,
            vendor: default_vendor(),
        }
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("base_url", &self.base_url)
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_ms", &self.timeout_ms)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("vendor", &self.vendor)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl PlatformConfig {
    /// Credentials derived from this configuration.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            tenant: (!self.tenant.is_empty()).then(|| self.tenant.clone()),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// The base URL after [`AppConfig::sanitize_base_url`].
    pub fn sanitized_base_url(&self) -> String {
        AppConfig::sanitize_base_url(&self.base_url)
    }
}

impl Credentials {
    /// Create credentials without a tenant prefix.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            tenant: None,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Set the tenant prefix.
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// The user part of the basic-auth pair: `tenant/username` or `username`.
    pub fn auth_user(&self) -> String {
        match &self.tenant {
            Some(tenant) => format!("{tenant}/{}", self.username),
            None => self.username.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl LoggingConfig {
    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_directory(&self) -> C8yResult<PathBuf> {
        if self.directory.is_empty() {
            Ok(AppConfig::config_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.directory))
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path, or defaults if absent.
    pub fn load_default() -> C8yResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> C8yResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> C8yResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The per-user configuration directory, `<config_dir>/c8y`.
    pub fn config_dir() -> C8yResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| C8yError::Config("could not determine config directory".into()))?;
        Ok(base.join(constants::APP_NAME))
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> C8yResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the effective log directory.
    pub fn effective_log_dir(&self) -> C8yResult<PathBuf> {
        self.logging.effective_directory()
    }

    /// Check whether the platform connection is configured.
    pub fn is_platform_configured(&self) -> bool {
        !self.platform.base_url.is_empty() && !self.platform.username.is_empty()
    }

    /// Sanitize and normalize a platform base URL.
    ///
    /// Trims whitespace and quotes, strips trailing slashes, and defaults
    /// the scheme to https.
    pub fn sanitize_base_url(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}
