//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use super::file::FileConfig;

/// Default animation shown under the page title
pub const DEFAULT_ANIMATION_URL: &str =
    "https://lottie.host/1201d027-c58a-497b-bc7f-878db0de4139/DH9UDviexx.json";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Animation fetch configuration
    pub animation: AnimationConfig,
    /// Session configuration
    pub session: SessionConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Animation fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Whether to fetch the animation at all
    pub enabled: bool,
    /// Animation JSON URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Seconds to wait before retrying after a failed fetch
    pub retry_after: u64,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle time in seconds after which a session is dropped
    pub ttl: u64,
    /// Maximum number of live sessions
    pub max_sessions: usize,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self::from_env()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Create configuration from the environment, then apply a config file on top
    pub fn with_file(file: &FileConfig) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut settings = Self::from_env()?;
        file.apply(&mut settings);
        settings.validate()?;

        Ok(settings)
    }

    fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8501")
                    .parse()
                    .context("Invalid port number")?,
            },
            animation: AnimationConfig {
                enabled: get_env_or_default("ANIMATION_ENABLED", "true")
                    .parse()
                    .context("Invalid animation enabled flag")?,
                url: get_env_or_default("ANIMATION_URL", DEFAULT_ANIMATION_URL),
                timeout: get_env_or_default("ANIMATION_TIMEOUT", "10")
                    .parse()
                    .context("Invalid animation timeout")?,
                retry_after: get_env_or_default("ANIMATION_RETRY_AFTER", "300")
                    .parse()
                    .context("Invalid animation retry delay")?,
            },
            session: SessionConfig {
                ttl: get_env_or_default("SESSION_TTL", "3600")
                    .parse()
                    .context("Invalid session TTL")?,
                max_sessions: get_env_or_default("MAX_SESSIONS", "10000")
                    .parse()
                    .context("Invalid maximum session count")?,
            },
            request: RequestConfig {
                max_request_size: get_env_or_default("MAX_REQUEST_SIZE", "65536")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_env_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: get_env_or_default("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        })
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.animation.enabled && !self.animation.url.starts_with("http") {
            anyhow::bail!("Invalid animation URL format, should start with 'http'");
        }

        if self.animation.timeout == 0 {
            anyhow::bail!("Animation timeout cannot be 0");
        }

        if self.session.ttl == 0 {
            anyhow::bail!("Session TTL cannot be 0");
        }

        if self.session.max_sessions == 0 {
            anyhow::bail!("Maximum session count cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Accepts plain levels and full filter directives such as `aipowermeter=debug,tower_http=info`
        if EnvFilter::try_new(&self.logging.level).is_err() {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    pub fn animation_timeout(&self) -> Duration {
        Duration::from_secs(self.animation.timeout)
    }

    pub fn animation_retry_after(&self) -> Duration {
        Duration::from_secs(self.animation.retry_after)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session.ttl)
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8501,
            },
            animation: AnimationConfig {
                enabled: true,
                url: DEFAULT_ANIMATION_URL.to_string(),
                timeout: 10,
                retry_after: 300,
            },
            session: SessionConfig {
                ttl: 3600,
                max_sessions: 10_000,
            },
            request: RequestConfig {
                max_request_size: 65_536,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
                cors_enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bind_address(), "0.0.0.0:8501");
        assert_eq!(settings.animation_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.logging.format = "yaml".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.logging.level = "aipowermeter=loud".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.animation.url = "ftp://example.com/a.json".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_log_level_accepts_filter_directives() {
        let mut settings = Settings::default();
        settings.logging.level = "aipowermeter=debug,tower_http=info".to_string();
        assert!(settings.validate().is_ok());

        settings.logging.level = "warn".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_disabled_animation_skips_url_check() {
        let mut settings = Settings::default();
        settings.animation.enabled = false;
        settings.animation.url = String::new();
        assert!(settings.validate().is_ok());
    }
}
