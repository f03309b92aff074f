//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then handed to
//! each component as an immutable value. Nothing reads the environment after
//! startup.
//!
//! ## Required Variables
//!
//! - `PT_DIR` - Storage directory, one file per code
//!
//! ## Optional Variables
//!
//! - `PT_NOTIFY_DIR` - Notification opt-in directory (default: `<PT_DIR>/.notify` if it exists)
//! - `PT_AUTH` - Shared secret for listing and creation (unset disables both)
//! - `PT_ADDR` - Bind address (default: `0.0.0.0:4600`, `:port` binds all interfaces)
//! - `PT_FALLBACK` - Fallback target, takes precedence over the `.fallback` file
//! - `PT_BASE_URL` - Prefix for creation responses, e.g. `https://s.example.com`
//! - `PUSHOVER_CREDENTIALS` - `user:token` for outbound notifications
//! - `NOTIFY_QUEUE_CAPACITY` - Notification buffer size (default: 1024)
//! - `NOTIFY_CONCURRENCY` - Concurrent outbound calls (default: 4)
//! - `NOTIFY_TIMEOUT_SECONDS` - Timeout per outbound call (default: 10)
//! - `SHUTDOWN_TIMEOUT_SECONDS` - Time allowed to drain notifications (default: 15)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::SpecialCode;
use crate::infrastructure::notify::PushoverCredentials;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4600";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub root_dir: PathBuf,
    /// Active notification directory, explicit or auto-detected.
    pub notify_dir: Option<PathBuf>,
    /// True if `notify_dir` came from `PT_NOTIFY_DIR` rather than auto-detection.
    pub notify_dir_explicit: bool,
    pub auth_key: Option<String>,
    pub listen_addr: String,
    pub fallback_target: Option<String>,
    pub base_url: Option<String>,
    pub pushover_credentials: Option<PushoverCredentials>,
    pub notify_queue_capacity: usize,
    pub notify_concurrency: usize,
    pub notify_timeout_seconds: u64,
    pub shutdown_timeout_seconds: u64,
    pub log_level: String,
    pub log_format: String,
}

/// Reads a variable, treating empty values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PT_DIR` is missing or `PUSHOVER_CREDENTIALS`
    /// is malformed.
    pub fn from_env() -> Result<Self> {
        let root_dir = non_empty_var("PT_DIR")
            .map(PathBuf::from)
            .context("PT_DIR is not set")?;

        let explicit_notify_dir = non_empty_var("PT_NOTIFY_DIR").map(PathBuf::from);
        let notify_dir_explicit = explicit_notify_dir.is_some();
        let notify_dir = explicit_notify_dir.or_else(|| Self::detect_notify_dir(&root_dir));

        let pushover_credentials = non_empty_var("PUSHOVER_CREDENTIALS")
            .map(|v| v.parse::<PushoverCredentials>())
            .transpose()
            .context("PUSHOVER_CREDENTIALS invalid")?;

        let listen_addr = non_empty_var("PT_ADDR")
            .map(|a| normalize_listen_addr(&a))
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let notify_queue_capacity = env::var("NOTIFY_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let notify_concurrency = env::var("NOTIFY_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let notify_timeout_seconds = env::var("NOTIFY_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let shutdown_timeout_seconds = env::var("SHUTDOWN_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        Ok(Self {
            root_dir,
            notify_dir,
            notify_dir_explicit,
            auth_key: env::var("PT_AUTH").ok().filter(|v| !v.is_empty()),
            listen_addr,
            fallback_target: non_empty_var("PT_FALLBACK").map(|v| v.trim().to_string()),
            base_url: non_empty_var("PT_BASE_URL"),
            pushover_credentials,
            notify_queue_capacity,
            notify_concurrency,
            notify_timeout_seconds,
            shutdown_timeout_seconds,
            log_level,
            log_format,
        })
    }

    /// Returns `<root>/.notify` if it exists and is a directory.
    fn detect_notify_dir(root_dir: &Path) -> Option<PathBuf> {
        let candidate = root_dir.join(SpecialCode::DefaultNotifyDir.as_str());
        candidate.is_dir().then_some(candidate)
    }

    /// Replaces the listen address, e.g. with a command-line argument.
    pub fn with_listen_addr(mut self, addr: Option<String>) -> Self {
        if let Some(addr) = addr.filter(|a| !a.is_empty()) {
            self.listen_addr = normalize_listen_addr(&addr);
        }
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `root_dir` or `notify_dir` is not an existing directory
    /// - `listen_addr` is not a socket address
    /// - `base_url` is not an absolute URL
    /// - a numeric setting is out of range
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        let meta = std::fs::metadata(&self.root_dir)
            .with_context(|| format!("failed to stat root dir {}", self.root_dir.display()))?;
        if !meta.is_dir() {
            anyhow::bail!("{} is not a directory", self.root_dir.display());
        }

        if let Some(ref notify_dir) = self.notify_dir {
            let meta = std::fs::metadata(notify_dir)
                .with_context(|| format!("PT_NOTIFY_DIR invalid: {}", notify_dir.display()))?;
            if !meta.is_dir() {
                anyhow::bail!("PT_NOTIFY_DIR invalid: not a directory");
            }
        }

        self.socket_addr()?;

        if let Some(ref base_url) = self.base_url {
            url::Url::parse(base_url)
                .with_context(|| format!("PT_BASE_URL must be an absolute URL, got '{base_url}'"))?;
        }

        if self.notify_queue_capacity == 0 || self.notify_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "NOTIFY_QUEUE_CAPACITY must be between 1 and 1000000, got {}",
                self.notify_queue_capacity
            );
        }

        if self.notify_concurrency == 0 || self.notify_concurrency > 256 {
            anyhow::bail!(
                "NOTIFY_CONCURRENCY must be between 1 and 256, got {}",
                self.notify_concurrency
            );
        }

        if self.notify_timeout_seconds == 0 {
            anyhow::bail!("NOTIFY_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.shutdown_timeout_seconds == 0 {
            anyhow::bail!("SHUTDOWN_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Parses the listen address.
    ///
    /// # Errors
    ///
    /// Returns an error if `listen_addr` is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("PT_ADDR must be in format 'host:port', got '{}'", self.listen_addr))
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_seconds)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Root dir: {}", self.root_dir.display());

        match &self.notify_dir {
            Some(dir) if self.notify_dir_explicit => {
                tracing::info!("  Notify dir: {}", dir.display())
            }
            Some(dir) => tracing::info!("  Notify dir: {} (auto-detected)", dir.display()),
            None => tracing::info!("  Notify dir: disabled"),
        }

        match &self.pushover_credentials {
            Some(creds) => tracing::info!("  Pushover: user {} (token ***)", creds.user),
            None => tracing::info!("  Pushover: not configured"),
        }

        tracing::info!(
            "  Auth: {}",
            if self.auth_key.is_some() {
                "set"
            } else {
                "unset (listing and creation disabled)"
            }
        );

        if let Some(ref fallback) = self.fallback_target {
            tracing::info!("  Fallback override: {}", fallback);
        }
        if let Some(ref base_url) = self.base_url {
            tracing::info!("  Base URL: {}", base_url);
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Notify queue capacity: {}", self.notify_queue_capacity);
    }
}

/// Turns a Go-style `:port` into `0.0.0.0:port`.
fn normalize_listen_addr(addr: &str) -> String {
    let addr = addr.trim();
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "PT_DIR",
        "PT_NOTIFY_DIR",
        "PT_AUTH",
        "PT_ADDR",
        "PT_FALLBACK",
        "PT_BASE_URL",
        "PUSHOVER_CREDENTIALS",
        "NOTIFY_QUEUE_CAPACITY",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment run serially via #[serial]
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn test_config(root: &Path) -> Config {
        Config {
            root_dir: root.to_path_buf(),
            notify_dir: None,
            notify_dir_explicit: false,
            auth_key: Some("s3cret".to_string()),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            fallback_target: None,
            base_url: None,
            pushover_credentials: None,
            notify_queue_capacity: 1024,
            notify_concurrency: 4,
            notify_timeout_seconds: 10,
            shutdown_timeout_seconds: 15,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_normalize_listen_addr() {
        assert_eq!(normalize_listen_addr(":4600"), "0.0.0.0:4600");
        assert_eq!(normalize_listen_addr("127.0.0.1:80"), "127.0.0.1:80");
    }

    #[test]
    fn test_config_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());

        assert!(config.validate().is_ok());

        config.notify_queue_capacity = 0;
        assert!(config.validate().is_err());
        config.notify_queue_capacity = 1024;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "4600".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = DEFAULT_LISTEN_ADDR.to_string();

        config.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
        config.base_url = Some("https://s.example.com".to_string());
        assert!(config.validate().is_ok());

        config.notify_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_requires_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain-file");
        std::fs::write(&file, "x").unwrap();

        let config = test_config(&file);
        assert!(config.validate().is_err());

        let mut config = test_config(dir.path());
        config.notify_dir = Some(dir.path().join("missing"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_listen_addr_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path()).with_listen_addr(Some(":8080".to_string()));
        assert_eq!(config.listen_addr, "0.0.0.0:8080");

        let config = config.with_listen_addr(None);
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_from_env_requires_root_dir() {
        clear_env();
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("PT_DIR", dir.path());
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.root_dir, dir.path());
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert!(config.auth_key.is_none());
        assert!(config.notify_dir.is_none());
        assert!(config.pushover_credentials.is_none());
        assert_eq!(config.notify_queue_capacity, 1024);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_detects_default_notify_dir() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".notify")).unwrap();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PT_DIR", dir.path());
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.notify_dir, Some(dir.path().join(".notify")));
        assert!(!config.notify_dir_explicit);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_explicit_notify_dir_priority() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let explicit = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".notify")).unwrap();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PT_DIR", dir.path());
            env::set_var("PT_NOTIFY_DIR", explicit.path());
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.notify_dir.as_deref(), Some(explicit.path()));
        assert!(config.notify_dir_explicit);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_parses_credentials_and_options() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PT_DIR", dir.path());
            env::set_var("PT_AUTH", "s3cret");
            env::set_var("PT_ADDR", ":9000");
            env::set_var("PT_FALLBACK", " https://fallback.example/ ");
            env::set_var("PUSHOVER_CREDENTIALS", "user:token");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.auth_key.as_deref(), Some("s3cret"));
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(
            config.fallback_target.as_deref(),
            Some("https://fallback.example/")
        );
        let creds = config.pushover_credentials.unwrap();
        assert_eq!(creds.user, "user");
        assert_eq!(creds.token, "token");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_credentials() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PT_DIR", dir.path());
            env::set_var("PUSHOVER_CREDENTIALS", "no-colon-here");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
