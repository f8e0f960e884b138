//! Application configuration from command-line flags and environment variables.
//!
//! Every setting has a flag, an environment variable and a default. A
//! non-empty environment variable wins over the flag, and the flag wins over
//! the default.
//!
//! | Flag                  | Environment         | Default                 |
//! |-----------------------|---------------------|-------------------------|
//! | `-a`                  | `SERVER_ADDRESS`    | `localhost:8080`        |
//! | `-b`                  | `BASE_URL`          | `http://localhost:8080` |
//! | `-f`                  | `FILE_STORAGE_PATH` | empty (in-memory)       |
//! | `--recovery-mode`     | `RECOVERY_MODE`     | `truncate`              |
//! | `--log-level`         | `RUST_LOG`          | `info`                  |
//! | `--log-format`        | `LOG_FORMAT`        | `text`                  |
//!
//! ```bash
//! export BASE_URL="https://s.example.com"
//! export FILE_STORAGE_PATH="/var/lib/shortener/links.json"
//! hash-shortener -a 0.0.0.0:8080
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

use crate::infrastructure::persistence::RecoveryMode;

pub const DEFAULT_LISTEN_ADDR: &str = "localhost:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Command-line flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "hash-shortener")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address and port to run the server on
    #[arg(short = 'a', long = "address", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Base URL prepended to generated short keys
    #[arg(short = 'b', long = "base-url", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path of the append-only storage file; empty keeps links in memory
    #[arg(short = 'f', long = "file-storage-path", default_value = "")]
    pub file_storage_path: String,

    /// What to do with a corrupt storage record at startup: truncate or fail
    #[arg(long = "recovery-mode", default_value = "truncate")]
    pub recovery_mode: String,

    /// Log filter directive
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    /// Log format: text or json
    #[arg(long = "log-format", default_value = "text")]
    pub log_format: String,
}

impl Default for Args {
    fn default() -> Self {
        Self::parse_from(["hash-shortener"])
    }
}

/// Effective service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    /// `None` selects the in-memory backend.
    pub file_storage_path: Option<PathBuf>,
    pub recovery_mode: RecoveryMode,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Resolves the configuration, letting environment variables override `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if the recovery mode is not `truncate` or `fail`.
    pub fn from_args(args: Args) -> Result<Self> {
        let listen_addr = env_or("SERVER_ADDRESS", args.listen_addr);
        let base_url = env_or("BASE_URL", args.base_url)
            .trim_end_matches('/')
            .to_string();

        let file_storage_path = Some(env_or("FILE_STORAGE_PATH", args.file_storage_path))
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let recovery_mode = env_or("RECOVERY_MODE", args.recovery_mode)
            .parse::<RecoveryMode>()
            .map_err(anyhow::Error::msg)
            .context("Invalid recovery mode")?;

        let log_level = env_or("RUST_LOG", args.log_level);
        let log_format = env_or("LOG_FORMAT", args.log_format);

        Ok(Self {
            listen_addr,
            base_url,
            file_storage_path,
            recovery_mode,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an absolute `http`/`https` URL
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "SERVER_ADDRESS must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Returns whether links are persisted to a file.
    pub fn is_file_storage(&self) -> bool {
        self.file_storage_path.is_some()
    }

    /// Logs the effective configuration.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);

        let storage = match &self.file_storage_path {
            Some(path) => format!("file {}", path.display()),
            None => "memory".to_string(),
        };
        tracing::info!("  Storage: {}", storage);
        if self.is_file_storage() {
            tracing::info!("  Recovery mode: {}", self.recovery_mode);
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Returns the environment variable if set and non-empty, `fallback` otherwise.
fn env_or(name: &str, fallback: String) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}

/// Resolves and validates configuration.
///
/// # Errors
///
/// Returns an error if a value cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects `.env` to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load(args: Args) -> Result<Config> {
    let config = Config::from_args(args)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "SERVER_ADDRESS",
        "BASE_URL",
        "FILE_STORAGE_PATH",
        "RECOVERY_MODE",
        "RUST_LOG",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            listen_addr: "localhost:8080".to_string(),
            base_url: "http://localhost:8080".to_string(),
            file_storage_path: None,
            recovery_mode: RecoveryMode::Truncate,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::from_args(Args::default()).unwrap();

        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.file_storage_path.is_none());
        assert!(!config.is_file_storage());
        assert_eq!(config.recovery_mode, RecoveryMode::Truncate);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_flags_override_defaults() {
        clear_env();

        let args = Args::parse_from([
            "hash-shortener",
            "-a",
            "0.0.0.0:9090",
            "-b",
            "https://s.example.com/",
            "-f",
            "/tmp/links.json",
            "--recovery-mode",
            "fail",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:9090");
        assert_eq!(config.base_url, "https://s.example.com");
        assert_eq!(
            config.file_storage_path,
            Some(PathBuf::from("/tmp/links.json"))
        );
        assert_eq!(config.recovery_mode, RecoveryMode::Fail);
    }

    #[test]
    #[serial]
    fn test_env_overrides_flags() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SERVER_ADDRESS", "127.0.0.1:7000");
            env::set_var("BASE_URL", "https://from-env.example");
            env::set_var("FILE_STORAGE_PATH", "/data/from-env.json");
        }

        let args = Args::parse_from([
            "hash-shortener",
            "-a",
            "0.0.0.0:9090",
            "-b",
            "https://from-flag.example",
            "-f",
            "/tmp/from-flag.json",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:7000");
        assert_eq!(config.base_url, "https://from-env.example");
        assert_eq!(
            config.file_storage_path,
            Some(PathBuf::from("/data/from-env.json"))
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_env_falls_back_to_flag() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BASE_URL", "");
        }

        let args = Args::parse_from(["hash-shortener", "-b", "https://from-flag.example"]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.base_url, "https://from-flag.example");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_recovery_mode() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("RECOVERY_MODE", "ignore");
        }

        assert!(Config::from_args(Args::default()).is_err());

        clear_env();
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "localhost:8080".to_string();

        config.base_url = "localhost:8080".to_string();
        assert!(config.validate().is_err());
        config.base_url = "https://s.example.com".to_string();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());
    }
}
