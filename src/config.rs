//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! The resulting [`Config`] is passed explicitly to the components that need it.
//!
//! ## Storage location
//!
//! ```bash
//! # Default: ~/.GRY
//! export GRY_FOLDER=".GRY"
//!
//! # Or an absolute path, which takes priority
//! export GRY_STORAGE_PATH="/var/lib/gry"
//! ```
//!
//! ## Optional Variables
//!
//! - `GRY_PORT` - Listen port (default: `3000`)
//! - `LISTEN` - Full bind address, overrides `GRY_PORT`
//! - `GRY_STORAGE` - Storage backend: `fs` or `memory` (default: `fs`)
//! - `GRY_TOTP_SECRET` - Base32 TOTP secret for write access (generated if unset)
//! - `GRY_REQUIRE_TOTP_SECRET` - Refuse to start without `GRY_TOTP_SECRET` (default: `false`)
//! - `GRY_HOME_URL` - Redirect target for `/` (default: `https://ctrlalt.dev/GRY/`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::infrastructure::auth::{TotpAuthorizer, generate_secret};
use crate::utils::url_validator::validate_url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FOLDER: &str = ".GRY";
const DEFAULT_HOME_URL: &str = "https://ctrlalt.dev/GRY/";

/// Where redirect entries are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One file per slug below [`Config::storage_path`].
    Filesystem,
    /// In-process map; entries are lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fs" | "filesystem" => Ok(Self::Filesystem),
            "memory" | "mem" => Ok(Self::Memory),
            other => anyhow::bail!("GRY_STORAGE must be 'fs' or 'memory', got '{}'", other),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_backend: StorageBackend,
    /// Root directory of the filesystem store.
    pub storage_path: PathBuf,
    /// True when the home directory was unknown and `storage_path` is
    /// relative to the working directory.
    pub storage_path_fallback: bool,
    /// Base32 TOTP secret guarding create, update and delete.
    pub totp_secret: String,
    /// True when no secret was configured and one was generated for this run only.
    pub totp_secret_generated: bool,
    pub home_url: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `GRY_PORT` or `GRY_STORAGE` cannot be parsed, or if
    /// `GRY_REQUIRE_TOTP_SECRET` is set and no secret is configured.
    pub fn from_env() -> Result<Self> {
        let listen_addr = Self::load_listen_addr()?;

        let storage_backend = env::var("GRY_STORAGE")
            .ok()
            .map(|v| v.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(StorageBackend::Filesystem);

        let (storage_path, storage_path_fallback) = Self::load_storage_path();

        let require_totp_secret = env::var("GRY_REQUIRE_TOTP_SECRET")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let (totp_secret, totp_secret_generated) = match env::var("GRY_TOTP_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => (secret, false),
            _ if require_totp_secret => {
                anyhow::bail!("GRY_TOTP_SECRET must be set when GRY_REQUIRE_TOTP_SECRET is enabled")
            }
            _ => (generate_secret(), true),
        };

        let home_url = env::var("GRY_HOME_URL").unwrap_or_else(|_| DEFAULT_HOME_URL.to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            storage_backend,
            storage_path,
            storage_path_fallback,
            totp_secret,
            totp_secret_generated,
            home_url,
            log_level,
            log_format,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:` followed by `GRY_PORT` (default `3000`)
    fn load_listen_addr() -> Result<String> {
        if let Ok(listen) = env::var("LISTEN") {
            return Ok(listen);
        }

        let port = match env::var("GRY_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("GRY_PORT must be a port number, got '{}'", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(format!("0.0.0.0:{}", port))
    }

    /// Resolves the storage root.
    ///
    /// Priority:
    /// 1. `GRY_STORAGE_PATH` environment variable
    /// 2. `GRY_FOLDER` (default `.GRY`) below the user's home directory
    ///
    /// If the home directory cannot be determined the folder is used relative
    /// to the working directory, and the returned flag is set so
    /// [`Config::print_summary`] can warn about it.
    fn load_storage_path() -> (PathBuf, bool) {
        if let Ok(path) = env::var("GRY_STORAGE_PATH")
            && !path.is_empty()
        {
            return (PathBuf::from(path), false);
        }

        let folder = env::var("GRY_FOLDER").unwrap_or_else(|_| DEFAULT_FOLDER.to_string());

        match env::home_dir() {
            Some(home) => (home.join(folder), false),
            None => (PathBuf::from(folder), true),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `home_url` is not an absolute URL with a host
    /// - `totp_secret` is not valid base32
    /// - `storage_path` is empty while the filesystem backend is selected
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        validate_url(&self.home_url)
            .with_context(|| format!("GRY_HOME_URL is not a valid URL: '{}'", self.home_url))?;

        TotpAuthorizer::from_base32(&self.totp_secret).context("GRY_TOTP_SECRET is invalid")?;

        if self.storage_backend == StorageBackend::Filesystem
            && self.storage_path.as_os_str().is_empty()
        {
            anyhow::bail!("Storage path must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary (without the secret, unless it was generated).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        match self.storage_backend {
            StorageBackend::Filesystem => {
                tracing::info!("  Storage: {} (filesystem)", self.storage_path.display())
            }
            StorageBackend::Memory => tracing::info!("  Storage: in-memory (not persisted)"),
        }
        if self.storage_backend == StorageBackend::Filesystem && self.storage_path_fallback {
            tracing::warn!(
                "Could not determine home directory, storing redirects relative to the working directory"
            );
        }
        tracing::info!("  Home URL: {}", self.home_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if self.totp_secret_generated {
            tracing::warn!("No GRY_TOTP_SECRET provided, generated one");
            tracing::warn!("GRY_TOTP_SECRET: {}", self.totp_secret);
            tracing::warn!(
                "GRY_TOTP_SECRET won't persist, securely save it and define GRY_TOTP_SECRET"
            );
            tracing::warn!(
                "In production, define your own GRY_TOTP_SECRET (set GRY_REQUIRE_TOTP_SECRET=true to enforce it)"
            );
        }
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables cannot be parsed or validation fails.
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
