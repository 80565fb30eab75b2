//! Configuration loader with layered merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Config files added with [`ConfigLoader::with_file`], in call order
//! 3. The file named by `ARBITER_CONFIG`
//! 4. Environment overrides (`ARBITER_EMPTY_SLOT`)
//!
//! Each layer overrides the previous. Missing files are skipped.

use super::{ArbiterConfig, ConfigError, ENV_CONFIG_PATH, ENV_EMPTY_SLOT};
use arbiter_auth::EmptySlotPolicy;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use arbiter_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_file("/etc/arbiter/grants.toml")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), arbiter_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Config files, lowest precedence first.
    files: Vec<PathBuf>,

    /// Skip environment variable loading.
    skip_env: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a config file layer. Later files override earlier ones.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Skips environment variables (including `ARBITER_CONFIG`).
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read
    /// or parsed, or if an environment override is invalid.
    pub fn load(&self) -> Result<ArbiterConfig, ConfigError> {
        if self.skip_env {
            self.load_with_env(|_| None)
        } else {
            self.load_with_env(|name| std::env::var(name).ok())
        }
    }

    fn load_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ArbiterConfig, ConfigError> {
        let mut config = ArbiterConfig::default();

        let env_file = env(ENV_CONFIG_PATH).map(PathBuf::from);
        for path in self.files.iter().chain(env_file.as_ref()) {
            if let Some(layer) = load_file(path)? {
                debug!(path = %path.display(), users = layer.users.len(), "Loaded config layer");
                config.merge(&layer);
            }
        }

        if let Some(value) = env(ENV_EMPTY_SLOT) {
            let policy = parse_empty_slot(&value).ok_or_else(|| {
                ConfigError::invalid_env_var(ENV_EMPTY_SLOT, "expected deny or unrestricted")
            })?;
            config.empty_slot = Some(policy);
            debug!(empty_slot = ?config.empty_slot, "Applied environment override");
        }

        Ok(config)
    }
}

/// Loads a config file, returning None if it doesn't exist.
fn load_file(path: &Path) -> Result<Option<ArbiterConfig>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, skipping");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config =
        ArbiterConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

    Ok(Some(config))
}

/// Parses an empty-slot policy (case-insensitive).
fn parse_empty_slot(s: &str) -> Option<EmptySlotPolicy> {
    match s.trim().to_lowercase().as_str() {
        "deny" | "deny_all" | "deny-all" => Some(EmptySlotPolicy::Deny),
        "unrestricted" | "allow" | "superuser" => Some(EmptySlotPolicy::Unrestricted),
        _ => None,
    }
}
