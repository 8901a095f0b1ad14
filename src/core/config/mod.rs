//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gitlink has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GITLINK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitlink/config.toml`
//! 3. `~/.gitlink/config.toml`
//!
//! # Repo Config Location
//!
//! `<git-dir>/gitlink/config.toml`, where `<git-dir>` is the repository's
//! `.git` directory (or the repository itself when bare).
//!
//! The `[link]` section of git's own configuration is never read.
//!
//! # Example
//!
//! ```no_run
//! use gitlink::core::config::Config;
//! use gitlink::resolve::Resolver;
//! use gitlink::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let config = Config::load(Some(git.git_dir())).unwrap().config;
//!
//! let resolver = Resolver::with_options(&git, config.resolver_options());
//! println!("{:?}", resolver.classify("HEAD~2").unwrap());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::resolve::{RemotePolicy, ResolverOptions, DEFAULT_COMMITISH};

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
}

/// Merged configuration from all sources.
///
/// This struct provides accessor methods that apply precedence rules
/// automatically. Repo config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(git_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::global_config_candidates()
            .into_iter()
            .find(|path| path.exists());
        Self::load_from(global_path.as_deref(), git_dir)
    }

    /// Load configuration from an explicit global file and git directory.
    ///
    /// A `global_path` that does not exist is treated as absent.
    pub fn load_from(
        global_path: Option<&Path>,
        git_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = global_path.filter(|p| p.exists()).map(Path::to_path_buf);
        let global = match &global_path {
            Some(path) => Self::read_config::<GlobalConfig>(path)?,
            None => GlobalConfig::default(),
        };

        let repo_path = git_dir
            .map(Self::repo_config_path)
            .filter(|p| p.exists());
        let repo = match &repo_path {
            Some(path) => Some(Self::read_config::<RepoConfig>(path)?),
            None => None,
        };

        // Validate loaded configs
        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        log::debug!(
            "config: global={:?} repo={:?}",
            global_path.as_deref(),
            repo_path.as_deref()
        );

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
        })
    }

    /// Global config locations, in search order.
    fn global_config_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // 1. $GITLINK_CONFIG
        if let Ok(path) = std::env::var("GITLINK_CONFIG") {
            candidates.push(PathBuf::from(path));
        }

        // 2. $XDG_CONFIG_HOME/gitlink/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("gitlink/config.toml"));
        }

        // 3. ~/.gitlink/config.toml
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".gitlink/config.toml"));
        }

        candidates
    }

    /// Read and parse a config file.
    fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path for repo config.
    ///
    /// Returns `gitlink/config.toml` inside the given git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("gitlink/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the default commit-ish.
    ///
    /// Defaults to `HEAD` if not configured.
    pub fn default_commitish(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.default_commitish.as_deref())
            .or(self.global.default_commitish.as_deref())
            .unwrap_or(DEFAULT_COMMITISH)
    }

    /// Get the preferred remotes.
    ///
    /// Empty if not configured.
    pub fn preferred_remotes(&self) -> &[String] {
        self.repo
            .as_ref()
            .and_then(|r| r.preferred_remotes.as_deref())
            .or(self.global.preferred_remotes.as_deref())
            .unwrap_or(&[])
    }

    /// Check if JSON output is the default.
    ///
    /// Defaults to `false` if not configured.
    pub fn json(&self) -> bool {
        self.global.json.unwrap_or(false)
    }

    /// Resolver options with precedence applied.
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            default_commitish: self.default_commitish().to_string(),
            remote_policy: RemotePolicy::new(self.preferred_remotes().to_vec()),
        }
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
