//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GITLINK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitlink/config.toml`
//! 3. `~/.gitlink/config.toml`
//!
//! # Repo Config
//!
//! Located at `<git-dir>/gitlink/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing; a commit-ish containing `:`
//! would be reparsed as a path expression, so it is rejected up front.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_commitish = "HEAD"
/// preferred_remotes = ["upstream", "origin"]
/// json = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Commit-ish for working-tree paths and `:<path>` arguments
    pub default_commitish: Option<String>,

    /// Remotes tried first when stripping remote prefixes
    pub preferred_remotes: Option<Vec<String>>,

    /// Print JSON instead of text by default
    pub json: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_shared(
            self.default_commitish.as_deref(),
            self.preferred_remotes.as_deref(),
        )
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// default_commitish = "main"
/// preferred_remotes = ["upstream"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Commit-ish for working-tree paths and `:<path>` arguments
    pub default_commitish: Option<String>,

    /// Remotes tried first when stripping remote prefixes
    pub preferred_remotes: Option<Vec<String>>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_shared(
            self.default_commitish.as_deref(),
            self.preferred_remotes.as_deref(),
        )
    }
}

fn validate_shared(
    default_commitish: Option<&str>,
    preferred_remotes: Option<&[String]>,
) -> Result<(), ConfigError> {
    if let Some(commitish) = default_commitish {
        if commitish.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "default_commitish cannot be empty".to_string(),
            ));
        }
        if commitish.contains(':') {
            return Err(ConfigError::InvalidValue(format!(
                "default_commitish '{commitish}' cannot contain ':'"
            )));
        }
    }

    if let Some(remotes) = preferred_remotes {
        if remotes.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "preferred_remotes cannot contain an empty name".to_string(),
            ));
        }
    }

    Ok(())
}
