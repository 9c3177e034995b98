//! Matcher configuration.
//!
//! The only tunable so far is which isolated-state keys count as framework
//! internals. Defaults match the usual component framework convention: the
//! `this` self-reference and anything starting with `$`.
//!
//! ```toml
//! [isolate_scope]
//! reserved_names = ["this"]
//! reserved_prefixes = ["$", "__"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// Key filtering for `to_contain_isolate_scope`.
    pub isolate_scope: IsolatePolicy,
}

impl MatcherConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this structure or
    /// fails [`validate`](Self::validate).
    ///
    /// # Example
    ///
    /// ```rust
    /// use mox_matchers::config::MatcherConfig;
    ///
    /// let config = MatcherConfig::from_toml_str(
    ///     "[isolate_scope]\nreserved_prefixes = [\"_\"]",
    /// ).unwrap();
    /// assert!(config.isolate_scope.is_reserved("_private"));
    /// assert!(config.isolate_scope.is_reserved("this"));
    /// assert!(!config.isolate_scope.is_reserved("$public"));
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading matcher configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the configuration for values that would silently misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for empty reserved names or prefixes; an empty
    /// prefix would hide every key.
    pub fn validate(&self) -> Result<()> {
        if self.isolate_scope.reserved_names.iter().any(String::is_empty) {
            return Err(Error::config("isolate_scope.reserved_names contains an empty name"));
        }
        if self.isolate_scope.reserved_prefixes.iter().any(String::is_empty) {
            return Err(Error::config(
                "isolate_scope.reserved_prefixes contains an empty prefix",
            ));
        }
        Ok(())
    }
}

/// Which isolated-state keys are framework internals and must be ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IsolatePolicy {
    /// Keys dropped when equal to one of these.
    pub reserved_names: Vec<String>,
    /// Keys dropped when starting with one of these.
    pub reserved_prefixes: Vec<String>,
}

impl Default for IsolatePolicy {
    fn default() -> Self {
        Self {
            reserved_names: vec!["this".to_string()],
            reserved_prefixes: vec!["$".to_string()],
        }
    }
}

impl IsolatePolicy {
    /// Returns true if `key` must be hidden from comparisons.
    #[must_use]
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_names.iter().any(|name| name == key)
            || self
                .reserved_prefixes
                .iter()
                .any(|prefix| key.starts_with(prefix.as_str()))
    }
}
