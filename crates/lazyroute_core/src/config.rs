//! Runtime configuration for the route-loading runtime.
//!
//! # Responsibility
//! - Carry build-profile and bootstrap settings into the runtime.
//! - Parse and validate JSON configuration payloads.
//!
//! # Invariants
//! - Missing fields fall back to defaults; unknown fields are rejected.
//! - A validated config always has a non-empty root scroll key.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default deferred analytics script.
pub const DEFAULT_ANALYTICS_SCRIPT_URL: &str = "https://www.google-analytics.com/analytics.js";

/// Build flavor the page was shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildProfile {
    Production,
    Development,
}

impl BuildProfile {
    /// `debug` builds -> development, `release` builds -> production.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub build_profile: BuildProfile,
    /// Script injected once during page bootstrap in production builds.
    pub analytics_script_url: String,
    /// Scroll key used when a location carries none.
    pub root_scroll_key: String,
    /// Optional LRU bound for the scroll table. `None` keeps every key.
    pub scroll_table_capacity: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            build_profile: BuildProfile::default(),
            analytics_script_url: DEFAULT_ANALYTICS_SCRIPT_URL.to_string(),
            root_scroll_key: crate::model::navigation::ROOT_SCROLL_KEY.to_string(),
            scroll_table_capacity: None,
        }
    }
}

impl RuntimeConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, RuntimeConfigError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| RuntimeConfigError::InvalidJson(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RuntimeConfigError> {
        if self.root_scroll_key.trim().is_empty() {
            return Err(RuntimeConfigError::EmptyRootScrollKey);
        }
        let url = self.analytics_script_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(RuntimeConfigError::InvalidScriptUrl(
                self.analytics_script_url.clone(),
            ));
        }
        if self.scroll_table_capacity == Some(0) {
            return Err(RuntimeConfigError::ZeroScrollCapacity);
        }
        Ok(())
    }
}

/// Config parse/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeConfigError {
    InvalidJson(String),
    EmptyRootScrollKey,
    InvalidScriptUrl(String),
    ZeroScrollCapacity,
}

impl Display for RuntimeConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(reason) => write!(f, "runtime config is not valid JSON: {reason}"),
            Self::EmptyRootScrollKey => write!(f, "root_scroll_key must not be empty"),
            Self::InvalidScriptUrl(value) => {
                write!(f, "analytics_script_url must be an http(s) URL: {value}")
            }
            Self::ZeroScrollCapacity => write!(
                f,
                "scroll_table_capacity must be positive; omit it for an unbounded table"
            ),
        }
    }
}

impl Error for RuntimeConfigError {}
