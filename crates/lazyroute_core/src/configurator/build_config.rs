//! Serializable build configuration.
//!
//! # Invariants
//! - `to_json` followed by `from_json` reproduces the same value.
//! - `from_json` never yields a config that references unknown artifacts
//!   or omits a required one.

use crate::configurator::artifacts::{ArtifactTable, NativePlatform, NATIVE_ALL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-selected download configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub version: String,
    pub artifacts: BTreeSet<String>,
    pub natives: BTreeSet<NativePlatform>,
    #[serde(default)]
    pub source: bool,
    #[serde(default)]
    pub javadoc: bool,
}

impl BuildConfig {
    /// Required artifacts only, every native platform.
    pub fn default_for(table: &ArtifactTable) -> Self {
        Self {
            version: table.version().to_string(),
            artifacts: table
                .required()
                .map(|artifact| artifact.id.to_string())
                .collect(),
            natives: NATIVE_ALL.iter().copied().collect(),
            source: false,
            javadoc: false,
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigImportError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ConfigImportError::InvalidJson(err.to_string()))
    }

    /// Parses `raw` and validates it against `table`.
    pub fn from_json(raw: &str, table: &ArtifactTable) -> Result<Self, ConfigImportError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ConfigImportError::InvalidJson(err.to_string()))?;
        config.validate(table)?;
        Ok(config)
    }

    pub fn validate(&self, table: &ArtifactTable) -> Result<(), ConfigImportError> {
        if self.version != table.version() {
            return Err(ConfigImportError::VersionMismatch {
                expected: table.version().to_string(),
                found: self.version.clone(),
            });
        }
        if let Some(unknown) = self.artifacts.iter().find(|id| table.get(id).is_none()) {
            return Err(ConfigImportError::UnknownArtifact(unknown.clone()));
        }
        if let Some(missing) = table
            .required()
            .find(|artifact| !self.artifacts.contains(artifact.id))
        {
            return Err(ConfigImportError::MissingRequired(missing.id.to_string()));
        }
        Ok(())
    }
}

/// Configuration import failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigImportError {
    /// Exactly one file must be picked.
    FileCount(usize),
    InvalidJson(String),
    VersionMismatch { expected: String, found: String },
    UnknownArtifact(String),
    MissingRequired(String),
}

impl Display for ConfigImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileCount(count) => write!(f, "expected exactly one file, got {count}"),
            Self::InvalidJson(reason) => write!(f, "configuration is not valid JSON: {reason}"),
            Self::VersionMismatch { expected, found } => {
                write!(f, "configuration targets version {found}, expected {expected}")
            }
            Self::UnknownArtifact(id) => {
                write!(f, "configuration references unknown artifact: {id}")
            }
            Self::MissingRequired(id) => {
                write!(f, "configuration omits required artifact: {id}")
            }
        }
    }
}

impl Error for ConfigImportError {}

#[cfg(test)]
mod tests {
    use super::{BuildConfig, ConfigImportError};
    use crate::configurator::artifacts::lwjgl_3_0_0;

    #[test]
    fn default_config_selects_required_artifacts() {
        let table = lwjgl_3_0_0();
        let config = BuildConfig::default_for(&table);
        assert_eq!(config.version, "3.0.0");
        assert!(config.artifacts.contains("lwjgl"));
        assert_eq!(config.artifacts.len(), 1);
        assert_eq!(config.natives.len(), 3);
    }

    #[test]
    fn rejects_unknown_and_missing_artifacts() {
        let table = lwjgl_3_0_0();
        let unknown = r#"{"version":"3.0.0","artifacts":["lwjgl","lwjgl-bgfx"],"natives":[]}"#;
        assert_eq!(
            BuildConfig::from_json(unknown, &table).expect_err("unknown artifact"),
            ConfigImportError::UnknownArtifact("lwjgl-bgfx".to_string())
        );

        let missing = r#"{"version":"3.0.0","artifacts":["lwjgl-glfw"],"natives":["linux"]}"#;
        assert_eq!(
            BuildConfig::from_json(missing, &table).expect_err("missing core"),
            ConfigImportError::MissingRequired("lwjgl".to_string())
        );
    }

    #[test]
    fn rejects_other_versions() {
        let table = lwjgl_3_0_0();
        let raw = r#"{"version":"3.1.0","artifacts":["lwjgl"],"natives":[]}"#;
        let err = BuildConfig::from_json(raw, &table).expect_err("version mismatch");
        assert!(matches!(err, ConfigImportError::VersionMismatch { .. }));
    }
}
