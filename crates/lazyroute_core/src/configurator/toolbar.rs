//! Load/save toolbar for build configurations.
//!
//! # Invariants
//! - A rejected import leaves the current configuration untouched and
//!   keeps the file picker open.
//! - Every rejection is reported to the user through `Alerter`.

use crate::configurator::artifacts::ArtifactTable;
use crate::configurator::build_config::{BuildConfig, ConfigImportError};
use log::{info, warn};
use std::path::Path;
use std::rc::Rc;

pub const ALERT_SELECT_ONE_FILE: &str = "Please select a configuration JSON file.";
pub const ALERT_INVALID_CONFIG: &str = "File does not contain a valid LWJGL configuration.";

/// User-visible alert sink.
pub trait Alerter {
    fn alert(&self, message: &str);
}

/// A file picked through the load dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub contents: String,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            contents: std::fs::read_to_string(path)?,
        })
    }
}

/// Toolbar state: current config plus the file picker toggle.
pub struct BuildToolbar {
    table: ArtifactTable,
    config: BuildConfig,
    file_ui: bool,
    alerter: Rc<dyn Alerter>,
}

impl BuildToolbar {
    pub fn new(table: ArtifactTable, alerter: Rc<dyn Alerter>) -> Self {
        let config = BuildConfig::default_for(&table);
        Self {
            table,
            config,
            file_ui: false,
            alerter,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn table(&self) -> &ArtifactTable {
        &self.table
    }

    /// Edits the configuration in place.
    pub fn update(&mut self, edit: impl FnOnce(&mut BuildConfig)) {
        edit(&mut self.config);
    }

    pub fn is_file_ui_open(&self) -> bool {
        self.file_ui
    }

    pub fn toggle_file_ui(&mut self) {
        self.file_ui = !self.file_ui;
    }

    /// Serializes the current configuration for download.
    pub fn save(&self) -> Result<String, ConfigImportError> {
        self.config.to_json()
    }

    /// Imports the picked file.
    ///
    /// # Errors
    /// - `FileCount` unless exactly one file is given.
    /// - Parse or validation errors from `BuildConfig::from_json`.
    pub fn handle_files(&mut self, files: &[SelectedFile]) -> Result<(), ConfigImportError> {
        let [file] = files else {
            self.alerter.alert(ALERT_SELECT_ONE_FILE);
            return Err(ConfigImportError::FileCount(files.len()));
        };

        match BuildConfig::from_json(&file.contents, &self.table) {
            Ok(config) => {
                info!(
                    "event=config_load module=configurator status=ok file={} artifacts={}",
                    file.name,
                    config.artifacts.len()
                );
                self.config = config;
                self.file_ui = false;
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=config_load module=configurator status=error file={} error={}",
                    file.name, err
                );
                self.alerter.alert(ALERT_INVALID_CONFIG);
                Err(err)
            }
        }
    }
}
