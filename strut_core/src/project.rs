//! # Saved Column Configurations
//!
//! A `ColumnConfig` is the document a user saves and reopens: the member
//! being analyzed plus display preferences and where to look for the load
//! model. Configurations serialize to `.strut.json` files as human-readable
//! JSON.
//!
//! ## Structure
//!
//! ```text
//! ColumnConfig
//! ├── meta: ConfigMetadata (version, id, label, timestamps)
//! ├── settings: DisplaySettings (units, decimals, model search)
//! └── parameters: InputParameters (the member)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use strut_core::project::ColumnConfig;
//!
//! let config = ColumnConfig::new("Pilar P-3");
//! let json = serde_json::to_string_pretty(&config).unwrap();
//! assert!(json.contains("Pilar P-3"));
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::prediction::{InputParameters, PredictionResult};
use crate::model::{ArtifactLocator, DEFAULT_ARTIFACT_PREFIX, DEFAULT_ARTIFACT_SUFFIX};
use crate::units::{ForceUnit, LengthUnit};

/// Current schema version for configuration files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub meta: ConfigMetadata,
    #[serde(default)]
    pub settings: DisplaySettings,
    pub parameters: InputParameters,
}

impl ColumnConfig {
    /// New configuration with default parameters (IPE 200, S275, 3 m, pinned).
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_parameters(label, InputParameters::default())
    }

    pub fn with_parameters(label: impl Into<String>, parameters: InputParameters) -> Self {
        let now = Utc::now();
        ColumnConfig {
            meta: ConfigMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                label: label.into(),
                created: now,
                modified: now,
            },
            settings: DisplaySettings::default(),
            parameters,
        }
    }

    /// Replace the member parameters and bump the modified timestamp.
    pub fn set_parameters(&mut self, parameters: InputParameters) {
        self.parameters = parameters;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Format a result's maximum load in the configured unit
    pub fn format_max_load(&self, result: &PredictionResult) -> String {
        let unit = self.settings.force_unit;
        unit.format(result.max_load(unit), self.settings.decimals)
    }

    /// Format a length given in mm in the configured unit
    pub fn format_length(&self, value_mm: f64) -> String {
        let unit = self.settings.length_unit;
        unit.format(LengthUnit::Millimeter.convert(value_mm, unit), self.settings.decimals)
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig::new("")
    }
}

/// Metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub id: Uuid,

    /// User label for the member (e.g., "Pilar P-3")
    pub label: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Display and model-search preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub force_unit: ForceUnit,
    pub length_unit: LengthUnit,
    /// Decimal places in formatted output
    pub decimals: usize,
    /// Directories searched for a model artifact, in order
    pub model_dirs: Vec<PathBuf>,
    pub artifact_prefix: String,
    pub artifact_suffix: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            force_unit: ForceUnit::Kilonewton,
            length_unit: LengthUnit::Millimeter,
            decimals: 2,
            model_dirs: Vec::new(),
            artifact_prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
            artifact_suffix: DEFAULT_ARTIFACT_SUFFIX.to_string(),
        }
    }
}

impl DisplaySettings {
    /// Artifact locator for the configured search directories
    pub fn locator(&self) -> ArtifactLocator {
        self.model_dirs
            .iter()
            .fold(ArtifactLocator::new(&self.artifact_prefix, &self.artifact_suffix), |locator, dir| {
                locator.with_dir(dir)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::prediction::predict;
    use crate::calculations::section::ProfileFamily;
    use crate::model::ReferencePredictor;

    #[test]
    fn test_config_creation() {
        let config = ColumnConfig::new("P-1");
        assert_eq!(config.meta.label, "P-1");
        assert_eq!(config.meta.version, SCHEMA_VERSION);
        assert_eq!(config.meta.created, config.meta.modified);
        assert_eq!(config.parameters.profile_family, ProfileFamily::Ipe);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ColumnConfig::new("a").meta.id, ColumnConfig::new("a").meta.id);
    }

    #[test]
    fn test_config_serialization() {
        let config = ColumnConfig::new("Pilar P-3");
        let json = serde_json::to_string_pretty(&config).unwrap();

        assert!(json.contains("\"profile_family\": \"IPE\""));
        assert!(json.contains("\"force_unit\": \"kN\""));

        let roundtrip: ColumnConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, config);
    }

    #[test]
    fn test_settings_default_when_absent() {
        let mut value = serde_json::to_value(ColumnConfig::new("x")).unwrap();
        value.as_object_mut().unwrap().remove("settings");
        let config: ColumnConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config.settings, DisplaySettings::default());
    }

    #[test]
    fn test_set_parameters_touches() {
        let mut config = ColumnConfig::new("x");
        let before = config.meta.modified;
        let mut params = config.parameters.clone();
        params.length_mm = 4500.0;
        config.set_parameters(params);
        assert_eq!(config.parameters.length_mm, 4500.0);
        assert!(config.meta.modified >= before);
    }

    #[test]
    fn test_locator_from_settings() {
        let mut settings = DisplaySettings::default();
        settings.model_dirs = vec![PathBuf::from("models"), PathBuf::from("/opt/strut")];
        let locator = settings.locator();
        assert_eq!(locator.prefix, DEFAULT_ARTIFACT_PREFIX);
        assert_eq!(locator.search_dirs, settings.model_dirs);
    }

    #[test]
    fn test_formatting_uses_settings() {
        let mut config = ColumnConfig::new("x");
        config.settings.length_unit = LengthUnit::Meter;
        config.settings.decimals = 1;
        assert_eq!(config.format_length(3000.0), "3.0 m");

        let result = predict(&config.parameters, Some(&ReferencePredictor::new())).unwrap();
        config.settings.force_unit = ForceUnit::Kilonewton;
        assert!(config.format_max_load(&result).ends_with(" kN"));
    }
}
