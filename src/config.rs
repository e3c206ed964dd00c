//! Dataset layout configuration

use crate::error::{FlowdiffError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default project directory holding both dataset trees
pub const DEFAULT_BASE_PATH: &str = "/home/tesfayh/Artificial_inteligence/ML/CICDS/ML-CICIDS-project";

/// Directory (under the base) holding the labelled flow CSVs
pub const DEFAULT_FLOW_DIR: &str = "GeneratedLabelledFlows";

/// Directory (under the base) holding the ML-ready CSVs
pub const DEFAULT_ML_DIR: &str = "MachineLearningCSV";

/// File used for the label distribution section of the comparison
pub const DEFAULT_SAMPLE_FILE: &str = "Monday-WorkingHours.pcap_ISCX.csv";

/// Label column as it appears in the CICIDS2017 headers (leading space included)
pub const DEFAULT_LABEL_COLUMN: &str = " Label";

/// The two representations of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetVariant {
    /// Full flow records including identifiers
    Flow,
    /// Identifier-stripped records for model training
    Ml,
}

impl DatasetVariant {
    pub const ALL: [DatasetVariant; 2] = [DatasetVariant::Flow, DatasetVariant::Ml];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flow => "flow",
            Self::Ml => "ml",
        }
    }

    /// Human readable name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Flow => "GeneratedLabelledFlows",
            Self::Ml => "MachineLearningCSV",
        }
    }
}

impl fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flow" => Ok(Self::Flow),
            "ml" => Ok(Self::Ml),
            _ => Err(format!("Invalid dataset variant: {}. Use 'flow' or 'ml'", s)),
        }
    }
}

/// Where the dataset lives and which sample to inspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub base_path: PathBuf,
    pub flow_dir: String,
    pub ml_dir: String,
    pub sample_file: String,
    pub label_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            flow_dir: DEFAULT_FLOW_DIR.to_string(),
            ml_dir: DEFAULT_ML_DIR.to_string(),
            sample_file: DEFAULT_SAMPLE_FILE.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }
}

impl DatasetConfig {
    /// Default layout rooted at `base_path`
    pub fn with_base(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FlowdiffError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            FlowdiffError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Directory searched for a variant before discovery
    pub fn variant_base(&self, variant: DatasetVariant) -> PathBuf {
        match variant {
            DatasetVariant::Flow => self.base_path.join(&self.flow_dir),
            DatasetVariant::Ml => self.base_path.join(&self.ml_dir),
        }
    }
}
