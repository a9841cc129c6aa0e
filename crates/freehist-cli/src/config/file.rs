use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileAxisConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub width: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileHistogramConfig {
    pub temperature: Option<f64>,
    pub strict_out_of_range: Option<bool>,
    pub output_prefix: Option<String>,
}

/// Contents of a TOML configuration file. Every key is optional.
///
/// ```toml
/// [histogram]
/// temperature = 310.0
/// strict-out-of-range = true
/// output-prefix = "phi"
///
/// [x]
/// min = -180.0
/// max = 180.0
/// width = 5.0
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub histogram: Option<FileHistogramConfig>,
    pub x: Option<FileAxisConfig>,
    pub y: Option<FileAxisConfig>,
    pub z: Option<FileAxisConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Axis tables in `x`, `y`, `z` order.
    pub fn axis(&self, axis: usize) -> Option<&FileAxisConfig> {
        match axis {
            0 => self.x.as_ref(),
            1 => self.y.as_ref(),
            2 => self.z.as_ref(),
            _ => None,
        }
    }
}
