#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::batch_pipeline::DEFAULT_OUTPUT_FILENAME;
use crate::core::online::{validate_threshold, DEFAULT_THRESHOLD};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_MODEL_PATH: &str = "model.json";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Effective settings after layering defaults, the TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model_path: String,
    pub threshold: f64,
    pub output_path: String,
    pub output_filename: String,
    pub monitor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            threshold: DEFAULT_THRESHOLD,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            monitor: false,
        }
    }
}

/// Values given explicitly on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model_path: Option<String>,
    pub threshold: Option<f64>,
    pub output_path: Option<String>,
    pub output_filename: Option<String>,
    pub monitor: bool,
}

impl Settings {
    pub fn layered(file: Option<&TomlConfig>, overrides: Overrides) -> Self {
        let mut settings = Self::default();

        if let Some(file) = file {
            if let Some(path) = &file.model.path {
                settings.model_path = path.clone();
            }
            if let Some(threshold) = file.prediction.threshold {
                settings.threshold = threshold;
            }
            if let Some(path) = &file.batch.output_path {
                settings.output_path = path.clone();
            }
            if let Some(filename) = &file.batch.output_filename {
                settings.output_filename = filename.clone();
            }
            settings.monitor = file.monitoring_enabled();
        }

        if let Some(path) = overrides.model_path {
            settings.model_path = path;
        }
        if let Some(threshold) = overrides.threshold {
            settings.threshold = threshold;
        }
        if let Some(path) = overrides.output_path {
            settings.output_path = path;
        }
        if let Some(filename) = overrides.output_filename {
            settings.output_filename = filename;
        }
        settings.monitor |= overrides.monitor;

        settings
    }
}

impl ConfigProvider for Settings {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_filename(&self) -> &str {
        &self.output_filename
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("model", &self.model_path)?;
        validate_threshold(self.threshold)?;
        validate_path("output_path", &self.output_path)?;
        validate_file_extension("output_filename", &self.output_filename, &["csv"])?;
        Ok(())
    }
}
