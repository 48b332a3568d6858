use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::tbx_min::{Directionality, TbxMin, XmlOptions};

/// Application configuration module
/// This module handles loading and validating the converter settings.
/// Everything is optional: a missing file means defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Values stamped into every output header
    #[serde(default)]
    pub header: HeaderConfig,

    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,
}

/// Header fields TBX has no direct source for
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct HeaderConfig {
    // @field: Creator written to the TBX-Min header
    #[serde(default)]
    pub creator: Option<String>,

    // @field: License statement
    #[serde(default)]
    pub license: Option<String>,

    // @field: Translation directionality
    #[serde(default)]
    pub directionality: Option<Directionality>,
}

impl HeaderConfig {
    /// Copy the configured values into a converted document
    pub fn apply(&self, doc: &mut TbxMin) {
        if self.creator.is_some() {
            doc.creator = self.creator.clone();
        }
        if self.license.is_some() {
            doc.license = self.license.clone();
        }
        if self.directionality.is_some() {
            doc.directionality = self.directionality;
        }
    }
}

/// Serialization format of the converted document
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Indentation width in spaces
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            indent: default_indent(),
        }
    }
}

impl OutputConfig {
    pub fn xml_options(&self) -> XmlOptions {
        XmlOptions {
            indent: self.indent,
            declaration: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_indent() -> usize {
    4
}

const MAX_INDENT: usize = 16;

impl Config {
    /// Load from a JSON file; a missing file yields defaults unless required
    pub fn load<P: AsRef<Path>>(path: P, required: bool) -> Result<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            if required {
                return Err(anyhow!("Config file not found: {:?}", path));
            }
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.output.indent > MAX_INDENT {
            return Err(anyhow!(
                "Indent of {} spaces is too large (maximum {})",
                self.output.indent,
                MAX_INDENT
            ));
        }
        Ok(())
    }
}
