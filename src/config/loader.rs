//! Loading and saving bag type config files.
//!
//! Configs may be written as YAML, TOML or JSON; the format is picked from
//! the file extension. Every loaded config is validated before it is handed
//! out, so a [`BagTypeIndex`](super::BagTypeIndex) built from it never holds
//! ambiguous ids.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument, trace, warn};

use super::schema::BagConfig;
use crate::error::{BagsError, Result};
use crate::snapshot::ReservedTypeId;

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
    /// JSON format (.json).
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    fn detect(path: &Path) -> Result<Self> {
        Self::from_extension(path).ok_or_else(|| {
            BagsError::ConfigParse(format!(
                "Unknown config format for '{}': expected .yaml, .yml, .toml or .json",
                path.display()
            ))
        })
    }
}

impl BagConfig {
    /// Validate the bag type definitions.
    ///
    /// Checks that:
    /// - Every type id is non-empty and has no surrounding whitespace
    /// - No type id shadows a built-in bag (bundle, rucksack, omni)
    /// - Type ids are unique
    /// - No type lists the same size twice
    ///
    /// Types without any size settings are accepted with a warning; every
    /// saved bag of such a type will fail to load.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for bag_type in &self.bag_types {
            let id = bag_type.id.as_str();
            if id.trim().is_empty() {
                return Err(BagsError::ConfigInvalid(format!(
                    "Bag type '{}' has an empty Id",
                    bag_type.name
                )));
            }

            // Saved bags match type ids exactly, so padding would orphan them.
            if id.trim() != id {
                return Err(BagsError::ConfigInvalid(format!(
                    "Bag type '{}' has leading or trailing whitespace in its Id '{id}'",
                    bag_type.name
                )));
            }

            if let Some(reserved) = ReservedTypeId::from_type_id(id) {
                return Err(BagsError::ConfigInvalid(format!(
                    "Bag type '{}' uses the reserved {} id {id}",
                    bag_type.name,
                    reserved.name()
                )));
            }

            if !seen.insert(id) {
                return Err(BagsError::ConfigInvalid(format!(
                    "Duplicate bag type id {id}"
                )));
            }

            let mut sizes = HashSet::new();
            for size in bag_type.sizes() {
                if !sizes.insert(size) {
                    return Err(BagsError::ConfigInvalid(format!(
                        "Bag type {id} lists size {size} more than once"
                    )));
                }
            }

            if bag_type.size_settings.is_empty() {
                warn!(type_id = %id, "Bag type has no size settings; its bags cannot be loaded");
            }
        }

        debug!(types = self.bag_types.len(), "Bag type config validated");
        Ok(())
    }
}

/// Load a bag type config from a file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The format cannot be detected from the extension
/// - The file content cannot be parsed
/// - Validation fails
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BagConfig> {
    let path = path.as_ref();
    info!("Loading bag type config");

    let format = ConfigFormat::detect(path)?;
    debug!(format = ?format, "Detected config format");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BagsError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            BagsError::Io(e)
        }
    })?;
    debug!(bytes = content.len(), "Read config file");

    load_config_from_str(&content, format)
}

/// Load a bag type config from a string with a specified format.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
#[instrument(skip(content), fields(format = ?format, content_len = content.len()))]
pub fn load_config_from_str(content: &str, format: ConfigFormat) -> Result<BagConfig> {
    trace!("Parsing config content");

    let config: BagConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| BagsError::ConfigParse(format!("YAML: {e}")))?,
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| BagsError::ConfigParse(format!("TOML: {e}")))?
        }
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| BagsError::ConfigParse(format!("JSON: {e}")))?,
    };

    config.validate()?;

    info!(types = config.bag_types.len(), "Bag type config loaded and validated");
    Ok(config)
}

/// Save a bag type config to a file.
///
/// Automatically detects the format from the file extension.
#[instrument(skip(config), fields(path = %path.as_ref().display()))]
pub fn save_config<P: AsRef<Path>>(config: &BagConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = ConfigFormat::detect(path)?;

    let content = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| BagsError::ConfigParse(format!("YAML: {e}")))?,
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| BagsError::ConfigParse(format!("TOML: {e}")))?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| BagsError::ConfigParse(format!("JSON: {e}")))?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    info!(types = config.bag_types.len(), "Bag type config saved");
    Ok(())
}
