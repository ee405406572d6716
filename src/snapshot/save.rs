//! Whole save files and the batch load that restores them.
//!
//! Loading never stops at the first bad bag: every snapshot that fails to
//! decode is logged as a warning and reported back in [`LoadReport::skipped`],
//! while the rest of the save comes back intact.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

use super::schema::BagSnapshot;
use crate::bag::ItemBag;
use crate::config::BagTypeIndex;
use crate::error::{BagsError, DecodeFailure, Result};

/// Current version written into [`SaveFile::format_version`].
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// A live bag together with the instance id it was saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBag {
    pub instance_id: i32,
    pub bag: ItemBag,
}

/// A top-level bag that could not be decoded.
///
/// `failure` is the error as raised, so for an omni bag it names the nested
/// bag that failed. `instance_id` is always the id of the saved top-level bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBag {
    pub instance_id: i32,
    pub failure: DecodeFailure,
}

impl fmt::Display for SkippedBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bag {}: {}", self.instance_id, self.failure)
    }
}

/// Outcome of decoding a batch of snapshots.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub loaded: Vec<LoadedBag>,
    pub skipped: Vec<SkippedBag>,
}

impl LoadReport {
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True if nothing was skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// The loaded bags, in save order.
    #[must_use]
    pub fn into_bags(self) -> Vec<ItemBag> {
        self.loaded.into_iter().map(|loaded| loaded.bag).collect()
    }
}

/// Decode every snapshot, skipping the ones whose bag type has drifted.
#[instrument(skip_all, fields(types = index.len()))]
pub fn decode_all<I>(snapshots: I, index: &BagTypeIndex) -> LoadReport
where
    I: IntoIterator<Item = BagSnapshot>,
{
    let mut report = LoadReport::default();

    for snapshot in snapshots {
        let instance_id = snapshot.instance_id;
        match snapshot.decode(index) {
            Ok(bag) => {
                trace!(instance_id, kind = bag.kind_name(), "Bag decoded");
                report.loaded.push(LoadedBag { instance_id, bag });
            }
            Err(failure) => {
                log_failure(instance_id, &failure);
                report.skipped.push(SkippedBag {
                    instance_id,
                    failure,
                });
            }
        }
    }

    info!(
        loaded = report.loaded_count(),
        skipped = report.skipped_count(),
        "Bag load finished"
    );
    report
}

fn log_failure(instance_id: i32, failure: &DecodeFailure) {
    let failed_instance_id = failure.instance_id();
    match failure {
        DecodeFailure::UnknownType { type_id, .. } => warn!(
            type_id = %type_id,
            instance_id,
            failed_instance_id,
            "No bag type with this id was found. Did you manually edit your bag type config? \
             The saved bag cannot be loaded without a corresponding type"
        ),
        DecodeFailure::UnsupportedSize { type_id, size, .. } => warn!(
            type_id = %type_id,
            size = %size,
            instance_id,
            failed_instance_id,
            "Bag type was found but has no settings for this size. Did you manually edit your \
             bag type config? The saved bag cannot be loaded without settings for its size"
        ),
    }
}

/// Every top-level bag of one save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SaveFile {
    pub format_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub bags: Vec<BagSnapshot>,
}

impl Default for SaveFile {
    fn default() -> Self {
        Self {
            format_version: SAVE_FORMAT_VERSION,
            saved_at: None,
            bags: Vec::new(),
        }
    }
}

impl SaveFile {
    /// Encode `bags`, assigning instance ids `1..=n` in order.
    #[must_use]
    pub fn capture(bags: &[ItemBag]) -> Self {
        let snapshots = (1..=i32::MAX)
            .zip(bags)
            .map(|(instance_id, bag)| BagSnapshot::encode(instance_id, bag))
            .collect();

        Self {
            format_version: SAVE_FORMAT_VERSION,
            saved_at: Some(Utc::now()),
            bags: snapshots,
        }
    }

    /// Decode every bag of this save against `index`.
    pub fn restore(self, index: &BagTypeIndex) -> LoadReport {
        if self.format_version > SAVE_FORMAT_VERSION {
            warn!(
                version = self.format_version,
                supported = SAVE_FORMAT_VERSION,
                "Save file was written by a newer version"
            );
        }
        decode_all(self.bags, index)
    }

    /// Parse a save file from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| BagsError::SaveParse(e.to_string()))
    }

    /// Serialize this save file as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BagsError::SaveParse(e.to_string()))
    }

    /// Read a save file from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BagsError::SaveNotFound {
                    path: path.display().to_string(),
                }
            } else {
                BagsError::Io(e)
            }
        })?;

        let save = Self::from_json_str(&content)?;
        debug!(bags = save.bags.len(), "Save file read");
        Ok(save)
    }

    /// Write this save file to disk, creating parent directories.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        info!(bags = self.bags.len(), "Save file written");
        Ok(())
    }
}
