//! Default locations of the bag type config and the bag store.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{BagsError, Result};

const APP_DIR: &str = "item-bags";

/// Returns the default bag type config path.
///
/// Location: `~/.config/item-bags/bag_types.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        BagsError::Other("Could not determine config directory".to_string())
    })?;
    Ok(config_dir.join(APP_DIR).join("bag_types.yaml"))
}

/// Returns the default bag store path.
///
/// Location: `~/.local/share/item-bags/bags.db`
pub fn default_db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().ok_or_else(|| {
        BagsError::Other("Could not determine local data directory".to_string())
    })?;
    Ok(data_dir.join(APP_DIR).join("bags.db"))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    if path_str != "~" && !path_str.starts_with("~/") {
        trace!(path = %path.display(), "No home expansion needed");
        return Ok(path.to_path_buf());
    }

    let home = dirs::home_dir().ok_or_else(|| {
        BagsError::Other("Could not determine home directory".to_string())
    })?;
    let resolved = match path_str.strip_prefix("~/") {
        Some(rest) if !rest.is_empty() => home.join(rest),
        _ => home,
    };
    debug!(
        original = %path.display(),
        resolved = %resolved.display(),
        "Expanded home directory path"
    );
    Ok(resolved)
}
