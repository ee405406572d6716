//! Bag type configuration.
//!
//! Handles loading, validating and indexing the bag type definitions that
//! saved bounded bags refer to by id.

mod index;
mod loader;
mod path;
mod schema;

pub use index::BagTypeIndex;
pub use loader::{load_config, load_config_from_str, save_config, ConfigFormat};
pub use path::{default_config_path, default_db_path, expand_home};
pub use schema::{BagConfig, BagSizeConfig, BagType, DEFAULT_CAPACITY};
