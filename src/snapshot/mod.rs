//! Persistence of live bags.
//!
//! A live [`ItemBag`](crate::bag::ItemBag) is saved as a flat
//! [`BagSnapshot`] and restored by decoding it against a
//! [`BagTypeIndex`](crate::config::BagTypeIndex). Decoding can fail when the
//! bag type config has drifted since the bag was saved; batch loads report
//! and skip those bags instead of giving up.
//!
//! # Storage
//!
//! - [`SaveFile`]: a JSON document with every top-level bag of one save
//! - [`BagDb`]: a SQLite store, one row per top-level bag
//!
//! Both assign the top-level instance ids. Bags nested in an omni bag are
//! always saved with [`UNASSIGNED_INSTANCE_ID`].
//!
//! # Usage
//!
//! ```ignore
//! use bags::config::{load_config, BagTypeIndex};
//! use bags::snapshot::SaveFile;
//!
//! let index = BagTypeIndex::from_config(&load_config("bag_types.yaml")?);
//!
//! let save = SaveFile::capture(&bags);
//! save.write_to("bags.json")?;
//!
//! let report = SaveFile::read_from("bags.json")?.restore(&index);
//! for skipped in &report.skipped {
//!     eprintln!("skipped {skipped}");
//! }
//! ```

mod db;
mod decode;
mod save;
mod schema;

pub use db::{BagDb, BagSummary};
pub use save::{decode_all, LoadReport, LoadedBag, SaveFile, SkippedBag, SAVE_FORMAT_VERSION};
pub use schema::{
    empty_type_id, BagSnapshot, ItemSnapshot, ReservedTypeId, UNASSIGNED_INSTANCE_ID,
};
