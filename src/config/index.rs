//! Lookup from bag type id to definition, queried while decoding saved bags.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use super::schema::{BagConfig, BagType};

/// Read-only index of known bag types.
#[derive(Debug, Clone, Default)]
pub struct BagTypeIndex {
    types: HashMap<String, Arc<BagType>>,
}

impl BagTypeIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a loaded config.
    #[must_use]
    pub fn from_config(config: &BagConfig) -> Self {
        config.bag_types.iter().cloned().collect()
    }

    /// Add a definition. The first definition of an id wins.
    ///
    /// Returns false if the id was already present.
    pub fn insert(&mut self, bag_type: BagType) -> bool {
        if self.types.contains_key(&bag_type.id) {
            warn!(type_id = %bag_type.id, "Duplicate bag type ignored");
            return false;
        }
        self.types.insert(bag_type.id.clone(), Arc::new(bag_type));
        true
    }

    #[must_use]
    pub fn get(&self, type_id: &str) -> Option<&Arc<BagType>> {
        self.types.get(type_id)
    }

    #[must_use]
    pub fn contains(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All definitions, sorted by id.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Arc<BagType>> {
        let mut types: Vec<_> = self.types.values().collect();
        types.sort_by(|a, b| a.id.cmp(&b.id));
        types
    }
}

impl FromIterator<BagType> for BagTypeIndex {
    fn from_iter<I: IntoIterator<Item = BagType>>(iter: I) -> Self {
        let mut index = Self::new();
        for bag_type in iter {
            index.insert(bag_type);
        }
        index
    }
}
