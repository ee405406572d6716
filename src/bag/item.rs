//! Items held in bag slots.

use serde::{Deserialize, Serialize};

/// Quality tier of a stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemQuality {
    #[default]
    Regular,
    Silver,
    Gold,
    Iridium,
}

/// A stack of items sitting in a bag slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub quality: ItemQuality,
    pub quantity: u32,
    pub big_craftable: bool,
    pub price: i32,
}

impl Item {
    /// Create a regular-quality, non-craftable stack.
    #[must_use]
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quality: ItemQuality::Regular,
            quantity,
            big_craftable: false,
            price: 0,
        }
    }

    /// Set the quality tier.
    pub fn with_quality(mut self, quality: ItemQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the per-item sell price.
    pub fn with_price(mut self, price: i32) -> Self {
        self.price = price;
        self
    }

    /// Mark the stack as a big craftable.
    pub fn big_craftable(mut self) -> Self {
        self.big_craftable = true;
        self
    }
}
