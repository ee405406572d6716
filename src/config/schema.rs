//! Bag type definitions.
//!
//! A bag type config lists every [`BagType`] the game knows about. Field
//! names are PascalCase in every format so the JSON form matches the
//! config files players already have:
//!
//! ```yaml
//! BagTypes:
//!   - Id: 2c6a4f1e-seed-bag
//!     Name: Seed Bag
//!     Icon: { X: 0, Y: 0, Width: 16, Height: 16 }
//!     SizeSettings:
//!       - Size: Small
//!         Price: 1000
//!         Capacity: 30
//!         AllowedItems: ["Parsnip Seeds", "Bean Starter"]
//!       - Size: Large
//!         Price: 10000
//! ```

use serde::{Deserialize, Serialize};

use crate::bag::{ContainerSize, Rectangle};

/// Default per-item stack limit when a size config doesn't set one.
pub const DEFAULT_CAPACITY: u32 = 999;

const fn default_capacity() -> u32 {
    DEFAULT_CAPACITY
}

/// Settings of one size of a bag type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BagSizeConfig {
    pub size: ContainerSize,
    #[serde(default)]
    pub price: u32,
    /// Maximum quantity of each allowed item.
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub allowed_items: Vec<String>,
}

impl BagSizeConfig {
    #[must_use]
    pub const fn new(size: ContainerSize) -> Self {
        Self {
            size,
            price: 0,
            capacity: DEFAULT_CAPACITY,
            allowed_items: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_allowed_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_items = items.into_iter().map(Into::into).collect();
        self
    }
}

/// Definition of a kind of bounded bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BagType {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Icon bags of this type start with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Rectangle>,
    #[serde(default)]
    pub size_settings: Vec<BagSizeConfig>,
}

impl BagType {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: None,
            size_settings: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: Rectangle) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_size(mut self, config: BagSizeConfig) -> Self {
        self.size_settings.push(config);
        self
    }

    /// First size config matching `size`.
    #[must_use]
    pub fn size_config(&self, size: ContainerSize) -> Option<&BagSizeConfig> {
        self.size_settings.iter().find(|config| config.size == size)
    }

    #[must_use]
    pub fn supports(&self, size: ContainerSize) -> bool {
        self.size_config(size).is_some()
    }

    /// Sizes this type is configured for, in config order.
    pub fn sizes(&self) -> impl Iterator<Item = ContainerSize> + '_ {
        self.size_settings.iter().map(|config| config.size)
    }
}

/// Contents of a bag type config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BagConfig {
    #[serde(default)]
    pub bag_types: Vec<BagType>,
}
