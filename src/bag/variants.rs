//! The four live bag variants.

use std::sync::{Arc, LazyLock};

use super::item::Item;
use super::types::{AutofillPriority, ContainerSize, Rectangle, SortingOrder, SortingProperty};
use super::{Container, ItemBag};
use crate::config::{BagSizeConfig, BagType};

const BUNDLE_ICON: Rectangle = Rectangle::new(0, 16, 16, 16);
const RUCKSACK_ICON: Rectangle = Rectangle::new(16, 16, 16, 16);
const OMNI_ICON: Rectangle = Rectangle::new(32, 16, 16, 16);

/// Built-in type definition backing every bundle bag.
static BUNDLE_TYPE: LazyLock<Arc<BagType>> = LazyLock::new(|| {
    let mut bag_type = BagType::new(BundleBag::TYPE_ID, "Bundle Bag")
        .with_description("Holds the items still needed for community bundles")
        .with_icon(BUNDLE_ICON);
    for size in ContainerSize::ALL {
        bag_type = bag_type.with_size(BagSizeConfig::new(size));
    }
    Arc::new(bag_type)
});

/// A bag governed by a bag type definition and one of its sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBag {
    pub type_info: Arc<BagType>,
    pub size: ContainerSize,
    pub autofill: bool,
    pub contents: Vec<Option<Item>>,
    pub icon: Option<Rectangle>,
}

impl BoundedBag {
    /// Create an empty bag of the given type and size.
    #[must_use]
    pub fn new(type_info: Arc<BagType>, size: ContainerSize) -> Self {
        Self {
            type_info,
            size,
            autofill: false,
            contents: Vec::new(),
            icon: None,
        }
    }

    pub fn with_autofill(mut self, autofill: bool) -> Self {
        self.autofill = autofill;
        self
    }

    pub fn with_contents(mut self, contents: Vec<Option<Item>>) -> Self {
        self.contents = contents;
        self
    }

    pub fn with_icon(mut self, icon: Rectangle) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Settings of this bag's type for its current size.
    pub fn size_config(&self) -> Option<&BagSizeConfig> {
        self.type_info.size_config(self.size)
    }
}

impl Container for BoundedBag {
    fn size(&self) -> ContainerSize {
        self.size
    }

    fn contents(&self) -> Option<&[Option<Item>]> {
        Some(&self.contents)
    }

    fn icon_position(&self) -> Option<Rectangle> {
        self.icon
    }

    fn default_icon(&self) -> Option<Rectangle> {
        self.type_info.icon
    }
}

/// Bag that collects community bundle items.
///
/// A bounded bag whose type is fixed to the built-in bundle definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleBag {
    pub bag: BoundedBag,
}

impl BundleBag {
    pub const TYPE_ID: &'static str = "f3ae0a2b-9c6d-4e15-8b7a-2d4c5e6f7a81";

    #[must_use]
    pub fn new(size: ContainerSize) -> Self {
        Self {
            bag: BoundedBag::new(Self::bag_type(), size),
        }
    }

    /// The built-in type definition of bundle bags.
    #[must_use]
    pub fn bag_type() -> Arc<BagType> {
        Arc::clone(&BUNDLE_TYPE)
    }
}

impl Container for BundleBag {
    fn size(&self) -> ContainerSize {
        self.bag.size
    }

    fn contents(&self) -> Option<&[Option<Item>]> {
        Some(&self.bag.contents)
    }

    fn icon_position(&self) -> Option<Rectangle> {
        self.bag.icon
    }

    fn default_icon(&self) -> Option<Rectangle> {
        Some(BUNDLE_ICON)
    }
}

/// General-purpose bag with its own autofill and sorting preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rucksack {
    pub size: ContainerSize,
    pub autofill: bool,
    pub autofill_priority: AutofillPriority,
    pub sort_property: SortingProperty,
    pub sort_order: SortingOrder,
    pub contents: Vec<Option<Item>>,
    pub icon: Option<Rectangle>,
}

impl Rucksack {
    pub const TYPE_ID: &'static str = "6b9f1c2d-3e4a-4f5b-8c6d-7e8f9a0b1c2d";

    #[must_use]
    pub fn new(size: ContainerSize) -> Self {
        Self {
            size,
            autofill: false,
            autofill_priority: AutofillPriority::default(),
            sort_property: SortingProperty::default(),
            sort_order: SortingOrder::default(),
            contents: Vec::new(),
            icon: None,
        }
    }

    pub fn with_autofill(mut self, autofill: bool, priority: AutofillPriority) -> Self {
        self.autofill = autofill;
        self.autofill_priority = priority;
        self
    }

    pub fn with_sorting(mut self, property: SortingProperty, order: SortingOrder) -> Self {
        self.sort_property = property;
        self.sort_order = order;
        self
    }

    pub fn with_contents(mut self, contents: Vec<Option<Item>>) -> Self {
        self.contents = contents;
        self
    }

    pub fn with_icon(mut self, icon: Rectangle) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl Container for Rucksack {
    fn size(&self) -> ContainerSize {
        self.size
    }

    fn contents(&self) -> Option<&[Option<Item>]> {
        Some(&self.contents)
    }

    fn icon_position(&self) -> Option<Rectangle> {
        self.icon
    }

    fn default_icon(&self) -> Option<Rectangle> {
        Some(RUCKSACK_ICON)
    }
}

/// Bag that stores other bags instead of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmniBag {
    pub size: ContainerSize,
    pub nested: Vec<ItemBag>,
    pub icon: Option<Rectangle>,
}

impl OmniBag {
    pub const TYPE_ID: &'static str = "a1c4e7f0-2b5d-4869-9a3c-5e7f1b3d5f79";

    #[must_use]
    pub fn new(size: ContainerSize) -> Self {
        Self {
            size,
            nested: Vec::new(),
            icon: None,
        }
    }

    pub fn with_nested(mut self, nested: Vec<ItemBag>) -> Self {
        self.nested = nested;
        self
    }

    pub fn with_icon(mut self, icon: Rectangle) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl Container for OmniBag {
    fn size(&self) -> ContainerSize {
        self.size
    }

    fn contents(&self) -> Option<&[Option<Item>]> {
        None
    }

    fn icon_position(&self) -> Option<Rectangle> {
        self.icon
    }

    fn default_icon(&self) -> Option<Rectangle> {
        Some(OMNI_ICON)
    }
}
