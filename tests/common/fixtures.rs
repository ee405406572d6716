//! Test fixture helpers for bag type configs and saves.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use bags::bag::{
    AutofillPriority, BoundedBag, BundleBag, ContainerSize, Item, ItemBag, ItemQuality, OmniBag,
    Rectangle, Rucksack, SortingOrder, SortingProperty,
};
use bags::config::{BagConfig, BagSizeConfig, BagType, BagTypeIndex};
use bags::snapshot::SaveFile;

/// Bag type config used across the integration tests.
///
/// - `Axe`: Large only
/// - `Gem`: Small and Massive
pub const BAG_TYPES_YAML: &str = r"
BagTypes:
  - Id: Axe
    Name: Axe Bag
    SizeSettings:
      - Size: Large
        Price: 500
        AllowedItems: [Axe]
  - Id: Gem
    Name: Gem Bag
    Description: Shiny things
    SizeSettings:
      - Size: Small
      - Size: Massive
        Capacity: 50
        AllowedItems: [Diamond, Ruby]
";

#[must_use]
pub fn axe_type() -> BagType {
    BagType::new("Axe", "Axe Bag").with_size(
        BagSizeConfig::new(ContainerSize::Large)
            .with_price(500)
            .with_allowed_items(["Axe"]),
    )
}

#[must_use]
pub fn gem_type() -> BagType {
    BagType::new("Gem", "Gem Bag")
        .with_description("Shiny things")
        .with_size(BagSizeConfig::new(ContainerSize::Small))
        .with_size(
            BagSizeConfig::new(ContainerSize::Massive)
                .with_capacity(50)
                .with_allowed_items(["Diamond", "Ruby"]),
        )
}

#[must_use]
pub fn bag_config() -> BagConfig {
    BagConfig {
        bag_types: vec![axe_type(), gem_type()],
    }
}

#[must_use]
pub fn type_index() -> BagTypeIndex {
    BagTypeIndex::from_config(&bag_config())
}

/// A large axe bag holding one stack, with a custom icon.
#[must_use]
pub fn axe_bag(index: &BagTypeIndex) -> ItemBag {
    let axe = index.get("Axe").map(Arc::clone).expect("Axe type missing");
    BoundedBag::new(axe, ContainerSize::Large)
        .with_autofill(true)
        .with_contents(vec![Some(Item::new("Axe", 3).with_quality(ItemQuality::Gold))])
        .with_icon(Rectangle::new(48, 0, 16, 16))
        .into()
}

#[must_use]
pub fn gem_bag(index: &BagTypeIndex) -> ItemBag {
    let gem = index.get("Gem").map(Arc::clone).expect("Gem type missing");
    BoundedBag::new(gem, ContainerSize::Massive)
        .with_contents(vec![
            Some(Item::new("Diamond", 12).with_price(750)),
            None,
            Some(Item::new("Ruby", 4)),
        ])
        .into()
}

#[must_use]
pub fn rucksack() -> ItemBag {
    Rucksack::new(ContainerSize::Giant)
        .with_autofill(true, AutofillPriority::High)
        .with_sorting(SortingProperty::Quantity, SortingOrder::Descending)
        .with_contents(vec![Some(Item::new("Keg", 1).big_craftable())])
        .into()
}

#[must_use]
pub fn bundle_bag() -> ItemBag {
    let mut bundle = BundleBag::new(ContainerSize::Medium);
    bundle.bag.contents = vec![Some(Item::new("Parsnip", 5))];
    bundle.into()
}

/// An omni bag holding an axe bag and a rucksack.
#[must_use]
pub fn omni_bag(index: &BagTypeIndex) -> ItemBag {
    OmniBag::new(ContainerSize::Large)
        .with_nested(vec![axe_bag(index), rucksack()])
        .into()
}

/// One bag of every variant, in a fixed order.
#[must_use]
pub fn every_variant(index: &BagTypeIndex) -> Vec<ItemBag> {
    vec![
        axe_bag(index),
        gem_bag(index),
        rucksack(),
        bundle_bag(),
        omni_bag(index),
    ]
}

/// Bag type config and save files in a temporary directory.
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the workspace.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content)
            .unwrap_or_else(|_| panic!("Failed to write {}", path.display()));
        path
    }

    /// Write the shared bag type config as YAML.
    pub fn write_config(&self) -> PathBuf {
        self.write("bag_types.yaml", BAG_TYPES_YAML)
    }

    /// Capture `bags` into a save file named `name`.
    pub fn write_save(&self, name: &str, bags: &[ItemBag]) -> PathBuf {
        let path = self.dir.path().join(name);
        SaveFile::capture(bags)
            .write_to(&path)
            .expect("Failed to write save file");
        path
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("bags.db")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
