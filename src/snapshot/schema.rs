//! The flat, serializable record of a bag.
//!
//! A [`BagSnapshot`] can represent every bag variant. Which of its fields
//! matter is selected by `TypeId`: the three built-in bags use reserved ids
//! ([`ReservedTypeId`]), anything else names a bag type from the config.
//!
//! Field names are part of the save format and must not change.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::bag::{
    AutofillPriority, BundleBag, Container, ContainerSize, Item, ItemBag, ItemQuality, OmniBag,
    Rectangle, Rucksack, SortingOrder, SortingProperty,
};

/// Instance id carried by nested bags and by snapshots not yet given one.
pub const UNASSIGNED_INSTANCE_ID: i32 = -1;

/// Type id of a default snapshot: the nil UUID. Never matches a real bag type.
#[must_use]
pub fn empty_type_id() -> String {
    Uuid::nil().hyphenated().to_string()
}

/// Type ids understood without consulting the bag type index.
///
/// Decoding checks them in [`ReservedTypeId::PRIORITY`] order before falling
/// back to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedTypeId {
    Bundle,
    Rucksack,
    Omni,
}

impl ReservedTypeId {
    pub const PRIORITY: [Self; 3] = [Self::Bundle, Self::Rucksack, Self::Omni];

    #[must_use]
    pub const fn type_id(self) -> &'static str {
        match self {
            Self::Bundle => BundleBag::TYPE_ID,
            Self::Rucksack => Rucksack::TYPE_ID,
            Self::Omni => OmniBag::TYPE_ID,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bundle => "bundle",
            Self::Rucksack => "rucksack",
            Self::Omni => "omni",
        }
    }

    /// The reserved id `type_id` spells, if any.
    #[must_use]
    pub fn from_type_id(type_id: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|reserved| reserved.type_id() == type_id)
    }
}

/// Serialized form of one item stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemSnapshot {
    pub id: String,
    pub quality: ItemQuality,
    pub quantity: u32,
    pub is_big_craftable: bool,
    pub price: i32,
}

impl From<&Item> for ItemSnapshot {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            quality: item.quality,
            quantity: item.quantity,
            is_big_craftable: item.big_craftable,
            price: item.price,
        }
    }
}

impl From<ItemSnapshot> for Item {
    fn from(snapshot: ItemSnapshot) -> Self {
        Self {
            id: snapshot.id,
            quality: snapshot.quality,
            quantity: snapshot.quantity,
            big_craftable: snapshot.is_big_craftable,
            price: snapshot.price,
        }
    }
}

/// Serialized form of any bag.
///
/// Deserialization starts from [`BagSnapshot::default`] and overlays the
/// fields present in the input, so records written by older versions (or
/// trimmed by hand) still come back with every field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BagSnapshot {
    pub instance_id: i32,
    pub type_id: String,
    pub size: ContainerSize,
    pub autofill: bool,

    // Rucksack only
    pub autofill_priority: AutofillPriority,
    pub sort_property: SortingProperty,
    pub sort_order: SortingOrder,

    // Omni bag only
    #[serde(deserialize_with = "null_as_default")]
    pub nested_bags: Vec<BagSnapshot>,

    #[serde(deserialize_with = "null_as_default")]
    pub contents: Vec<ItemSnapshot>,

    /// When false, `overridden_icon` is a zeroed placeholder.
    pub is_custom_icon: bool,
    pub overridden_icon: Rectangle,
}

impl Default for BagSnapshot {
    fn default() -> Self {
        Self {
            instance_id: UNASSIGNED_INSTANCE_ID,
            type_id: empty_type_id(),
            size: ContainerSize::Small,
            autofill: false,
            autofill_priority: AutofillPriority::Low,
            sort_property: SortingProperty::Similarity,
            sort_order: SortingOrder::Ascending,
            nested_bags: Vec::new(),
            contents: Vec::new(),
            is_custom_icon: false,
            overridden_icon: Rectangle::default(),
        }
    }
}

impl BagSnapshot {
    /// Put every field back to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record `bag` under `instance_id`.
    ///
    /// Nested bags of an omni bag are recorded with
    /// [`UNASSIGNED_INSTANCE_ID`]; they are identified by their position in
    /// the parent.
    #[must_use]
    pub fn encode(instance_id: i32, bag: &ItemBag) -> Self {
        let mut snapshot = Self {
            instance_id,
            ..Self::default()
        };

        // Bundle bags are bounded bags too, so they must be matched before
        // the generic bounded case.
        match bag {
            ItemBag::Bundle(bundle) => {
                snapshot.type_id = BundleBag::TYPE_ID.to_string();
                snapshot.autofill = bundle.bag.autofill;
            }
            ItemBag::Bounded(bounded) => {
                snapshot.type_id.clone_from(&bounded.type_info.id);
                snapshot.autofill = bounded.autofill;
            }
            ItemBag::Rucksack(rucksack) => {
                snapshot.type_id = Rucksack::TYPE_ID.to_string();
                snapshot.autofill = rucksack.autofill;
                snapshot.autofill_priority = rucksack.autofill_priority;
                snapshot.sort_property = rucksack.sort_property;
                snapshot.sort_order = rucksack.sort_order;
            }
            ItemBag::Omni(omni) => {
                snapshot.type_id = OmniBag::TYPE_ID.to_string();
                snapshot.nested_bags = omni
                    .nested
                    .iter()
                    .map(|nested| Self::encode(UNASSIGNED_INSTANCE_ID, nested))
                    .collect();
            }
        }

        snapshot.size = bag.size();
        if let Some(slots) = bag.contents() {
            snapshot.contents = slots.iter().flatten().map(ItemSnapshot::from).collect();
        }

        match bag.icon_position() {
            Some(icon) if !bag.is_using_default_icon() => {
                snapshot.is_custom_icon = true;
                snapshot.overridden_icon = icon;
            }
            _ => {
                snapshot.is_custom_icon = false;
                snapshot.overridden_icon = Rectangle::default();
            }
        }

        snapshot
    }

    /// The icon override, honoring the `IsCustomIcon` flag.
    #[must_use]
    pub const fn custom_icon(&self) -> Option<Rectangle> {
        if self.is_custom_icon {
            Some(self.overridden_icon)
        } else {
            None
        }
    }

    /// Reserved id this snapshot's `TypeId` spells, if any.
    #[must_use]
    pub fn reserved_type(&self) -> Option<ReservedTypeId> {
        ReservedTypeId::from_type_id(&self.type_id)
    }

    /// Number of item stacks, including those of nested bags.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.contents.len()
            + self
                .nested_bags
                .iter()
                .map(Self::item_count)
                .sum::<usize>()
    }
}

/// Treat an explicit `null` sequence the same as a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
