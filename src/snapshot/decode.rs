//! Turning snapshots back into live bags.

use std::sync::Arc;

use tracing::trace;

use super::schema::{BagSnapshot, ReservedTypeId};
use crate::bag::{BoundedBag, BundleBag, Item, ItemBag, OmniBag, Rucksack};
use crate::config::{BagType, BagTypeIndex};
use crate::error::DecodeFailure;

impl BagSnapshot {
    /// Rebuild the live bag this snapshot records.
    ///
    /// Reserved type ids are resolved first; any other id must be present in
    /// `index` with a size config for this snapshot's size. An omni bag fails
    /// as a whole if any of its nested bags fails.
    pub fn decode(self, index: &BagTypeIndex) -> Result<ItemBag, DecodeFailure> {
        match self.reserved_type() {
            Some(ReservedTypeId::Bundle) => Ok(BundleBag::from_snapshot(self).into()),
            Some(ReservedTypeId::Rucksack) => Ok(Rucksack::from_snapshot(self).into()),
            Some(ReservedTypeId::Omni) => OmniBag::from_snapshot(self, index).map(Into::into),
            None => {
                let Some(bag_type) = index.get(&self.type_id) else {
                    return Err(DecodeFailure::UnknownType {
                        type_id: self.type_id,
                        instance_id: self.instance_id,
                    });
                };

                if !bag_type.supports(self.size) {
                    return Err(DecodeFailure::UnsupportedSize {
                        type_id: self.type_id,
                        size: self.size,
                        instance_id: self.instance_id,
                    });
                }

                Ok(BoundedBag::from_snapshot(Arc::clone(bag_type), self).into())
            }
        }
    }
}

fn item_slots(snapshot: &mut BagSnapshot) -> Vec<Option<Item>> {
    std::mem::take(&mut snapshot.contents)
        .into_iter()
        .map(|item| Some(Item::from(item)))
        .collect()
}

impl BoundedBag {
    /// Rebuild a bounded bag of an already resolved type.
    #[must_use]
    pub fn from_snapshot(type_info: Arc<BagType>, mut snapshot: BagSnapshot) -> Self {
        trace!(type_id = %type_info.id, size = %snapshot.size, "Decoding bounded bag");
        Self {
            type_info,
            size: snapshot.size,
            autofill: snapshot.autofill,
            icon: snapshot.custom_icon(),
            contents: item_slots(&mut snapshot),
        }
    }
}

impl BundleBag {
    #[must_use]
    pub fn from_snapshot(snapshot: BagSnapshot) -> Self {
        Self {
            bag: BoundedBag::from_snapshot(Self::bag_type(), snapshot),
        }
    }
}

impl Rucksack {
    #[must_use]
    pub fn from_snapshot(mut snapshot: BagSnapshot) -> Self {
        trace!(size = %snapshot.size, "Decoding rucksack");
        Self {
            size: snapshot.size,
            autofill: snapshot.autofill,
            autofill_priority: snapshot.autofill_priority,
            sort_property: snapshot.sort_property,
            sort_order: snapshot.sort_order,
            icon: snapshot.custom_icon(),
            contents: item_slots(&mut snapshot),
        }
    }
}

impl OmniBag {
    /// Rebuild an omni bag, decoding every nested bag against `index`.
    pub fn from_snapshot(snapshot: BagSnapshot, index: &BagTypeIndex) -> Result<Self, DecodeFailure> {
        trace!(nested = snapshot.nested_bags.len(), "Decoding omni bag");
        let icon = snapshot.custom_icon();
        let nested = snapshot
            .nested_bags
            .into_iter()
            .map(|nested| nested.decode(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            size: snapshot.size,
            nested,
            icon,
        })
    }
}
