//! Integration tests for encoding live bags and decoding them back.

use bags::bag::{BundleBag, Container, ContainerSize, ItemBag, OmniBag, Rectangle, Rucksack};
use bags::config::{BagSizeConfig, BagType, BagTypeIndex};
use bags::error::DecodeFailure;
use bags::snapshot::{BagSnapshot, ReservedTypeId, UNASSIGNED_INSTANCE_ID};

use crate::common::fixtures::{self, type_index};
use crate::common::init_test_logging;

fn roundtrip(bag: &ItemBag, index: &BagTypeIndex) -> ItemBag {
    BagSnapshot::encode(1, bag)
        .decode(index)
        .unwrap_or_else(|e| panic!("Failed to decode {}: {e}", bag.kind_name()))
}

// ===== Round trips =====

#[test]
fn test_bags_without_empty_slots_roundtrip_exactly() {
    init_test_logging();
    let index = type_index();

    for bag in [
        fixtures::axe_bag(&index),
        fixtures::rucksack(),
        fixtures::bundle_bag(),
        fixtures::omni_bag(&index),
    ] {
        assert_eq!(roundtrip(&bag, &index), bag, "{} changed", bag.kind_name());
    }
}

#[test]
fn test_empty_slots_are_not_saved() {
    let index = type_index();
    let gem = fixtures::gem_bag(&index);

    let snapshot = BagSnapshot::encode(1, &gem);
    assert_eq!(snapshot.contents.len(), 2);

    let decoded = snapshot.clone().decode(&index).unwrap();
    assert_eq!(decoded.item_count(), gem.item_count());
    assert_eq!(BagSnapshot::encode(1, &decoded), snapshot);
}

#[test]
fn test_roundtrip_through_json() {
    let index = type_index();

    for bag in fixtures::every_variant(&index) {
        let json = serde_json::to_string(&BagSnapshot::encode(9, &bag)).unwrap();
        let snapshot: BagSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.instance_id, 9);

        let decoded = snapshot.decode(&index).unwrap();
        assert_eq!(decoded.kind_name(), bag.kind_name());
        assert_eq!(decoded.type_id(), bag.type_id());
        assert_eq!(decoded.size(), bag.size());
        assert_eq!(decoded.item_count(), bag.item_count());
    }
}

// ===== Sentinel type ids =====

#[test]
fn test_bundle_is_saved_under_its_own_id() {
    let snapshot = BagSnapshot::encode(4, &fixtures::bundle_bag());
    assert_eq!(snapshot.type_id, BundleBag::TYPE_ID);
    assert_eq!(snapshot.reserved_type(), Some(ReservedTypeId::Bundle));

    let decoded = snapshot.decode(&BagTypeIndex::new()).unwrap();
    assert!(matches!(decoded, ItemBag::Bundle(_)));
    assert!(decoded.as_bounded().is_some());
}

#[test]
fn test_reserved_types_decode_without_config() {
    let empty = BagTypeIndex::new();

    let rucksack = BagSnapshot::encode(1, &fixtures::rucksack());
    assert_eq!(rucksack.type_id, Rucksack::TYPE_ID);
    assert!(matches!(rucksack.decode(&empty), Ok(ItemBag::Rucksack(_))));

    let omni = OmniBag::new(ContainerSize::Small).into();
    let omni = BagSnapshot::encode(1, &omni);
    assert_eq!(omni.type_id, OmniBag::TYPE_ID);
    assert!(matches!(omni.decode(&empty), Ok(ItemBag::Omni(_))));
}

#[test]
fn test_reserved_ids_win_over_config_entries() {
    let mut index = type_index();
    index.insert(
        BagType::new(Rucksack::TYPE_ID, "Imposter")
            .with_size(BagSizeConfig::new(ContainerSize::Giant)),
    );

    let snapshot = BagSnapshot::encode(1, &fixtures::rucksack());
    assert!(matches!(snapshot.decode(&index), Ok(ItemBag::Rucksack(_))));
}

// ===== Omni bags =====

#[test]
fn test_nested_bags_have_no_instance_id() {
    let index = type_index();
    let snapshot = BagSnapshot::encode(12, &fixtures::omni_bag(&index));

    assert_eq!(snapshot.instance_id, 12);
    assert!(snapshot.contents.is_empty());
    assert_eq!(snapshot.nested_bags.len(), 2);
    for nested in &snapshot.nested_bags {
        assert_eq!(nested.instance_id, UNASSIGNED_INSTANCE_ID);
    }
    assert_eq!(snapshot.item_count(), 2);
}

#[test]
fn test_omni_fails_when_a_nested_bag_fails() {
    let index = type_index();
    let snapshot = BagSnapshot::encode(3, &fixtures::omni_bag(&index));

    let drifted: BagTypeIndex = [fixtures::gem_type()].into_iter().collect();
    let err = snapshot.decode(&drifted).unwrap_err();
    assert_eq!(
        err,
        DecodeFailure::UnknownType {
            type_id: "Axe".to_string(),
            instance_id: UNASSIGNED_INSTANCE_ID,
        }
    );
}

#[test]
fn test_nested_omni_bags() {
    let index = type_index();
    let inner = OmniBag::new(ContainerSize::Medium)
        .with_nested(vec![fixtures::gem_bag(&index)])
        .into();
    let outer: ItemBag = OmniBag::new(ContainerSize::Massive)
        .with_nested(vec![inner, fixtures::bundle_bag()])
        .into();

    let decoded = roundtrip(&outer, &index);
    let ItemBag::Omni(omni) = &decoded else {
        panic!("Expected omni bag, got {}", decoded.kind_name());
    };
    assert_eq!(omni.nested.len(), 2);
    assert!(matches!(omni.nested[0], ItemBag::Omni(_)));
    assert!(matches!(omni.nested[1], ItemBag::Bundle(_)));
    assert_eq!(decoded.item_count(), outer.item_count());
}

// ===== Config drift =====

#[test]
fn test_unknown_type_after_config_edit() {
    let index = type_index();
    let snapshot = BagSnapshot::encode(7, &fixtures::axe_bag(&index));

    let err = snapshot.decode(&BagTypeIndex::new()).unwrap_err();
    assert_eq!(err.type_id(), "Axe");
    assert_eq!(err.instance_id(), 7);
    assert!(matches!(err, DecodeFailure::UnknownType { .. }));
}

#[test]
fn test_unsupported_size_after_config_edit() {
    let index = type_index();
    let snapshot = BagSnapshot::encode(7, &fixtures::axe_bag(&index));

    let shrunk: BagTypeIndex = [BagType::new("Axe", "Axe Bag")
        .with_size(BagSizeConfig::new(ContainerSize::Small))]
    .into_iter()
    .collect();

    assert_eq!(
        snapshot.decode(&shrunk).unwrap_err(),
        DecodeFailure::UnsupportedSize {
            type_id: "Axe".to_string(),
            size: ContainerSize::Large,
            instance_id: 7,
        }
    );
}

// ===== Icons =====

#[test]
fn test_custom_icon_survives() {
    let index = type_index();
    let bag = fixtures::axe_bag(&index);

    let snapshot = BagSnapshot::encode(1, &bag);
    assert!(snapshot.is_custom_icon);
    assert_eq!(snapshot.overridden_icon, Rectangle::new(48, 0, 16, 16));

    let decoded = snapshot.decode(&index).unwrap();
    assert_eq!(decoded.icon_position(), Some(Rectangle::new(48, 0, 16, 16)));
}

#[test]
fn test_default_icon_is_not_recorded() {
    let rucksack = Rucksack::new(ContainerSize::Small);
    let default_icon = rucksack.default_icon().unwrap();
    let bag: ItemBag = rucksack.with_icon(default_icon).into();

    let snapshot = BagSnapshot::encode(1, &bag);
    assert!(!snapshot.is_custom_icon);
    assert_eq!(snapshot.overridden_icon, Rectangle::default());
}
