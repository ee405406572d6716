//! Integration tests for the SQLite bag store.

use bags::bag::{Container, ContainerSize, ItemBag, Rucksack};
use bags::config::BagTypeIndex;
use bags::error::{BagsError, DecodeFailure};
use bags::snapshot::{BagDb, BagSnapshot};

use crate::common::fixtures::{self, type_index, TestWorkspace};
use crate::common::init_test_logging;

#[test]
fn test_store_assigns_increasing_instance_ids() {
    init_test_logging();
    let ws = TestWorkspace::new();
    let index = type_index();
    let mut db = BagDb::open(ws.db_path()).unwrap();

    let ids: Vec<i32> = fixtures::every_variant(&index)
        .iter()
        .map(|bag| db.save_bag(bag).unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let snapshots = db.snapshots().unwrap();
    let stored: Vec<i32> = snapshots.iter().map(|s| s.instance_id).collect();
    assert_eq!(stored, ids);
}

#[test]
fn test_store_survives_reopen() {
    let ws = TestWorkspace::new();
    let index = type_index();
    let bag = fixtures::omni_bag(&index);

    let instance_id = {
        let mut db = BagDb::open(ws.db_path()).unwrap();
        db.save_bag(&bag).unwrap()
    };

    let db = BagDb::open(ws.db_path()).unwrap();
    assert_eq!(db.load_bag(instance_id, &index).unwrap(), bag);
}

#[test]
fn test_load_all_skips_drifted_bags() {
    let ws = TestWorkspace::new();
    let index = type_index();
    let mut db = BagDb::open(ws.db_path()).unwrap();
    for bag in fixtures::every_variant(&index) {
        db.save_bag(&bag).unwrap();
    }

    // Without any bag types only the rucksack and the bundle still resolve.
    let report = db.load_all(&BagTypeIndex::new()).unwrap();
    let loaded: Vec<&str> = report.loaded.iter().map(|l| l.bag.kind_name()).collect();
    assert_eq!(loaded, vec!["rucksack", "bundle"]);

    let skipped: Vec<i32> = report.skipped.iter().map(|s| s.instance_id).collect();
    assert_eq!(skipped, vec![1, 2, 5]);
    // The omni bag is skipped under its own id; the failure names the nested bag.
    assert_eq!(report.skipped[2].failure.type_id(), "Axe");
    assert!(!report.is_complete());

    // Skipped bags are still stored.
    assert_eq!(db.snapshots().unwrap().len(), 5);
}

#[test]
fn test_import_keeps_undecodable_snapshots() {
    let ws = TestWorkspace::new();
    let mut db = BagDb::open(ws.db_path()).unwrap();

    let snapshot = BagSnapshot {
        instance_id: 99,
        type_id: "Retired".to_string(),
        size: ContainerSize::Giant,
        ..BagSnapshot::default()
    };
    let instance_id = db.import_snapshot(snapshot).unwrap();
    assert_eq!(instance_id, 1);

    let stored = db.load_snapshot(instance_id).unwrap().unwrap();
    assert_eq!(stored.instance_id, 1);
    assert_eq!(stored.type_id, "Retired");

    let err = db.load_bag(instance_id, &type_index()).unwrap_err();
    assert!(matches!(
        err,
        BagsError::Decode(DecodeFailure::UnknownType { instance_id: 1, .. })
    ));
}

#[test]
fn test_replace_and_delete() {
    let ws = TestWorkspace::new();
    let index = type_index();
    let mut db = BagDb::open(ws.db_path()).unwrap();

    let instance_id = db.save_bag(&fixtures::rucksack()).unwrap();
    let bigger: ItemBag = Rucksack::new(ContainerSize::Massive).into();
    assert!(db.replace_bag(instance_id, &bigger).unwrap());
    assert!(!db.replace_bag(instance_id + 1, &bigger).unwrap());

    let reloaded = db.load_bag(instance_id, &index).unwrap();
    assert_eq!(reloaded.size(), ContainerSize::Massive);

    assert!(db.delete_bag(instance_id).unwrap());
    assert!(!db.delete_bag(instance_id).unwrap());
    assert!(!db.bag_exists(instance_id).unwrap());
    assert!(matches!(
        db.load_bag(instance_id, &index).unwrap_err(),
        BagsError::BagNotFound { .. }
    ));
}

#[test]
fn test_list_bags_summaries() {
    let ws = TestWorkspace::new();
    let index = type_index();
    let mut db = BagDb::open(ws.db_path()).unwrap();
    db.save_bag(&fixtures::gem_bag(&index)).unwrap();
    db.save_bag(&fixtures::omni_bag(&index)).unwrap();

    let summaries = db.list_bags().unwrap();
    assert_eq!(summaries.len(), 2);

    assert_eq!(summaries[0].type_id, "Gem");
    assert_eq!(summaries[0].size, "Massive");
    assert_eq!(summaries[0].item_count, 2);
    assert_eq!(summaries[0].nested_count, 0);

    assert_eq!(summaries[1].nested_count, 2);
    assert_eq!(summaries[1].item_count, 2);
}

#[test]
fn test_batch_save_is_one_transaction() {
    let ws = TestWorkspace::new();
    let index = type_index();
    let mut db = BagDb::open(ws.db_path()).unwrap();

    let ids = db.save_bags(&fixtures::every_variant(&index)).unwrap();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let snapshots: Vec<BagSnapshot> = db.snapshots().unwrap();
    let again = db.import_snapshots(snapshots).unwrap();
    assert_eq!(again, vec![6, 7, 8, 9, 10]);
    assert!(db.load_all(&index).unwrap().is_complete());
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let ws = TestWorkspace::new();
    let mut db = BagDb::open(ws.db_path()).unwrap();

    let first = db.save_bag(&fixtures::rucksack()).unwrap();
    db.delete_bag(first).unwrap();
    let second = db.save_bag(&fixtures::rucksack()).unwrap();
    assert!(second > first);
}
