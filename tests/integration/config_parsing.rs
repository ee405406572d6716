//! Integration tests for bag type config files.

use bags::bag::ContainerSize;
use bags::config::{load_config, save_config, BagConfig, BagTypeIndex};
use bags::error::BagsError;

use crate::common::fixtures::{bag_config, TestWorkspace};

#[test]
fn test_load_yaml_file() {
    let ws = TestWorkspace::new();
    let path = ws.write_config();

    let config = load_config(&path).unwrap();
    assert_eq!(config, bag_config());

    let index = BagTypeIndex::from_config(&config);
    assert_eq!(index.len(), 2);
    assert!(index.get("Gem").unwrap().supports(ContainerSize::Massive));
    assert!(!index.get("Axe").unwrap().supports(ContainerSize::Small));
}

#[test]
fn test_save_and_reload_every_format() {
    let ws = TestWorkspace::new();
    let config = bag_config();

    for name in ["types.yaml", "types.yml", "types.toml", "types.json"] {
        let path = ws.path().join(name);
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config, "{name} did not reload");
    }
}

#[test]
fn test_missing_file() {
    let ws = TestWorkspace::new();
    let err = load_config(ws.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, BagsError::ConfigNotFound { .. }));
    assert!(err.is_user_recoverable());
    assert!(err.suggestion().is_some());
}

#[test]
fn test_malformed_file() {
    let ws = TestWorkspace::new();
    let path = ws.write("broken.json", "{\"BagTypes\": [");
    assert!(matches!(
        load_config(&path).unwrap_err(),
        BagsError::ConfigParse(_)
    ));
}

#[test]
fn test_invalid_file_is_rejected() {
    let ws = TestWorkspace::new();
    let path = ws.write(
        "dupes.yaml",
        r"
BagTypes:
  - Id: Axe
    Name: Axe Bag
  - Id: Axe
    Name: Other Axe Bag
",
    );
    assert!(matches!(
        load_config(&path).unwrap_err(),
        BagsError::ConfigInvalid(_)
    ));
}

#[test]
fn test_empty_config_is_valid() {
    let ws = TestWorkspace::new();
    let path = ws.write("empty.json", "{}");
    assert_eq!(load_config(&path).unwrap(), BagConfig::default());
}

#[test]
fn test_padded_id_is_rejected() {
    let ws = TestWorkspace::new();
    let path = ws.write(
        "padded.yaml",
        "BagTypes:\n  - Id: 'Axe '\n    Name: Axe Bag\n    SizeSettings:\n      - Size: Large\n",
    );
    assert!(matches!(
        load_config(&path).unwrap_err(),
        BagsError::ConfigInvalid(_)
    ));
}
