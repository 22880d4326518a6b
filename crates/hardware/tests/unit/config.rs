//! # Configuration Tests
//!
//! JSON parsing, defaults, validation, and merging registry overrides into `ArchProperties`.

use std::io::Write;

use pretty_assertions::assert_eq;
use snitchsim_core::config::{ArchProperties, HbmType, PropertyRegistry};
use snitchsim_core::ConfigError;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn test_defaults_describe_reference_board() {
    let props = ArchProperties::default();
    assert_eq!(props.nb_cluster, 1);
    assert_eq!(props.nb_core_per_cluster, 9);
    assert_eq!(props.hbm_size, 0x8000_0000);
    assert_eq!(props.hbm_type, HbmType::Simple);
    assert_eq!(props.memory_map.bootrom.base, 0x1000);
    assert_eq!(props.memory_map.bootrom.size, 0x1_0000);
    assert_eq!(props.memory_map.hbm_base, 0x8000_0000);
    assert_eq!(props.memory_map.cluster.base, 0x1000_0000);
    assert_eq!(props.memory_map.cluster.size, 0x4_0000);
    assert_eq!(props.interconnect.narrow_bandwidth, 8);
    assert_eq!(props.interconnect.wide_bandwidth, 64);
    assert_eq!(props.interconnect.hbm_latency, 100);
    assert!(props.validate().is_ok());
}

#[test]
fn test_empty_json_is_default() {
    let props = ArchProperties::from_json("{}").unwrap();
    assert_eq!(props, ArchProperties::default());
}

// ══════════════════════════════════════════════════════════
// 2. Parse-time rejection
// ══════════════════════════════════════════════════════════

#[test]
fn test_unknown_key_rejected() {
    let err = ArchProperties::from_json(r#"{ "nb_clusters": 2 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_unknown_nested_key_rejected() {
    let json = r#"{ "interconnect": { "narrow_bw": 8 } }"#;
    assert!(ArchProperties::from_json(json).is_err());
}

#[test]
fn test_invalid_hbm_type_rejected() {
    let err = ArchProperties::from_json(r#"{ "hbm_type": "ddr5" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_zero_clusters_rejected() {
    let err = ArchProperties::from_json(r#"{ "nb_cluster": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive("nb_cluster")));
}

#[test]
fn test_zero_cores_rejected() {
    let err = ArchProperties::from_json(r#"{ "nb_core_per_cluster": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive("nb_core_per_cluster")));
}

#[test]
fn test_cluster_cores_length_checked() {
    let err = ArchProperties::from_json(r#"{ "nb_cluster": 2, "cluster_cores": [9] }"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ClusterCountMismatch {
            expected: 2,
            found: 1
        }
    ));
}

#[test]
fn test_cluster_cores_zero_entry_rejected() {
    let err = ArchProperties::from_json(r#"{ "nb_cluster": 2, "cluster_cores": [9, 0] }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::NoCores { cluster: 1 }));
}

#[test]
fn test_core_count_uses_override_list() {
    let props =
        ArchProperties::from_json(r#"{ "nb_cluster": 3, "cluster_cores": [2, 4, 8] }"#).unwrap();
    assert_eq!(props.core_count(0), 2);
    assert_eq!(props.core_count(2), 8);
}

// ══════════════════════════════════════════════════════════
// 3. Files
// ══════════════════════════════════════════════════════════

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "nb_cluster": 4, "hbm_type": "dramsys" }}"#).unwrap();
    let props = ArchProperties::from_file(file.path()).unwrap();
    assert_eq!(props.nb_cluster, 4);
    assert_eq!(props.hbm_type, HbmType::Dramsys);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = ArchProperties::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

// ══════════════════════════════════════════════════════════
// 4. Registry merge
// ══════════════════════════════════════════════════════════

#[test]
fn test_declare_merges_overrides() {
    let mut registry = PropertyRegistry::new();
    registry.set_override("soc/nb_cluster", "2").unwrap();
    registry.set_override("hbm_type", "dramsys").unwrap();
    registry.set_override("hbm_size", "0x4000_0000").unwrap();

    let props = ArchProperties::default().declare(&mut registry).unwrap();
    registry.finish().unwrap();

    assert_eq!(props.nb_cluster, 2);
    assert_eq!(props.nb_core_per_cluster, 9);
    assert_eq!(props.hbm_type, HbmType::Dramsys);
    assert_eq!(props.hbm_size, 0x4000_0000);
}

#[test]
fn test_declare_rejects_hbm_type_outside_set() {
    let mut registry = PropertyRegistry::new();
    registry.set_override("hbm_type", "hbm3").unwrap();
    let err = ArchProperties::default().declare(&mut registry).unwrap_err();
    assert!(matches!(err, ConfigError::NotAllowed { ref name, .. } if name == "hbm_type"));
}

#[test]
fn test_declare_rejects_zero_cluster_override() {
    let mut registry = PropertyRegistry::new();
    registry.set_override("soc/nb_cluster", "0").unwrap();
    let err = ArchProperties::default().declare(&mut registry).unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive("nb_cluster")));
}

#[test]
fn test_declare_twice_fails() {
    let mut registry = PropertyRegistry::new();
    let props = ArchProperties::default().declare(&mut registry).unwrap();
    let err = props.declare(&mut registry).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateProperty(_)));
}
