//! # Error Tests
//!
//! Messages and conversions of the three error categories.

use snitchsim_core::common::{
    AddressRange, ConfigError, SignatureMismatch, TopologyError, UnmappedAddress,
};

#[test]
fn test_unmapped_address_display() {
    let err = UnmappedAddress {
        router: "narrow_axi".to_string(),
        addr: 0x2_0000,
    };
    assert_eq!(
        err.to_string(),
        "unmapped address 0x20000 on router 'narrow_axi'"
    );
}

#[test]
fn test_overlap_display_names_both_ranges() {
    let err = ConfigError::OverlappingMapping {
        router: "r".to_string(),
        new: AddressRange::new(0x1800, 0x1000).unwrap(),
        existing: AddressRange::new(0x2000, 0x1000).unwrap(),
    };
    let msg = err.to_string();
    assert!(msg.contains("[0x1800, 0x2800)"));
    assert!(msg.contains("[0x2000, 0x3000)"));
}

#[test]
fn test_topology_error_is_transparent() {
    let err: TopologyError = SignatureMismatch {
        from: "a.out".to_string(),
        to: "b.in".to_string(),
        expected: "io".to_string(),
        found: "wire<bool>".to_string(),
    }
    .into();
    assert!(matches!(err, TopologyError::Signature(_)));
    assert!(err.to_string().contains("'wire<bool>' does not match 'io'"));
}

#[test]
fn test_json_error_converts() {
    let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: ConfigError = json_err.into();
    assert!(err.to_string().starts_with("invalid configuration"));
}
