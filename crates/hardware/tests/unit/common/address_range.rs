//! # Address Range Tests
//!
//! Construction limits and the half-open interval predicates.

use proptest::prelude::*;
use snitchsim_core::common::{AddressRange, ConfigError};

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[test]
fn test_zero_size_rejected() {
    assert!(matches!(
        AddressRange::new(0x1000, 0),
        Err(ConfigError::InvalidRange { base: 0x1000, size: 0 })
    ));
}

#[test]
fn test_overflow_rejected() {
    assert!(AddressRange::new(u64::MAX, 2).is_err());
    assert!(AddressRange::new(0x8000_0000_0000_0000, 0x8000_0000_0000_0001).is_err());
}

#[test]
fn test_accessors() {
    let r = AddressRange::new(0x1000_0000, 0x4_0000).unwrap();
    assert_eq!(r.base(), 0x1000_0000);
    assert_eq!(r.size(), 0x4_0000);
    assert_eq!(r.end(), 0x1004_0000);
    assert_eq!(r.to_string(), "[0x10000000, 0x10040000)");
}

// ══════════════════════════════════════════════════════════
// 2. Predicates
// ══════════════════════════════════════════════════════════

#[test]
fn test_contains_bounds() {
    let r = AddressRange::new(0x1000, 0x1_0000).unwrap();
    assert!(!r.contains(0xFFF));
    assert!(r.contains(0x1000));
    assert!(r.contains(0x1_0FFF));
    assert!(!r.contains(0x1_1000));
}

#[test]
fn test_offset_and_subrange() {
    let r = AddressRange::new(0x1000, 0x1_0000).unwrap();
    assert_eq!(r.offset_of(0x1500), Some(0x500));
    assert_eq!(r.offset_of(0x2_0000), None);

    let sub = r.subrange(0x100, 0x100).unwrap();
    assert_eq!(sub.base(), 0x1100);
    assert!(r.encloses(&sub));
    assert!(r.subrange(0xFF00, 0x200).is_err());
}

#[test]
fn test_serde_rejects_empty_range() {
    let ok: AddressRange = serde_json::from_str(r#"{"base": 4096, "size": 16}"#).unwrap();
    assert_eq!(ok.end(), 4112);
    assert!(serde_json::from_str::<AddressRange>(r#"{"base": 4096, "size": 0}"#).is_err());
}

proptest! {
    #[test]
    fn prop_overlap_is_symmetric(
        a in 0u64..0x1_0000, sa in 1u64..0x1000,
        b in 0u64..0x1_0000, sb in 1u64..0x1000,
    ) {
        let ra = AddressRange::new(a, sa).unwrap();
        let rb = AddressRange::new(b, sb).unwrap();
        prop_assert_eq!(ra.overlaps(&rb), rb.overlaps(&ra));
        let shared = (a.max(b)..(a + sa).min(b + sb)).next().is_some();
        prop_assert_eq!(ra.overlaps(&rb), shared);
    }
}
