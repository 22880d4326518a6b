//! # Property Registry Tests
//!
//! Declaration, casting, allowed-value checks, and override bookkeeping.

use rstest::rstest;
use snitchsim_core::config::{ArchProperties, Cast, PropertyDecl, PropertyRegistry, PropertyValue};
use snitchsim_core::ConfigError;

#[rstest]
#[case("16", 16)]
#[case("0x10", 16)]
#[case("0X1_0", 16)]
#[case("1_000_000", 1_000_000)]
#[case(" 42 ", 42)]
fn test_int_override_forms(#[case] raw: &str, #[case] expected: u64) {
    let mut reg = PropertyRegistry::new();
    reg.set_override("n", raw).unwrap();
    assert_eq!(reg.declare_int("n", 1, "n").unwrap(), expected);
}

#[rstest]
#[case("ten")]
#[case("0x")]
#[case("-3")]
#[case("")]
fn test_bad_int_override(#[case] raw: &str) {
    let mut reg = PropertyRegistry::new();
    reg.set_override("n", raw).unwrap();
    let err = reg.declare_int("n", 1, "n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPropertyValue { expected: "integer", .. }));
}

#[test]
fn test_default_when_no_override() {
    let mut reg = PropertyRegistry::new();
    let value = reg.declare(PropertyDecl::int("hbm_size", 0x8000_0000, "size")).unwrap();
    assert_eq!(value, PropertyValue::Int(0x8000_0000));
    assert_eq!(reg.get("hbm_size").unwrap().as_int(), Some(0x8000_0000));
}

#[test]
fn test_redeclaration_fails() {
    let mut reg = PropertyRegistry::new();
    let _ = reg.declare_int("soc/nb_cluster", 1, "clusters").unwrap();
    let err = reg.declare_int("soc/nb_cluster", 2, "clusters").unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateProperty(ref n) if n == "soc/nb_cluster"));
}

#[test]
fn test_read_before_declare_fails() {
    let reg = PropertyRegistry::new();
    assert!(matches!(
        reg.get("soc/nb_cluster"),
        Err(ConfigError::UndeclaredProperty(_))
    ));
}

#[test]
fn test_allowed_set_enforced_on_default() {
    let mut reg = PropertyRegistry::new();
    let decl = PropertyDecl::string("mode", "fast", "mode").allowed(["slow", "exact"]);
    assert!(matches!(
        reg.declare(decl),
        Err(ConfigError::NotAllowed { .. })
    ));
}

#[test]
fn test_choice_accepts_member() {
    let mut reg = PropertyRegistry::new();
    reg.set_override("hbm_type", "dramsys").unwrap();
    let value = reg
        .declare_choice("hbm_type", "simple", &["simple", "dramsys"], "memory model")
        .unwrap();
    assert_eq!(value, "dramsys");
}

#[test]
fn test_bool_cast() {
    let mut reg = PropertyRegistry::new();
    reg.set_override("atomics", "0").unwrap();
    let value = reg
        .declare(PropertyDecl::boolean("atomics", true, "atomics"))
        .unwrap();
    assert_eq!(value.as_bool(), Some(false));
    assert_eq!(reg.describe().next().unwrap().decl.cast, Cast::Bool);
}

#[test]
fn test_unknown_override_reported_by_finish() {
    let mut reg = PropertyRegistry::new();
    reg.set_override_pair("soc/nb_clusters=2").unwrap();
    let _ = reg.declare_int("soc/nb_cluster", 1, "clusters").unwrap();
    assert!(matches!(
        reg.finish(),
        Err(ConfigError::UnknownProperty(ref n)) if n == "soc/nb_clusters"
    ));
}

#[test]
fn test_override_pair_requires_equals() {
    let mut reg = PropertyRegistry::new();
    assert!(reg.set_override_pair("soc/nb_cluster").is_err());
}

#[test]
fn test_override_after_declaration_rejected() {
    let mut reg = PropertyRegistry::new();
    let _ = reg.declare_int("soc/cluster/nb_core", 9, "cores").unwrap();
    let err = reg.set_override("soc/cluster/nb_core", "4").unwrap_err();
    assert!(matches!(err, ConfigError::LateOverride(ref n) if n == "soc/cluster/nb_core"));
    assert_eq!(reg.get("soc/cluster/nb_core").unwrap().as_int(), Some(9));
    assert!(reg.describe().all(|p| !p.overridden));
    assert!(reg.finish().is_ok());
}

#[test]
fn test_late_override_leaves_merged_properties_in_sync() {
    let mut reg = PropertyRegistry::new();
    let props = ArchProperties::default().declare(&mut reg).unwrap();
    assert!(reg.set_override_pair("soc/nb_cluster=4").is_err());
    assert_eq!(
        reg.get("soc/nb_cluster").unwrap().as_int(),
        Some(props.nb_cluster as u64)
    );
}

#[test]
fn test_describe_is_sorted_by_name() {
    let mut reg = PropertyRegistry::new();
    let _ = reg.declare_int("soc/nb_cluster", 1, "clusters").unwrap();
    let _ = reg.declare_int("hbm_size", 1, "size").unwrap();
    let names: Vec<_> = reg.describe().map(|p| p.decl.name.as_str()).collect();
    assert_eq!(names, ["hbm_size", "soc/nb_cluster"]);
}
