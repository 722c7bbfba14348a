//! Tests for constants module.
//!
//! Pins the identifiers that appear in operator-facing messages and in
//! migrated configurations.

use magikcri::*;

// =============================================================================
// Runtime Type Tests
// =============================================================================

#[test]
fn test_runtime_type_identifiers() {
    assert_eq!(RUNTIME_LINUX_V1, "io.containerd.runtime.v1.linux");
    assert_eq!(RUNTIME_RUNC_V1, "io.containerd.runc.v1");
    assert_eq!(RUNTIME_RUNC_V2, "io.containerd.runc.v2");
}

#[test]
fn test_runtime_types_distinct() {
    let types = [RUNTIME_LINUX_V1, RUNTIME_RUNC_V1, RUNTIME_RUNC_V2];
    for (i, a) in types.iter().enumerate() {
        for b in &types[i + 1..] {
            assert_ne!(a, b, "runtime types must be distinct");
        }
    }
}

#[test]
fn test_default_catalog_uses_linux_v1() {
    let catalog = StaticCatalog::default();
    assert_eq!(catalog.legacy_runtime_type(), RUNTIME_LINUX_V1);
    assert!(catalog.is_legacy(RUNTIME_LINUX_V1));
    assert!(!catalog.is_legacy(RUNTIME_RUNC_V2));
    assert!(!catalog.is_legacy(""));
}

// =============================================================================
// Runtime Key Tests
// =============================================================================

#[test]
fn test_migration_keys() {
    assert_eq!(RUNTIME_DEFAULT, "default");
    assert_eq!(RUNTIME_UNTRUSTED, "untrusted");
    assert_ne!(RUNTIME_DEFAULT, RUNTIME_UNTRUSTED);
}

#[test]
fn test_container_root_id() {
    assert_eq!(CONTAINER_ROOT_ID, 0);
}
