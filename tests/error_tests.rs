//! Tests for error types.
//!
//! Validates display formatting and the mapping of each variant onto its
//! error category.

use magikcri::validate::parse_stream_idle_timeout;
use magikcri::{Error, ErrorKind, RUNTIME_LINUX_V1, RUNTIME_RUNC_V2};

// =============================================================================
// Conflict Error Tests
// =============================================================================

#[test]
fn test_conflicting_definitions_display() {
    let err = Error::ConflictingDefinitions {
        key: "untrusted".to_string(),
    };
    let msg = format!("{}", err);

    assert!(
        msg.contains("conflicting definitions"),
        "should indicate conflict"
    );
    assert!(
        msg.contains("`untrusted_workload_runtime`"),
        "should name deprecated field"
    );
    assert!(
        msg.contains("`runtimes[\"untrusted\"]`"),
        "should quote the runtime key"
    );
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

// =============================================================================
// Missing Reference Error Tests
// =============================================================================

#[test]
fn test_empty_default_runtime_name_display() {
    let msg = format!("{}", Error::EmptyDefaultRuntimeName);
    assert_eq!(msg, "`default_runtime_name` is empty");
}

#[test]
fn test_missing_default_runtime_display() {
    let err = Error::MissingDefaultRuntime {
        name: "runc".to_string(),
    };
    let msg = format!("{}", err);

    assert!(
        msg.contains("no corresponding runtime configured in `runtimes`"),
        "should indicate missing runtime"
    );
    assert!(msg.contains("\"runc\""), "should include runtime name");
    assert_eq!(err.kind(), ErrorKind::MissingReference);
}

// =============================================================================
// Incompatibility Error Tests
// =============================================================================

#[test]
fn test_incompatible_option_display() {
    let err = Error::IncompatibleOption {
        option: "no_pivot",
        legacy_type: RUNTIME_LINUX_V1.to_string(),
        runtime_type: RUNTIME_RUNC_V2.to_string(),
    };
    let msg = format!("{}", err);

    assert_eq!(
        msg,
        format!(
            "`no_pivot` only works for runtime {} (default runtime is \"{}\")",
            RUNTIME_LINUX_V1, RUNTIME_RUNC_V2
        )
    );
    assert_eq!(err.kind(), ErrorKind::Incompatible);
}

// =============================================================================
// Malformed Value Error Tests
// =============================================================================

#[test]
fn test_invalid_stream_idle_timeout_display() {
    let err = parse_stream_idle_timeout("forever").unwrap_err();
    let msg = format!("{}", err);

    assert!(
        msg.contains("invalid stream idle timeout"),
        "should indicate invalid timeout"
    );
    assert!(msg.contains("forever"), "should include the value");
    assert!(
        msg.contains("expected number"),
        "should include the parse failure"
    );
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_unknown_duration_unit_display() {
    let err = parse_stream_idle_timeout("1 week").unwrap_err();
    let msg = format!("{}", err);

    assert!(msg.contains("\"1 week\""), "should include the value");
    assert!(msg.contains("unknown unit"), "should name the bad unit");
}

// =============================================================================
// Invariant Violation Error Tests
// =============================================================================

#[test]
fn test_missing_root_id_display() {
    let err = Error::MissingRootId {
        mapping: "uid",
        container_id: 1,
    };
    let msg = format!("{}", err);

    assert!(
        msg.contains("missing root id in container"),
        "should indicate missing root"
    );
    assert!(msg.contains("uid"), "should name the mapping");
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
}

#[test]
fn test_divergent_id_mappings_display() {
    let msg = format!("{}", Error::DivergentIdMappings);
    assert!(msg.contains("different mappings for uid and gid not yet supported"));
    assert_eq!(
        Error::DivergentIdMappings.kind(),
        ErrorKind::InvariantViolation
    );
}

// =============================================================================
// Trait Tests
// =============================================================================

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<Error>();
}
