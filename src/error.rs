//! Error types for configuration migration and validation.

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that reject a plugin configuration.
///
/// Every variant is terminal: a rejected configuration must block plugin
/// initialization and the record must not be reused.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// A deprecated block and its current replacement are both set.
    #[error(
        "conflicting definitions: configuration includes both `untrusted_workload_runtime` and `runtimes[{key:?}]`"
    )]
    ConflictingDefinitions { key: String },

    // =========================================================================
    // Missing Reference Errors
    // =========================================================================
    /// `default_runtime_name` is unset after migration.
    #[error("`default_runtime_name` is empty")]
    EmptyDefaultRuntimeName,

    /// `default_runtime_name` does not name an entry in `runtimes`.
    #[error(
        "no corresponding runtime configured in `runtimes` for `default_runtime_name` {name:?}"
    )]
    MissingDefaultRuntime { name: String },

    // =========================================================================
    // Incompatibility Errors
    // =========================================================================
    /// A legacy option is set but the default runtime is not the legacy type.
    #[error("`{option}` only works for runtime {legacy_type} (default runtime is {runtime_type:?})")]
    IncompatibleOption {
        option: &'static str,
        legacy_type: String,
        runtime_type: String,
    },

    // =========================================================================
    // Malformed Value Errors
    // =========================================================================
    /// `stream_idle_timeout` is not a duration.
    #[error("invalid stream idle timeout {value:?}: {reason}")]
    InvalidStreamIdleTimeout { value: String, reason: String },

    // =========================================================================
    // Invariant Violation Errors
    // =========================================================================
    /// A node-wide mapping does not start at container id 0.
    #[error("missing root id in container {mapping} mapping: container_id is {container_id}")]
    MissingRootId {
        mapping: &'static str,
        container_id: u32,
    },

    /// UID and GID node-wide mappings differ.
    #[error("different mappings for uid and gid not yet supported")]
    DivergentIdMappings,
}

/// Coarse classification of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Two schema paths define the same setting.
    Conflict,
    /// A required key is absent.
    MissingReference,
    /// A legacy option is set for a runtime that ignores it.
    Incompatible,
    /// A textual field failed to parse.
    Malformed,
    /// A cross-field invariant is broken.
    InvariantViolation,
}

impl ErrorKind {
    /// Validation failures are never retried; the operator must fix the file.
    pub fn is_retryable(self) -> bool {
        false
    }
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConflictingDefinitions { .. } => ErrorKind::Conflict,
            Error::EmptyDefaultRuntimeName | Error::MissingDefaultRuntime { .. } => {
                ErrorKind::MissingReference
            }
            Error::IncompatibleOption { .. } => ErrorKind::Incompatible,
            Error::InvalidStreamIdleTimeout { .. } => ErrorKind::Malformed,
            Error::MissingRootId { .. } | Error::DivergentIdMappings => {
                ErrorKind::InvariantViolation
            }
        }
    }
}
