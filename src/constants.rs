//! # CRI Plugin Configuration Constants
//!
//! Runtime type identifiers and the well-known runtime keys that the
//! migrations write into `runtimes`. These are the **single source of truth**
//! for the strings that appear in operator-facing error messages.
//!
//! ## Cross-References
//!
//! - [`crate::catalog`]: Uses [`RUNTIME_LINUX_V1`] as the default legacy type
//! - [`crate::validate`]: Uses [`RUNTIME_DEFAULT`] and [`RUNTIME_UNTRUSTED`]
//!   as migration targets

// =============================================================================
// Runtime Type Identifiers
// =============================================================================
//
// The `runtime_type` field of a runtime entry names the shim implementation.
// Only the v1 linux shim understands the deprecated scalar options
// (`systemd_cgroup`, `no_pivot`, `runtime_engine`, `runtime_root`).
// =============================================================================

/// Legacy v1 linux shim.
///
/// The only runtime type for which `systemd_cgroup`, `no_pivot`,
/// `runtime_engine` and `runtime_root` are meaningful.
pub const RUNTIME_LINUX_V1: &str = "io.containerd.runtime.v1.linux";

/// runc v1 shim.
pub const RUNTIME_RUNC_V1: &str = "io.containerd.runc.v1";

/// runc v2 shim. Current default for new installations.
pub const RUNTIME_RUNC_V2: &str = "io.containerd.runc.v2";

// =============================================================================
// Well-Known Runtime Keys
// =============================================================================

/// Key the deprecated `default_runtime` block is migrated to.
pub const RUNTIME_DEFAULT: &str = "default";

/// Key the deprecated `untrusted_workload_runtime` block is migrated to.
pub const RUNTIME_UNTRUSTED: &str = "untrusted";

// =============================================================================
// ID Mapping
// =============================================================================

/// Container-side id every node-wide UID/GID mapping must start at.
///
/// A mapping that does not cover container id 0 leaves root unmapped inside
/// the user namespace.
pub const CONTAINER_ROOT_ID: u32 = 0;
