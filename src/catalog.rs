//! Runtime type catalog.
//!
//! The validator does not decide which runtime types are legacy; it asks a
//! [`RuntimeCatalog`]. The plugin wires in the catalog of the runtime shims
//! it was built with, tests may substitute their own.

use crate::constants::RUNTIME_LINUX_V1;

/// Source of truth for the legacy runtime type.
pub trait RuntimeCatalog: Send + Sync {
    /// Identifier of the runtime type that still honors the deprecated
    /// scalar options.
    fn legacy_runtime_type(&self) -> &str;

    /// Returns true if `runtime_type` is the legacy runtime type.
    fn is_legacy(&self, runtime_type: &str) -> bool {
        runtime_type == self.legacy_runtime_type()
    }
}

/// Catalog with a fixed legacy runtime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCatalog {
    legacy_runtime_type: String,
}

impl StaticCatalog {
    /// Creates a catalog treating `legacy_runtime_type` as the legacy type.
    pub fn new(legacy_runtime_type: impl Into<String>) -> Self {
        Self {
            legacy_runtime_type: legacy_runtime_type.into(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(RUNTIME_LINUX_V1)
    }
}

impl RuntimeCatalog for StaticCatalog {
    fn legacy_runtime_type(&self) -> &str {
        &self.legacy_runtime_type
    }
}
