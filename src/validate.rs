//! # Configuration Migration and Validation
//!
//! Normalizes a [`PluginConfig`] in place and rejects inconsistent ones.
//!
//! ## Rule Pipeline
//!
//! Validation is an ordered list of [`Rule`]s. Each rule gets mutable access
//! to the record and either succeeds or returns the error that aborts the
//! whole pipeline:
//!
//! ```text
//!  1. untrusted_workload_runtime   migrate → runtimes["untrusted"]   (conflict = error)
//!  2. default_runtime              migrate → runtimes["default"]     (overwrites)
//!  3. default_runtime_name         must be non-empty
//!  4. runtimes[default_name]       must exist
//!  5. legacy options               systemd_cgroup / no_pivot / engine / root
//!                                  require the legacy runtime type
//!  6. registry.auths               migrate → registry.configs[host].auth (no overwrite)
//!  7. stream_idle_timeout          must parse as a duration
//!  8. node-wide id mappings        root id 0, uid == gid
//! ```
//!
//! The order is load-bearing: rule 2 must land before rules 3 and 4 look at
//! `default_runtime_name`, and rule 5 relies on rule 4 having found the
//! default runtime.
//!
//! ## Failure Semantics
//!
//! The first failing rule stops the pipeline. Migrations of earlier rules
//! may already have been applied; a rejected record must be discarded.
//!
//! ## Example
//!
//! ```rust
//! use magikcri::{PluginConfig, Runtime, validate_plugin_config};
//!
//! let mut config = PluginConfig::default();
//! config.containerd_config.default_runtime = Runtime::new("io.containerd.runc.v2");
//!
//! validate_plugin_config(&mut config).unwrap();
//! assert_eq!(config.containerd_config.default_runtime_name, "default");
//! ```

use crate::catalog::{RuntimeCatalog, StaticCatalog};
use crate::config::{PluginConfig, RegistryConfig};
use crate::constants::{CONTAINER_ROOT_ID, RUNTIME_DEFAULT, RUNTIME_UNTRUSTED};
use crate::error::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Signature shared by all validation rules.
pub type RuleFn = fn(&mut PluginConfig, &dyn RuntimeCatalog) -> Result<()>;

/// A named step of the validation pipeline.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// The check or migration.
    pub apply: RuleFn,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The validation pipeline, in execution order.
pub static RULES: [Rule; 8] = [
    Rule {
        name: "untrusted_workload_runtime",
        apply: migrate_untrusted_workload_runtime,
    },
    Rule {
        name: "default_runtime",
        apply: migrate_default_runtime,
    },
    Rule {
        name: "default_runtime_name",
        apply: check_default_runtime_name,
    },
    Rule {
        name: "default_runtime_exists",
        apply: check_default_runtime_exists,
    },
    Rule {
        name: "legacy_options",
        apply: check_legacy_options,
    },
    Rule {
        name: "registry_auths",
        apply: migrate_registry_auths,
    },
    Rule {
        name: "stream_idle_timeout",
        apply: check_stream_idle_timeout,
    },
    Rule {
        name: "node_wide_id_mappings",
        apply: check_node_wide_id_mappings,
    },
];

/// Runs the rule pipeline against plugin configurations.
#[derive(Clone)]
pub struct Validator {
    catalog: Arc<dyn RuntimeCatalog>,
}

impl Validator {
    /// Creates a validator that consults `catalog` for the legacy runtime type.
    pub fn new(catalog: Arc<dyn RuntimeCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns the rules in execution order.
    pub fn rules(&self) -> &'static [Rule] {
        &RULES
    }

    /// Migrates deprecated fields of `config` and validates the result.
    ///
    /// Stops at the first failing rule. On error the record is left in an
    /// unspecified, partially migrated state.
    pub fn validate(&self, config: &mut PluginConfig) -> Result<()> {
        for rule in self.rules() {
            debug!("Running config rule: {}", rule.name);
            (rule.apply)(config, self.catalog.as_ref())?;
        }

        info!(
            "Plugin config validated (default runtime '{}', {} runtimes)",
            config.containerd_config.default_runtime_name,
            config.containerd_config.runtimes.len()
        );
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Arc::new(StaticCatalog::default()))
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("legacy_runtime_type", &self.catalog.legacy_runtime_type())
            .finish()
    }
}

/// Validates `config` against the built-in runtime catalog.
pub fn validate_plugin_config(config: &mut PluginConfig) -> Result<()> {
    Validator::default().validate(config)
}

// =============================================================================
// Runtime Migrations
// =============================================================================

/// Moves `untrusted_workload_runtime` into `runtimes["untrusted"]`.
///
/// Fails if both are set; the two are never merged.
pub fn migrate_untrusted_workload_runtime(
    config: &mut PluginConfig,
    _catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    let containerd = &mut config.containerd_config;
    if !containerd.untrusted_workload_runtime.is_configured() {
        return Ok(());
    }

    warn!(
        "`untrusted_workload_runtime` is deprecated, please use `{}` runtime in `runtimes` instead",
        RUNTIME_UNTRUSTED
    );
    if containerd.runtimes.contains_key(RUNTIME_UNTRUSTED) {
        return Err(Error::ConflictingDefinitions {
            key: RUNTIME_UNTRUSTED.to_string(),
        });
    }
    containerd.runtimes.insert(
        RUNTIME_UNTRUSTED.to_string(),
        containerd.untrusted_workload_runtime.clone(),
    );
    Ok(())
}

/// Moves `default_runtime` into `runtimes["default"]` and points
/// `default_runtime_name` at it.
///
/// The deprecated block wins over whatever the current schema says.
pub fn migrate_default_runtime(
    config: &mut PluginConfig,
    _catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    let containerd = &mut config.containerd_config;
    if !containerd.default_runtime.is_configured() {
        return Ok(());
    }

    warn!(
        "`default_runtime` is deprecated, please use `default_runtime_name` to reference the default configuration you have defined in `runtimes`"
    );
    containerd.default_runtime_name = RUNTIME_DEFAULT.to_string();
    containerd
        .runtimes
        .insert(RUNTIME_DEFAULT.to_string(), containerd.default_runtime.clone());
    Ok(())
}

// =============================================================================
// Runtime Checks
// =============================================================================

/// Rejects an empty `default_runtime_name`.
pub fn check_default_runtime_name(
    config: &mut PluginConfig,
    _catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    if config.containerd_config.default_runtime_name.is_empty() {
        return Err(Error::EmptyDefaultRuntimeName);
    }
    Ok(())
}

/// Rejects a `default_runtime_name` with no entry in `runtimes`.
pub fn check_default_runtime_exists(
    config: &mut PluginConfig,
    _catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    if config.default_runtime().is_none() {
        return Err(Error::MissingDefaultRuntime {
            name: config.containerd_config.default_runtime_name.clone(),
        });
    }
    Ok(())
}

/// Gates the deprecated scalar options on the default runtime's type.
///
/// Only the runtime named by `default_runtime_name` is inspected. The
/// options are left in place; under the legacy runtime they stay valid.
pub fn check_legacy_options(
    config: &mut PluginConfig,
    catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    let runtime = config
        .default_runtime()
        .ok_or_else(|| Error::MissingDefaultRuntime {
            name: config.containerd_config.default_runtime_name.clone(),
        })?;

    let options = [
        ("systemd_cgroup", config.systemd_cgroup),
        ("no_pivot", config.containerd_config.no_pivot),
        ("runtime_engine", !runtime.engine.is_empty()),
        ("runtime_root", !runtime.root.is_empty()),
    ];

    for (option, set) in options {
        if !set {
            continue;
        }
        if !catalog.is_legacy(&runtime.runtime_type) {
            return Err(Error::IncompatibleOption {
                option,
                legacy_type: catalog.legacy_runtime_type().to_string(),
                runtime_type: runtime.runtime_type.clone(),
            });
        }
        warn!(
            "`{}` is deprecated, please use runtime `options` instead",
            option
        );
    }
    Ok(())
}

// =============================================================================
// Registry Migration
// =============================================================================

/// Copies each `registry.auths[host]` into `registry.configs[host].auth`.
///
/// Existing `configs` entries are never touched, and `auths` is kept as is.
pub fn migrate_registry_auths(
    config: &mut PluginConfig,
    _catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    let registry = &mut config.registry;
    if registry.auths.is_empty() {
        return Ok(());
    }

    warn!("`registry.auths` is deprecated, please use `registry.configs` instead");
    for (host, auth) in &registry.auths {
        if registry.configs.contains_key(host) {
            debug!("Registry config for {} already present, keeping it", host);
            continue;
        }
        registry.configs.insert(
            host.clone(),
            RegistryConfig {
                auth: Some(auth.clone()),
                ..RegistryConfig::default()
            },
        );
    }
    Ok(())
}

// =============================================================================
// Value Checks
// =============================================================================

/// Units accepted in a stream idle timeout, with the spelling passed on to
/// `humantime`.
const DURATION_UNITS: [(&str, &str); 8] = [
    ("ns", "ns"),
    ("us", "us"),
    ("µs", "us"),
    ("μs", "us"),
    ("ms", "ms"),
    ("s", "s"),
    ("m", "m"),
    ("h", "h"),
];

/// Parses a stream idle timeout such as `"4h0m0s"`, `"1.5h"` or `"300ms"`.
///
/// Accepts the duration grammar of the plugin's historical config files: an
/// optional sign, then one or more `<decimal><unit>` groups with no spaces,
/// or a bare `"0"`. Day, week and year units are rejected. `humantime`
/// computes the value of the checked, normalized string. Negative timeouts
/// are valid and collapse to zero.
pub fn parse_stream_idle_timeout(value: &str) -> Result<Duration> {
    let invalid = |reason: String| Error::InvalidStreamIdleTimeout {
        value: value.to_string(),
        reason,
    };

    let negative = value.starts_with('-');
    let unsigned = value
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(value);
    if unsigned == "0" {
        return Ok(Duration::ZERO);
    }
    if unsigned.is_empty() {
        return Err(invalid("empty duration".to_string()));
    }

    let mut normalized = String::with_capacity(unsigned.len());
    let mut rest = unsigned;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        if !number.chars().any(|c| c.is_ascii_digit()) || number.matches('.').count() > 1 {
            return Err(invalid(format!("expected number at {:?}", rest)));
        }
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        if unit.is_empty() {
            return Err(invalid(format!("missing unit after {:?}", number)));
        }
        let (_, normalized_unit) = DURATION_UNITS
            .iter()
            .find(|(accepted, _)| *accepted == unit)
            .ok_or_else(|| invalid(format!("unknown unit {:?}", unit)))?;
        rest = &rest[unit_len..];

        normalized.push_str(number);
        normalized.push_str(normalized_unit);
    }

    let duration = humantime::parse_duration(&normalized).map_err(|e| invalid(e.to_string()))?;
    if negative {
        return Ok(Duration::ZERO);
    }
    Ok(duration)
}

/// Rejects an unparsable `stream_idle_timeout`. The field keeps its text.
pub fn check_stream_idle_timeout(
    config: &mut PluginConfig,
    _catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    if config.stream_idle_timeout.is_empty() {
        return Ok(());
    }
    parse_stream_idle_timeout(&config.stream_idle_timeout).map(|_| ())
}

/// Enforces root id 0 and uid/gid agreement on node-wide mappings.
///
/// Zero-sized mappings count as unset and are skipped.
pub fn check_node_wide_id_mappings(
    config: &mut PluginConfig,
    _catalog: &dyn RuntimeCatalog,
) -> Result<()> {
    let uid = config.node_wide_uid_mapping;
    let gid = config.node_wide_gid_mapping;
    if !uid.is_configured() && !gid.is_configured() {
        return Ok(());
    }

    for (mapping, ids) in [("uid", uid), ("gid", gid)] {
        if ids.is_configured() && ids.container_id != CONTAINER_ROOT_ID {
            return Err(Error::MissingRootId {
                mapping,
                container_id: ids.container_id,
            });
        }
    }

    if uid.is_configured() && gid.is_configured() && uid != gid {
        return Err(Error::DivergentIdMappings);
    }
    Ok(())
}
