//! # CRI Plugin Configuration Model
//!
//! In-memory shape of the CRI plugin configuration as handed over by the
//! loader. The model mixes the current schema with the deprecated fields of
//! older releases; [`crate::validate`] migrates the latter into the former.
//!
//! ## Schema Generations
//!
//! ```text
//! deprecated                          current
//! ─────────────────────────────────   ──────────────────────────────────────
//! containerd.default_runtime        → containerd.runtimes["default"]
//! containerd.untrusted_workload_…   → containerd.runtimes["untrusted"]
//! registry.auths[host]              → registry.configs[host].auth
//! ```
//!
//! All records use `#[serde(default)]`, so any field may be omitted by the
//! loader. Field names on the wire follow the historical TOML keys.
//!
//! ## Ownership
//!
//! The record is owned by the caller. Validation mutates it in place and
//! requires exclusive access; publish it to other readers only after
//! [`crate::validate_plugin_config`] has returned `Ok`.

use crate::error::Result;
use crate::validate::parse_stream_idle_timeout;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Top-level CRI plugin settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Runtime selection block.
    #[serde(rename = "containerd")]
    pub containerd_config: ContainerdConfig,
    /// Registry credentials and endpoints.
    pub registry: Registry,
    /// Idle timeout of streaming connections, as a textual duration.
    pub stream_idle_timeout: String,
    /// Deprecated: use the systemd cgroup driver (legacy runtime only).
    pub systemd_cgroup: bool,
    /// Node-wide UID mapping for user-namespaced pods.
    pub node_wide_uid_mapping: LinuxIdMapping,
    /// Node-wide GID mapping for user-namespaced pods.
    pub node_wide_gid_mapping: LinuxIdMapping,
}

impl PluginConfig {
    /// Returns the runtime registered under `default_runtime_name`, if any.
    pub fn default_runtime(&self) -> Option<&Runtime> {
        self.containerd_config
            .runtimes
            .get(&self.containerd_config.default_runtime_name)
    }

    /// Parses `stream_idle_timeout`.
    ///
    /// Returns `Ok(None)` when the field is empty. The textual value is kept
    /// in the record; consumers call this after validation has succeeded.
    pub fn stream_idle_timeout(&self) -> Result<Option<Duration>> {
        if self.stream_idle_timeout.is_empty() {
            return Ok(None);
        }
        parse_stream_idle_timeout(&self.stream_idle_timeout).map(Some)
    }
}

/// Runtime selection block of the plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerdConfig {
    /// Snapshotter used for container filesystems.
    pub snapshotter: String,
    /// Key into `runtimes` of the runtime used when a pod names none.
    pub default_runtime_name: String,
    /// Deprecated: single default runtime, superseded by `runtimes["default"]`.
    pub default_runtime: Runtime,
    /// Deprecated: untrusted runtime, superseded by `runtimes["untrusted"]`.
    pub untrusted_workload_runtime: Runtime,
    /// Named runtimes.
    pub runtimes: HashMap<String, Runtime>,
    /// Deprecated: disable pivot_root (legacy runtime only).
    pub no_pivot: bool,
}

/// A runtime handler entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Runtime {
    /// Runtime implementation, e.g. `io.containerd.runc.v2`.
    pub runtime_type: String,
    /// Deprecated: runtime binary (legacy runtime only).
    #[serde(rename = "runtime_engine")]
    pub engine: String,
    /// Deprecated: runtime state root (legacy runtime only).
    #[serde(rename = "runtime_root")]
    pub root: String,
    /// Skip host device passthrough for privileged containers.
    pub privileged_without_host_devices: bool,
    /// Pod annotations forwarded to the runtime.
    pub pod_annotations: Vec<String>,
    /// Container annotations forwarded to the runtime.
    pub container_annotations: Vec<String>,
}

impl Runtime {
    /// Creates a runtime entry of the given type.
    pub fn new(runtime_type: impl Into<String>) -> Self {
        Self {
            runtime_type: runtime_type.into(),
            ..Self::default()
        }
    }

    /// A runtime block counts as set once its type is non-empty.
    pub fn is_configured(&self) -> bool {
        !self.runtime_type.is_empty()
    }
}

/// Registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registry {
    /// Mirror endpoints per registry host.
    pub mirrors: HashMap<String, Mirror>,
    /// Per-host configuration.
    pub configs: HashMap<String, RegistryConfig>,
    /// Deprecated: per-host credentials, superseded by `configs[host].auth`.
    ///
    /// Kept after migration for readers of the old field.
    pub auths: HashMap<String, AuthConfig>,
}

/// Mirror endpoints for one registry host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mirror {
    /// Endpoints tried in order.
    pub endpoints: Vec<String>,
}

/// Per-host registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Credentials for the host.
    pub auth: Option<AuthConfig>,
    /// TLS settings for the host.
    pub tls: Option<TlsConfig>,
}

/// Registry credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    /// Base64 `username:password`.
    pub auth: String,
    /// Bearer token.
    pub identity_token: String,
}

/// Registry TLS settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub insecure_skip_verify: bool,
    pub ca_file: String,
    pub cert_file: String,
    pub key_file: String,
}

/// A single contiguous ID range mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LinuxIdMapping {
    /// First id inside the container.
    pub container_id: u32,
    /// First id on the host.
    pub host_id: u32,
    /// Length of the range.
    pub size: u32,
}

impl LinuxIdMapping {
    pub fn new(container_id: u32, host_id: u32, size: u32) -> Self {
        Self {
            container_id,
            host_id,
            size,
        }
    }

    /// A zero-sized mapping is treated as absent.
    pub fn is_configured(&self) -> bool {
        self.size != 0
    }
}
