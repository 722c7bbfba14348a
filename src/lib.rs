//! # magikcri
//!
//! **CRI Plugin Configuration Migration and Validation**
//!
//! This crate decides whether a CRI plugin configuration is acceptable and
//! in what normalized shape. It accepts a configuration record that may mix
//! current and deprecated field spellings, rewrites the deprecated fields
//! into the current schema, and rejects records that are structurally
//! inconsistent. Loading the record from disk and running the plugin are
//! left to the caller.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            magikcri                                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │   loader (caller)                                                   │
//! │        │  PluginConfig (current + deprecated fields)                │
//! │        ▼                                                            │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                        Validator                            │    │
//! │  │  migrate untrusted → migrate default → name → exists →      │    │
//! │  │  legacy options → migrate auths → timeout → id mappings     │    │
//! │  └──────────────────────────────┬──────────────────────────────┘    │
//! │                                 │ asks                              │
//! │                    ┌────────────▼────────────┐                      │
//! │                    │     RuntimeCatalog      │                      │
//! │                    │  (legacy runtime type)  │                      │
//! │                    └─────────────────────────┘                      │
//! │        │                                                            │
//! │        ▼  Ok(()) → normalized record │ Err(Error) → discard record  │
//! │   plugin initialization (caller)                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Compatibility Contract
//!
//! | Deprecated field              | Current field                    | On conflict      |
//! |-------------------------------|----------------------------------|------------------|
//! | `untrusted_workload_runtime`  | `runtimes["untrusted"]`          | error            |
//! | `default_runtime`             | `runtimes["default"]`            | deprecated wins  |
//! | `registry.auths[host]`        | `registry.configs[host].auth`    | current wins     |
//!
//! `systemd_cgroup`, `no_pivot`, `runtime_engine` and `runtime_root` are
//! not migrated. They stay legal only while the default runtime is the
//! legacy v1 linux shim.
//!
//! # Concurrency
//!
//! Validation is synchronous and takes `&mut PluginConfig`, so exclusive
//! access is enforced by the borrow checker. Validate before sharing the
//! record.
//!
//! # Example
//!
//! ```rust
//! use magikcri::{PluginConfig, Runtime, RUNTIME_RUNC_V2, validate_plugin_config};
//!
//! let mut config = PluginConfig::default();
//! config.containerd_config.default_runtime_name = "runc".to_string();
//! config
//!     .containerd_config
//!     .runtimes
//!     .insert("runc".to_string(), Runtime::new(RUNTIME_RUNC_V2));
//! config.stream_idle_timeout = "30s".to_string();
//!
//! validate_plugin_config(&mut config)?;
//! # Ok::<(), magikcri::Error>(())
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod validate;

// Re-exports
pub use catalog::{RuntimeCatalog, StaticCatalog};
pub use config::{
    AuthConfig, ContainerdConfig, LinuxIdMapping, Mirror, PluginConfig, Registry, RegistryConfig,
    Runtime, TlsConfig,
};
pub use constants::*;
pub use error::{Error, ErrorKind, Result};
pub use validate::{Rule, RuleFn, Validator, RULES, validate_plugin_config};
