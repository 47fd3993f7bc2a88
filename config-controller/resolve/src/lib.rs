//! Effective proxy configuration resolution.
//!
//! A sidecar proxy's configuration is authored in two places: cluster
//! operators publish per-service defaults through the configuration store,
//! and each workload declares its own settings when it registers. This crate
//! merges the two into the single effective configuration a proxy actually
//! runs with:
//!
//! - The proxy mode and mesh gateway mode fall back to the central value
//!   only when the registration leaves them unset.
//! - Transparent-proxy settings override as a whole struct, never field by
//!   field.
//! - Mutual-TLS mode, access logs, and exposed paths are centrally owned
//!   and always copied from the defaults.
//! - Envoy extensions replace wholesale when the defaults declare any.
//! - Opaque configuration mappings merge shallowly with local keys winning;
//!   the `mesh_gateway` key is decoded into its typed field instead of
//!   merging, and peered upstreams never inherit a central `protocol`.
//! - Central per-upstream overrides merge into matching local upstreams,
//!   and when the resolved mode is transparent, overrides without a local
//!   match synthesize new upstream entries in declaration order.
//!
//! The merge is a pure function: it performs no I/O, never mutates its
//! inputs, and produces a freshly allocated result, so identical inputs
//! always yield identical output. A central value that cannot be decoded as
//! its typed key fails the whole resolution rather than producing a partial
//! result.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod merge;
mod opaque;
mod upstreams;


pub use self::merge::{merge_service_config, MergeError};
