use crate::{
    proxy::{
        AccessLogsConfig, EnvoyExtension, ExposeConfig, MeshGatewayMode, MutualTlsMode,
        OpaqueConfig, ProxyMode, TransparentProxySettings,
    },
    upstream::UpstreamRef,
};
use serde::{Deserialize, Serialize};

/// The centrally managed defaults resolved for one service, as assembled by
/// the configuration store.
///
/// Merging a registration against `ServiceConfigDefaults::default()` yields
/// the registration back: the centrally owned fields a registration cannot
/// author stay at their defaults and everything else is untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfigDefaults {
    pub mode: ProxyMode,
    pub transparent_proxy: TransparentProxySettings,

    /// Opaque proxy configuration merged key-by-key under the local mapping.
    pub proxy_config: Option<OpaqueConfig>,

    pub mutual_tls_mode: MutualTlsMode,
    pub access_logs: AccessLogsConfig,
    pub expose: ExposeConfig,
    pub mesh_gateway: MeshGatewayMode,
    pub envoy_extensions: Vec<EnvoyExtension>,

    /// Per-upstream opaque overrides, unique by identity. Declaration order
    /// is preserved into synthesized upstream entries.
    pub upstream_configs: Vec<UpstreamConfigOverride>,
}

/// An opaque configuration override scoped to one upstream identity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfigOverride {
    pub upstream: UpstreamRef,
    pub config: OpaqueConfig,
}
