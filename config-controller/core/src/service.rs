use crate::{
    proxy::{
        AccessLogsConfig, EnvoyExtension, ExposeConfig, MeshGatewayMode, MutualTlsMode,
        OpaqueConfig, ProxyMode, TransparentProxySettings,
    },
    upstream::Upstream,
};
use serde::{Deserialize, Serialize};

/// One registered workload and its sidecar proxy, as declared locally.
///
/// The same shape carries the resolved output: resolution clones the
/// instance and rewrites the embedded [`ProxyConfig`] field by field, so the
/// result never shares storage with either input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInstance {
    pub id: String,
    pub service: String,
    pub proxy: ProxyConfig,
}

/// The sidecar proxy record embedded in a service registration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// The service this proxy fronts.
    pub destination_service_name: String,
    pub destination_service_id: String,

    pub mode: ProxyMode,
    pub transparent_proxy: TransparentProxySettings,
    pub config: Option<OpaqueConfig>,

    // Centrally owned; populated only on resolved output.
    pub mutual_tls_mode: MutualTlsMode,
    pub access_logs: AccessLogsConfig,
    pub expose: ExposeConfig,

    pub mesh_gateway: MeshGatewayMode,
    pub envoy_extensions: Vec<EnvoyExtension>,
    pub upstreams: Vec<Upstream>,
}
