#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod defaults;
pub mod discover;
mod proxy;
mod service;
mod upstream;

pub use self::{
    defaults::{ServiceConfigDefaults, UpstreamConfigOverride},
    proxy::{
        AccessLogSink, AccessLogsConfig, EnvoyExtension, ExposeConfig, ExposePath, ExposeProtocol,
        MeshGatewayMode, MutualTlsMode, OpaqueConfig, ProxyMode, TransparentProxySettings,
    },
    service::{ProxyConfig, ServiceInstance},
    upstream::{
        MeshGatewayConfig, PassiveHealthCheck, Upstream, UpstreamConfigView, UpstreamLimits,
        UpstreamRef, DEFAULT_TENANCY,
    },
};
