use crate::{opaque, upstreams};
use trellis_config_controller_core::{
    MeshGatewayMode, ServiceConfigDefaults, ServiceInstance, TransparentProxySettings, UpstreamRef,
};

/// A centrally authored value could not be decoded as its typed key.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("invalid mesh gateway mode in central proxy configuration")]
    InvalidProxyConfig(#[source] serde_json::Error),

    #[error("invalid central configuration for upstream {upstream}")]
    InvalidUpstreamConfig {
        upstream: UpstreamRef,
        #[source]
        source: serde_json::Error,
    },
}

/// Computes the effective configuration of `instance` under the centrally
/// managed `defaults`.
///
/// Neither input is modified and the result shares no storage with either;
/// merging a registration against `ServiceConfigDefaults::default()` returns
/// it unchanged. A central value that cannot be decoded as its typed key
/// aborts the merge with no partial output.
pub fn merge_service_config(
    defaults: &ServiceConfigDefaults,
    instance: &ServiceInstance,
) -> Result<ServiceInstance, MergeError> {
    let mut resolved = instance.clone();
    let proxy = &mut resolved.proxy;

    proxy.mode = if instance.proxy.mode.is_default() {
        defaults.mode
    } else {
        instance.proxy.mode
    };
    proxy.transparent_proxy = resolve_transparent_proxy(
        defaults.transparent_proxy,
        instance.proxy.transparent_proxy,
    );

    // These fields have no local authoring path, so central is authoritative.
    proxy.mutual_tls_mode = defaults.mutual_tls_mode;
    proxy.access_logs = defaults.access_logs.clone();
    proxy.expose = defaults.expose.clone();

    if !defaults.envoy_extensions.is_empty() {
        proxy.envoy_extensions = defaults.envoy_extensions.clone();
    }

    // The service-scope opaque mapping may carry a mesh gateway mode, which
    // takes precedence over the typed central field once decoded.
    let mut central_gateway = defaults.mesh_gateway;
    if let Some(central) = defaults.proxy_config.as_ref().filter(|c| !c.is_empty()) {
        if let Some(mode) =
            opaque::extract_mesh_gateway(central).map_err(MergeError::InvalidProxyConfig)?
        {
            central_gateway = mode;
        }
        proxy.config = Some(opaque::merge_scope(
            central,
            instance.proxy.config.as_ref(),
            opaque::Scope::Service,
        ));
    }
    proxy.mesh_gateway = resolve_mesh_gateway(instance.proxy.mesh_gateway, central_gateway);

    proxy.upstreams = upstreams::resolve(defaults, instance, proxy.mode)?;

    tracing::trace!(
        service = %resolved.service,
        mode = %proxy.mode,
        upstreams = proxy.upstreams.len(),
        "resolved effective config"
    );
    Ok(resolved)
}

/// Local settings win as a whole struct; the central value applies only when
/// every local field is unset.
fn resolve_transparent_proxy(
    central: TransparentProxySettings,
    local: TransparentProxySettings,
) -> TransparentProxySettings {
    if local.is_unset() {
        central
    } else {
        local
    }
}

/// An explicitly set local mode wins outright; otherwise the central-derived
/// mode applies. Each scope resolves independently.
pub(crate) fn resolve_mesh_gateway(
    local: MeshGatewayMode,
    central: MeshGatewayMode,
) -> MeshGatewayMode {
    if local.is_default() {
        central
    } else {
        local
    }
}
