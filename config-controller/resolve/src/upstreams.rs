use crate::{merge, merge::MergeError, opaque};
use ahash::AHashSet;
use indexmap::IndexMap;
use trellis_config_controller_core::{
    MeshGatewayMode, OpaqueConfig, ProxyMode, ServiceConfigDefaults, ServiceInstance, Upstream,
    UpstreamConfigView, UpstreamRef,
};

/// A central override decoded once up front: the raw mapping retained for
/// the opaque merge plus the gateway mode from its typed view.
struct Override<'c> {
    config: &'c OpaqueConfig,
    gateway: MeshGatewayMode,
}

/// Merges central per-upstream overrides into the local upstream list.
///
/// Matched entries keep their identity, bind port, and declaration order.
/// When the resolved proxy mode is transparent, overrides without a local
/// match synthesize new entries, appended after the locals in central
/// declaration order.
pub(crate) fn resolve(
    defaults: &ServiceConfigDefaults,
    instance: &ServiceInstance,
    resolved_mode: ProxyMode,
) -> Result<Vec<Upstream>, MergeError> {
    if defaults.upstream_configs.is_empty() {
        return Ok(instance.proxy.upstreams.clone());
    }

    // Decode every override before merging anything so a malformed value
    // aborts the resolution with no partial output. The index preserves
    // declaration order for synthesis.
    let mut overrides = IndexMap::new();
    for entry in &defaults.upstream_configs {
        let reference = entry.upstream.normalize();
        let view: UpstreamConfigView =
            serde_json::from_value(serde_json::Value::Object(entry.config.clone())).map_err(
                |source| MergeError::InvalidUpstreamConfig {
                    upstream: reference.clone(),
                    source,
                },
            )?;
        overrides.insert(
            reference,
            Override {
                config: &entry.config,
                gateway: view.mesh_gateway.mode,
            },
        );
    }

    let mut matched = AHashSet::with_capacity(instance.proxy.upstreams.len());
    let mut resolved = Vec::with_capacity(instance.proxy.upstreams.len() + overrides.len());
    for upstream in &instance.proxy.upstreams {
        let reference = upstream.upstream_ref();
        let mut upstream = upstream.clone();
        if let Some(o) = overrides.get(&reference) {
            upstream.config = Some(opaque::merge_scope(
                o.config,
                upstream.config.as_ref(),
                opaque::Scope::Upstream {
                    peered: reference.peer.is_some(),
                },
            ));
            upstream.mesh_gateway = merge::resolve_mesh_gateway(upstream.mesh_gateway, o.gateway);
            matched.insert(reference);
        }
        resolved.push(upstream);
    }

    // In transparent mode, central overrides apply even to destinations the
    // registration never declared.
    if resolved_mode == ProxyMode::Transparent {
        for (reference, o) in &overrides {
            if matched.contains(reference) {
                continue;
            }
            tracing::debug!(upstream = %reference, "synthesizing centrally configured upstream");
            resolved.push(synthesize(reference, o));
        }
    }

    Ok(resolved)
}

fn synthesize(reference: &UpstreamRef, o: &Override<'_>) -> Upstream {
    let config = opaque::merge_scope(
        o.config,
        None,
        opaque::Scope::Upstream {
            peered: reference.peer.is_some(),
        },
    );
    Upstream {
        destination_peer: reference.peer.clone(),
        destination_name: reference.name.clone(),
        destination_namespace: Some(reference.namespace.clone()),
        destination_partition: Some(reference.partition.clone()),
        local_bind_port: None,
        config: Some(config),
        mesh_gateway: o.gateway,
        centrally_configured: true,
    }
}
