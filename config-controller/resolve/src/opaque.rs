use trellis_config_controller_core::{MeshGatewayConfig, MeshGatewayMode, OpaqueConfig};

/// Opaque keys with typed meaning in the resolved output.
const MESH_GATEWAY_KEY: &str = "mesh_gateway";
const PROTOCOL_KEY: &str = "protocol";

/// Which configuration scope an opaque mapping belongs to. Peered upstreams
/// never inherit a centrally defaulted protocol across the trust boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Scope {
    Service,
    Upstream { peered: bool },
}

impl Scope {
    fn inherits(self, key: &str) -> bool {
        match self {
            Scope::Upstream { peered: true } => key != PROTOCOL_KEY,
            _ => true,
        }
    }
}

/// Decodes the mode carried by a central mapping's `mesh_gateway` key, if
/// the key is present.
pub(crate) fn extract_mesh_gateway(
    central: &OpaqueConfig,
) -> Result<Option<MeshGatewayMode>, serde_json::Error> {
    central
        .get(MESH_GATEWAY_KEY)
        .map(|value| {
            serde_json::from_value::<MeshGatewayConfig>(value.clone()).map(|config| config.mode)
        })
        .transpose()
}

/// Shallow-merges a central mapping under a local one.
///
/// Local keys always win and nested values copy wholesale. The
/// `mesh_gateway` key never survives into the result: the central one is
/// decoded separately (see [`extract_mesh_gateway`]) and a local one has no
/// meaning beside the typed field. The result is always a concrete mapping,
/// even when both layers were empty.
pub(crate) fn merge_scope(
    central: &OpaqueConfig,
    local: Option<&OpaqueConfig>,
    scope: Scope,
) -> OpaqueConfig {
    let mut merged = local.cloned().unwrap_or_default();
    for (key, value) in central {
        if key.as_str() == MESH_GATEWAY_KEY || !scope.inherits(key.as_str()) {
            continue;
        }
        if !merged.contains_key(key.as_str()) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged.remove(MESH_GATEWAY_KEY);
    merged
}
