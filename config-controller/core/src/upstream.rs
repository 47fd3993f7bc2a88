use crate::proxy::{MeshGatewayMode, OpaqueConfig};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU16;

/// The tenancy assumed when a namespace or partition is left blank.
pub const DEFAULT_TENANCY: &str = "default";

/// A single upstream destination declared on a local proxy registration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upstream {
    /// Set when the destination lives in a peered cluster.
    pub destination_peer: Option<String>,
    pub destination_name: String,
    pub destination_namespace: Option<String>,
    pub destination_partition: Option<String>,

    /// The loopback port the application dials to reach this destination.
    pub local_bind_port: Option<NonZeroU16>,

    pub config: Option<OpaqueConfig>,
    pub mesh_gateway: MeshGatewayMode,

    /// True only for entries synthesized from central defaults; locally
    /// declared entries keep this false even when fully overridden.
    pub centrally_configured: bool,
}

/// The identity of an upstream destination, used to match local declarations
/// against central overrides.
///
/// Equality requires all four fields to match; a blank peer means the local
/// cluster. Construct through [`UpstreamRef::normalized`] so that blank
/// tenancy fields compare equal to explicit default tenancy.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamRef {
    pub peer: Option<String>,
    pub name: String,
    pub namespace: String,
    pub partition: String,
}

/// The upstream configuration keys the controller understands.
///
/// Central override mappings are decoded through this view before any entry
/// is merged, so one malformed value aborts the whole resolution up front.
/// Keys outside this set flow through the opaque merge untouched. Nested
/// field names accept both their canonical spelling and snake_case.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpstreamConfigView {
    pub protocol: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub balance_outbound_connections: Option<String>,
    pub mesh_gateway: MeshGatewayConfig,
    pub limits: Option<UpstreamLimits>,
    pub passive_health_check: Option<PassiveHealthCheck>,
}

/// The decoded form of a `mesh_gateway` opaque value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MeshGatewayConfig {
    #[serde(alias = "Mode")]
    pub mode: MeshGatewayMode,
}

/// Connection-pool ceilings for one upstream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpstreamLimits {
    #[serde(alias = "MaxConnections")]
    pub max_connections: Option<u32>,
    #[serde(alias = "MaxPendingRequests")]
    pub max_pending_requests: Option<u32>,
    #[serde(alias = "MaxConcurrentRequests")]
    pub max_concurrent_requests: Option<u32>,
}

/// Outlier-detection settings for one upstream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PassiveHealthCheck {
    /// Nanoseconds between ejection sweeps.
    #[serde(alias = "Interval")]
    pub interval: Option<u64>,
    #[serde(alias = "MaxFailures")]
    pub max_failures: Option<u32>,
    #[serde(alias = "EnforcingConsecutive5xx")]
    pub enforcing_consecutive_5xx: Option<u32>,
    #[serde(alias = "MaxEjectionPercent")]
    pub max_ejection_percent: Option<u32>,
    /// Nanoseconds an ejected host stays ejected.
    #[serde(alias = "BaseEjectionTime")]
    pub base_ejection_time: Option<u64>,
}

// === impl Upstream ===

impl Upstream {
    /// The normalized identity used to match this entry against central
    /// overrides. The stored destination fields are left as declared.
    pub fn upstream_ref(&self) -> UpstreamRef {
        UpstreamRef::normalized(
            self.destination_peer.as_deref(),
            &self.destination_name,
            self.destination_namespace.as_deref(),
            self.destination_partition.as_deref(),
        )
    }

    /// Whether this destination is reached across a cluster peering.
    pub fn is_peered(&self) -> bool {
        matches!(&self.destination_peer, Some(peer) if !peer.is_empty())
    }
}

// === impl UpstreamRef ===

impl UpstreamRef {
    /// Builds a normalized reference: blank namespace and partition default
    /// to [`DEFAULT_TENANCY`] and a blank peer is treated as local.
    pub fn normalized(
        peer: Option<&str>,
        name: &str,
        namespace: Option<&str>,
        partition: Option<&str>,
    ) -> Self {
        Self {
            peer: peer.filter(|p| !p.is_empty()).map(Into::into),
            name: name.to_string(),
            namespace: tenancy_or_default(namespace),
            partition: tenancy_or_default(partition),
        }
    }

    /// Re-normalizes a reference that may have been deserialized with blank
    /// tenancy fields.
    pub fn normalize(&self) -> Self {
        Self::normalized(
            self.peer.as_deref(),
            &self.name,
            Some(&self.namespace),
            Some(&self.partition),
        )
    }
}

impl std::fmt::Display for UpstreamRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.partition, self.namespace, self.name)?;
        if let Some(peer) = &self.peer {
            write!(f, "@{peer}")?;
        }
        Ok(())
    }
}

fn tenancy_or_default(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => DEFAULT_TENANCY.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_upstream_matches_default_tenancy() {
        let bare = Upstream {
            destination_name: "zap".to_string(),
            ..Default::default()
        };
        let explicit = UpstreamRef::normalized(None, "zap", Some("default"), Some("default"));
        assert_eq!(bare.upstream_ref(), explicit);
    }

    #[test]
    fn peered_and_local_refs_are_distinct() {
        let local = UpstreamRef::normalized(None, "zap", None, None);
        let peered = UpstreamRef::normalized(Some("cluster-01"), "zap", None, None);
        assert_ne!(local, peered);
        assert_eq!(peered.to_string(), "default/default/zap@cluster-01");
    }

    #[test]
    fn blank_peer_is_local() {
        let blank = UpstreamRef::normalized(Some(""), "zap", None, None);
        assert_eq!(blank.peer, None);
        assert!(!Upstream {
            destination_peer: Some(String::new()),
            destination_name: "zap".to_string(),
            ..Default::default()
        }
        .is_peered());
    }

    #[test]
    fn view_decodes_canonical_and_snake_case_keys() {
        let view: UpstreamConfigView = serde_json::from_value(json!({
            "protocol": "grpc",
            "connect_timeout_ms": 1000,
            "mesh_gateway": { "Mode": "local" },
            "passive_health_check": {
                "Interval": 10_000_000_000u64,
                "max_failures": 2,
            },
            "limits": { "MaxConnections": 3, "max_pending_requests": 4 },
        }))
        .unwrap();
        assert_eq!(view.protocol.as_deref(), Some("grpc"));
        assert_eq!(view.connect_timeout_ms, Some(1000));
        assert_eq!(view.mesh_gateway.mode, MeshGatewayMode::Local);
        let phc = view.passive_health_check.unwrap();
        assert_eq!(phc.interval, Some(10_000_000_000));
        assert_eq!(phc.max_failures, Some(2));
        let limits = view.limits.unwrap();
        assert_eq!(limits.max_connections, Some(3));
        assert_eq!(limits.max_pending_requests, Some(4));
    }

    #[test]
    fn view_ignores_unknown_keys() {
        let view: UpstreamConfigView = serde_json::from_value(json!({
            "envoy_listener_json": "{}",
            "protocol": "http",
        }))
        .unwrap();
        assert_eq!(view.protocol.as_deref(), Some("http"));
    }

    #[test]
    fn view_rejects_mistyped_known_keys() {
        assert!(serde_json::from_value::<UpstreamConfigView>(json!({
            "passive_health_check": { "MaxFailures": "two" },
        }))
        .is_err());
        assert!(serde_json::from_value::<UpstreamConfigView>(json!({
            "mesh_gateway": { "Mode": "sideways" },
        }))
        .is_err());
        assert!(
            serde_json::from_value::<UpstreamConfigView>(json!({ "protocol": 7 })).is_err()
        );
    }
}
