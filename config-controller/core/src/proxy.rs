use anyhow::{anyhow, Error, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU16;

/// An untyped configuration mapping passed through to the proxy.
///
/// Values are opaque to the controller except for a small set of known keys
/// that resolution decodes into typed fields. The sorted backing map keeps
/// enumeration deterministic, so equal contents always serialize and hash
/// identically.
pub type OpaqueConfig = serde_json::Map<String, serde_json::Value>;

/// How a sidecar proxy routes outbound traffic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxyMode {
    /// Not set on this layer; resolution falls back to the other layer.
    #[default]
    #[serde(rename = "")]
    Default,

    /// Outbound traffic is intercepted and routed without per-destination
    /// upstream declarations.
    #[serde(rename = "transparent")]
    Transparent,

    /// Only explicitly declared upstreams are routed.
    #[serde(rename = "direct")]
    Direct,

    /// The proxy serves as a gateway between federated clusters rather than
    /// as a sidecar.
    #[serde(rename = "mesh-gateway")]
    MeshGateway,
}

/// How traffic to a destination traverses mesh gateways, if at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshGatewayMode {
    /// Not set on this layer; resolution falls back to the other layer.
    #[default]
    #[serde(rename = "")]
    Default,

    /// Connect directly to the destination, bypassing gateways.
    #[serde(rename = "none")]
    None,

    /// Dial a gateway in the local datacenter.
    #[serde(rename = "local")]
    Local,

    /// Dial a gateway in the destination's datacenter.
    #[serde(rename = "remote")]
    Remote,
}

/// Whether the proxy requires mutual TLS from its clients.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutualTlsMode {
    #[default]
    #[serde(rename = "")]
    Default,

    #[serde(rename = "strict")]
    Strict,

    #[serde(rename = "permissive")]
    Permissive,
}

/// Settings consumed when the resolved proxy mode is transparent.
///
/// Overrides are struct-level: either every field comes from the local
/// registration or every field comes from the central defaults.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransparentProxySettings {
    /// The port on which all outbound traffic is captured.
    pub outbound_listener_port: Option<NonZeroU16>,

    /// Whether other transparent proxies may dial this instance's IP
    /// directly, bypassing its service address.
    pub dialed_directly: bool,
}

/// Envoy access-log emission settings, centrally owned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessLogsConfig {
    pub enabled: bool,
    pub disable_listener_logs: bool,
    pub sink: AccessLogSink,
    pub path: Option<String>,
    pub json_format: Option<String>,
    pub text_format: Option<String>,
}

/// Where access logs are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLogSink {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// HTTP paths exposed unauthenticated through the proxy, centrally owned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposeConfig {
    /// Expose all registered health-check endpoints.
    pub checks: bool,

    pub paths: Vec<ExposePath>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposePath {
    pub listener_port: Option<NonZeroU16>,
    pub path: String,
    pub local_path_port: Option<NonZeroU16>,
    pub protocol: ExposeProtocol,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposeProtocol {
    #[default]
    Http,
    Http2,
}

/// A builtin Envoy extension applied to the proxy, with opaque arguments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvoyExtension {
    pub name: String,
    pub required: bool,
    pub arguments: OpaqueConfig,
}

// === impl ProxyMode ===

impl ProxyMode {
    /// Returns true unless the mode was explicitly set on this layer.
    pub fn is_default(&self) -> bool {
        *self == Self::Default
    }
}

impl std::str::FromStr for ProxyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Self::Default),
            "transparent" => Ok(Self::Transparent),
            "direct" => Ok(Self::Direct),
            "mesh-gateway" => Ok(Self::MeshGateway),
            s => Err(anyhow!("invalid proxy mode: {:?}", s)),
        }
    }
}

impl std::fmt::Display for ProxyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => "".fmt(f),
            Self::Transparent => "transparent".fmt(f),
            Self::Direct => "direct".fmt(f),
            Self::MeshGateway => "mesh-gateway".fmt(f),
        }
    }
}

// === impl MeshGatewayMode ===

impl MeshGatewayMode {
    /// Returns true unless the mode was explicitly set on this layer.
    pub fn is_default(&self) -> bool {
        *self == Self::Default
    }
}

impl std::str::FromStr for MeshGatewayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Self::Default),
            "none" => Ok(Self::None),
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            s => Err(anyhow!("invalid mesh gateway mode: {:?}", s)),
        }
    }
}

impl std::fmt::Display for MeshGatewayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => "".fmt(f),
            Self::None => "none".fmt(f),
            Self::Local => "local".fmt(f),
            Self::Remote => "remote".fmt(f),
        }
    }
}

// === impl TransparentProxySettings ===

impl TransparentProxySettings {
    /// Returns true if no field was explicitly set on this layer.
    pub fn is_unset(&self) -> bool {
        self.outbound_listener_port.is_none() && !self.dialed_directly
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_displayed_proxy_mode() {
        for mode in [
            ProxyMode::Default,
            ProxyMode::Transparent,
            ProxyMode::Direct,
            ProxyMode::MeshGateway,
        ] {
            assert_eq!(
                mode.to_string().parse::<ProxyMode>().unwrap(),
                mode,
                "failed to parse displayed {:?}",
                mode
            );
        }
        assert!("bogus".parse::<ProxyMode>().is_err());
    }

    #[test]
    fn test_parse_displayed_mesh_gateway_mode() {
        for mode in [
            MeshGatewayMode::Default,
            MeshGatewayMode::None,
            MeshGatewayMode::Local,
            MeshGatewayMode::Remote,
        ] {
            assert_eq!(
                mode.to_string().parse::<MeshGatewayMode>().unwrap(),
                mode,
                "failed to parse displayed {:?}",
                mode
            );
        }
        assert!("sideways".parse::<MeshGatewayMode>().is_err());
    }

    #[test]
    fn transparent_proxy_settings_unset() {
        assert!(TransparentProxySettings::default().is_unset());
        assert!(!TransparentProxySettings {
            outbound_listener_port: Some(10101.try_into().unwrap()),
            ..Default::default()
        }
        .is_unset());
        assert!(!TransparentProxySettings {
            dialed_directly: true,
            ..Default::default()
        }
        .is_unset());
    }
}
