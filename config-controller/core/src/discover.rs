use crate::{defaults::ServiceConfigDefaults, service::ServiceInstance, upstream::DEFAULT_TENANCY};
use anyhow::Result;

/// The service whose centrally managed defaults should be looked up.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ServiceTarget {
    pub name: String,
    pub namespace: String,
    pub partition: String,
}

/// Reads the centrally managed defaults for a service.
///
/// Implementations query the configuration store and apply access control
/// before anything reaches resolution. `Ok(None)` means no central entry
/// exists for the target, which resolution treats as empty defaults.
#[async_trait::async_trait]
pub trait ServiceDefaultsSource {
    async fn service_defaults(
        &self,
        target: &ServiceTarget,
    ) -> Result<Option<ServiceConfigDefaults>>;
}

/// Models effective-configuration discovery for registered instances.
#[async_trait::async_trait]
pub trait DiscoverEffectiveConfig {
    async fn effective_config(&self, instance: &ServiceInstance) -> Result<ServiceInstance>;
}

// === impl ServiceTarget ===

impl ServiceTarget {
    /// A target in the default namespace and partition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: DEFAULT_TENANCY.to_string(),
            partition: DEFAULT_TENANCY.to_string(),
        }
    }
}

impl std::fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.partition, self.namespace, self.name)
    }
}
