#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]
mod reporting;
pub use self::reporting::ReportingManager;
use anyhow::Result;
use trellis_config_controller_core::discover::{
    DiscoverEffectiveConfig, ServiceDefaultsSource, ServiceTarget,
};
use trellis_config_controller_core::{ServiceConfigDefaults, ServiceInstance};
pub use trellis_config_controller_resolve::{merge_service_config, MergeError};

/// Resolves effective proxy configurations for registered instances by
/// merging them with centrally managed defaults from a source.
#[derive(Clone, Debug)]
pub struct Discover<S>(S);

// === impl Discover ===

impl<S> Discover<S> {
    pub fn new(source: S) -> Self {
        Self(source)
    }
}

#[async_trait::async_trait]
impl<S> DiscoverEffectiveConfig for Discover<S>
where
    S: ServiceDefaultsSource + Send + Sync,
{
    async fn effective_config(&self, instance: &ServiceInstance) -> Result<ServiceInstance> {
        // Defaults are stored under the logical service the proxy fronts,
        // not under the proxy's own registered name.
        let service = if instance.proxy.destination_service_name.is_empty() {
            instance.service.as_str()
        } else {
            instance.proxy.destination_service_name.as_str()
        };
        let target = ServiceTarget::new(service);

        let defaults = match self.0.service_defaults(&target).await? {
            Some(defaults) => defaults,
            None => {
                tracing::debug!(%target, "no centrally managed defaults");
                ServiceConfigDefaults::default()
            }
        };

        Ok(merge_service_config(&defaults, instance)?)
    }
}
