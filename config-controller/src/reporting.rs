use anyhow::Result;

/// Lifecycle hooks for the usage-reporting agent.
///
/// This build ships no reporting backend, so starting and stopping succeed
/// without doing anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportingManager;

// === impl ReportingManager ===

impl ReportingManager {
    pub fn new() -> Self {
        Self
    }

    pub fn start(&self) -> Result<()> {
        tracing::debug!("usage reporting is not enabled in this build");
        Ok(())
    }

    pub fn stop(&self) -> Result<()> {
        Ok(())
    }
}
