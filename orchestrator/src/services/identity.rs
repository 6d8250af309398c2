//! Process identity

use crate::config::OrchestratorConfig;
use crate::traits::IdentityProvider;

/// Identity fixed at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    system_id: String,
}

impl StaticIdentity {
    pub fn new(system_id: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
        }
    }

    pub fn from_config(config: &OrchestratorConfig) -> Self {
        Self::new(config.system_id.clone())
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_system_id(&self) -> String {
        self.system_id.clone()
    }
}
