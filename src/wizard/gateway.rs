//! Write contract for finishing the wizard

use crate::platform::api::types::{ProvisionJob, ProvisionRequest};
use crate::platform::api::Result;
use async_trait::async_trait;

/// Performs provisioning or persists an imported publish configuration
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Start creating the requested resources
    async fn start_provision(
        &self,
        project_id: &str,
        request: &ProvisionRequest,
    ) -> Result<ProvisionJob>;

    /// Store an existing publish configuration as-is
    async fn save_publish_config(
        &self,
        project_id: &str,
        config: &serde_json::Value,
    ) -> Result<()>;
}
