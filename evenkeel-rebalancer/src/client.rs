//! Orchestrator client trait
//!
//! The audit pipeline is written against this trait; the binary wires in
//! the HTTP implementation and tests substitute in-memory fakes.

use evenkeel_core::{NodeStatus, Result, ServiceDescriptor, TaskPlacement};

/// One page of the service listing.
#[derive(Debug, Clone, Default)]
pub struct ServicePage {
    /// Service identifiers in the order the orchestrator returned them.
    pub service_arns: Vec<String>,
    /// Continuation token; `None` on the last page.
    pub next_token: Option<String>,
}

/// Client for the cluster-orchestration service.
///
/// Every method maps onto a single API call. No method retries; errors
/// propagate to the caller and abort the audit cycle.
#[async_trait::async_trait]
pub trait OrchestratorClient: Send + Sync {
    /// List replica-scheduled services in the cluster, one page at a
    /// time. Daemon-scheduled services (one task per node) are excluded
    /// at the listing call.
    async fn list_services(
        &self,
        cluster: &str,
        next_token: Option<&str>,
    ) -> Result<ServicePage>;

    /// Describe up to [`DESCRIBE_BATCH`](crate::auditor::DESCRIBE_BATCH)
    /// services in one call.
    async fn describe_services(
        &self,
        cluster: &str,
        service_arns: &[String],
    ) -> Result<Vec<ServiceDescriptor>>;

    /// Identifiers of worker nodes currently in the ACTIVE state.
    async fn list_active_nodes(&self, cluster: &str) -> Result<Vec<String>>;

    /// Identifiers of the tasks currently running for a service.
    async fn list_tasks(&self, cluster: &str, service_name: &str) -> Result<Vec<String>>;

    /// Placement details for the given tasks.
    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<Vec<TaskPlacement>>;

    /// Current status of the given worker nodes.
    async fn describe_nodes(
        &self,
        cluster: &str,
        node_arns: &[String],
    ) -> Result<Vec<NodeStatus>>;

    /// Force a new deployment of `task_definition` for `service_arn`,
    /// leaving the service specification itself untouched.
    async fn force_new_deployment(
        &self,
        cluster: &str,
        service_arn: &str,
        task_definition: &str,
    ) -> Result<()>;
}
