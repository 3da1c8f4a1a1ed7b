//! Forced redeployment
//!
//! Requests a new deployment of a service's current, already-valid task
//! definition. The task definition is never re-registered or modified;
//! the orchestrator's scheduler redistributes the tasks across nodes.

use tracing::info;

use evenkeel_core::{Result, ServiceDescriptor};

use crate::client::OrchestratorClient;

/// Force a new deployment of `service`'s current task definition.
///
/// The acknowledgment body is not consumed and there is no retry here;
/// persistent imbalance is re-detected by the next audit cycle.
pub async fn rebalance<C: OrchestratorClient>(
    client: &C,
    service: &ServiceDescriptor,
) -> Result<()> {
    info!(
        service = %service.service_name,
        task_definition = %service.task_definition,
        "Forcing a new deployment to rebalance tasks across nodes"
    );

    client
        .force_new_deployment(
            &service.cluster_arn,
            &service.service_arn,
            &service.task_definition,
        )
        .await
}
