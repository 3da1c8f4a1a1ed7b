//! Cluster domain types
//!
//! The read-only view of one audit cycle: services with their desired
//! state, task placements, and worker-node status. Field names map
//! directly onto the orchestrator's camelCase wire format. Nothing here
//! is persisted; every cycle refetches from current cluster state.

use serde::{Deserialize, Serialize};

/// A service as described by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub service_name: String,
    pub service_arn: String,
    pub cluster_arn: String,
    /// Number of task instances the service should keep running.
    pub desired_count: u32,
    /// Number of task instances currently running.
    pub running_count: u32,
    /// In-flight deployment records. A steady-state service has exactly
    /// one; more than one means a rollout is in progress.
    #[serde(default)]
    pub deployments: Vec<DeploymentRecord>,
    /// Identifier of the task definition the service currently runs.
    pub task_definition: String,
}

/// One rollout of a service revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub id: String,
    pub status: String,
}

/// A running task and the worker node hosting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPlacement {
    pub task_arn: String,
    pub container_instance_arn: String,
}

/// Worker-node status as reported by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub container_instance_arn: String,
    pub status: InstanceStatus,
}

/// Lifecycle state of a worker node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    /// The node accepts task placements.
    Active,
    /// The node is being drained; its tasks are already moving elsewhere.
    Draining,
    /// Any other state (registering, deregistering, ...).
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    pub fn is_active(self) -> bool {
        matches!(self, InstanceStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_descriptor_from_wire() {
        let json = r#"{
            "serviceName": "web",
            "serviceArn": "arn:svc/web",
            "clusterArn": "arn:cluster/prod",
            "desiredCount": 9,
            "runningCount": 9,
            "deployments": [{"id": "d-1", "status": "PRIMARY"}],
            "taskDefinition": "web:42",
            "schedulingStrategy": "REPLICA"
        }"#;

        let service: ServiceDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(service.service_name, "web");
        assert_eq!(service.desired_count, 9);
        assert_eq!(service.deployments.len(), 1);
        assert_eq!(service.task_definition, "web:42");
    }

    #[test]
    fn test_deployments_default_to_empty() {
        let json = r#"{
            "serviceName": "web",
            "serviceArn": "arn:svc/web",
            "clusterArn": "arn:cluster/prod",
            "desiredCount": 0,
            "runningCount": 0,
            "taskDefinition": "web:42"
        }"#;

        let service: ServiceDescriptor = serde_json::from_str(json).unwrap();
        assert!(service.deployments.is_empty());
    }

    #[test]
    fn test_instance_status_from_wire() {
        let active: InstanceStatus = serde_json::from_str(r#""ACTIVE""#).unwrap();
        let draining: InstanceStatus = serde_json::from_str(r#""DRAINING""#).unwrap();
        let other: InstanceStatus = serde_json::from_str(r#""REGISTERING""#).unwrap();

        assert!(active.is_active());
        assert_eq!(draining, InstanceStatus::Draining);
        assert_eq!(other, InstanceStatus::Unknown);
        assert!(!draining.is_active());
        assert!(!other.is_active());
    }
}
