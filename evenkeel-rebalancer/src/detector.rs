//! Imbalance detection
//!
//! Decides whether a service's tasks are spread unevenly across the
//! cluster's worker nodes. Only nodes that host at least one of the
//! service's tasks are candidates; an offending node is one whose count
//! falls outside the expected per-node range while the node is ACTIVE.
//! Draining nodes never flag the service, since their tasks are already
//! being moved elsewhere.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use evenkeel_core::{Result, ServiceDescriptor};

use crate::client::OrchestratorClient;

/// Expected per-node task-count range for one service in one cycle.
///
/// A function of the service's current desired count and the cluster's
/// current active-node count; recomputed for every service on every
/// cycle, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRange {
    pub min_tasks_per_node: u32,
    pub max_tasks_per_node: u32,
}

impl ThresholdRange {
    /// Derive the range for `desired_count` tasks spread over
    /// `active_nodes` worker nodes. Returns `None` when the cluster has
    /// no active nodes; the range is undefined and no service may be
    /// evaluated.
    pub fn derive(desired_count: u32, active_nodes: u32) -> Option<Self> {
        if active_nodes == 0 {
            return None;
        }
        Some(Self {
            min_tasks_per_node: desired_count / active_nodes,
            max_tasks_per_node: desired_count.div_ceil(active_nodes),
        })
    }

    /// Whether a per-node task count lies inside the range.
    pub fn contains(&self, count: u32) -> bool {
        count >= self.min_tasks_per_node && count <= self.max_tasks_per_node
    }
}

/// Check whether `service`'s tasks are unevenly placed.
///
/// Fetches the service's task placements, counts tasks per hosting node,
/// and flags the service on the first ACTIVE node whose count falls
/// outside `range`. Node status is fetched lazily, only for out-of-range
/// nodes; a node missing from the status response counts as not ACTIVE.
/// Scan order is ascending by node identifier, so the short-circuit pick
/// is deterministic.
#[instrument(skip(client, service), fields(service = %service.service_name))]
pub async fn is_unbalanced<C: OrchestratorClient>(
    client: &C,
    service: &ServiceDescriptor,
    range: ThresholdRange,
) -> Result<bool> {
    let task_arns = client
        .list_tasks(&service.cluster_arn, &service.service_name)
        .await?;

    if task_arns.is_empty() {
        debug!("No running tasks reported, nothing to count");
        return Ok(false);
    }

    let placements = client
        .describe_tasks(&service.cluster_arn, &task_arns)
        .await?;

    let mut tasks_per_node: BTreeMap<String, u32> = BTreeMap::new();
    for placement in placements {
        *tasks_per_node
            .entry(placement.container_instance_arn)
            .or_insert(0) += 1;
    }

    for (node_arn, &count) in &tasks_per_node {
        if range.contains(count) {
            continue;
        }

        let statuses = client
            .describe_nodes(&service.cluster_arn, std::slice::from_ref(node_arn))
            .await?;

        let is_active = statuses
            .iter()
            .find(|s| s.container_instance_arn == *node_arn)
            .map(|s| s.status.is_active())
            .unwrap_or(false);

        if !is_active {
            debug!(node = %node_arn, count, "Out-of-range node is not ACTIVE, skipping");
            continue;
        }

        if count < range.min_tasks_per_node {
            debug!(
                node = %node_arn,
                count,
                min = range.min_tasks_per_node,
                "Node holds fewer tasks than the per-node minimum"
            );
        } else {
            debug!(
                node = %node_arn,
                count,
                max = range.max_tasks_per_node,
                "Node holds more tasks than the per-node maximum"
            );
        }

        return Ok(true);
    }

    Ok(false)
}
