//! Cluster audit cycle
//!
//! Orchestrates one stateless audit of a cluster: count active worker
//! nodes, list services, describe them in batches, and run the
//! filter -> detector -> trigger pipeline per service. Nothing is
//! carried between batches, services, or cycles.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use evenkeel_core::{OrchestratorError, ServiceDescriptor};

use crate::client::OrchestratorClient;
use crate::detector::{self, ThresholdRange};
use crate::filter;
use crate::lister;
use crate::trigger;

/// Maximum services per bulk-describe call, the orchestrator API limit.
pub const DESCRIBE_BATCH: usize = 10;

/// Audit errors
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Cluster name must not be empty")]
    EmptyClusterName,

    #[error("Orchestrator error: {0}")]
    Orchestrator(#[from] OrchestratorError),
}

/// Outcome counters for one audit cycle.
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Services returned by the listing.
    pub services_listed: usize,
    /// Services excluded by the eligibility rules.
    pub skipped: usize,
    /// Services checked and found evenly spread.
    pub balanced: usize,
    /// Services flagged unbalanced; a redeployment was forced for each
    /// (or logged, in dry-run mode).
    pub rebalanced: usize,
    /// Cycle duration.
    pub duration: Duration,
}

impl AuditReport {
    /// Summary string
    pub fn summary(&self) -> String {
        format!(
            "{} services listed in {:?}: {} skipped, {} balanced, {} rebalanced",
            self.services_listed, self.duration, self.skipped, self.balanced, self.rebalanced
        )
    }
}

/// Runs audit cycles against an injected orchestrator client.
pub struct ClusterAuditor<C> {
    client: C,
    dry_run: bool,
}

impl<C: OrchestratorClient> ClusterAuditor<C> {
    /// Create a new auditor
    pub fn new(client: C) -> Self {
        Self {
            client,
            dry_run: false,
        }
    }

    /// Detect imbalance without forcing deployments.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Audit `cluster` once.
    ///
    /// A cluster without active worker nodes has no defined per-node
    /// range; the cycle logs this and returns an empty report rather
    /// than evaluating services.
    #[instrument(skip(self))]
    pub async fn audit(&self, cluster: &str) -> Result<AuditReport, AuditError> {
        if cluster.trim().is_empty() {
            return Err(AuditError::EmptyClusterName);
        }

        let start = Instant::now();
        let mut report = AuditReport::default();

        info!(cluster, "Starting check for unbalanced service tasks");

        let active_nodes = self.client.list_active_nodes(cluster).await?;
        let active_node_count = active_nodes.len() as u32;

        if active_node_count == 0 {
            warn!(cluster, "Cluster has no active worker nodes, nothing to balance");
            report.duration = start.elapsed();
            return Ok(report);
        }

        debug!(cluster, active_node_count, "Counted active worker nodes");

        let service_arns = lister::list_all_services(&self.client, cluster).await?;
        report.services_listed = service_arns.len();

        for batch in service_arns.chunks(DESCRIBE_BATCH) {
            let services = self.client.describe_services(cluster, batch).await?;

            for service in &services {
                self.audit_service(service, active_node_count, &mut report)
                    .await?;
            }
        }

        report.duration = start.elapsed();
        info!(cluster, summary = %report.summary(), "Finished check for unbalanced service tasks");

        Ok(report)
    }

    async fn audit_service(
        &self,
        service: &ServiceDescriptor,
        active_node_count: u32,
        report: &mut AuditReport,
    ) -> Result<(), AuditError> {
        info!(service = %service.service_name, "Checking service");

        if let Some(reason) = filter::skip_reason(service) {
            info!(service = %service.service_name, %reason, "Skipping service");
            report.skipped += 1;
            return Ok(());
        }

        let Some(range) = ThresholdRange::derive(service.desired_count, active_node_count) else {
            // audit() only proceeds with at least one active node
            return Ok(());
        };

        debug!(
            service = %service.service_name,
            min = range.min_tasks_per_node,
            max = range.max_tasks_per_node,
            "Derived per-node task range"
        );

        if detector::is_unbalanced(&self.client, service, range).await? {
            report.rebalanced += 1;
            if self.dry_run {
                info!(service = %service.service_name, "Dry run, not forcing a deployment");
            } else {
                trigger::rebalance(&self.client, service).await?;
            }
        } else {
            info!(
                service = %service.service_name,
                "Service is already correctly balanced between worker nodes"
            );
            report.balanced += 1;
        }

        Ok(())
    }
}
