//! Service eligibility
//!
//! Pure predicate deciding whether a balance check should run for a
//! service. Rules are evaluated in order; the first match wins. No I/O.

use std::fmt;

use evenkeel_core::ServiceDescriptor;

/// Why a service was excluded from the balance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Desired count is zero; there is nothing to balance.
    NoDesiredTasks,
    /// More than one deployment record; a rollout is already in flight
    /// and forcing another could conflict with it.
    DeploymentInProgress,
    /// Running count has not converged to the desired count yet, so the
    /// per-node counts would be misleading.
    TasksStillStarting,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoDesiredTasks => {
                write!(f, "desired task count is 0, nothing to rebalance")
            }
            SkipReason::DeploymentInProgress => {
                write!(f, "a deployment is already in progress")
            }
            SkipReason::TasksStillStarting => write!(f, "tasks are still starting"),
        }
    }
}

/// Returns the reason to skip `service`, or `None` when the service is
/// eligible for a balance check.
pub fn skip_reason(service: &ServiceDescriptor) -> Option<SkipReason> {
    if service.desired_count == 0 {
        Some(SkipReason::NoDesiredTasks)
    } else if service.deployments.len() > 1 {
        Some(SkipReason::DeploymentInProgress)
    } else if service.running_count != service.desired_count {
        Some(SkipReason::TasksStillStarting)
    } else {
        None
    }
}
