//! Evenkeel Core Library
//!
//! Shared abstractions for the evenkeel task rebalancer:
//! - Read-only cluster domain types (services, tasks, worker nodes)
//! - The error surface of the orchestration-service client

pub mod cluster;
pub mod error;

pub use cluster::{
    DeploymentRecord, InstanceStatus, NodeStatus, ServiceDescriptor, TaskPlacement,
};
pub use error::{OrchestratorError, Result};
