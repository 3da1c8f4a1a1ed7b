//! HTTP orchestrator client
//!
//! Implements [`OrchestratorClient`] against the orchestration service's
//! JSON-over-HTTP API: one POST per call to `{base}/v1/<Action>`, with
//! an optional bearer token. Retries, if desired, belong to the
//! deployment environment; every failure surfaces as an
//! [`OrchestratorError`].

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use evenkeel_core::{NodeStatus, OrchestratorError, Result, ServiceDescriptor, TaskPlacement};

use crate::client::{OrchestratorClient, ServicePage};
use crate::config::RebalancerConfig;

/// Replica scheduling: a fixed task count spread across nodes. Daemon
/// services run one task per node and are excluded from the listing.
const REPLICA_STRATEGY: &str = "REPLICA";

/// Worker-node status filter for the active-node count.
const ACTIVE_STATUS: &str = "ACTIVE";

/// JSON-over-HTTP client for the orchestration service.
pub struct HttpOrchestratorClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpOrchestratorClient {
    /// Create a client from the service configuration.
    pub fn new(config: &RebalancerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| OrchestratorError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    async fn post<B, R>(&self, action: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/v1/{}", self.base_url, action);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| OrchestratorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrchestratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| OrchestratorError::Decode(e.to_string()))
    }
}

// Wire types. Field names follow the orchestrator's camelCase contract;
// response lists default to empty so a terse reply still decodes.

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListServicesRequest<'a> {
    cluster: &'a str,
    scheduling_strategy: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_token: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListServicesResponse {
    #[serde(default)]
    service_arns: Vec<String>,
    next_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescribeServicesRequest<'a> {
    cluster: &'a str,
    services: &'a [String],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeServicesResponse {
    #[serde(default)]
    services: Vec<ServiceDescriptor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListNodesRequest<'a> {
    cluster: &'a str,
    status: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListNodesResponse {
    #[serde(default)]
    container_instance_arns: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListTasksRequest<'a> {
    cluster: &'a str,
    service_name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTasksResponse {
    #[serde(default)]
    task_arns: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescribeTasksRequest<'a> {
    cluster: &'a str,
    tasks: &'a [String],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeTasksResponse {
    #[serde(default)]
    tasks: Vec<TaskPlacement>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescribeNodesRequest<'a> {
    cluster: &'a str,
    container_instances: &'a [String],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeNodesResponse {
    #[serde(default)]
    container_instances: Vec<NodeStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateServiceRequest<'a> {
    cluster: &'a str,
    service: &'a str,
    task_definition: &'a str,
    force_new_deployment: bool,
}

#[async_trait::async_trait]
impl OrchestratorClient for HttpOrchestratorClient {
    async fn list_services(
        &self,
        cluster: &str,
        next_token: Option<&str>,
    ) -> Result<ServicePage> {
        let response: ListServicesResponse = self
            .post(
                "ListServices",
                &ListServicesRequest {
                    cluster,
                    scheduling_strategy: REPLICA_STRATEGY,
                    next_token,
                },
            )
            .await?;

        Ok(ServicePage {
            service_arns: response.service_arns,
            next_token: response.next_token,
        })
    }

    async fn describe_services(
        &self,
        cluster: &str,
        service_arns: &[String],
    ) -> Result<Vec<ServiceDescriptor>> {
        let response: DescribeServicesResponse = self
            .post(
                "DescribeServices",
                &DescribeServicesRequest {
                    cluster,
                    services: service_arns,
                },
            )
            .await?;

        Ok(response.services)
    }

    async fn list_active_nodes(&self, cluster: &str) -> Result<Vec<String>> {
        let response: ListNodesResponse = self
            .post(
                "ListContainerInstances",
                &ListNodesRequest {
                    cluster,
                    status: ACTIVE_STATUS,
                },
            )
            .await?;

        Ok(response.container_instance_arns)
    }

    async fn list_tasks(&self, cluster: &str, service_name: &str) -> Result<Vec<String>> {
        let response: ListTasksResponse = self
            .post(
                "ListTasks",
                &ListTasksRequest {
                    cluster,
                    service_name,
                },
            )
            .await?;

        Ok(response.task_arns)
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_arns: &[String],
    ) -> Result<Vec<TaskPlacement>> {
        let response: DescribeTasksResponse = self
            .post(
                "DescribeTasks",
                &DescribeTasksRequest {
                    cluster,
                    tasks: task_arns,
                },
            )
            .await?;

        Ok(response.tasks)
    }

    async fn describe_nodes(
        &self,
        cluster: &str,
        node_arns: &[String],
    ) -> Result<Vec<NodeStatus>> {
        let response: DescribeNodesResponse = self
            .post(
                "DescribeContainerInstances",
                &DescribeNodesRequest {
                    cluster,
                    container_instances: node_arns,
                },
            )
            .await?;

        Ok(response.container_instances)
    }

    async fn force_new_deployment(
        &self,
        cluster: &str,
        service_arn: &str,
        task_definition: &str,
    ) -> Result<()> {
        // The deployment acknowledgment carries nothing the audit needs.
        let _ack: serde_json::Value = self
            .post(
                "UpdateService",
                &UpdateServiceRequest {
                    cluster,
                    service: service_arn,
                    task_definition,
                    force_new_deployment: true,
                },
            )
            .await?;

        Ok(())
    }
}
