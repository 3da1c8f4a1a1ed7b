//! Service listing
//!
//! Walks the orchestrator's paginated service listing and materializes
//! the full identifier sequence for the cycle. Downstream batching needs
//! the whole set, so this is not a lazy stream.

use tracing::debug;

use evenkeel_core::Result;

use crate::client::OrchestratorClient;

/// List every service identifier in `cluster`, following the
/// continuation token until the orchestrator stops returning one.
/// Identifiers are accumulated in call order.
pub async fn list_all_services<C: OrchestratorClient>(
    client: &C,
    cluster: &str,
) -> Result<Vec<String>> {
    let mut all_services = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let page = client.list_services(cluster, next_token.as_deref()).await?;
        all_services.extend(page.service_arns);

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    debug!(cluster, count = all_services.len(), "Listed cluster services");
    Ok(all_services)
}
