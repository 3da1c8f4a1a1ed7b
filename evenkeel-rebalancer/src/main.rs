//! Evenkeel Rebalancer Service
//!
//! Audits one cluster per invocation for services whose tasks sit
//! unevenly across worker nodes and forces a redeployment of each
//! unbalanced service. Invocation scheduling lives outside this binary.

use clap::Parser;
use tracing::{info, Level};

use evenkeel_rebalancer::{ClusterAuditor, HttpOrchestratorClient, RebalancerConfig};

#[derive(Parser)]
#[command(name = "evenkeel-rebalancer")]
#[command(about = "Evenkeel task distribution auditor")]
struct Cli {
    /// Cluster to audit
    cluster: String,

    /// Orchestration API endpoint (overrides EVENKEEL_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Detect imbalance but don't force deployments
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let mut config = RebalancerConfig::from_env()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if cli.dry_run {
        config.dry_run = true;
    }
    config.validate()?;

    info!(
        cluster = %cli.cluster,
        endpoint = %config.endpoint,
        dry_run = config.dry_run,
        "Starting evenkeel rebalancer"
    );

    let client = HttpOrchestratorClient::new(&config)?;
    let auditor = ClusterAuditor::new(client).with_dry_run(config.dry_run);

    let report = auditor.audit(&cli.cluster).await?;
    info!(summary = %report.summary(), "Audit cycle complete");

    Ok(())
}
