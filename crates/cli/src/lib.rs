//! `stockpilot-advisor`: offline runner for the rebalancing advisor.
//!
//! Reads one JSON snapshot file and produces the ranked suggestions plus the
//! transfer summary counters.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};

use stockpilot_ai::{
    AiScheduler, DismissedSuggestions, LocalAiScheduler, RebalanceJob, RebalancePolicy,
    RebalanceSnapshot, TenantScope, TransferSuggestion,
};
use stockpilot_core::TenantId;
use stockpilot_inventory::{Product, TransferRecord, TransferStats, Warehouse};

#[derive(Debug, Parser)]
#[command(
    name = "stockpilot-advisor",
    version,
    about = "Suggest cross-warehouse stock transfers for a snapshot",
    long_about = "Rank transfer suggestions for a JSON stock snapshot and summarise its transfer history. \
                  Thresholds are read from STOCKPILOT_* environment variables.",
    after_help = "Examples:\n  stockpilot-advisor snapshot.json\n  RUST_LOG=debug stockpilot-advisor snapshot.json"
)]
pub struct Args {
    /// Snapshot file: { tenant_id?, products, warehouses, dismissed?, transfers? }
    pub snapshot: PathBuf,
}

/// On-disk snapshot accepted by the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub dismissed: DismissedSuggestions,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisorReport {
    pub tenant_id: TenantId,
    pub suggestions: Vec<TransferSuggestion>,
    pub stats: TransferStats,
}

/// Load the snapshot at `path` and evaluate it with the environment's policy.
pub fn run(path: impl AsRef<Path>) -> anyhow::Result<AdvisorReport> {
    let snapshot = load_snapshot(path)?;
    build_report(snapshot, RebalancePolicy::from_env(), Utc::now())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> anyhow::Result<SnapshotFile> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid snapshot JSON in {}", path.display()))
}

pub fn build_report(
    file: SnapshotFile,
    policy: RebalancePolicy,
    now: DateTime<Utc>,
) -> anyhow::Result<AdvisorReport> {
    // Snapshots without a tenant are ad-hoc runs under a throwaway id.
    let (tenant_id, scope) = match file.tenant_id {
        Some(tenant_id) => (tenant_id, TenantScope::Tenant(tenant_id)),
        None => (TenantId::new(), TenantScope::Any),
    };
    let stats = TransferStats::compute(&file.transfers, &file.warehouses, now);

    let job = RebalanceJob::new(
        tenant_id,
        RebalanceSnapshot {
            tenant_id,
            products: file.products,
            warehouses: file.warehouses,
        },
    )
    .with_dismissed(file.dismissed)
    .with_policy(policy);

    let insight = LocalAiScheduler::new(scope)
        .run(job)
        .context("rebalance job failed")?;

    let suggestions: Vec<TransferSuggestion> =
        serde_json::from_value(insight.metadata["suggestions"].clone())
            .context("rebalance job returned malformed suggestions")?;

    tracing::info!(
        %tenant_id,
        suggestions = suggestions.len(),
        transfers = stats.total,
        "{}",
        insight.explanation.as_deref().unwrap_or_default()
    );

    Ok(AdvisorReport {
        tenant_id,
        suggestions,
        stats,
    })
}
