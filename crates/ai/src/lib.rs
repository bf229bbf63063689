//! `stockpilot-ai`
//!
//! **Responsibility:** advisory insights over inventory snapshots.
//!
//! - Emits recommendations (transfer suggestions), never domain changes.
//! - Inputs are snapshots supplied by callers; no IO, no storage.
//! - Every computation is re-derived from its inputs; nothing is cached.

pub mod dismissal;
pub mod job;
pub mod policy;
pub mod rebalance;
pub mod result;
pub mod scheduler;
pub mod suggestion;

pub use dismissal::{DismissedSuggestions, dismiss};
pub use job::AiJob;
pub use policy::RebalancePolicy;
pub use rebalance::{
    RebalanceAdvisor, RebalanceJob, RebalanceSnapshot, UNKNOWN_WAREHOUSE_LABEL, compute_suggestions,
};
pub use result::{AiError, AiResult};
pub use scheduler::{AiScheduler, LocalAiScheduler, TenantScope};
pub use suggestion::{DismissalKey, SuggestionPriority, SuggestionReason, TransferSuggestion};
