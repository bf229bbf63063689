use stockpilot_core::TenantId;

use crate::result::{AiError, AiResult};

/// A tenant-scoped insight unit.
///
/// Inputs are snapshots handed over by callers; this crate never fetches data
/// itself.
pub trait AiJob: Send + Sync + 'static {
    type Input: Send + Sync + 'static;

    /// The tenant this job belongs to.
    fn tenant_id(&self) -> TenantId;

    /// The snapshot the job runs on.
    fn input(&self) -> &Self::Input;

    /// Compute the insight.
    ///
    /// Must not mutate domain state.
    fn run(&self) -> Result<AiResult, AiError>;
}
