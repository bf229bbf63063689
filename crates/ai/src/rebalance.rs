use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use stockpilot_core::TenantId;
use stockpilot_inventory::{Product, StockLevel, Warehouse, WarehouseId};

use crate::dismissal::DismissedSuggestions;
use crate::job::AiJob;
use crate::policy::RebalancePolicy;
use crate::result::{AiError, AiResult};
use crate::suggestion::{DismissalKey, SuggestionPriority, SuggestionReason, TransferSuggestion};

/// Label used when neither the stock entry nor the warehouse list names a warehouse.
pub const UNKNOWN_WAREHOUSE_LABEL: &str = "Warehouse";

/// Cross-warehouse stock rebalancing advisor.
///
/// Model, per product with at least two distribution entries:
/// - An entry is low when `quantity <= min_stock_level`.
/// - Its source is the *first* other entry holding more than
///   `surplus_multiplier * min_stock_level` (first match, not best match).
/// - Proposed quantity is `min(source / transfer_divisor, max(1, min - target))`.
///
/// Output is stable-sorted by priority and capped at `max_suggestions`. The
/// advisor keeps no state between calls; recompute whenever the snapshot or the
/// dismissed set changes.
#[derive(Debug, Copy, Clone, Default)]
pub struct RebalanceAdvisor {
    policy: RebalancePolicy,
}

impl RebalanceAdvisor {
    pub fn new(policy: RebalancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RebalancePolicy {
        &self.policy
    }

    pub fn suggest(
        &self,
        products: &[Product],
        warehouses: &[Warehouse],
        dismissed: &DismissedSuggestions,
    ) -> Vec<TransferSuggestion> {
        if products.is_empty() || warehouses.len() < 2 {
            return Vec::new();
        }

        let names: HashMap<&WarehouseId, &str> = warehouses
            .iter()
            .filter_map(|w| w.display_name().map(|name| (&w.id, name)))
            .collect();

        let mut suggestions = Vec::new();
        let mut suppressed = 0usize;

        for product in products.iter().filter(|p| p.is_rebalanceable()) {
            let min = product.effective_min_stock_level(self.policy.default_min_stock_level);
            let surplus_floor = min.saturating_mul(self.policy.surplus_multiplier);

            for target in product.distribution.iter().filter(|d| d.quantity <= min) {
                let Some(source) = product
                    .distribution
                    .iter()
                    .find(|d| d.warehouse_id != target.warehouse_id && d.quantity > surplus_floor)
                else {
                    continue;
                };

                let deficit = min.saturating_sub(target.quantity).max(1);
                // A zero divisor (unvalidated policy) yields no quantity, not a panic.
                let Some(share) = source.quantity.checked_div(self.policy.transfer_divisor) else {
                    continue;
                };
                let quantity = share.min(deficit);
                if quantity <= 0 {
                    continue;
                }

                let key = DismissalKey {
                    product_id: product.id.clone(),
                    source_warehouse_id: source.warehouse_id.clone(),
                    target_warehouse_id: target.warehouse_id.clone(),
                };
                if dismissed.contains(&key) {
                    suppressed += 1;
                    continue;
                }

                suggestions.push(TransferSuggestion {
                    product_id: key.product_id,
                    product_name: product.name.clone(),
                    source_warehouse_id: key.source_warehouse_id,
                    source_warehouse_name: resolve_name(source, &names),
                    target_warehouse_id: key.target_warehouse_id,
                    target_warehouse_name: resolve_name(target, &names),
                    source_quantity: source.quantity,
                    target_quantity: target.quantity,
                    suggested_transfer_quantity: quantity,
                    reason: self.reason(target.quantity),
                    priority: self.priority(target.quantity),
                });
            }
        }

        let candidates = suggestions.len();
        // `sort_by_key` is stable: generation order survives within a priority.
        suggestions.sort_by_key(|s| s.priority.rank());
        suggestions.truncate(self.policy.max_suggestions);

        tracing::debug!(
            products = products.len(),
            warehouses = warehouses.len(),
            candidates,
            suppressed,
            returned = suggestions.len(),
            "computed transfer suggestions"
        );

        suggestions
    }

    fn reason(&self, target_quantity: i64) -> SuggestionReason {
        if target_quantity == 0 {
            SuggestionReason::OutOfStock
        } else {
            SuggestionReason::LowStock
        }
    }

    fn priority(&self, target_quantity: i64) -> SuggestionPriority {
        if target_quantity == 0 {
            SuggestionPriority::High
        } else if target_quantity <= self.policy.medium_priority_max_quantity {
            SuggestionPriority::Medium
        } else {
            SuggestionPriority::Low
        }
    }
}

/// Rank transfer suggestions with the default policy.
pub fn compute_suggestions(
    products: &[Product],
    warehouses: &[Warehouse],
    dismissed: &DismissedSuggestions,
) -> Vec<TransferSuggestion> {
    RebalanceAdvisor::default().suggest(products, warehouses, dismissed)
}

fn resolve_name(level: &StockLevel, names: &HashMap<&WarehouseId, &str>) -> String {
    level
        .warehouse_name()
        .or_else(|| names.get(&level.warehouse_id).copied())
        .unwrap_or(UNKNOWN_WAREHOUSE_LABEL)
        .to_string()
}

/// Tenant-scoped stock snapshot the advisor runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceSnapshot {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub warehouses: Vec<Warehouse>,
}

/// Transfer suggestion job over one tenant's snapshot.
#[derive(Debug, Clone)]
pub struct RebalanceJob {
    tenant_id: TenantId,
    input: RebalanceSnapshot,
    dismissed: DismissedSuggestions,
    policy: RebalancePolicy,
}

impl RebalanceJob {
    pub fn new(tenant_id: TenantId, input: RebalanceSnapshot) -> Self {
        Self {
            tenant_id,
            input,
            dismissed: DismissedSuggestions::default(),
            policy: RebalancePolicy::default(),
        }
    }

    pub fn with_dismissed(mut self, dismissed: DismissedSuggestions) -> Self {
        self.dismissed = dismissed;
        self
    }

    pub fn with_policy(mut self, policy: RebalancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Typed output of the job; `run` wraps the same list into an [`AiResult`].
    pub fn suggestions(&self) -> Result<Vec<TransferSuggestion>, AiError> {
        if self.input.tenant_id != self.tenant_id {
            return Err(AiError::InvalidInput(
                "tenant_id mismatch between job and snapshot".to_string(),
            ));
        }

        self.policy
            .validate()
            .map_err(|e| AiError::InvalidInput(e.to_string()))?;

        Ok(RebalanceAdvisor::new(self.policy).suggest(
            &self.input.products,
            &self.input.warehouses,
            &self.dismissed,
        ))
    }
}

impl AiJob for RebalanceJob {
    type Input = RebalanceSnapshot;

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<AiResult, AiError> {
        let suggestions = self.suggestions()?;

        let payload =
            serde_json::to_value(&suggestions).map_err(|e| AiError::Internal(e.to_string()))?;
        let high = suggestions
            .iter()
            .filter(|s| s.priority == SuggestionPriority::High)
            .count();

        // Deterministic rules, so confidence is always full.
        Ok(AiResult::new(suggestions.len() as f64, 1.0)
            .with_explanation(format!(
                "{} transfer suggestion(s), {} out of stock (min_stock_level default={}, surplus x{}, max={})",
                suggestions.len(),
                high,
                self.policy.default_min_stock_level,
                self.policy.surplus_multiplier,
                self.policy.max_suggestions
            ))
            .with_metadata(json!({
                "kind": "inventory.transfer_suggestions",
                "tenant_id": self.tenant_id.to_string(),
                "policy": self.policy,
                "dismissed": self.dismissed.len(),
                "suggestions": payload,
            })))
    }
}
