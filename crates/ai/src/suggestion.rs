use serde::{Deserialize, Serialize};

use stockpilot_core::ValueObject;
use stockpilot_inventory::{ProductId, TransferDraft, WarehouseId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionReason {
    OutOfStock,
    LowStock,
}

impl SuggestionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionReason::OutOfStock => "out of stock",
            SuggestionReason::LowStock => "low stock",
        }
    }
}

/// Urgency of a suggestion. Declaration order is ranking order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

impl SuggestionPriority {
    /// HIGH=0, MEDIUM=1, LOW=2.
    pub fn rank(&self) -> u8 {
        match self {
            SuggestionPriority::High => 0,
            SuggestionPriority::Medium => 1,
            SuggestionPriority::Low => 2,
        }
    }
}

/// Identity of a suggestion as far as dismissal is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DismissalKey {
    pub product_id: ProductId,
    pub source_warehouse_id: WarehouseId,
    pub target_warehouse_id: WarehouseId,
}

impl DismissalKey {
    pub fn new(
        product_id: impl Into<ProductId>,
        source_warehouse_id: impl Into<WarehouseId>,
        target_warehouse_id: impl Into<WarehouseId>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            source_warehouse_id: source_warehouse_id.into(),
            target_warehouse_id: target_warehouse_id.into(),
        }
    }
}

impl ValueObject for DismissalKey {}

impl core::fmt::Display for DismissalKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.product_id, self.source_warehouse_id, self.target_warehouse_id
        )
    }
}

/// Proposed stock move from a surplus warehouse to a low one.
///
/// Derived from a snapshot on every computation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSuggestion {
    pub product_id: ProductId,
    pub product_name: String,
    pub source_warehouse_id: WarehouseId,
    pub source_warehouse_name: String,
    pub target_warehouse_id: WarehouseId,
    pub target_warehouse_name: String,
    pub source_quantity: i64,
    pub target_quantity: i64,
    pub suggested_transfer_quantity: i64,
    pub reason: SuggestionReason,
    pub priority: SuggestionPriority,
}

impl TransferSuggestion {
    pub fn dismissal_key(&self) -> DismissalKey {
        DismissalKey {
            product_id: self.product_id.clone(),
            source_warehouse_id: self.source_warehouse_id.clone(),
            target_warehouse_id: self.target_warehouse_id.clone(),
        }
    }

    /// Single-line transfer draft for the "execute" action.
    pub fn to_transfer_draft(&self) -> TransferDraft {
        TransferDraft::new(self.source_warehouse_id.clone(), self.target_warehouse_id.clone())
            .with_line(self.product_id.clone(), self.suggested_transfer_quantity)
            .with_notes(format!(
                "rebalance {}: {} at {} ({} on hand)",
                self.product_name,
                self.reason.as_str(),
                self.target_warehouse_name,
                self.target_quantity
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransferSuggestion {
        TransferSuggestion {
            product_id: ProductId::from("p1"),
            product_name: "Oil filter".to_string(),
            source_warehouse_id: WarehouseId::from("w2"),
            source_warehouse_name: "North".to_string(),
            target_warehouse_id: WarehouseId::from("w1"),
            target_warehouse_name: "Main".to_string(),
            source_quantity: 20,
            target_quantity: 0,
            suggested_transfer_quantity: 5,
            reason: SuggestionReason::OutOfStock,
            priority: SuggestionPriority::High,
        }
    }

    #[test]
    fn priority_order_follows_rank() {
        assert!(SuggestionPriority::High < SuggestionPriority::Medium);
        assert!(SuggestionPriority::Medium < SuggestionPriority::Low);
        assert_eq!(SuggestionPriority::Low.rank(), 2);
    }

    #[test]
    fn key_renders_dash_joined_triple() {
        let s = sample();
        assert_eq!(s.dismissal_key(), DismissalKey::new("p1", "w2", "w1"));
        assert_eq!(s.dismissal_key().to_string(), "p1-w2-w1");
    }

    #[test]
    fn keys_with_separator_in_ids_stay_distinct() {
        // Both render as "a-b-c-d" but identify different suggestions.
        let a = DismissalKey::new("a-b", "c", "d");
        let b = DismissalKey::new("a", "b-c", "d");
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn draft_moves_suggested_quantity() {
        let draft = sample().to_transfer_draft();
        assert_eq!(draft.from_warehouse_id, WarehouseId::from("w2"));
        assert_eq!(draft.to_warehouse_id, WarehouseId::from("w1"));
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].quantity, 5);
        assert!(draft.notes.as_deref().unwrap_or_default().contains("out of stock"));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn serializes_enums_in_upper_snake_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["reason"], "OUT_OF_STOCK");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["source_warehouse_id"], "w2");
    }
}
