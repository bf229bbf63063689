use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use stockpilot_core::{DomainError, DomainResult, Entity};

use crate::stock::{ProductId, Warehouse, WarehouseId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Completed,
    Cancelled,
}

/// A stock transfer between two warehouses, as recorded in the transfer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_number: Option<String>,
    pub from_warehouse_id: WarehouseId,
    pub to_warehouse_id: WarehouseId,
    pub status: TransferStatus,
    /// Number of product lines moved by the transfer. Null, negative or
    /// non-numeric values from the data layer count as 0.
    #[serde(default, deserialize_with = "lenient_count")]
    pub item_count: u64,
    pub created_at: DateTime<Utc>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    let count = match value {
        Some(JsonValue::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64)),
        Some(JsonValue::String(s)) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    };
    Ok(count.unwrap_or(0))
}

impl Entity for TransferRecord {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Payload handed to the external transfer-creation workflow.
///
/// Nothing in this workspace submits it; `validate` only checks that the draft is
/// well-formed before the hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDraft {
    pub from_warehouse_id: WarehouseId,
    pub to_warehouse_id: WarehouseId,
    pub items: Vec<TransferLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransferDraft {
    pub fn new(from: WarehouseId, to: WarehouseId) -> Self {
        Self {
            from_warehouse_id: from,
            to_warehouse_id: to,
            items: Vec::new(),
            notes: None,
        }
    }

    pub fn with_line(mut self, product_id: ProductId, quantity: i64) -> Self {
        self.items.push(TransferLine { product_id, quantity });
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.from_warehouse_id == self.to_warehouse_id {
            return Err(DomainError::invariant(
                "source and destination warehouse must differ",
            ));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation("transfer must contain at least one line"));
        }
        if let Some(line) = self.items.iter().find(|l| l.quantity <= 0) {
            return Err(DomainError::validation(format!(
                "quantity for product {} must be positive (got {})",
                line.product_id, line.quantity
            )));
        }
        Ok(())
    }
}

/// Summary counters shown above the transfer history.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStats {
    pub total: usize,
    /// Transfers created in the same calendar month (UTC) as `now`.
    pub this_month: usize,
    pub total_items: u64,
    pub warehouse_count: usize,
}

impl TransferStats {
    /// Derive the counters from scratch. `now` is injected to keep this pure.
    pub fn compute(transfers: &[TransferRecord], warehouses: &[Warehouse], now: DateTime<Utc>) -> Self {
        let this_month = transfers
            .iter()
            .filter(|t| t.created_at.year() == now.year() && t.created_at.month() == now.month())
            .count();

        Self {
            total: transfers.len(),
            this_month,
            total_items: transfers
                .iter()
                .fold(0u64, |acc, t| acc.saturating_add(t.item_count)),
            warehouse_count: warehouses.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn record(id: &str, created_at: DateTime<Utc>, item_count: u64) -> TransferRecord {
        TransferRecord {
            id: id.to_string(),
            transfer_number: None,
            from_warehouse_id: WarehouseId::from("w1"),
            to_warehouse_id: WarehouseId::from("w2"),
            status: TransferStatus::Completed,
            item_count,
            created_at,
        }
    }

    #[test]
    fn stats_count_current_month_only() {
        let now = at(2026, 10, 16);
        let transfers = vec![
            record("t1", at(2026, 10, 1), 3),
            record("t2", at(2026, 9, 30), 2),
            // same month, previous year
            record("t3", at(2025, 10, 16), 4),
            record("t4", at(2026, 10, 16), 0),
        ];
        let warehouses = vec![Warehouse::new("w1", "Main"), Warehouse::new("w2", "North")];

        let stats = TransferStats::compute(&transfers, &warehouses, now);
        assert_eq!(
            stats,
            TransferStats {
                total: 4,
                this_month: 2,
                total_items: 9,
                warehouse_count: 2,
            }
        );
    }

    #[test]
    fn stats_on_empty_history() {
        let stats = TransferStats::compute(&[], &[], at(2026, 1, 1));
        assert_eq!(stats, TransferStats::default());
    }

    #[test]
    fn record_tolerates_missing_item_count() {
        let r: TransferRecord = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "from_warehouse_id": "w1",
            "to_warehouse_id": "w2",
            "status": "pending",
            "created_at": "2026-10-02T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(r.item_count, 0);
        assert_eq!(r.status, TransferStatus::Pending);
    }

    #[test]
    fn record_counts_unusable_item_count_as_zero() {
        let parse = |item_count: serde_json::Value| -> TransferRecord {
            serde_json::from_value(serde_json::json!({
                "id": "t1",
                "from_warehouse_id": "w1",
                "to_warehouse_id": "w2",
                "status": "completed",
                "item_count": item_count,
                "created_at": "2026-10-02T08:30:00Z"
            }))
            .unwrap()
        };

        assert_eq!(parse(serde_json::Value::Null).item_count, 0);
        assert_eq!(parse(serde_json::json!("n/a")).item_count, 0);
        assert_eq!(parse(serde_json::json!(-2)).item_count, 0);
        assert_eq!(parse(serde_json::json!({ "lines": 3 })).item_count, 0);
        assert_eq!(parse(serde_json::json!("4")).item_count, 4);
        assert_eq!(parse(serde_json::json!(2.0)).item_count, 2);
        assert_eq!(parse(serde_json::json!(7)).item_count, 7);
    }

    #[test]
    fn total_items_saturates() {
        let now = at(2026, 10, 16);
        let transfers = vec![record("t1", now, u64::MAX), record("t2", now, 5)];
        let stats = TransferStats::compute(&transfers, &[], now);
        assert_eq!(stats.total_items, u64::MAX);
    }

    #[test]
    fn draft_validation() {
        let ok = TransferDraft::new("w1".into(), "w2".into()).with_line("p1".into(), 5);
        assert!(ok.validate().is_ok());

        let same = TransferDraft::new("w1".into(), "w1".into()).with_line("p1".into(), 5);
        assert!(matches!(same.validate(), Err(DomainError::InvariantViolation(_))));

        let empty = TransferDraft::new("w1".into(), "w2".into());
        assert!(matches!(empty.validate(), Err(DomainError::Validation(_))));

        let zero = TransferDraft::new("w1".into(), "w2".into()).with_line("p1".into(), 0);
        match zero.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("p1")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn stats_are_consistent(items in prop::collection::vec((0u64..500, 1u32..=12), 0..40)) {
            let now = at(2026, 6, 15);
            let transfers: Vec<TransferRecord> = items
                .iter()
                .enumerate()
                .map(|(i, (count, month))| record(&format!("t{i}"), at(2026, *month, 1), *count))
                .collect();

            let stats = TransferStats::compute(&transfers, &[], now);
            prop_assert_eq!(stats.total, transfers.len());
            prop_assert!(stats.this_month <= stats.total);
            prop_assert_eq!(stats.this_month, items.iter().filter(|(_, m)| *m == 6).count());
            prop_assert_eq!(stats.total_items, items.iter().map(|(c, _)| c).sum::<u64>());
        }
    }
}
