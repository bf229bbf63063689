use serde::{Deserialize, Serialize};

use stockpilot_core::{Entity, ValueObject};

macro_rules! impl_string_id {
    ($t:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

impl_string_id!(ProductId, "Product identifier as issued by the inventory data layer.");
impl_string_id!(WarehouseId, "Warehouse identifier as issued by the inventory data layer.");

/// Warehouse snapshot record. Identity is `id`.
///
/// Deserializes from the data layer's shape, where the display name may arrive as
/// `name` or only as the localized `name_ar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WarehouseRecord")]
pub struct Warehouse {
    pub id: WarehouseId,
    #[serde(rename = "name")]
    pub display_name: String,
}

#[derive(Deserialize)]
struct WarehouseRecord {
    id: WarehouseId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    name_ar: Option<String>,
}

impl From<WarehouseRecord> for Warehouse {
    fn from(r: WarehouseRecord) -> Self {
        let display_name = r
            .name
            .filter(|n| !n.trim().is_empty())
            .or(r.name_ar)
            .unwrap_or_default();
        Self {
            id: r.id,
            display_name,
        }
    }
}

impl Warehouse {
    pub fn new(id: impl Into<WarehouseId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Display name, or `None` when the record carries a blank one.
    pub fn display_name(&self) -> Option<&str> {
        non_blank(&self.display_name)
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One warehouse's recorded quantity of one product (a distribution entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub warehouse_id: WarehouseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_name: Option<String>,
    pub quantity: i64,
}

impl StockLevel {
    pub fn new(warehouse_id: impl Into<WarehouseId>, quantity: i64) -> Self {
        Self {
            warehouse_id: warehouse_id.into(),
            warehouse_name: None,
            quantity,
        }
    }

    pub fn with_warehouse_name(mut self, name: impl Into<String>) -> Self {
        self.warehouse_name = Some(name.into());
        self
    }

    /// Name carried by the entry itself, if any and not blank.
    pub fn warehouse_name(&self) -> Option<&str> {
        self.warehouse_name.as_deref().and_then(non_blank)
    }
}

impl ValueObject for StockLevel {}

/// Product with its stock distribution across warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock_level: Option<i64>,
    #[serde(rename = "warehouse_distribution", default)]
    pub distribution: Vec<StockLevel>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            min_stock_level: None,
            distribution: Vec::new(),
        }
    }

    pub fn with_min_stock_level(mut self, min: i64) -> Self {
        self.min_stock_level = Some(min);
        self
    }

    pub fn with_stock(mut self, level: StockLevel) -> Self {
        self.distribution.push(level);
        self
    }

    /// Minimum stock level used for classification.
    ///
    /// Unset, zero and negative minimums all fall back to `default`.
    pub fn effective_min_stock_level(&self, default: i64) -> i64 {
        match self.min_stock_level {
            Some(min) if min > 0 => min,
            _ => default,
        }
    }

    /// A product can only be rebalanced when at least two warehouses hold an entry.
    pub fn is_rebalanceable(&self) -> bool {
        self.distribution.len() >= 2
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn effective_min_defaults_when_unset_or_non_positive() {
        let p = Product::new("p1", "Bolt");
        assert_eq!(p.effective_min_stock_level(5), 5);
        assert_eq!(p.clone().with_min_stock_level(0).effective_min_stock_level(5), 5);
        assert_eq!(p.clone().with_min_stock_level(-3).effective_min_stock_level(5), 5);
        assert_eq!(p.with_min_stock_level(12).effective_min_stock_level(5), 12);
    }

    #[test]
    fn deserializes_data_layer_product() {
        let p: Product = serde_json::from_value(json!({
            "id": "p1",
            "name": "Brake pad",
            "min_stock_level": 4,
            "warehouse_distribution": [
                { "warehouse_id": "w1", "warehouse_name": "Main", "quantity": 0 },
                { "warehouse_id": "w2", "quantity": 20 }
            ]
        }))
        .unwrap();

        assert_eq!(p.min_stock_level, Some(4));
        assert_eq!(p.distribution.len(), 2);
        assert_eq!(p.distribution[0].warehouse_name(), Some("Main"));
        assert_eq!(p.distribution[1].warehouse_name(), None);
        assert!(p.is_rebalanceable());
    }

    #[test]
    fn missing_distribution_is_empty() {
        let p: Product = serde_json::from_value(json!({ "id": "p1", "name": "Nut" })).unwrap();
        assert!(p.distribution.is_empty());
        assert!(!p.is_rebalanceable());
    }

    #[test]
    fn warehouse_name_falls_back_to_localized_name() {
        let w: Warehouse = serde_json::from_value(json!({ "id": "w1", "name_ar": "الرئيسي" })).unwrap();
        assert_eq!(w.display_name(), Some("الرئيسي"));

        let w: Warehouse =
            serde_json::from_value(json!({ "id": "w2", "name": "North", "name_ar": "الشمال" })).unwrap();
        assert_eq!(w.display_name(), Some("North"));

        let w: Warehouse = serde_json::from_value(json!({ "id": "w3" })).unwrap();
        assert_eq!(w.display_name(), None);
        assert_eq!(w.id(), &WarehouseId::from("w3"));
    }

    #[test]
    fn blank_entry_name_counts_as_missing() {
        let level = StockLevel::new("w1", 3).with_warehouse_name("  ");
        assert_eq!(level.warehouse_name(), None);
    }
}
