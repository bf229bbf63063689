//! Tunable thresholds of the rebalancing advisor.

use serde::{Deserialize, Serialize};

use stockpilot_core::{DomainError, DomainResult};

/// Minimum stock level assumed for products that do not set one.
pub const DEFAULT_MIN_STOCK_LEVEL: i64 = 5;

/// A source must hold more than `multiplier * min_stock_level` units.
pub const DEFAULT_SURPLUS_MULTIPLIER: i64 = 2;

/// At most `source_quantity / divisor` units are proposed (floored).
pub const DEFAULT_TRANSFER_DIVISOR: i64 = 3;

/// Targets at or below this quantity (but not empty) are MEDIUM priority.
pub const DEFAULT_MEDIUM_PRIORITY_MAX_QUANTITY: i64 = 2;

/// Upper bound on the number of suggestions returned per computation.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

pub const ENV_MIN_STOCK_LEVEL: &str = "STOCKPILOT_MIN_STOCK_LEVEL";
pub const ENV_SURPLUS_MULTIPLIER: &str = "STOCKPILOT_SURPLUS_MULTIPLIER";
pub const ENV_TRANSFER_DIVISOR: &str = "STOCKPILOT_TRANSFER_DIVISOR";
pub const ENV_MEDIUM_PRIORITY_MAX_QUANTITY: &str = "STOCKPILOT_MEDIUM_PRIORITY_MAX_QUANTITY";
pub const ENV_MAX_SUGGESTIONS: &str = "STOCKPILOT_MAX_SUGGESTIONS";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalancePolicy {
    pub default_min_stock_level: i64,
    pub surplus_multiplier: i64,
    pub transfer_divisor: i64,
    pub medium_priority_max_quantity: i64,
    pub max_suggestions: usize,
}

impl Default for RebalancePolicy {
    fn default() -> Self {
        Self {
            default_min_stock_level: DEFAULT_MIN_STOCK_LEVEL,
            surplus_multiplier: DEFAULT_SURPLUS_MULTIPLIER,
            transfer_divisor: DEFAULT_TRANSFER_DIVISOR,
            medium_priority_max_quantity: DEFAULT_MEDIUM_PRIORITY_MAX_QUANTITY,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl RebalancePolicy {
    pub fn with_default_min_stock_level(mut self, min: i64) -> Self {
        self.default_min_stock_level = min;
        self
    }

    pub fn with_surplus_multiplier(mut self, multiplier: i64) -> Self {
        self.surplus_multiplier = multiplier;
        self
    }

    pub fn with_transfer_divisor(mut self, divisor: i64) -> Self {
        self.transfer_divisor = divisor;
        self
    }

    pub fn with_medium_priority_max_quantity(mut self, quantity: i64) -> Self {
        self.medium_priority_max_quantity = quantity;
        self
    }

    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Defaults overlaid with `STOCKPILOT_*` environment variables.
    ///
    /// Values that fail to parse are ignored (logged at warn).
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`RebalancePolicy::from_env`] with an injectable variable lookup.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();
        if let Some(v) = parse_var(&lookup, ENV_MIN_STOCK_LEVEL) {
            policy.default_min_stock_level = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SURPLUS_MULTIPLIER) {
            policy.surplus_multiplier = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_TRANSFER_DIVISOR) {
            policy.transfer_divisor = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MEDIUM_PRIORITY_MAX_QUANTITY) {
            policy.medium_priority_max_quantity = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MAX_SUGGESTIONS) {
            policy.max_suggestions = v;
        }
        policy
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.default_min_stock_level <= 0 {
            return Err(DomainError::validation("default_min_stock_level must be positive"));
        }
        if self.surplus_multiplier < 1 {
            return Err(DomainError::validation("surplus_multiplier must be >= 1"));
        }
        if self.transfer_divisor < 1 {
            return Err(DomainError::validation("transfer_divisor must be >= 1"));
        }
        if self.max_suggestions == 0 {
            return Err(DomainError::validation("max_suggestions must be >= 1"));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: core::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable rebalance policy override");
            None
        }
    }
}
