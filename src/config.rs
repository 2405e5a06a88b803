//! Engine configuration supplied by the hosting application

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::Currency;

/// Day thresholds for debt aging classification
///
/// An entity's debt is bucketed by days since its last activity:
/// `< recent_days` is recent, `< active_days` active, `< dormant_days`
/// overdue, anything older dormant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingThresholds {
    pub recent_days: i64,
    pub active_days: i64,
    pub dormant_days: i64,
}

impl Default for AgingThresholds {
    fn default() -> Self {
        Self {
            recent_days: 3,
            active_days: 15,
            dormant_days: 30,
        }
    }
}

/// Tunables the engine consumes but never hardcodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Currency preselected for new records
    pub default_currency: Currency,
    pub aging: AgingThresholds,
    /// On-hand quantity at or below which an item counts as low stock
    pub low_stock_threshold: i64,
    /// Fallback SAR rate used when the rate history is empty
    pub default_sar_rate: BigDecimal,
    /// Fallback OMR rate used when the rate history is empty
    pub default_omr_rate: BigDecimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::YER,
            aging: AgingThresholds::default(),
            low_stock_threshold: 5,
            default_sar_rate: BigDecimal::from(430),
            default_omr_rate: BigDecimal::from(425),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_settings() {
        let config = EngineConfig::default();
        assert_eq!(config.default_currency, Currency::YER);
        assert_eq!(config.aging.recent_days, 3);
        assert_eq!(config.aging.active_days, 15);
        assert_eq!(config.aging.dormant_days, 30);
        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.default_sar_rate, BigDecimal::from(430));
    }
}
