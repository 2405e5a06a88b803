//! Currency normalization against a dated exchange-rate history

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Currency, EngineError, EngineResult, Money};

/// Exchange rates in effect on one civil day
///
/// Rates are quoted against the base currency: one SAR/OMR equals
/// `sar_rate`/`omr_rate` base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateSnapshot {
    pub sar_rate: BigDecimal,
    pub omr_rate: BigDecimal,
    pub effective_date: NaiveDate,
}

impl ExchangeRateSnapshot {
    pub fn new(sar_rate: BigDecimal, omr_rate: BigDecimal, effective_date: NaiveDate) -> Self {
        Self {
            sar_rate,
            omr_rate,
            effective_date,
        }
    }

    /// Rate for a currency within this snapshot; base is identity
    pub fn rate(&self, currency: Currency) -> BigDecimal {
        match currency {
            Currency::YER => BigDecimal::from(1),
            Currency::SAR => self.sar_rate.clone(),
            Currency::OMR => self.omr_rate.clone(),
        }
    }

    /// Reject non-positive rates before they enter a history
    pub fn validate(&self) -> EngineResult<()> {
        if self.sar_rate <= BigDecimal::from(0) || self.omr_rate <= BigDecimal::from(0) {
            return Err(EngineError::Validation(format!(
                "Exchange rates must be positive: SAR = {}, OMR = {}",
                self.sar_rate, self.omr_rate
            )));
        }
        Ok(())
    }
}

/// Dated rate snapshots, newest first
///
/// Historical lookups match the exact civil day only. Rates are set once
/// per day by the agency, so there is no interpolation between snapshots;
/// a transaction dated on a day with no entry converts at the newest rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateHistory {
    snapshots: Vec<ExchangeRateSnapshot>,
    fallback_sar: Option<BigDecimal>,
    fallback_omr: Option<BigDecimal>,
}

impl RateHistory {
    /// Build a history from snapshots ordered newest first
    pub fn new(snapshots: Vec<ExchangeRateSnapshot>) -> Self {
        Self {
            snapshots,
            fallback_sar: None,
            fallback_omr: None,
        }
    }

    /// Configure default rates used when the history holds no snapshot
    pub fn with_fallback(mut self, sar_rate: BigDecimal, omr_rate: BigDecimal) -> Self {
        self.fallback_sar = Some(sar_rate);
        self.fallback_omr = Some(omr_rate);
        self
    }

    /// The most recent snapshot, if any
    pub fn latest(&self) -> Option<&ExchangeRateSnapshot> {
        self.snapshots.first()
    }

    /// The snapshot effective on exactly the given civil day
    pub fn on_date(&self, date: NaiveDate) -> Option<&ExchangeRateSnapshot> {
        self.snapshots.iter().find(|s| s.effective_date == date)
    }

    /// Rate for converting `currency` into base units
    ///
    /// With a date, matches the exact civil day and otherwise falls back to
    /// the newest snapshot. With no snapshots at all, uses the configured
    /// fallback rates, else identity.
    pub fn rate_for(&self, currency: Currency, on: Option<NaiveDate>) -> BigDecimal {
        if currency.is_base() {
            return BigDecimal::from(1);
        }
        let snapshot = on
            .and_then(|date| self.on_date(date))
            .or_else(|| self.latest());
        match snapshot {
            Some(s) => s.rate(currency),
            None => self.fallback_rate(currency),
        }
    }

    /// Convert an amount into the base reporting currency
    ///
    /// Pure and total: the result is deterministic given the history
    /// contents, and no input can make it fail.
    pub fn to_base(&self, amount: &BigDecimal, currency: Currency, on: Option<NaiveDate>) -> BigDecimal {
        if currency.is_base() {
            return amount.clone();
        }
        amount * self.rate_for(currency, on)
    }

    /// Convert a [`Money`] value into base units
    pub fn normalize(&self, money: &Money, on: Option<NaiveDate>) -> BigDecimal {
        self.to_base(&money.amount, money.currency, on)
    }

    fn fallback_rate(&self, currency: Currency) -> BigDecimal {
        let configured = match currency {
            Currency::YER => return BigDecimal::from(1),
            Currency::SAR => self.fallback_sar.as_ref(),
            Currency::OMR => self.fallback_omr.as_ref(),
        };
        configured.cloned().unwrap_or_else(|| BigDecimal::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn history() -> RateHistory {
        RateHistory::new(vec![
            ExchangeRateSnapshot::new(BigDecimal::from(400), BigDecimal::from(410), day(2)),
            ExchangeRateSnapshot::new(BigDecimal::from(420), BigDecimal::from(415), day(1)),
        ])
    }

    #[test]
    fn test_base_currency_is_identity() {
        let rates = history();
        let amount = BigDecimal::from(1234);
        assert_eq!(rates.to_base(&amount, Currency::YER, None), amount);
        assert_eq!(rates.to_base(&amount, Currency::YER, Some(day(9))), amount);
    }

    #[test]
    fn test_no_date_uses_newest_snapshot() {
        let rates = history();
        assert_eq!(
            rates.to_base(&BigDecimal::from(10), Currency::SAR, None),
            BigDecimal::from(4000)
        );
    }

    #[test]
    fn test_exact_day_match_uses_historical_rate() {
        let rates = history();
        assert_eq!(
            rates.to_base(&BigDecimal::from(10), Currency::SAR, Some(day(1))),
            BigDecimal::from(4200)
        );
    }

    #[test]
    fn test_unmatched_day_falls_back_to_newest() {
        let rates = history();
        // Day 3 has no snapshot; no nearest-date search happens.
        assert_eq!(
            rates.to_base(&BigDecimal::from(10), Currency::SAR, Some(day(3))),
            rates.to_base(&BigDecimal::from(10), Currency::SAR, None)
        );
    }

    #[test]
    fn test_empty_history_uses_configured_fallback() {
        let rates = RateHistory::new(vec![]).with_fallback(BigDecimal::from(430), BigDecimal::from(425));
        assert_eq!(
            rates.to_base(&BigDecimal::from(2), Currency::OMR, None),
            BigDecimal::from(850)
        );
    }

    #[test]
    fn test_empty_history_without_fallback_is_identity() {
        let rates = RateHistory::new(vec![]);
        assert_eq!(
            rates.to_base(&BigDecimal::from(7), Currency::SAR, Some(day(5))),
            BigDecimal::from(7)
        );
    }

    #[test]
    fn test_normalize_money() {
        let rates = history();
        assert_eq!(
            rates.normalize(&Money::new(BigDecimal::from(10), Currency::SAR), Some(day(1))),
            BigDecimal::from(4200)
        );
        let base = Money::base(BigDecimal::from(55));
        assert_eq!(rates.normalize(&base, None), BigDecimal::from(55));
    }

    #[test]
    fn test_snapshot_validation_rejects_non_positive_rates() {
        let bad = ExchangeRateSnapshot::new(BigDecimal::from(0), BigDecimal::from(425), day(1));
        assert!(bad.validate().is_err());
        let good = ExchangeRateSnapshot::new(BigDecimal::from(430), BigDecimal::from(425), day(1));
        assert!(good.validate().is_ok());
    }
}
