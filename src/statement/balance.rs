//! Running-balance accumulation over a unified statement

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::currency::RateHistory;
use crate::statement::unify::{LineSource, StatementLine};
use crate::types::Currency;

/// One fully resolved statement row
///
/// Carries both the original-currency legs and their base-currency
/// conversions so the presentation layer can render either display mode
/// without recomputing. Derived per query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDateTime,
    pub description: String,
    pub source: LineSource,
    /// Debit in the record's original currency
    pub debit: BigDecimal,
    /// Credit in the record's original currency
    pub credit: BigDecimal,
    pub currency: Currency,
    /// Exchange rate applied to this row, matched to its civil date
    pub rate_used: BigDecimal,
    pub debit_base: BigDecimal,
    pub credit_base: BigDecimal,
    /// Cumulative net balance in base currency after this row
    pub running_balance: BigDecimal,
}

/// Which side the final balance falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalancePosition {
    /// The entity owes the agency
    Debtor,
    /// The agency owes the entity
    Creditor,
}

/// Closing figures for a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Signed closing balance in base currency
    pub final_balance: BigDecimal,
    pub position: BalancePosition,
}

/// Walk the unified lines in order, attaching running base balances
///
/// Each leg converts at the rate matched to the line's own civil date, so
/// statements value history at historical rates. The accumulation order is
/// exactly the input order; with decimal arithmetic the final balance
/// equals the sum of all (debit - credit) conversions regardless of how a
/// caller would chunk that sum.
pub fn accumulate(lines: Vec<StatementLine>, rates: &RateHistory) -> Vec<LedgerEntry> {
    let mut running = BigDecimal::from(0);
    lines
        .into_iter()
        .map(|line| {
            let rate_used = rates.rate_for(line.currency, Some(line.date.date()));
            let debit_base = &line.debit * &rate_used;
            let credit_base = &line.credit * &rate_used;
            running += &debit_base - &credit_base;
            LedgerEntry {
                date: line.date,
                description: line.description,
                source: line.source,
                debit: line.debit,
                credit: line.credit,
                currency: line.currency,
                rate_used,
                debit_base,
                credit_base,
                running_balance: running.clone(),
            }
        })
        .collect()
}

/// Closing balance and position for an accumulated statement
pub fn summarize(entries: &[LedgerEntry]) -> StatementSummary {
    let final_balance = entries
        .last()
        .map(|e| e.running_balance.clone())
        .unwrap_or_else(|| BigDecimal::from(0));
    let position = if final_balance >= BigDecimal::from(0) {
        BalancePosition::Debtor
    } else {
        BalancePosition::Creditor
    };
    StatementSummary {
        final_balance,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::ExchangeRateSnapshot;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn line(day: u32, debit: i64, credit: i64, currency: Currency) -> StatementLine {
        StatementLine {
            date: at(day),
            description: "row".to_string(),
            source: LineSource::Invoice,
            debit: BigDecimal::from(debit),
            credit: BigDecimal::from(credit),
            currency,
        }
    }

    #[test]
    fn test_running_balance_accumulates_in_order() {
        let rates = RateHistory::new(vec![]);
        let entries = accumulate(
            vec![
                line(1, 1000, 0, Currency::YER),
                line(2, 500, 0, Currency::YER),
                line(3, 0, 300, Currency::YER),
            ],
            &rates,
        );

        let balances: Vec<_> = entries.iter().map(|e| e.running_balance.clone()).collect();
        assert_eq!(
            balances,
            vec![
                BigDecimal::from(1000),
                BigDecimal::from(1500),
                BigDecimal::from(1200)
            ]
        );
    }

    #[test]
    fn test_conversion_uses_rate_of_the_rows_day() {
        let rates = RateHistory::new(vec![
            ExchangeRateSnapshot::new(
                BigDecimal::from(400),
                BigDecimal::from(410),
                at(2).date(),
            ),
            ExchangeRateSnapshot::new(
                BigDecimal::from(420),
                BigDecimal::from(415),
                at(1).date(),
            ),
        ]);

        let entries = accumulate(vec![line(1, 10, 0, Currency::SAR)], &rates);
        assert_eq!(entries[0].rate_used, BigDecimal::from(420));
        assert_eq!(entries[0].debit_base, BigDecimal::from(4200));
        assert_eq!(entries[0].running_balance, BigDecimal::from(4200));
    }

    #[test]
    fn test_conservation_final_equals_total_net() {
        let rates = RateHistory::new(vec![ExchangeRateSnapshot::new(
            BigDecimal::from(400),
            BigDecimal::from(410),
            at(1).date(),
        )]);
        let lines = vec![
            line(1, 10, 0, Currency::SAR),
            line(2, 0, 4, Currency::OMR),
            line(3, 250, 0, Currency::YER),
            line(4, 0, 100, Currency::YER),
        ];

        let expected: BigDecimal = lines
            .iter()
            .map(|l| {
                let rate = rates.rate_for(l.currency, Some(l.date.date()));
                &l.debit * &rate - &l.credit * &rate
            })
            .sum();

        let entries = accumulate(lines, &rates);
        assert_eq!(summarize(&entries).final_balance, expected);
    }

    #[test]
    fn test_empty_statement_summary_is_zero_debtor() {
        let summary = summarize(&[]);
        assert_eq!(summary.final_balance, BigDecimal::from(0));
        assert_eq!(summary.position, BalancePosition::Debtor);
    }

    #[test]
    fn test_negative_final_balance_is_creditor() {
        let rates = RateHistory::new(vec![]);
        let entries = accumulate(vec![line(1, 0, 750, Currency::YER)], &rates);
        let summary = summarize(&entries);
        assert_eq!(summary.final_balance, BigDecimal::from(-750));
        assert_eq!(summary.position, BalancePosition::Creditor);
    }
}
