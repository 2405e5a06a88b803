//! Dashboard aggregates derived from the raw record streams
//!
//! Everything here values amounts at the current exchange rate: these are
//! present-day figures for dashboards, unlike statements, which value each
//! row at its own historical rate.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::RateHistory;
use crate::debts::DebtVector;
use crate::types::{Expense, PaymentStatus, Purchase, Sale};

/// One day's trading position in base currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Sales net of returns
    pub total_sales: BigDecimal,
    /// Purchases net of returns
    pub total_purchases: BigDecimal,
    pub total_expenses: BigDecimal,
    /// Sales minus expenses
    pub net: BigDecimal,
    /// Cash-settled sales received that day
    pub cash_received: BigDecimal,
    pub sales_count: usize,
}

/// Revenue, cost, and margin for one item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProfit {
    pub revenue: BigDecimal,
    pub cost: BigDecimal,
    pub profit: BigDecimal,
}

/// Summarize one civil day's trading
pub fn daily_summary(
    date: NaiveDate,
    sales: &[Sale],
    purchases: &[Purchase],
    expenses: &[Expense],
    rates: &RateHistory,
) -> DailySummary {
    let day_sales: Vec<&Sale> = sales.iter().filter(|s| s.date.date() == date).collect();

    let total_sales: BigDecimal = day_sales
        .iter()
        .map(|s| signed(rates.to_base(&s.total, s.currency, None), s.is_return))
        .sum();
    let total_purchases: BigDecimal = purchases
        .iter()
        .filter(|p| p.date.date() == date)
        .map(|p| signed(rates.to_base(&p.total_cost, p.currency, None), p.is_return))
        .sum();
    let total_expenses: BigDecimal = expenses
        .iter()
        .filter(|e| e.date.date() == date)
        .map(|e| rates.to_base(&e.amount, e.currency, None))
        .sum();
    let cash_received: BigDecimal = day_sales
        .iter()
        .filter(|s| s.status == PaymentStatus::Cash && !s.is_return)
        .map(|s| rates.to_base(&s.total, s.currency, None))
        .sum();

    let net = &total_sales - &total_expenses;
    DailySummary {
        date,
        sales_count: day_sales.len(),
        total_sales,
        total_purchases,
        total_expenses,
        net,
        cash_received,
    }
}

/// Revenue/cost/profit per item type over the whole history
pub fn profit_by_item(
    item_types: &[String],
    sales: &[Sale],
    purchases: &[Purchase],
    rates: &RateHistory,
) -> HashMap<String, ItemProfit> {
    item_types
        .iter()
        .map(|item| {
            let revenue: BigDecimal = sales
                .iter()
                .filter(|s| &s.item_type == item)
                .map(|s| signed(rates.to_base(&s.total, s.currency, None), s.is_return))
                .sum();
            let cost: BigDecimal = purchases
                .iter()
                .filter(|p| &p.item_type == item)
                .map(|p| signed(rates.to_base(&p.total_cost, p.currency, None), p.is_return))
                .sum();
            let profit = &revenue - &cost;
            (
                item.clone(),
                ItemProfit {
                    revenue,
                    cost,
                    profit,
                },
            )
        })
        .collect()
}

/// Daily net sales in base currency for the `days` days ending at `end`
///
/// Oldest day first, so the series plots left to right.
pub fn sales_trend(end: NaiveDate, days: u32, sales: &[Sale], rates: &RateHistory) -> Vec<BigDecimal> {
    (0..days)
        .map(|i| {
            let offset = i64::from(days - 1 - i);
            let day = end - chrono::Duration::days(offset);
            sales
                .iter()
                .filter(|s| s.date.date() == day)
                .map(|s| signed(rates.to_base(&s.total, s.currency, None), s.is_return))
                .sum()
        })
        .collect()
}

/// The item type with the highest quantity recorded on a day
///
/// Ties break toward the lexicographically smaller item name so reruns
/// stay deterministic.
pub fn top_item(date: NaiveDate, sales: &[Sale]) -> Option<(String, i64)> {
    let mut by_item: HashMap<&str, i64> = HashMap::new();
    for sale in sales.iter().filter(|s| s.date.date() == date) {
        *by_item.entry(sale.item_type.as_str()).or_insert(0) += sale.quantity;
    }
    by_item
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(item, qty)| (item.to_string(), qty))
}

/// Total outstanding exposure across a set of debt vectors, in base currency
pub fn total_exposure(debts: &[DebtVector], rates: &RateHistory) -> BigDecimal {
    debts.iter().map(|d| d.total_in_base(rates)).sum()
}

fn signed(amount: BigDecimal, negate: bool) -> BigDecimal {
    if negate {
        -amount
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::ExchangeRateSnapshot;
    use crate::types::Currency;
    use chrono::NaiveDateTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn at(d: u32) -> NaiveDateTime {
        day(d).and_hms_opt(14, 30, 0).unwrap()
    }

    fn rates() -> RateHistory {
        RateHistory::new(vec![ExchangeRateSnapshot::new(
            BigDecimal::from(400),
            BigDecimal::from(410),
            day(1),
        )])
    }

    fn sale(d: u32, item: &str, qty: i64, price: i64, currency: Currency) -> Sale {
        Sale::new(
            at(d),
            None,
            "Ahmad",
            item,
            qty,
            BigDecimal::from(price),
            currency,
            PaymentStatus::Cash,
        )
    }

    #[test]
    fn test_daily_summary_converts_and_nets_returns() {
        let sales = vec![
            sale(1, "TypeA", 1, 1000, Currency::YER),
            sale(1, "TypeA", 1, 10, Currency::SAR),
            sale(1, "TypeA", 1, 500, Currency::YER).as_return(),
            sale(2, "TypeA", 1, 9999, Currency::YER),
        ];
        let expenses = vec![Expense::new(
            at(1),
            "Transport",
            BigDecimal::from(300),
            Currency::YER,
            "Truck hire",
        )];

        let summary = daily_summary(day(1), &sales, &[], &expenses, &rates());
        // 1000 + 10 * 400 - 500, the day-2 sale excluded.
        assert_eq!(summary.total_sales, BigDecimal::from(4500));
        assert_eq!(summary.total_expenses, BigDecimal::from(300));
        assert_eq!(summary.net, BigDecimal::from(4200));
        assert_eq!(summary.sales_count, 3);
        // Returns do not count as cash received.
        assert_eq!(summary.cash_received, BigDecimal::from(5000));
    }

    #[test]
    fn test_profit_by_item() {
        let items = vec!["TypeA".to_string(), "TypeB".to_string()];
        let sales = vec![sale(1, "TypeA", 5, 100, Currency::YER)];
        let purchases = vec![Purchase::new(
            at(1),
            uuid::Uuid::new_v4(),
            "Al-Madina",
            "TypeA",
            5,
            BigDecimal::from(60),
            Currency::YER,
            PaymentStatus::Cash,
        )];

        let profits = profit_by_item(&items, &sales, &purchases, &rates());
        assert_eq!(profits["TypeA"].revenue, BigDecimal::from(500));
        assert_eq!(profits["TypeA"].cost, BigDecimal::from(300));
        assert_eq!(profits["TypeA"].profit, BigDecimal::from(200));
        assert_eq!(profits["TypeB"].profit, BigDecimal::from(0));
    }

    #[test]
    fn test_sales_trend_oldest_first() {
        let sales = vec![
            sale(1, "TypeA", 1, 100, Currency::YER),
            sale(3, "TypeA", 1, 300, Currency::YER),
        ];
        let trend = sales_trend(day(3), 3, &sales, &rates());
        assert_eq!(
            trend,
            vec![
                BigDecimal::from(100),
                BigDecimal::from(0),
                BigDecimal::from(300)
            ]
        );
    }

    #[test]
    fn test_top_item_by_quantity() {
        let sales = vec![
            sale(1, "TypeA", 2, 100, Currency::YER),
            sale(1, "TypeB", 5, 100, Currency::YER),
            sale(2, "TypeC", 9, 100, Currency::YER),
        ];
        assert_eq!(top_item(day(1), &sales), Some(("TypeB".to_string(), 5)));
        assert_eq!(top_item(day(9), &sales), None);
    }
}
