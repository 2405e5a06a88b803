//! Point-in-time multi-currency debt aggregation per entity

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AgingThresholds;
use crate::currency::RateHistory;
use crate::types::{
    Currency, Customer, EntityKind, PaymentStatus, Purchase, Sale, Supplier, Voucher, VoucherKind,
};

/// Outstanding balance of one entity, broken out by currency
///
/// Amounts are never summed across currencies here; the map preserves the
/// full breakdown and [`DebtVector::total_in_base`] converts at the
/// current rate only when a single dashboard figure is needed. Recomputed
/// from scratch on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtVector {
    pub entity_id: Uuid,
    pub entity_name: String,
    pub balances: HashMap<Currency, BigDecimal>,
    /// Latest transaction instant for the entity, else the opening date
    pub last_activity: Option<NaiveDateTime>,
}

impl DebtVector {
    /// Present-day valuation of the whole vector in base currency
    ///
    /// Uses the current rate deliberately: dashboards show what the debt is
    /// worth today, while statements value each row at its own date.
    pub fn total_in_base(&self, rates: &RateHistory) -> BigDecimal {
        Currency::ALL
            .iter()
            .map(|&currency| {
                let balance = self
                    .balances
                    .get(&currency)
                    .cloned()
                    .unwrap_or_else(|| BigDecimal::from(0));
                rates.to_base(&balance, currency, None)
            })
            .sum()
    }

    /// Whether every per-currency balance is zero
    pub fn is_settled(&self) -> bool {
        self.balances.values().all(|b| *b == BigDecimal::from(0))
    }

    /// Classify the debt's age as of `now`
    ///
    /// An entity with no recorded activity at all counts as recent, the
    /// same way a freshly created account does.
    pub fn aging(&self, now: NaiveDateTime, thresholds: &AgingThresholds) -> AgingBucket {
        let last = match self.last_activity {
            Some(last) => last,
            None => return AgingBucket::Recent,
        };
        let days = (now - last).num_days();
        if days < thresholds.recent_days {
            AgingBucket::Recent
        } else if days < thresholds.active_days {
            AgingBucket::Active
        } else if days < thresholds.dormant_days {
            AgingBucket::Overdue
        } else {
            AgingBucket::Dormant
        }
    }
}

/// Age classification of an outstanding debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgingBucket {
    Recent,
    Active,
    Overdue,
    Dormant,
}

/// Aggregate a customer's outstanding debt
///
/// Only credit-status sales contribute: cash sales settle immediately and
/// never become debt. Vouchers always contribute, since they are
/// settlements by nature. Returns are negated.
pub fn customer_debt(customer: &Customer, sales: &[Sale], vouchers: &[Voucher]) -> DebtVector {
    let mut balances = empty_balances();
    seed_opening(&mut balances, customer.opening_balance.as_ref());

    let entity_sales: Vec<&Sale> = sales
        .iter()
        .filter(|s| s.customer_id == Some(customer.id))
        .collect();
    let entity_vouchers: Vec<&Voucher> = vouchers
        .iter()
        .filter(|v| v.entity_id == customer.id && v.entity_kind == EntityKind::Customer)
        .collect();

    for sale in entity_sales.iter().filter(|s| s.status == PaymentStatus::Credit) {
        let signed = signed_amount(&sale.total, sale.is_return);
        add(&mut balances, sale.currency, signed);
    }
    for voucher in &entity_vouchers {
        // A receipt pays debt down; a payment out raises it.
        let signed = signed_amount(&voucher.amount, voucher.kind == VoucherKind::Receipt);
        add(&mut balances, voucher.currency, signed);
    }

    let last_activity = latest_activity(
        entity_sales.iter().map(|s| s.date),
        entity_vouchers.iter().map(|v| v.date),
        customer.opening_balance.as_ref().map(|o| o.date),
    );

    DebtVector {
        entity_id: customer.id,
        entity_name: customer.name.clone(),
        balances,
        last_activity,
    }
}

/// Aggregate a supplier's outstanding balance
///
/// Mirror image of the customer side: credit purchases raise what the
/// agency owes, payments settle it, receipts raise it back.
pub fn supplier_debt(
    supplier: &Supplier,
    purchases: &[Purchase],
    vouchers: &[Voucher],
) -> DebtVector {
    let mut balances = empty_balances();
    seed_opening(&mut balances, supplier.opening_balance.as_ref());

    let entity_purchases: Vec<&Purchase> = purchases
        .iter()
        .filter(|p| p.supplier_id == supplier.id)
        .collect();
    let entity_vouchers: Vec<&Voucher> = vouchers
        .iter()
        .filter(|v| v.entity_id == supplier.id && v.entity_kind == EntityKind::Supplier)
        .collect();

    for purchase in entity_purchases
        .iter()
        .filter(|p| p.status == PaymentStatus::Credit)
    {
        let signed = signed_amount(&purchase.total_cost, purchase.is_return);
        add(&mut balances, purchase.currency, signed);
    }
    for voucher in &entity_vouchers {
        let signed = signed_amount(&voucher.amount, voucher.kind == VoucherKind::Payment);
        add(&mut balances, voucher.currency, signed);
    }

    let last_activity = latest_activity(
        entity_purchases.iter().map(|p| p.date),
        entity_vouchers.iter().map(|v| v.date),
        supplier.opening_balance.as_ref().map(|o| o.date),
    );

    DebtVector {
        entity_id: supplier.id,
        entity_name: supplier.name.clone(),
        balances,
        last_activity,
    }
}

/// Sort debt vectors by present-day exposure, largest first
pub fn rank_by_exposure(debts: &mut [DebtVector], rates: &RateHistory) {
    debts.sort_by_cached_key(|d| std::cmp::Reverse(d.total_in_base(rates)));
}

fn empty_balances() -> HashMap<Currency, BigDecimal> {
    Currency::ALL
        .iter()
        .map(|&c| (c, BigDecimal::from(0)))
        .collect()
}

fn seed_opening(
    balances: &mut HashMap<Currency, BigDecimal>,
    opening: Option<&crate::types::OpeningBalance>,
) {
    if let Some(opening) = opening {
        add(balances, opening.currency, opening.amount.clone());
    }
}

fn signed_amount(amount: &BigDecimal, negate: bool) -> BigDecimal {
    if negate {
        -amount.clone()
    } else {
        amount.clone()
    }
}

fn add(balances: &mut HashMap<Currency, BigDecimal>, currency: Currency, amount: BigDecimal) {
    let entry = balances
        .entry(currency)
        .or_insert_with(|| BigDecimal::from(0));
    *entry += amount;
}

fn latest_activity(
    first: impl Iterator<Item = NaiveDateTime>,
    second: impl Iterator<Item = NaiveDateTime>,
    opening_date: Option<NaiveDateTime>,
) -> Option<NaiveDateTime> {
    first.chain(second).max().or(opening_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OpeningBalance;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn customer_with_opening(amount: i64, currency: Currency, day: u32) -> Customer {
        Customer::new("Ahmad").with_opening_balance(OpeningBalance {
            amount: BigDecimal::from(amount),
            currency,
            date: at(day),
            note: None,
        })
    }

    fn credit_sale(customer: &Customer, day: u32, total: i64, currency: Currency) -> Sale {
        Sale::new(
            at(day),
            Some(customer.id),
            customer.name.clone(),
            "TypeA",
            1,
            BigDecimal::from(total),
            currency,
            PaymentStatus::Credit,
        )
    }

    #[test]
    fn test_opening_plus_credit_sale_minus_receipt() {
        let customer = customer_with_opening(1000, Currency::YER, 1);
        let sale = credit_sale(&customer, 2, 500, Currency::YER);
        let receipt = Voucher::new(
            at(3),
            customer.id,
            "Ahmad",
            EntityKind::Customer,
            BigDecimal::from(300),
            Currency::YER,
            VoucherKind::Receipt,
        );

        let debt = customer_debt(&customer, &[sale], &[receipt]);
        assert_eq!(debt.balances[&Currency::YER], BigDecimal::from(1200));
        assert_eq!(debt.last_activity, Some(at(3)));
    }

    #[test]
    fn test_cash_sales_never_enter_debt() {
        let customer = Customer::new("Ahmad");
        let cash = Sale::new(
            at(1),
            Some(customer.id),
            "Ahmad",
            "TypeA",
            2,
            BigDecimal::from(100),
            Currency::YER,
            PaymentStatus::Cash,
        );

        let debt = customer_debt(&customer, &[cash], &[]);
        assert!(debt.is_settled());
        // Cash activity still counts as activity.
        assert_eq!(debt.last_activity, Some(at(1)));
    }

    #[test]
    fn test_currencies_never_mix() {
        let customer = Customer::new("Ahmad");
        let sar = credit_sale(&customer, 1, 50, Currency::SAR);
        let omr = credit_sale(&customer, 2, 20, Currency::OMR);

        let debt = customer_debt(&customer, &[sar, omr], &[]);
        assert_eq!(debt.balances[&Currency::YER], BigDecimal::from(0));
        assert_eq!(debt.balances[&Currency::SAR], BigDecimal::from(50));
        assert_eq!(debt.balances[&Currency::OMR], BigDecimal::from(20));
    }

    #[test]
    fn test_sale_return_reduces_debt() {
        let customer = Customer::new("Ahmad");
        let sale = credit_sale(&customer, 1, 500, Currency::YER);
        let ret = credit_sale(&customer, 2, 200, Currency::YER).as_return();

        let debt = customer_debt(&customer, &[sale, ret], &[]);
        assert_eq!(debt.balances[&Currency::YER], BigDecimal::from(300));
    }

    #[test]
    fn test_supplier_purchase_and_payment() {
        let supplier = Supplier::new("Al-Madina");
        let purchase = Purchase::new(
            at(1),
            supplier.id,
            "Al-Madina",
            "TypeB",
            10,
            BigDecimal::from(80),
            Currency::YER,
            PaymentStatus::Credit,
        );
        let payment = Voucher::new(
            at(2),
            supplier.id,
            "Al-Madina",
            EntityKind::Supplier,
            BigDecimal::from(500),
            Currency::YER,
            VoucherKind::Payment,
        );

        let debt = supplier_debt(&supplier, &[purchase], &[payment]);
        assert_eq!(debt.balances[&Currency::YER], BigDecimal::from(300));
    }

    #[test]
    fn test_last_activity_defaults_to_opening_date() {
        let customer = customer_with_opening(1000, Currency::YER, 5);
        let debt = customer_debt(&customer, &[], &[]);
        assert_eq!(debt.last_activity, Some(at(5)));
    }

    #[test]
    fn test_aging_buckets() {
        let thresholds = AgingThresholds::default();
        let mut debt = customer_debt(&Customer::new("Ahmad"), &[], &[]);

        debt.last_activity = Some(at(1));
        assert_eq!(debt.aging(at(2), &thresholds), AgingBucket::Recent);
        assert_eq!(debt.aging(at(10), &thresholds), AgingBucket::Active);
        assert_eq!(debt.aging(at(20), &thresholds), AgingBucket::Overdue);
        assert_eq!(
            debt.aging(at(1) + chrono::Duration::days(40), &thresholds),
            AgingBucket::Dormant
        );

        debt.last_activity = None;
        assert_eq!(debt.aging(at(2), &thresholds), AgingBucket::Recent);
    }

    #[test]
    fn test_rank_by_exposure_orders_by_converted_total() {
        let rates = RateHistory::new(vec![crate::currency::ExchangeRateSnapshot::new(
            BigDecimal::from(400),
            BigDecimal::from(410),
            at(1).date(),
        )]);

        let small = Customer::new("Salem").with_opening_balance(OpeningBalance {
            amount: BigDecimal::from(1000),
            currency: Currency::YER,
            date: at(1),
            note: None,
        });
        let big_in_sar = Customer::new("Fahd").with_opening_balance(OpeningBalance {
            amount: BigDecimal::from(10),
            currency: Currency::SAR,
            date: at(1),
            note: None,
        });

        let mut debts = vec![
            customer_debt(&small, &[], &[]),
            customer_debt(&big_in_sar, &[], &[]),
        ];
        rank_by_exposure(&mut debts, &rates);

        // 10 SAR at 400 = 4000 base outranks 1000 base.
        assert_eq!(debts[0].entity_name, "Fahd");
        assert_eq!(debts[0].total_in_base(&rates), BigDecimal::from(4000));
        assert_eq!(debts[1].total_in_base(&rates), BigDecimal::from(1000));
    }
}
