//! Engine facade that wires snapshots into the pure computation modules

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::currency::RateHistory;
use crate::debts::{self, DebtVector};
use crate::inventory::{self, InventoryLevel, StockMovement};
use crate::reports::{self, DailySummary, ItemProfit};
use crate::statement::{accumulate, summarize, unify, LedgerEntry, StatementSummary};
use crate::traits::LedgerSource;
use crate::types::*;

/// A fully resolved per-entity account statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub entity_id: Uuid,
    pub entity_name: String,
    pub entity_kind: EntityKind,
    pub entries: Vec<LedgerEntry>,
    pub summary: StatementSummary,
}

/// Query facade over a [`LedgerSource`]
///
/// Every query pulls fresh snapshots and recomputes its aggregate from
/// scratch; nothing derived is cached, so a mutation in the source can
/// never leave a stale figure behind. The computation itself lives in the
/// pure module functions, which makes each piece testable without any
/// source at all.
pub struct LedgerEngine<S: LedgerSource> {
    source: S,
    config: EngineConfig,
}

impl<S: LedgerSource> LedgerEngine<S> {
    /// Create an engine with default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(source: S, config: EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The rate history as of now, with configured fallback rates attached
    pub async fn rates(&self) -> EngineResult<RateHistory> {
        let snapshots = self.source.rate_history().await?;
        Ok(RateHistory::new(snapshots).with_fallback(
            self.config.default_sar_rate.clone(),
            self.config.default_omr_rate.clone(),
        ))
    }

    /// Build the detailed statement for one customer or supplier
    ///
    /// Rows are valued at the rate of their own civil date; the running
    /// balance and closing summary are in base currency.
    pub async fn statement(&self, entity_id: Uuid, kind: EntityKind) -> EngineResult<Statement> {
        let (entity_name, opening) = match kind {
            EntityKind::Customer => {
                let customers = self.source.customers().await?;
                let customer = customers
                    .into_iter()
                    .find(|c| c.id == entity_id)
                    .ok_or_else(|| EngineError::EntityNotFound(entity_id.to_string()))?;
                (customer.name, customer.opening_balance)
            }
            EntityKind::Supplier => {
                let suppliers = self.source.suppliers().await?;
                let supplier = suppliers
                    .into_iter()
                    .find(|s| s.id == entity_id)
                    .ok_or_else(|| EngineError::EntityNotFound(entity_id.to_string()))?;
                (supplier.name, supplier.opening_balance)
            }
        };

        let sales = self.source.sales().await?;
        let purchases = self.source.purchases().await?;
        let vouchers = self.source.vouchers().await?;
        let rates = self.rates().await?;

        let lines = unify(
            entity_id,
            kind,
            &sales,
            &purchases,
            &vouchers,
            opening.as_ref(),
        );
        let entries = accumulate(lines, &rates);
        let summary = summarize(&entries);

        Ok(Statement {
            entity_id,
            entity_name,
            entity_kind: kind,
            entries,
            summary,
        })
    }

    /// Debt vectors for every customer, ranked by present-day exposure
    pub async fn customer_debts(&self) -> EngineResult<Vec<DebtVector>> {
        let customers = self.source.customers().await?;
        let sales = self.source.sales().await?;
        let vouchers = self.source.vouchers().await?;
        let rates = self.rates().await?;

        let mut debts: Vec<DebtVector> = customers
            .iter()
            .map(|c| debts::customer_debt(c, &sales, &vouchers))
            .collect();
        debts::rank_by_exposure(&mut debts, &rates);
        Ok(debts)
    }

    /// Debt vectors for every supplier, ranked by present-day exposure
    pub async fn supplier_debts(&self) -> EngineResult<Vec<DebtVector>> {
        let suppliers = self.source.suppliers().await?;
        let purchases = self.source.purchases().await?;
        let vouchers = self.source.vouchers().await?;
        let rates = self.rates().await?;

        let mut debts: Vec<DebtVector> = suppliers
            .iter()
            .map(|s| debts::supplier_debt(s, &purchases, &vouchers))
            .collect();
        debts::rank_by_exposure(&mut debts, &rates);
        Ok(debts)
    }

    /// Total customer exposure in base currency at current rates
    pub async fn total_customer_exposure(&self) -> EngineResult<BigDecimal> {
        let debts = self.customer_debts().await?;
        let rates = self.rates().await?;
        Ok(reports::total_exposure(&debts, &rates))
    }

    /// Total supplier exposure in base currency at current rates
    pub async fn total_supplier_exposure(&self) -> EngineResult<BigDecimal> {
        let debts = self.supplier_debts().await?;
        let rates = self.rates().await?;
        Ok(reports::total_exposure(&debts, &rates))
    }

    /// Stock position for every item type in the catalog
    pub async fn inventory(&self) -> EngineResult<Vec<InventoryLevel>> {
        let item_types = self.source.item_types().await?;
        let sales = self.source.sales().await?;
        let purchases = self.source.purchases().await?;

        Ok(item_types
            .iter()
            .map(|item| inventory::level_for(item, &sales, &purchases))
            .collect())
    }

    /// Movement log for one catalog item, newest first
    pub async fn stock_movements(&self, item_type: &str) -> EngineResult<Vec<StockMovement>> {
        let item_types = self.source.item_types().await?;
        if !item_types.iter().any(|i| i == item_type) {
            return Err(EngineError::ItemNotFound(item_type.to_string()));
        }
        let sales = self.source.sales().await?;
        let purchases = self.source.purchases().await?;
        Ok(inventory::movements(item_type, &sales, &purchases))
    }

    /// One civil day's trading summary
    pub async fn daily_summary(&self, date: NaiveDate) -> EngineResult<DailySummary> {
        let sales = self.source.sales().await?;
        let purchases = self.source.purchases().await?;
        let expenses = self.source.expenses().await?;
        let rates = self.rates().await?;
        Ok(reports::daily_summary(
            date, &sales, &purchases, &expenses, &rates,
        ))
    }

    /// Revenue/cost/profit per catalog item
    pub async fn profit_by_item(&self) -> EngineResult<HashMap<String, ItemProfit>> {
        let item_types = self.source.item_types().await?;
        let sales = self.source.sales().await?;
        let purchases = self.source.purchases().await?;
        let rates = self.rates().await?;
        Ok(reports::profit_by_item(
            &item_types,
            &sales,
            &purchases,
            &rates,
        ))
    }

    /// Daily net sales for the trailing window ending at `end`
    pub async fn sales_trend(&self, end: NaiveDate, days: u32) -> EngineResult<Vec<BigDecimal>> {
        let sales = self.source.sales().await?;
        let rates = self.rates().await?;
        Ok(reports::sales_trend(end, days, &sales, &rates))
    }

    /// Best-selling item of a civil day, if any sales were recorded
    pub async fn top_item(&self, date: NaiveDate) -> EngineResult<Option<(String, i64)>> {
        let sales = self.source.sales().await?;
        Ok(reports::top_item(date, &sales))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemorySource;
    use chrono::NaiveDateTime;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, day)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_statement_for_unknown_entity_fails() {
        let source = MemorySource::new();
        let engine = LedgerEngine::new(source);
        let missing = engine
            .statement(Uuid::new_v4(), EntityKind::Customer)
            .await;
        assert!(matches!(missing, Err(EngineError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn test_statement_and_debts_agree_on_credit_activity() {
        let source = MemorySource::new();
        let customer = Customer::new("Ahmad").with_opening_balance(OpeningBalance {
            amount: BigDecimal::from(1000),
            currency: Currency::YER,
            date: at(1),
            note: None,
        });
        let customer_id = customer.id;
        source.add_customer(customer);
        source
            .record_sale(Sale::new(
                at(2),
                Some(customer_id),
                "Ahmad",
                "TypeA",
                5,
                BigDecimal::from(100),
                Currency::YER,
                PaymentStatus::Credit,
            ))
            .unwrap();
        source
            .record_voucher(Voucher::new(
                at(3),
                customer_id,
                "Ahmad",
                EntityKind::Customer,
                BigDecimal::from(300),
                Currency::YER,
                VoucherKind::Receipt,
            ))
            .unwrap();

        let engine = LedgerEngine::new(source);
        let statement = engine
            .statement(customer_id, EntityKind::Customer)
            .await
            .unwrap();
        assert_eq!(statement.summary.final_balance, BigDecimal::from(1200));

        let debts = engine.customer_debts().await.unwrap();
        assert_eq!(debts[0].balances[&Currency::YER], BigDecimal::from(1200));
    }

    #[tokio::test]
    async fn test_unknown_item_movements_fail() {
        let engine = LedgerEngine::new(MemorySource::new());
        let missing = engine.stock_movements("TypeZ").await;
        assert!(matches!(missing, Err(EngineError::ItemNotFound(_))));
    }
}
