//! Traits for the persistence boundary and record validation

use async_trait::async_trait;

use crate::currency::ExchangeRateSnapshot;
use crate::types::*;

/// Snapshot provider for the ledger engine
///
/// The engine never persists anything; it pulls immutable snapshots of the
/// record collections from whatever owns them (a database, a sync cache,
/// an in-memory fixture) and recomputes derived aggregates from scratch.
/// Each method returns the full collection as of one consistent moment;
/// atomicity of that snapshot is the implementor's obligation.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// All registered customers
    async fn customers(&self) -> EngineResult<Vec<Customer>>;

    /// All registered suppliers
    async fn suppliers(&self) -> EngineResult<Vec<Supplier>>;

    /// All recorded sales
    async fn sales(&self) -> EngineResult<Vec<Sale>>;

    /// All recorded purchases
    async fn purchases(&self) -> EngineResult<Vec<Purchase>>;

    /// All recorded vouchers
    async fn vouchers(&self) -> EngineResult<Vec<Voucher>>;

    /// All recorded expenses
    async fn expenses(&self) -> EngineResult<Vec<Expense>>;

    /// Exchange-rate snapshots, newest first
    async fn rate_history(&self) -> EngineResult<Vec<ExchangeRateSnapshot>>;

    /// The catalog of stocked item types
    async fn item_types(&self) -> EngineResult<Vec<String>>;
}

/// Validation rules applied before a record enters a source
pub trait RecordValidator: Send + Sync {
    fn validate_sale(&self, sale: &Sale) -> EngineResult<()>;

    fn validate_purchase(&self, purchase: &Purchase) -> EngineResult<()>;

    fn validate_voucher(&self, voucher: &Voucher) -> EngineResult<()>;

    fn validate_expense(&self, expense: &Expense) -> EngineResult<()>;

    fn validate_rate_snapshot(&self, snapshot: &ExchangeRateSnapshot) -> EngineResult<()>;
}

/// Default validator with the baseline rules every source needs
pub struct DefaultRecordValidator;

impl RecordValidator for DefaultRecordValidator {
    fn validate_sale(&self, sale: &Sale) -> EngineResult<()> {
        if sale.quantity <= 0 {
            return Err(EngineError::Validation(
                "Sale quantity must be positive".to_string(),
            ));
        }
        if sale.total < bigdecimal::BigDecimal::from(0) {
            return Err(EngineError::Validation(
                "Sale total cannot be negative; use the return flag for reversals".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_purchase(&self, purchase: &Purchase) -> EngineResult<()> {
        if purchase.quantity <= 0 {
            return Err(EngineError::Validation(
                "Purchase quantity must be positive".to_string(),
            ));
        }
        if purchase.total_cost < bigdecimal::BigDecimal::from(0) {
            return Err(EngineError::Validation(
                "Purchase total cannot be negative; use the return flag for reversals".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_voucher(&self, voucher: &Voucher) -> EngineResult<()> {
        if voucher.amount <= bigdecimal::BigDecimal::from(0) {
            return Err(EngineError::Validation(
                "Voucher amount must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_expense(&self, expense: &Expense) -> EngineResult<()> {
        if expense.amount < bigdecimal::BigDecimal::from(0) {
            return Err(EngineError::Validation(
                "Expense amount cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_rate_snapshot(&self, snapshot: &ExchangeRateSnapshot) -> EngineResult<()> {
        snapshot.validate()
    }
}
