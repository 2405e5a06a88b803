//! In-memory snapshot source for testing and development

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::currency::ExchangeRateSnapshot;
use crate::traits::*;
use crate::types::*;

/// In-memory implementation of [`LedgerSource`]
///
/// Collections live behind one lock each; snapshot reads clone the whole
/// collection, which is exactly the immutable-snapshot contract the engine
/// expects. Records pass through the configured validator before they are
/// accepted, the single-writer source-of-truth being the right place to
/// reject malformed input.
#[derive(Clone)]
pub struct MemorySource {
    customers: Arc<RwLock<Vec<Customer>>>,
    suppliers: Arc<RwLock<Vec<Supplier>>>,
    sales: Arc<RwLock<Vec<Sale>>>,
    purchases: Arc<RwLock<Vec<Purchase>>>,
    vouchers: Arc<RwLock<Vec<Voucher>>>,
    expenses: Arc<RwLock<Vec<Expense>>>,
    rate_history: Arc<RwLock<Vec<ExchangeRateSnapshot>>>,
    item_types: Arc<RwLock<Vec<String>>>,
    validator: Arc<dyn RecordValidator>,
}

impl MemorySource {
    /// Create an empty source with the default validator
    pub fn new() -> Self {
        Self::with_validator(Arc::new(DefaultRecordValidator))
    }

    /// Create an empty source with a custom validator
    pub fn with_validator(validator: Arc<dyn RecordValidator>) -> Self {
        Self {
            customers: Arc::new(RwLock::new(Vec::new())),
            suppliers: Arc::new(RwLock::new(Vec::new())),
            sales: Arc::new(RwLock::new(Vec::new())),
            purchases: Arc::new(RwLock::new(Vec::new())),
            vouchers: Arc::new(RwLock::new(Vec::new())),
            expenses: Arc::new(RwLock::new(Vec::new())),
            rate_history: Arc::new(RwLock::new(Vec::new())),
            item_types: Arc::new(RwLock::new(Vec::new())),
            validator,
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.customers.write().unwrap().clear();
        self.suppliers.write().unwrap().clear();
        self.sales.write().unwrap().clear();
        self.purchases.write().unwrap().clear();
        self.vouchers.write().unwrap().clear();
        self.expenses.write().unwrap().clear();
        self.rate_history.write().unwrap().clear();
        self.item_types.write().unwrap().clear();
    }

    pub fn add_customer(&self, customer: Customer) {
        self.customers.write().unwrap().push(customer);
    }

    pub fn add_supplier(&self, supplier: Supplier) {
        self.suppliers.write().unwrap().push(supplier);
    }

    pub fn add_item_type(&self, name: impl Into<String>) {
        self.item_types.write().unwrap().push(name.into());
    }

    pub fn record_sale(&self, sale: Sale) -> EngineResult<()> {
        self.validator.validate_sale(&sale)?;
        self.sales.write().unwrap().push(sale);
        Ok(())
    }

    pub fn record_purchase(&self, purchase: Purchase) -> EngineResult<()> {
        self.validator.validate_purchase(&purchase)?;
        self.purchases.write().unwrap().push(purchase);
        Ok(())
    }

    pub fn record_voucher(&self, voucher: Voucher) -> EngineResult<()> {
        self.validator.validate_voucher(&voucher)?;
        self.vouchers.write().unwrap().push(voucher);
        Ok(())
    }

    pub fn record_expense(&self, expense: Expense) -> EngineResult<()> {
        self.validator.validate_expense(&expense)?;
        self.expenses.write().unwrap().push(expense);
        Ok(())
    }

    /// Prepend a snapshot so the history stays newest-first
    pub fn record_rate_snapshot(&self, snapshot: ExchangeRateSnapshot) -> EngineResult<()> {
        self.validator.validate_rate_snapshot(&snapshot)?;
        self.rate_history.write().unwrap().insert(0, snapshot);
        Ok(())
    }

    pub fn remove_sale(&self, id: Uuid) {
        self.sales.write().unwrap().retain(|s| s.id != id);
    }

    pub fn remove_purchase(&self, id: Uuid) {
        self.purchases.write().unwrap().retain(|p| p.id != id);
    }

    pub fn remove_voucher(&self, id: Uuid) {
        self.vouchers.write().unwrap().retain(|v| v.id != id);
    }

    pub fn remove_expense(&self, id: Uuid) {
        self.expenses.write().unwrap().retain(|e| e.id != id);
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerSource for MemorySource {
    async fn customers(&self) -> EngineResult<Vec<Customer>> {
        Ok(self.customers.read().unwrap().clone())
    }

    async fn suppliers(&self) -> EngineResult<Vec<Supplier>> {
        Ok(self.suppliers.read().unwrap().clone())
    }

    async fn sales(&self) -> EngineResult<Vec<Sale>> {
        Ok(self.sales.read().unwrap().clone())
    }

    async fn purchases(&self) -> EngineResult<Vec<Purchase>> {
        Ok(self.purchases.read().unwrap().clone())
    }

    async fn vouchers(&self) -> EngineResult<Vec<Voucher>> {
        Ok(self.vouchers.read().unwrap().clone())
    }

    async fn expenses(&self) -> EngineResult<Vec<Expense>> {
        Ok(self.expenses.read().unwrap().clone())
    }

    async fn rate_history(&self) -> EngineResult<Vec<ExchangeRateSnapshot>> {
        Ok(self.rate_history.read().unwrap().clone())
    }

    async fn item_types(&self) -> EngineResult<Vec<String>> {
        Ok(self.item_types.read().unwrap().clone())
    }
}
