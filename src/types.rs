//! Core types and data structures for the ledger engine

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported currencies
///
/// The engine reports in exactly one base currency; the other two are
/// converted through [`crate::currency::RateHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Yemeni Rial - the base reporting currency
    YER,
    /// Saudi Riyal
    SAR,
    /// Omani Rial
    OMR,
}

impl Currency {
    /// All supported currencies, base first
    pub const ALL: [Currency; 3] = [Currency::YER, Currency::SAR, Currency::OMR];

    /// Whether this is the base reporting currency
    pub fn is_base(&self) -> bool {
        matches!(self, Currency::YER)
    }

    /// Currency code for display contexts
    pub fn code(&self) -> &'static str {
        match self {
            Currency::YER => "YER",
            Currency::SAR => "SAR",
            Currency::OMR => "OMR",
        }
    }
}

/// Settlement status of a sale or purchase
///
/// Cash transactions settle on the spot and never enter debt vectors;
/// credit transactions remain outstanding until covered by vouchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Cash,
    Credit,
}

/// Direction of a cash voucher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoucherKind {
    /// Money received from the entity
    Receipt,
    /// Money paid out to the entity
    Payment,
}

/// Which side of the book an entity sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Customer,
    Supplier,
}

/// Recurrence metadata carried on expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecurrenceFrequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// An amount in a specific currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// Amount; negative only for reversals
    pub amount: BigDecimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: BigDecimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// An amount in the base reporting currency
    pub fn base(amount: BigDecimal) -> Self {
        Self::new(amount, Currency::YER)
    }
}

/// Debt or credit predating the system's own transaction history
///
/// Fixed when the entity is created and backdated by the user. Positive
/// means the entity owes the agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningBalance {
    pub amount: BigDecimal,
    pub currency: Currency,
    /// User-supplied backdate for the synthetic opening entry
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

/// A customer of the agency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub opening_balance: Option<OpeningBalance>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: String::new(),
            address: String::new(),
            opening_balance: None,
        }
    }

    pub fn with_opening_balance(mut self, opening: OpeningBalance) -> Self {
        self.opening_balance = Some(opening);
        self
    }
}

/// A supplier delivering stock to the agency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub category: String,
    pub opening_balance: Option<OpeningBalance>,
}

impl Supplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: String::new(),
            category: String::new(),
            opening_balance: None,
        }
    }

    pub fn with_opening_balance(mut self, opening: OpeningBalance) -> Self {
        self.opening_balance = Some(opening);
        self
    }
}

/// A recorded sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    /// Transaction instant (UTC by convention)
    pub date: NaiveDateTime,
    /// `None` for walk-in cash sales with no registered customer
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub item_type: String,
    pub quantity: i64,
    pub unit_price: BigDecimal,
    pub total: BigDecimal,
    pub currency: Currency,
    pub status: PaymentStatus,
    /// A return reverses the flow: stock comes back, the amount is credited
    pub is_return: bool,
    pub notes: Option<String>,
}

impl Sale {
    /// Create a sale; the total is derived from quantity and unit price
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDateTime,
        customer_id: Option<Uuid>,
        customer_name: impl Into<String>,
        item_type: impl Into<String>,
        quantity: i64,
        unit_price: BigDecimal,
        currency: Currency,
        status: PaymentStatus,
    ) -> Self {
        let total = &unit_price * BigDecimal::from(quantity);
        Self {
            id: Uuid::new_v4(),
            date,
            customer_id,
            customer_name: customer_name.into(),
            item_type: item_type.into(),
            quantity,
            unit_price,
            total,
            currency,
            status,
            is_return: false,
            notes: None,
        }
    }

    pub fn as_return(mut self) -> Self {
        self.is_return = true;
        self
    }
}

/// A recorded purchase from a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub item_type: String,
    pub quantity: i64,
    pub cost_price: BigDecimal,
    pub total_cost: BigDecimal,
    pub currency: Currency,
    pub status: PaymentStatus,
    /// A return reverses the flow: stock leaves, the amount is debited back
    pub is_return: bool,
    pub notes: Option<String>,
}

impl Purchase {
    /// Create a purchase; the total cost is derived from quantity and cost price
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDateTime,
        supplier_id: Uuid,
        supplier_name: impl Into<String>,
        item_type: impl Into<String>,
        quantity: i64,
        cost_price: BigDecimal,
        currency: Currency,
        status: PaymentStatus,
    ) -> Self {
        let total_cost = &cost_price * BigDecimal::from(quantity);
        Self {
            id: Uuid::new_v4(),
            date,
            supplier_id,
            supplier_name: supplier_name.into(),
            item_type: item_type.into(),
            quantity,
            cost_price,
            total_cost,
            currency,
            status,
            is_return: false,
            notes: None,
        }
    }

    pub fn as_return(mut self) -> Self {
        self.is_return = true;
        self
    }
}

/// A cash voucher settling debt against a customer or supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub entity_id: Uuid,
    pub entity_name: String,
    pub entity_kind: EntityKind,
    pub amount: BigDecimal,
    pub currency: Currency,
    pub kind: VoucherKind,
    pub notes: Option<String>,
}

impl Voucher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDateTime,
        entity_id: Uuid,
        entity_name: impl Into<String>,
        entity_kind: EntityKind,
        amount: BigDecimal,
        currency: Currency,
        kind: VoucherKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            entity_id,
            entity_name: entity_name.into(),
            entity_kind,
            amount,
            currency,
            kind,
            notes: None,
        }
    }
}

/// An operating expense; attached to no entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub date: NaiveDateTime,
    pub category: String,
    pub amount: BigDecimal,
    pub currency: Currency,
    pub description: String,
    pub recurrence: RecurrenceFrequency,
}

impl Expense {
    pub fn new(
        date: NaiveDateTime,
        category: impl Into<String>,
        amount: BigDecimal,
        currency: Currency,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            category: category.into(),
            amount,
            currency,
            description: description.into(),
            recurrence: RecurrenceFrequency::None,
        }
    }
}

/// The closed union of everything that can appear in a ledger
///
/// The statement unifier consumes this, so adding a record kind forces
/// every consumer match to be revisited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Sale(Sale),
    Purchase(Purchase),
    Voucher(Voucher),
    Expense(Expense),
    Opening(OpeningBalance),
}

impl Record {
    /// Transaction instant of the underlying record
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            Record::Sale(s) => s.date,
            Record::Purchase(p) => p.date,
            Record::Voucher(v) => v.date,
            Record::Expense(e) => e.date,
            Record::Opening(o) => o.date,
        }
    }

    /// Entity the record belongs to, if any
    pub fn entity_id(&self) -> Option<Uuid> {
        match self {
            Record::Sale(s) => s.customer_id,
            Record::Purchase(p) => Some(p.supplier_id),
            Record::Voucher(v) => Some(v.entity_id),
            Record::Expense(_) | Record::Opening(_) => None,
        }
    }
}

/// Errors that can occur at the engine boundary
///
/// The aggregation paths themselves are total; these arise only when a
/// query references something the snapshots do not contain, or when a
/// malformed record is offered to a source.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Source error: {0}")]
    Source(String),
    #[error("Entity not found: {0}")]
    EntityNotFound(String),
    #[error("Unknown item type: {0}")]
    ItemNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
