//! # Ledger Core
//!
//! A multi-currency ledger and reconciliation engine: four append-only
//! record streams (sales, purchases, cash vouchers, expenses) plus
//! per-entity opening balances become running balances in a single
//! reporting currency, per-entity multi-currency debt vectors, and
//! per-item inventory levels.
//!
//! ## Features
//!
//! - **Statements**: per-entity ledger entries with running base-currency
//!   balances, valued at historically dated exchange rates
//! - **Debt tracking**: point-in-time balance vectors per currency, with
//!   aging classification and present-day exposure ranking
//! - **Inventory**: on-hand levels and turnover from inbound/outbound/
//!   return flows
//! - **Daily reporting**: trading summaries, per-item profitability, and
//!   sales trends
//! - **Source abstraction**: trait-based snapshot provider, so any
//!   persistence layer can feed the engine
//!
//! Every derived value is recomputed from scratch on each query; there is
//! no incremental state that can drift out of sync with the records.
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_core::utils::MemorySource;
//! use ledger_core::{Currency, LedgerEngine, PaymentStatus, Sale};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let source = MemorySource::new();
//! source.add_item_type("TypeA");
//! source.record_sale(Sale::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(9, 0, 0).unwrap(),
//!     None,
//!     "Walk-in",
//!     "TypeA",
//!     3,
//!     BigDecimal::from(100),
//!     Currency::YER,
//!     PaymentStatus::Cash,
//! ))?;
//!
//! let engine = LedgerEngine::new(source);
//! let inventory = engine.inventory().await?;
//! assert_eq!(inventory[0].total_out, 3);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod currency;
pub mod debts;
pub mod engine;
pub mod inventory;
pub mod reports;
pub mod statement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use currency::*;
pub use debts::*;
pub use engine::*;
pub use inventory::*;
pub use reports::*;
pub use statement::*;
pub use traits::*;
pub use types::*;
