//! Per-entity statement assembly: record unification and running balances

pub mod balance;
pub mod unify;

pub use balance::*;
pub use unify::*;
