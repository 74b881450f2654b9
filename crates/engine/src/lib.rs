//! Ledger engine: money, period bucketing, reconciliation, and the income /
//! expense store.
//!
//! The pure parts ([`aggregate`], [`reconcile`], [`display_breakdown`],
//! [`Summary`]) never touch the database; [`Engine`] persists incomes and
//! expenses through sea-orm and computes summaries with those same functions.

pub use aggregate::{LedgerEntry, PeriodAggregate, aggregate};
pub use commands::{ExpenseCmd, ExpensePatch, IncomeCmd, IncomePatch};
pub use error::EngineError;
pub use expenses::Expense;
pub use incomes::Income;
pub use money::MoneyCents;
pub use ops::{DateRange, Engine, EngineBuilder};
pub use period::{Granularity, PeriodKey};
pub use reconcile::{ReconciledPeriod, display_breakdown, reconcile};
pub use summary::{OverallSummary, Summary};

mod aggregate;
mod commands;
mod error;
mod expenses;
mod incomes;
mod money;
mod ops;
mod period;
mod reconcile;
mod summary;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
