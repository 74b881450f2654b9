//! Command structs for engine write operations.
//!
//! These types group the fields of a create or update, keeping call sites
//! readable and avoiding long argument lists.

use chrono::NaiveDate;

/// Create an income.
#[derive(Clone, Debug)]
pub struct IncomeCmd {
    pub amount_minor: i64,
    pub date: NaiveDate,
    pub source: String,
    pub category: String,
    pub notes: Option<String>,
}

impl IncomeCmd {
    #[must_use]
    pub fn new(
        amount_minor: i64,
        date: NaiveDate,
        source: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            amount_minor,
            date,
            source: source.into(),
            category: category.into(),
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create an expense.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub amount_minor: i64,
    pub date: NaiveDate,
    pub payee: Option<String>,
    pub category: String,
    pub notes: Option<String>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(amount_minor: i64, date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            amount_minor,
            date,
            payee: None,
            category: category.into(),
            notes: None,
        }
    }

    #[must_use]
    pub fn payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update of an income. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct IncomePatch {
    pub amount_minor: Option<i64>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub category: Option<String>,
    /// An empty string clears the notes.
    pub notes: Option<String>,
}

/// Partial update of an expense. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct ExpensePatch {
    pub amount_minor: Option<i64>,
    pub date: Option<NaiveDate>,
    /// An empty string clears the payee.
    pub payee: Option<String>,
    pub category: Option<String>,
    /// An empty string clears the notes.
    pub notes: Option<String>,
}
