//! Raw form input and its validation into typed requests.
//!
//! Nothing is sent to the store unless the form converts cleanly.

use api_types::transaction::{ExpenseNew, ExpenseUpdate, ExpenseView, IncomeNew, IncomeUpdate, IncomeView};
use chrono::NaiveDate;
use engine::MoneyCents;

use crate::error::{DashboardError, Result};

fn parse_amount(raw: &str) -> Result<i64> {
    if raw.trim().is_empty() {
        return Err(DashboardError::Validation("amount is required".to_string()));
    }
    let amount: MoneyCents = raw
        .parse()
        .map_err(|_| DashboardError::Validation(format!("amount {:?} is not a number", raw.trim())))?;
    if amount.is_negative() {
        return Err(DashboardError::Validation(
            "amount must not be negative".to_string(),
        ));
    }
    Ok(amount.cents())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DashboardError::Validation("date is required".to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DashboardError::Validation(format!("date {raw:?} is not YYYY-MM-DD")))
}

fn required(raw: &str, label: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DashboardError::Validation(format!("{label} is required")));
    }
    Ok(value.to_string())
}

fn optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Changed optional text; an emptied field is sent as `""` so the store clears it.
fn optional_change(raw: &str, original: Option<&str>) -> Option<String> {
    let value = raw.trim();
    match original {
        Some(original) if original == value => None,
        None if value.is_empty() => None,
        _ => Some(value.to_string()),
    }
}

fn changed<T: PartialEq>(value: T, original: T) -> Option<T> {
    (value != original).then_some(value)
}

fn format_amount(cents: i64) -> String {
    MoneyCents::new(cents).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeForm {
    pub amount: String,
    pub date: String,
    pub source: String,
    pub category: String,
    pub notes: String,
}

impl IncomeForm {
    pub fn to_new(&self) -> Result<IncomeNew> {
        Ok(IncomeNew {
            amount_minor: parse_amount(&self.amount)?,
            date: parse_date(&self.date)?,
            source: required(&self.source, "source")?,
            category: required(&self.category, "category")?,
            notes: optional(&self.notes),
        })
    }

    /// Only the fields that differ from `original`.
    pub fn to_update(&self, original: &IncomeView) -> Result<IncomeUpdate> {
        Ok(IncomeUpdate {
            amount_minor: changed(parse_amount(&self.amount)?, original.amount_minor),
            date: changed(parse_date(&self.date)?, original.date),
            source: changed(required(&self.source, "source")?, original.source.clone()),
            category: changed(
                required(&self.category, "category")?,
                original.category.clone(),
            ),
            notes: optional_change(&self.notes, original.notes.as_deref()),
        })
    }
}

impl From<&IncomeView> for IncomeForm {
    fn from(view: &IncomeView) -> Self {
        Self {
            amount: format_amount(view.amount_minor),
            date: view.date.to_string(),
            source: view.source.clone(),
            category: view.category.clone(),
            notes: view.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: String,
    pub date: String,
    pub payee: String,
    pub category: String,
    pub notes: String,
}

impl ExpenseForm {
    pub fn to_new(&self) -> Result<ExpenseNew> {
        Ok(ExpenseNew {
            amount_minor: parse_amount(&self.amount)?,
            date: parse_date(&self.date)?,
            payee: optional(&self.payee),
            category: required(&self.category, "category")?,
            notes: optional(&self.notes),
        })
    }

    /// Only the fields that differ from `original`.
    pub fn to_update(&self, original: &ExpenseView) -> Result<ExpenseUpdate> {
        Ok(ExpenseUpdate {
            amount_minor: changed(parse_amount(&self.amount)?, original.amount_minor),
            date: changed(parse_date(&self.date)?, original.date),
            payee: optional_change(&self.payee, original.payee.as_deref()),
            category: changed(
                required(&self.category, "category")?,
                original.category.clone(),
            ),
            notes: optional_change(&self.notes, original.notes.as_deref()),
        })
    }
}

impl From<&ExpenseView> for ExpenseForm {
    fn from(view: &ExpenseView) -> Self {
        Self {
            amount: format_amount(view.amount_minor),
            date: view.date.to_string(),
            payee: view.payee.clone().unwrap_or_default(),
            category: view.category.clone(),
            notes: view.notes.clone().unwrap_or_default(),
        }
    }
}
