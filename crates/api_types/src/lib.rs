use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Date window for list requests.
    ///
    /// Both bounds are inclusive calendar dates (`YYYY-MM-DD`).
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionList {
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct IncomeView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub source: String,
        pub category: String,
        pub notes: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub payee: Option<String>,
        pub category: String,
        pub notes: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct IncomeListResponse {
        pub incomes: Vec<IncomeView>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct IncomeNew {
        /// Must be >= 0.
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub source: String,
        pub category: String,
        pub notes: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Must be >= 0.
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub payee: Option<String>,
        pub category: String,
        pub notes: Option<String>,
    }

    /// Partial update of an income.
    ///
    /// Absent fields are left unchanged. An empty `notes` clears it.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct IncomeUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount_minor: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub source: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub notes: Option<String>,
    }

    /// Partial update of an expense.
    ///
    /// Absent fields are left unchanged. An empty `payee` or `notes` clears it.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub amount_minor: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub payee: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub notes: Option<String>,
    }
}

pub mod stats {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Granularity {
        #[default]
        Month,
        Year,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SummaryQuery {
        #[serde(default)]
        pub granularity: Granularity,
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    /// Totals over the whole date window, independent of granularity.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct OverallSummary {
        pub income_total_minor: i64,
        pub expense_total_minor: i64,
        pub net_minor: i64,
        pub income_count: u64,
        pub expense_count: u64,
    }

    /// Sum of one transaction kind within one period (`YYYY` or `YYYY-MM`).
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PeriodTotal {
        pub period: String,
        pub total_minor: i64,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub overall: OverallSummary,
        pub income_summary: Vec<PeriodTotal>,
        pub expense_summary: Vec<PeriodTotal>,
    }
}
