//! Report tables for spreadsheet and print output.
//!
//! The exporter only reshapes data that is already filtered and reconciled;
//! byte formats belong to a [`TableWriter`].

use std::io;

use api_types::{
    stats::OverallSummary,
    transaction::{ExpenseView, IncomeView},
};
use chrono::NaiveDate;
use engine::{MoneyCents, ReconciledPeriod};
use serde::Serialize;

use crate::{controller::FilterCriteria, error::Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Print-ready report: overall totals plus the full period breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
    pub title: String,
    pub subtitle: String,
    pub generated_on: NaiveDate,
    pub overall: Table,
    pub breakdown: Table,
}

fn amount(cents: i64) -> String {
    MoneyCents::new(cents).to_string()
}

/// Human readable description of a filter window.
pub fn describe_criteria(criteria: &FilterCriteria) -> String {
    let window = match (criteria.from, criteria.to) {
        (None, None) => "All dates".to_string(),
        (Some(from), None) => format!("From {from}"),
        (None, Some(to)) => format!("Up to {to}"),
        (Some(from), Some(to)) => format!("From {from} to {to}"),
    };
    format!("{window}, by {}", criteria.granularity.as_str())
}

pub struct Exporter;

impl Exporter {
    pub fn overall_table(overall: &OverallSummary) -> Table {
        let mut table = Table::new("Overall summary", &["Metric", "Amount"]);
        table.rows = vec![
            vec!["Total income".to_string(), amount(overall.income_total_minor)],
            vec!["Total expense".to_string(), amount(overall.expense_total_minor)],
            vec!["Net balance".to_string(), amount(overall.net_minor)],
        ];
        table
    }

    /// One row per period, in the order given.
    pub fn period_table(periods: &[ReconciledPeriod]) -> Table {
        let mut table = Table::new("Period breakdown", &["Period", "Income", "Expense", "Net"]);
        table.rows = periods
            .iter()
            .map(|p| {
                vec![
                    p.period.to_string(),
                    p.income.to_string(),
                    p.expense.to_string(),
                    p.net.to_string(),
                ]
            })
            .collect();
        table
    }

    pub fn income_table(incomes: &[IncomeView]) -> Table {
        let mut table = Table::new(
            "Incomes",
            &["Date", "Source", "Category", "Amount", "Notes"],
        );
        table.rows = incomes
            .iter()
            .map(|i| {
                vec![
                    i.date.to_string(),
                    i.source.clone(),
                    i.category.clone(),
                    amount(i.amount_minor),
                    i.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        table
    }

    pub fn expense_table(expenses: &[ExpenseView]) -> Table {
        let mut table = Table::new(
            "Expenses",
            &["Date", "Payee", "Category", "Amount", "Notes"],
        );
        table.rows = expenses
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.payee.clone().unwrap_or_default(),
                    e.category.clone(),
                    amount(e.amount_minor),
                    e.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        table
    }

    pub fn print_document(
        criteria: &FilterCriteria,
        overall: &OverallSummary,
        periods: &[ReconciledPeriod],
        generated_on: NaiveDate,
    ) -> PrintDocument {
        PrintDocument {
            title: "Financial report".to_string(),
            subtitle: describe_criteria(criteria),
            generated_on,
            overall: Self::overall_table(overall),
            breakdown: Self::period_table(periods),
        }
    }
}

/// Renders a [`Table`] into some byte format.
pub trait TableWriter {
    fn write_table(&mut self, table: &Table) -> Result<()>;
}

/// Spreadsheet-style output: a header record followed by one record per row.
pub struct CsvWriter<W: io::Write> {
    inner: csv::Writer<W>,
}

impl<W: io::Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|err| err.into_error().into())
    }
}

impl<W: io::Write> TableWriter for CsvWriter<W> {
    fn write_table(&mut self, table: &Table) -> Result<()> {
        self.inner.write_record(&table.headers)?;
        for row in &table.rows {
            self.inner.write_record(row)?;
        }
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use engine::Granularity;
    use uuid::Uuid;

    use super::*;

    fn row(period: &str, income: i64, expense: i64) -> ReconciledPeriod {
        ReconciledPeriod {
            period: period.parse().unwrap(),
            income: MoneyCents::new(income),
            expense: MoneyCents::new(expense),
            net: MoneyCents::new(income - expense),
        }
    }

    fn overall() -> OverallSummary {
        OverallSummary {
            income_total_minor: 80_000,
            expense_total_minor: 20_000,
            net_minor: 60_000,
            income_count: 2,
            expense_count: 1,
        }
    }

    #[test]
    fn overall_table_lists_the_three_metrics() {
        let table = Exporter::overall_table(&overall());
        assert_eq!(
            table.rows,
            vec![
                vec!["Total income", "800.00"],
                vec!["Total expense", "200.00"],
                vec!["Net balance", "600.00"],
            ]
        );
    }

    #[test]
    fn period_table_keeps_reconciled_order() {
        let periods = [row("2024-12", 0, 1_050), row("2025-01", 50_000, 20_000)];
        let table = Exporter::period_table(&periods);
        assert_eq!(table.headers, vec!["Period", "Income", "Expense", "Net"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["2024-12", "0.00", "10.50", "-10.50"],
                vec!["2025-01", "500.00", "200.00", "300.00"],
            ]
        );
    }

    #[test]
    fn raw_tables_use_readable_labels() {
        let incomes = [IncomeView {
            id: Uuid::nil(),
            amount_minor: 50_000,
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            source: "Tuition".to_string(),
            category: "fees".to_string(),
            notes: None,
        }];
        let table = Exporter::income_table(&incomes);
        assert_eq!(
            table.headers,
            vec!["Date", "Source", "Category", "Amount", "Notes"]
        );
        assert_eq!(
            table.rows,
            vec![vec!["2025-01-10", "Tuition", "fees", "500.00", ""]]
        );

        let expenses = [ExpenseView {
            id: Uuid::nil(),
            amount_minor: 20_000,
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            payee: Some("Stationery Shop".to_string()),
            category: "supplies".to_string(),
            notes: Some("pens".to_string()),
        }];
        let table = Exporter::expense_table(&expenses);
        assert_eq!(table.headers[1], "Payee");
        assert_eq!(
            table.rows[0],
            vec!["2025-01-15", "Stationery Shop", "supplies", "200.00", "pens"]
        );
    }

    #[test]
    fn print_document_describes_the_window() {
        let criteria = FilterCriteria {
            from: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            to: None,
            granularity: Granularity::Year,
        };
        let doc = Exporter::print_document(
            &criteria,
            &overall(),
            &[row("2025", 80_000, 20_000)],
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        assert_eq!(doc.subtitle, "From 2025-01-01, by year");
        assert_eq!(doc.breakdown.rows.len(), 1);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["generated_on"], "2025-03-01");
        assert_eq!(json["overall"]["rows"][2][1], "600.00");
    }

    #[test]
    fn csv_writer_emits_header_then_rows() {
        let mut writer = CsvWriter::new(Vec::new());
        writer
            .write_table(&Exporter::period_table(&[row("2025-01", 50_000, 20_000)]))
            .unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Period,Income,Expense,Net\n2025-01,500.00,200.00,300.00\n"
        );
    }
}
