//! Ledger dashboard: store client, view controller and report exporter.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod forms;
pub mod notify;
pub mod view;

pub use client::{Client, ClientError, Store};
pub use controller::{
    Confirmation, Consistency, Edit, FilterCriteria, InFlight, LedgerController,
};
pub use error::{DashboardError, Result};
pub use export::{CsvWriter, Exporter, PrintDocument, Table, TableWriter};
pub use forms::{ExpenseForm, IncomeForm};
pub use view::{ListView, PAGE_SIZES, Pagination, Searchable, SortOrder};
