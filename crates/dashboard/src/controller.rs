//! Ledger view controller.
//!
//! Holds the filter window, both list views and the derived period series,
//! and routes every mutation through the store followed by a full re-fetch.
//! Nothing shown here is ever patched locally after a write.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use api_types::{
    stats::{Granularity as ApiGranularity, PeriodTotal, SummaryQuery, SummaryResponse},
    transaction::{ExpenseView, IncomeView, TransactionList},
};
use chrono::NaiveDate;
use engine::{
    DateRange, Granularity, MoneyCents, PeriodAggregate, ReconciledPeriod, display_breakdown,
    reconcile,
};
use uuid::Uuid;

use crate::{
    client::{ClientError, Store},
    error::{DashboardError, Result},
    forms::{ExpenseForm, IncomeForm},
    notify::Toast,
    view::ListView,
};

pub const STALE_MESSAGE: &str = "totals may be out of date";

/// Date window and bucketing applied to every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub granularity: Granularity,
}

impl FilterCriteria {
    pub fn validate(&self) -> Result<()> {
        DateRange::new(self.from, self.to)
            .map(|_| ())
            .map_err(|_| DashboardError::Validation("from must not be after to".to_string()))
    }

    fn list_query(&self) -> TransactionList {
        TransactionList {
            from: self.from,
            to: self.to,
        }
    }

    fn summary_query(&self) -> SummaryQuery {
        SummaryQuery {
            granularity: match self.granularity {
                Granularity::Month => ApiGranularity::Month,
                Granularity::Year => ApiGranularity::Year,
            },
            from: self.from,
            to: self.to,
        }
    }
}

/// Whether the lists and the totals come from the same fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Consistency {
    #[default]
    Fresh,
    Stale,
}

/// Answer to the "are you sure?" prompt guarding deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Tracks the single outstanding mutation.
///
/// Clones share state, so a presentation layer can keep one to disable its
/// submit controls while the controller is saving.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> Result<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DashboardError::Busy)?;
        Ok(InFlightGuard(self.0.clone()))
    }
}

/// Releases the in-flight slot when dropped.
#[derive(Debug)]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// An open edit of an existing transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Income {
        original: IncomeView,
        form: IncomeForm,
    },
    Expense {
        original: ExpenseView,
        form: ExpenseForm,
    },
}

fn aggregates(totals: &[PeriodTotal]) -> Result<Vec<PeriodAggregate>> {
    totals
        .iter()
        .map(|total| {
            Ok(PeriodAggregate {
                period: total.period.parse()?,
                total: MoneyCents::new(total.total_minor),
            })
        })
        .collect()
}

/// Reconciled series for a summary response.
pub fn reconciled_series(summary: &SummaryResponse) -> Result<Vec<ReconciledPeriod>> {
    let income = aggregates(&summary.income_summary)?;
    let expense = aggregates(&summary.expense_summary)?;
    Ok(reconcile(&income, &expense))
}

pub struct LedgerController<S> {
    store: S,
    criteria: FilterCriteria,
    incomes: ListView<IncomeView>,
    expenses: ListView<ExpenseView>,
    summary: SummaryResponse,
    reconciled: Vec<ReconciledPeriod>,
    consistency: Consistency,
    toast: Option<Toast>,
    in_flight: InFlight,
    income_form: IncomeForm,
    expense_form: ExpenseForm,
    editing: Option<Edit>,
}

impl<S: Store> LedgerController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            incomes: ListView::default(),
            expenses: ListView::default(),
            summary: SummaryResponse::default(),
            reconciled: Vec::new(),
            consistency: Consistency::default(),
            toast: None,
            in_flight: InFlight::default(),
            income_form: IncomeForm::default(),
            expense_form: ExpenseForm::default(),
            editing: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria
    }

    pub fn incomes(&self) -> &ListView<IncomeView> {
        &self.incomes
    }

    pub fn incomes_mut(&mut self) -> &mut ListView<IncomeView> {
        &mut self.incomes
    }

    pub fn expenses(&self) -> &ListView<ExpenseView> {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut ListView<ExpenseView> {
        &mut self.expenses
    }

    pub fn summary(&self) -> &SummaryResponse {
        &self.summary
    }

    /// Full reconciled history for the current window.
    pub fn reconciled(&self) -> &[ReconciledPeriod] {
        &self.reconciled
    }

    /// Cards for the loaded granularity: years, or the month containing `today`.
    pub fn period_cards(&self, today: NaiveDate) -> Vec<ReconciledPeriod> {
        display_breakdown(&self.reconciled, today)
    }

    pub fn consistency(&self) -> Consistency {
        self.consistency
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    pub fn income_form(&self) -> &IncomeForm {
        &self.income_form
    }

    pub fn income_form_mut(&mut self) -> &mut IncomeForm {
        &mut self.income_form
    }

    pub fn expense_form(&self) -> &ExpenseForm {
        &self.expense_form
    }

    pub fn expense_form_mut(&mut self) -> &mut ExpenseForm {
        &mut self.expense_form
    }

    pub fn editing(&self) -> Option<&Edit> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut Edit> {
        self.editing.as_mut()
    }

    pub fn edit_income(&mut self, original: IncomeView) {
        let form = IncomeForm::from(&original);
        self.editing = Some(Edit::Income { original, form });
    }

    pub fn edit_expense(&mut self, original: ExpenseView) {
        let form = ExpenseForm::from(&original);
        self.editing = Some(Edit::Expense { original, form });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Changes the window or granularity and reloads everything.
    pub async fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<()> {
        if let Err(err) = criteria.validate() {
            self.toast = Some(Toast::error(err.to_string()));
            return Err(err);
        }
        self.criteria = criteria;
        self.refresh().await
    }

    pub async fn set_granularity(&mut self, granularity: Granularity) -> Result<()> {
        let criteria = FilterCriteria {
            granularity,
            ..self.criteria
        };
        self.set_criteria(criteria).await
    }

    /// Re-fetches both lists and the summary.
    ///
    /// Every part that loads replaces what was shown. When only some parts
    /// load, the controller turns [`Consistency::Stale`] and says so. When
    /// nothing loads, the previous state is left as it was and the first
    /// error is returned.
    pub async fn refresh(&mut self) -> Result<()> {
        let list_query = self.criteria.list_query();
        let summary_query = self.criteria.summary_query();

        let (incomes, expenses, summary) = tokio::join!(
            self.store.list_incomes(&list_query),
            self.store.list_expenses(&list_query),
            self.store.summary(&summary_query),
        );
        let summary = summary
            .map_err(DashboardError::from)
            .and_then(|summary| reconciled_series(&summary).map(|series| (summary, series)));

        let mut errors: Vec<DashboardError> = Vec::new();
        let mut loaded = 0;

        match incomes {
            Ok(items) => {
                self.incomes.set_items(items);
                loaded += 1;
            }
            Err(err) => errors.push(err.into()),
        }
        match expenses {
            Ok(items) => {
                self.expenses.set_items(items);
                loaded += 1;
            }
            Err(err) => errors.push(err.into()),
        }
        match summary {
            Ok((summary, series)) => {
                self.summary = summary;
                self.reconciled = series;
                loaded += 1;
            }
            Err(err) => errors.push(err),
        }

        for err in &errors {
            tracing::warn!("refresh failed: {err}");
        }

        let mut errors = errors.into_iter();
        match (errors.next(), loaded) {
            (None, _) => {
                self.consistency = Consistency::Fresh;
                Ok(())
            }
            (Some(_), loaded) if loaded > 0 => {
                self.consistency = Consistency::Stale;
                self.toast = Some(Toast::warning(STALE_MESSAGE));
                Ok(())
            }
            (Some(err), _) => {
                self.toast = Some(Toast::error(format!("failed to load ledger: {err}")));
                Err(err)
            }
        }
    }

    fn reject<T>(&mut self, err: DashboardError) -> Result<T> {
        self.toast = Some(Toast::error(err.to_string()));
        Err(err)
    }

    async fn finish<T>(
        &mut self,
        result: std::result::Result<T, ClientError>,
        done: &str,
        on_success: impl FnOnce(&mut Self),
    ) -> Result<T> {
        match result {
            Ok(value) => {
                tracing::info!("{done}");
                on_success(self);
                self.toast = Some(Toast::success(done));
                if self.refresh().await.is_err() {
                    // The write landed but nothing shown reflects it.
                    self.consistency = Consistency::Stale;
                    self.toast = Some(Toast::warning(STALE_MESSAGE));
                }
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("{done} failed: {err}");
                self.reject(err.into())
            }
        }
    }

    pub async fn create_income(&mut self) -> Result<IncomeView> {
        let _guard = self.in_flight.try_begin()?;
        let payload = match self.income_form.to_new() {
            Ok(payload) => payload,
            Err(err) => return self.reject(err),
        };
        let result = self.store.create_income(payload).await;
        self.finish(result, "income created", |this| {
            this.income_form = IncomeForm::default();
        })
        .await
    }

    pub async fn create_expense(&mut self) -> Result<ExpenseView> {
        let _guard = self.in_flight.try_begin()?;
        let payload = match self.expense_form.to_new() {
            Ok(payload) => payload,
            Err(err) => return self.reject(err),
        };
        let result = self.store.create_expense(payload).await;
        self.finish(result, "expense created", |this| {
            this.expense_form = ExpenseForm::default();
        })
        .await
    }

    /// Submits the open edit, whichever kind it is.
    pub async fn submit_edit(&mut self) -> Result<()> {
        let _guard = self.in_flight.try_begin()?;
        let Some(edit) = self.editing.clone() else {
            return self.reject(DashboardError::Validation("nothing is being edited".to_string()));
        };

        match edit {
            Edit::Income { original, form } => {
                let payload = match form.to_update(&original) {
                    Ok(payload) => payload,
                    Err(err) => return self.reject(err),
                };
                let result = self.store.update_income(original.id, payload).await;
                self.finish(result, "income updated", |this| this.editing = None)
                    .await
                    .map(|_| ())
            }
            Edit::Expense { original, form } => {
                let payload = match form.to_update(&original) {
                    Ok(payload) => payload,
                    Err(err) => return self.reject(err),
                };
                let result = self.store.update_expense(original.id, payload).await;
                self.finish(result, "expense updated", |this| this.editing = None)
                    .await
                    .map(|_| ())
            }
        }
    }

    /// Deletes an income once the user confirmed. Returns whether a request was sent.
    pub async fn delete_income(&mut self, id: Uuid, confirmation: Confirmation) -> Result<bool> {
        if confirmation == Confirmation::Cancelled {
            self.toast = Some(Toast::info("delete cancelled"));
            return Ok(false);
        }
        let _guard = self.in_flight.try_begin()?;
        let result = self.store.delete_income(id).await;
        self.finish(result, "income deleted", |_| {}).await?;
        Ok(true)
    }

    /// Deletes an expense once the user confirmed. Returns whether a request was sent.
    pub async fn delete_expense(&mut self, id: Uuid, confirmation: Confirmation) -> Result<bool> {
        if confirmation == Confirmation::Cancelled {
            self.toast = Some(Toast::info("delete cancelled"));
            return Ok(false);
        }
        let _guard = self.in_flight.try_begin()?;
        let result = self.store.delete_expense(id).await;
        self.finish(result, "expense deleted", |_| {}).await?;
        Ok(true)
    }
}
