//! Overall totals and the combined summary of a date window.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Granularity, LedgerEntry, MoneyCents, PeriodAggregate, ResultEngine, aggregate,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub income_total: MoneyCents,
    pub expense_total: MoneyCents,
    pub net: MoneyCents,
    pub income_count: u64,
    pub expense_count: u64,
}

impl OverallSummary {
    /// Totals over every entry given, regardless of period.
    pub fn compute<I: LedgerEntry, E: LedgerEntry>(
        incomes: &[I],
        expenses: &[E],
    ) -> ResultEngine<Self> {
        let income_total = MoneyCents::try_sum(incomes.iter().map(LedgerEntry::amount))?;
        let expense_total = MoneyCents::try_sum(expenses.iter().map(LedgerEntry::amount))?;
        let net = income_total
            .checked_sub(expense_total)
            .ok_or_else(|| EngineError::InvalidAmount("net balance too large".to_string()))?;

        Ok(Self {
            income_total,
            expense_total,
            net,
            income_count: incomes.len() as u64,
            expense_count: expenses.len() as u64,
        })
    }
}

/// Everything derived from one date window: the overall totals and the two
/// per-kind period series, all computed from the same entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub overall: OverallSummary,
    pub income: Vec<PeriodAggregate>,
    pub expense: Vec<PeriodAggregate>,
}

impl Summary {
    pub fn compute<I: LedgerEntry, E: LedgerEntry>(
        incomes: &[I],
        expenses: &[E],
        granularity: Granularity,
    ) -> ResultEngine<Self> {
        Ok(Self {
            overall: OverallSummary::compute(incomes, expenses)?,
            income: aggregate(incomes, granularity)?,
            expense: aggregate(expenses, granularity)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    struct Entry(NaiveDate, i64);

    impl LedgerEntry for Entry {
        fn date(&self) -> NaiveDate {
            self.0
        }

        fn amount(&self) -> MoneyCents {
            MoneyCents::new(self.1)
        }
    }

    fn entry(y: i32, m: u32, d: u32, cents: i64) -> Entry {
        Entry(NaiveDate::from_ymd_opt(y, m, d).unwrap(), cents)
    }

    #[test]
    fn overall_matches_example() {
        let incomes = [entry(2025, 1, 10, 500), entry(2025, 2, 5, 300)];
        let expenses = [entry(2025, 1, 15, 200)];
        let overall = OverallSummary::compute(&incomes, &expenses).unwrap();
        assert_eq!(overall.income_total, MoneyCents::new(800));
        assert_eq!(overall.expense_total, MoneyCents::new(200));
        assert_eq!(overall.net, MoneyCents::new(600));
        assert_eq!(overall.income_count, 2);
        assert_eq!(overall.expense_count, 1);
    }

    #[test]
    fn overall_is_independent_of_granularity() {
        let incomes = [entry(2024, 12, 31, 100), entry(2025, 1, 1, 100)];
        let expenses: [Entry; 0] = [];
        let monthly = Summary::compute(&incomes, &expenses, Granularity::Month).unwrap();
        let yearly = Summary::compute(&incomes, &expenses, Granularity::Year).unwrap();
        assert_eq!(monthly.overall, yearly.overall);
        assert_eq!(monthly.income.len(), 2);
        assert_eq!(yearly.income.len(), 2);
        assert!(monthly.expense.is_empty());
    }
}
