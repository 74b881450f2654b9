//! Reconciliation of the income and expense period series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Granularity, MoneyCents, PeriodAggregate, PeriodKey};

/// One row of the merged series. `net == income - expense`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledPeriod {
    pub period: PeriodKey,
    pub income: MoneyCents,
    pub expense: MoneyCents,
    pub net: MoneyCents,
}

/// Merges the two per-kind series over the union of their periods.
///
/// A side with no aggregate for a period counts as zero. The output is
/// ascending by key; repeated keys within one input are summed.
pub fn reconcile(income: &[PeriodAggregate], expense: &[PeriodAggregate]) -> Vec<ReconciledPeriod> {
    let mut merged: BTreeMap<PeriodKey, (MoneyCents, MoneyCents)> = BTreeMap::new();

    for agg in income {
        merged.entry(agg.period).or_default().0 += agg.total;
    }
    for agg in expense {
        merged.entry(agg.period).or_default().1 += agg.total;
    }

    merged
        .into_iter()
        .map(|(period, (income, expense))| ReconciledPeriod {
            period,
            income,
            expense,
            net: income - expense,
        })
        .collect()
}

/// Periods shown as cards: every full year plus the month containing `today`.
///
/// Works on an already reconciled series; the result is ordered with
/// [`PeriodKey::cmp_chronological`], so years and months may be mixed safely.
pub fn display_breakdown(periods: &[ReconciledPeriod], today: NaiveDate) -> Vec<ReconciledPeriod> {
    let current_month = PeriodKey::from_date(today, Granularity::Month).ok();

    let mut cards: Vec<ReconciledPeriod> = periods
        .iter()
        .filter(|p| p.period.is_year() || Some(p.period) == current_month)
        .copied()
        .collect();
    cards.sort_by(|a, b| a.period.cmp_chronological(&b.period));
    cards
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn agg(period: &str, cents: i64) -> PeriodAggregate {
        PeriodAggregate {
            period: period.parse().unwrap(),
            total: MoneyCents::new(cents),
        }
    }

    fn row(period: &str, income: i64, expense: i64) -> ReconciledPeriod {
        ReconciledPeriod {
            period: period.parse().unwrap(),
            income: MoneyCents::new(income),
            expense: MoneyCents::new(expense),
            net: MoneyCents::new(income - expense),
        }
    }

    #[test]
    fn example_months_are_zero_filled() {
        let income = [agg("2025-01", 500), agg("2025-02", 300)];
        let expense = [agg("2025-01", 200)];
        assert_eq!(
            reconcile(&income, &expense),
            [row("2025-01", 500, 200), row("2025-02", 300, 0)]
        );
    }

    #[test]
    fn union_of_keys_no_more_no_fewer() {
        let income = [agg("2024-11", 1), agg("2025-01", 2), agg("2025-03", 3)];
        let expense = [agg("2025-01", 4), agg("2025-02", 5)];
        let out = reconcile(&income, &expense);

        let expected: BTreeSet<PeriodKey> = income
            .iter()
            .chain(expense.iter())
            .map(|a| a.period)
            .collect();
        let got: BTreeSet<PeriodKey> = out.iter().map(|r| r.period).collect();
        assert_eq!(got, expected);
        assert_eq!(out.len(), expected.len());
    }

    #[test]
    fn absent_income_is_zero_and_net_holds() {
        let out = reconcile(&[], &[agg("2023", 750)]);
        assert_eq!(out, [row("2023", 0, 750)]);
        for r in &out {
            assert_eq!(r.net, r.income - r.expense);
        }
        assert!(out[0].net.is_negative());
    }

    #[test]
    fn empty_inputs_reconcile_to_empty() {
        assert!(reconcile(&[], &[]).is_empty());
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let income = [agg("2025-03", 1), agg("2025-01", 1)];
        let expense = [agg("2025-02", 1)];
        let keys: Vec<String> = reconcile(&income, &expense)
            .iter()
            .map(|r| r.period.to_string())
            .collect();
        assert_eq!(keys, ["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let income = [agg("2025", 10), agg("2024", 20)];
        let expense = [agg("2026", 30), agg("2024", 5)];
        let first = reconcile(&income, &expense);
        let second = reconcile(&income, &expense);
        assert_eq!(first, second);
    }

    #[test]
    fn display_keeps_years_and_current_month_in_date_order() {
        let series = [
            row("2024", 1, 0),
            row("2025", 2, 0),
            row("2025-02", 3, 0),
            row("2025-03", 4, 0),
            row("2026", 5, 0),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let keys: Vec<String> = display_breakdown(&series, today)
            .iter()
            .map(|r| r.period.to_string())
            .collect();
        assert_eq!(keys, ["2024", "2025", "2025-03", "2026"]);
    }

    #[test]
    fn display_without_current_month_shows_only_years() {
        let series = [row("2025-01", 1, 0), row("2025-02", 2, 0)];
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(display_breakdown(&series, today).is_empty());
    }
}
