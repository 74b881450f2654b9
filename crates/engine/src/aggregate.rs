//! Period aggregation: group-by period and sum.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Granularity, MoneyCents, PeriodKey, ResultEngine};

/// Anything with a date and an amount can be bucketed.
pub trait LedgerEntry {
    fn date(&self) -> NaiveDate;
    fn amount(&self) -> MoneyCents;
}

/// Sum of one transaction kind inside one period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    pub period: PeriodKey,
    pub total: MoneyCents,
}

/// Buckets `entries` by the period of their date and sums each bucket.
///
/// Only periods that actually contain entries are returned, ascending by key.
/// An empty input yields an empty list.
pub fn aggregate<T: LedgerEntry>(
    entries: &[T],
    granularity: Granularity,
) -> ResultEngine<Vec<PeriodAggregate>> {
    let mut buckets: BTreeMap<PeriodKey, MoneyCents> = BTreeMap::new();

    for entry in entries {
        let period = PeriodKey::from_date(entry.date(), granularity)?;
        let total = buckets.entry(period).or_default();
        *total = total
            .checked_add(entry.amount())
            .ok_or_else(|| EngineError::InvalidAmount(format!("total for {period} too large")))?;
    }

    Ok(buckets
        .into_iter()
        .map(|(period, total)| PeriodAggregate { period, total })
        .collect())
}

#[cfg(test)]
mod tests {
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

    fn rendered(aggs: &[PeriodAggregate]) -> Vec<(String, i64)> {
        aggs.iter()
            .map(|a| (a.period.to_string(), a.total.cents()))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let entries: Vec<Entry> = Vec::new();
        assert!(aggregate(&entries, Granularity::Month).unwrap().is_empty());
    }

    #[test]
    fn single_entry_maps_to_its_own_bucket() {
        for granularity in [Granularity::Month, Granularity::Year] {
            let e = entry(2024, 7, 19, 12_345);
            let aggs = aggregate(std::slice::from_ref(&e), granularity).unwrap();
            assert_eq!(aggs.len(), 1);
            assert_eq!(
                aggs[0].period,
                PeriodKey::from_date(e.date(), granularity).unwrap()
            );
            assert_eq!(aggs[0].total, MoneyCents::new(12_345));
        }
    }

    #[test]
    fn sums_per_month_and_skips_empty_months() {
        let entries = [
            entry(2025, 1, 10, 500_00),
            entry(2025, 3, 5, 300_00),
            entry(2025, 1, 31, 1),
        ];
        let aggs = aggregate(&entries, Granularity::Month).unwrap();
        assert_eq!(
            rendered(&aggs),
            [("2025-01".to_string(), 500_01), ("2025-03".to_string(), 300_00)]
        );
    }

    #[test]
    fn sums_per_year() {
        let entries = [
            entry(2025, 12, 31, 100),
            entry(2024, 1, 1, 200),
            entry(2025, 1, 1, 300),
        ];
        let aggs = aggregate(&entries, Granularity::Year).unwrap();
        assert_eq!(
            rendered(&aggs),
            [("2024".to_string(), 200), ("2025".to_string(), 400)]
        );
    }

    #[test]
    fn cents_never_drift() {
        let entries: Vec<Entry> = (0..1000).map(|_| entry(2025, 5, 1, 10)).collect();
        let aggs = aggregate(&entries, Granularity::Month).unwrap();
        assert_eq!(aggs[0].total, MoneyCents::new(10_000));
    }

    #[test]
    fn overflow_is_an_error() {
        let entries = [entry(2025, 5, 1, i64::MAX), entry(2025, 5, 2, 1)];
        assert!(aggregate(&entries, Granularity::Month).is_err());
    }
}
