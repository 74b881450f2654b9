//! Period keys: the buckets transactions are grouped into.
//!
//! A [`PeriodKey`] renders as `"YYYY"` under [`Granularity::Year`] and as
//! `"YYYY-MM"` under [`Granularity::Month`].

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Bucketing resolution for aggregation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl TryFrom<&str> for Granularity {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(EngineError::InvalidPeriod(format!(
                "invalid granularity: {other}"
            ))),
        }
    }
}

impl FromStr for Granularity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Largest year a key can hold (keys always use four digits).
const MAX_YEAR: i32 = 9999;

/// Canonical identifier of a bucket.
///
/// `Ord` is the order of the canonical strings, which for four-digit years is
/// also chronological within one granularity. Use [`PeriodKey::cmp_chronological`]
/// when year and month keys are mixed in one list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: Option<u32>,
}

impl PeriodKey {
    /// Derives the key of `date` under `granularity`.
    pub fn from_date(date: NaiveDate, granularity: Granularity) -> ResultEngine<Self> {
        let year = date.year();
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(EngineError::InvalidDate(format!(
                "year {year} is outside 0000-9999"
            )));
        }
        let month = match granularity {
            Granularity::Year => None,
            Granularity::Month => Some(date.month()),
        };
        Ok(Self { year, month })
    }

    /// Returns `true` if the key covers a full calendar year.
    pub fn is_year(self) -> bool {
        self.month.is_none()
    }

    /// First day covered by the period.
    pub fn start_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.unwrap_or(1), 1)
    }

    /// Orders keys by the first day they cover; on equal start the year comes
    /// before its first month.
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then_with(|| self.month.is_some().cmp(&other.month.is_some()))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{:04}-{:02}", self.year, month),
            None => write!(f, "{:04}", self.year),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidPeriod(format!("invalid period key: {s:?}"));
        let digits = |part: &str, len: usize| {
            part.len() == len && part.chars().all(|c| c.is_ascii_digit())
        };

        let (year, month) = match s.split_once('-') {
            Some((year, month)) => (year, Some(month)),
            None => (s, None),
        };
        if !digits(year, 4) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;

        let month = match month {
            None => None,
            Some(month) => {
                if !digits(month, 2) {
                    return Err(invalid());
                }
                let month = month.parse::<u32>().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Some(month)
            }
        };

        Ok(Self { year, month })
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(value: PeriodKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn keys_render_canonical_strings() {
        let d = date(2025, 3, 9);
        assert_eq!(
            PeriodKey::from_date(d, Granularity::Month).unwrap().to_string(),
            "2025-03"
        );
        assert_eq!(
            PeriodKey::from_date(d, Granularity::Year).unwrap().to_string(),
            "2025"
        );
        assert_eq!(
            PeriodKey::from_date(date(987, 1, 1), Granularity::Year)
                .unwrap()
                .to_string(),
            "0987"
        );
    }

    #[test]
    fn same_month_same_key() {
        let a = PeriodKey::from_date(date(2025, 1, 1), Granularity::Month).unwrap();
        let b = PeriodKey::from_date(date(2025, 1, 31), Granularity::Month).unwrap();
        let c = PeriodKey::from_date(date(2025, 2, 1), Granularity::Month).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn parse_round_trips_and_rejects_bad_keys() {
        for key in ["2025", "2025-01", "1999-12"] {
            assert_eq!(key.parse::<PeriodKey>().unwrap().to_string(), key);
        }
        for key in ["25", "2025-1", "2025-13", "2025-00", "2025-01-01", "abcd", ""] {
            assert!(key.parse::<PeriodKey>().is_err(), "{key} should be rejected");
        }
    }

    #[test]
    fn years_outside_four_digits_are_rejected() {
        assert!(PeriodKey::from_date(date(10_000, 1, 1), Granularity::Year).is_err());
        assert!(PeriodKey::from_date(date(-1, 1, 1), Granularity::Month).is_err());
    }

    #[test]
    fn string_order_matches_chronology_within_one_granularity() {
        let mut keys: Vec<PeriodKey> = ["2025-10", "2024-12", "2025-02"]
            .iter()
            .map(|k| k.parse().unwrap())
            .collect();
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["2024-12", "2025-02", "2025-10"]);
    }

    #[test]
    fn chronological_order_across_granularities() {
        let mut keys: Vec<PeriodKey> = ["2025-03", "2026", "2024", "2025", "2025-01"]
            .iter()
            .map(|k| k.parse().unwrap())
            .collect();
        keys.sort_by(PeriodKey::cmp_chronological);
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["2024", "2025", "2025-01", "2025-03", "2026"]);
    }

    #[test]
    fn start_date_is_first_day_of_the_bucket() {
        let year: PeriodKey = "2025".parse().unwrap();
        let month: PeriodKey = "2025-02".parse().unwrap();
        assert_eq!(year.start_date(), Some(date(2025, 1, 1)));
        assert_eq!(month.start_date(), Some(date(2025, 2, 1)));
    }

    #[test]
    fn granularity_parses_case_insensitively() {
        assert_eq!("Month".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!(" year ".parse::<Granularity>().unwrap(), Granularity::Year);
        assert!("week".parse::<Granularity>().is_err());
    }
}
