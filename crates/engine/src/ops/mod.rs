use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};

use crate::{EngineError, ResultEngine};

mod expenses;
mod incomes;
mod summary;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Inclusive date window used by every read.
///
/// A missing bound is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Builds a validated window; `from` must not be after `to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ResultEngine<Self> {
        let range = Self { from, to };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> ResultEngine<()> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(EngineError::InvalidRange(
                "from must be <= to".to_string(),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

trait ApplyDateRange: QueryFilter + Sized {
    fn apply_date_range<C: ColumnTrait>(self, column: C, range: &DateRange) -> Self;
}

impl<T> ApplyDateRange for T
where
    T: QueryFilter + Sized,
{
    fn apply_date_range<C: ColumnTrait>(mut self, column: C, range: &DateRange) -> Self {
        if let Some(from) = range.from {
            self = self.filter(column.gte(from));
        }
        if let Some(to) = range.to {
            self = self.filter(column.lte(to));
        }
        self
    }
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = DateRange::new(Some(date(2025, 1, 1)), Some(date(2025, 1, 31))).unwrap();
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 1, 31)));
        assert!(!range.contains(date(2025, 2, 1)));
        assert!(DateRange::default().contains(date(1900, 1, 1)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            DateRange::new(Some(date(2025, 2, 1)), Some(date(2025, 1, 1))),
            Err(EngineError::InvalidRange("from must be <= to".to_string()))
        );
        assert!(DateRange::new(Some(date(2025, 1, 1)), Some(date(2025, 1, 1))).is_ok());
    }
}
