use sea_orm::TransactionTrait;

use crate::{EngineError, Granularity, ResultEngine, Summary};

use super::{DateRange, Engine, expenses::fetch_expenses, incomes::fetch_incomes, with_tx};

impl Engine {
    /// Computes the overall totals and both period series for one window.
    ///
    /// Incomes and expenses are read inside a single DB transaction so the
    /// three results always describe the same state of the ledger.
    pub async fn summary(
        &self,
        granularity: Granularity,
        range: &DateRange,
    ) -> ResultEngine<Summary> {
        range.validate()?;
        let (incomes, expenses) = with_tx!(self, |db_tx| {
            let incomes = fetch_incomes(&db_tx, range).await?;
            let expenses = fetch_expenses(&db_tx, range).await?;
            Ok::<_, EngineError>((incomes, expenses))
        })?;

        Summary::compute(&incomes, &expenses, granularity)
    }
}
