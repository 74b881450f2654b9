use sea_orm::{ConnectionTrait, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Income, IncomeCmd, IncomePatch, MoneyCents, ResultEngine, incomes,
    util::{
        apply_optional_text_patch, normalize_optional_text, normalize_required_text,
        validate_date,
    },
};

use super::{ApplyDateRange, DateRange, Engine, with_tx};

pub(super) async fn fetch_incomes<C: ConnectionTrait>(
    db: &C,
    range: &DateRange,
) -> ResultEngine<Vec<Income>> {
    range.validate()?;
    incomes::Entity::find()
        .apply_date_range(incomes::Column::Date, range)
        .order_by_asc(incomes::Column::Date)
        .order_by_asc(incomes::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Income::try_from)
        .collect()
}

fn not_found() -> EngineError {
    EngineError::KeyNotFound("income not exists".to_string())
}

impl Engine {
    /// Lists incomes dated inside `range`, oldest first.
    pub async fn list_incomes(&self, range: &DateRange) -> ResultEngine<Vec<Income>> {
        fetch_incomes(&self.database, range).await
    }

    /// Records a new income.
    pub async fn income(&self, cmd: IncomeCmd) -> ResultEngine<Income> {
        let income = Income {
            id: Uuid::new_v4(),
            amount: MoneyCents::non_negative(cmd.amount_minor)?,
            date: validate_date(cmd.date)?,
            source: normalize_required_text(&cmd.source, "source")?,
            category: normalize_required_text(&cmd.category, "category")?,
            notes: normalize_optional_text(cmd.notes.as_deref()),
        };

        incomes::ActiveModel::from(&income)
            .insert(&self.database)
            .await?;
        Ok(income)
    }

    /// Applies `patch` to an existing income and returns the stored result.
    pub async fn update_income(&self, id: Uuid, patch: IncomePatch) -> ResultEngine<Income> {
        with_tx!(self, |db_tx| {
            let current = incomes::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(not_found)
                .and_then(Income::try_from)?;

            let updated = Income {
                id: current.id,
                amount: match patch.amount_minor {
                    Some(amount_minor) => MoneyCents::non_negative(amount_minor)?,
                    None => current.amount,
                },
                date: match patch.date {
                    Some(date) => validate_date(date)?,
                    None => current.date,
                },
                source: match patch.source.as_deref() {
                    Some(source) => normalize_required_text(source, "source")?,
                    None => current.source,
                },
                category: match patch.category.as_deref() {
                    Some(category) => normalize_required_text(category, "category")?,
                    None => current.category,
                },
                notes: apply_optional_text_patch(current.notes, patch.notes.as_deref()),
            };

            incomes::ActiveModel::from(&updated).update(&db_tx).await?;
            Ok(updated)
        })
    }

    /// Removes an income permanently.
    pub async fn delete_income(&self, id: Uuid) -> ResultEngine<()> {
        let res = incomes::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if res.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
