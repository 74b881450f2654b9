use sea_orm::{ConnectionTrait, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, ExpenseCmd, ExpensePatch, MoneyCents, ResultEngine, expenses,
    util::{
        apply_optional_text_patch, normalize_optional_text, normalize_required_text,
        validate_date,
    },
};

use super::{ApplyDateRange, DateRange, Engine, with_tx};

pub(super) async fn fetch_expenses<C: ConnectionTrait>(
    db: &C,
    range: &DateRange,
) -> ResultEngine<Vec<Expense>> {
    range.validate()?;
    expenses::Entity::find()
        .apply_date_range(expenses::Column::Date, range)
        .order_by_asc(expenses::Column::Date)
        .order_by_asc(expenses::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Expense::try_from)
        .collect()
}

fn not_found() -> EngineError {
    EngineError::KeyNotFound("expense not exists".to_string())
}

impl Engine {
    /// Lists expenses dated inside `range`, oldest first.
    pub async fn list_expenses(&self, range: &DateRange) -> ResultEngine<Vec<Expense>> {
        fetch_expenses(&self.database, range).await
    }

    /// Records a new expense.
    pub async fn expense(&self, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        let expense = Expense {
            id: Uuid::new_v4(),
            amount: MoneyCents::non_negative(cmd.amount_minor)?,
            date: validate_date(cmd.date)?,
            payee: normalize_optional_text(cmd.payee.as_deref()),
            category: normalize_required_text(&cmd.category, "category")?,
            notes: normalize_optional_text(cmd.notes.as_deref()),
        };

        expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(expense)
    }

    /// Applies `patch` to an existing expense and returns the stored result.
    pub async fn update_expense(&self, id: Uuid, patch: ExpensePatch) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let current = expenses::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(not_found)
                .and_then(Expense::try_from)?;

            let updated = Expense {
                id: current.id,
                amount: match patch.amount_minor {
                    Some(amount_minor) => MoneyCents::non_negative(amount_minor)?,
                    None => current.amount,
                },
                date: match patch.date {
                    Some(date) => validate_date(date)?,
                    None => current.date,
                },
                payee: apply_optional_text_patch(current.payee, patch.payee.as_deref()),
                category: match patch.category.as_deref() {
                    Some(category) => normalize_required_text(category, "category")?,
                    None => current.category,
                },
                notes: apply_optional_text_patch(current.notes, patch.notes.as_deref()),
            };

            expenses::ActiveModel::from(&updated).update(&db_tx).await?;
            Ok(updated)
        })
    }

    /// Removes an expense permanently.
    pub async fn delete_expense(&self, id: Uuid) -> ResultEngine<()> {
        let res = expenses::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if res.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
