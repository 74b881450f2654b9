//! Expense records and their storage model.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerEntry, MoneyCents, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub payee: Option<String>,
    pub category: String,
    pub notes: Option<String>,
}

impl LedgerEntry for Expense {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> MoneyCents {
        self.amount
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub amount_minor: i64,
    pub date: Date,
    pub payee: Option<String>,
    pub category: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            date: ActiveValue::Set(expense.date),
            payee: ActiveValue::Set(expense.payee.clone()),
            category: ActiveValue::Set(expense.category.clone()),
            notes: ActiveValue::Set(expense.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            amount: MoneyCents::new(model.amount_minor),
            date: model.date,
            payee: model.payee,
            category: model.category,
            notes: model.notes,
        })
    }
}
