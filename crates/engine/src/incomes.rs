//! Income records and their storage model.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerEntry, MoneyCents, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub source: String,
    pub category: String,
    pub notes: Option<String>,
}

impl LedgerEntry for Income {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> MoneyCents {
        self.amount
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub amount_minor: i64,
    pub date: Date,
    pub source: String,
    pub category: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Income> for ActiveModel {
    fn from(income: &Income) -> Self {
        Self {
            id: ActiveValue::Set(income.id.to_string()),
            amount_minor: ActiveValue::Set(income.amount.cents()),
            date: ActiveValue::Set(income.date),
            source: ActiveValue::Set(income.source.clone()),
            category: ActiveValue::Set(income.category.clone()),
            notes: ActiveValue::Set(income.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Income {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "income")?,
            amount: MoneyCents::new(model.amount_minor),
            date: model.date,
            source: model.source,
            category: model.category,
            notes: model.notes,
        })
    }
}
