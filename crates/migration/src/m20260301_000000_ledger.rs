//! Ledger schema: one table per transaction kind.
//!
//! - `incomes`: money received (fees, grants, donations)
//! - `expenses`: money paid out
//!
//! Amounts are stored as integer minor units; dates are calendar dates.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    AmountMinor,
    Date,
    Source,
    Category,
    Notes,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    AmountMinor,
    Date,
    Payee,
    Category,
    Notes,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Incomes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Incomes::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .col(ColumnDef::new(Incomes::Source).string().not_null())
                    .col(ColumnDef::new(Incomes::Category).string().not_null())
                    .col(ColumnDef::new(Incomes::Notes).string())
                    .check(Expr::col(Incomes::AmountMinor).gte(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-incomes-date")
                    .table(Incomes::Table)
                    .col(Incomes::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::Payee).string())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Notes).string())
                    .check(Expr::col(Expenses::AmountMinor).gte(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
            .await?;
        Ok(())
    }
}
