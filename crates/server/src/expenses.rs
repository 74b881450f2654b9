//! Expense API endpoints

use api_types::transaction::{
    ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView, TransactionList,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{DateRange, Expense, ExpenseCmd, ExpensePatch};

use crate::{ServerError, server::{ServerState, parse_id}};

fn view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount_minor: expense.amount.cents(),
        date: expense.date,
        payee: expense.payee,
        category: expense.category,
        notes: expense.notes,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionList>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let range = DateRange::new(payload.from, payload.to)?;
    let expenses = state.engine.list_expenses(&range).await?;

    Ok(Json(ExpenseListResponse {
        expenses: expenses.into_iter().map(view).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let cmd = ExpenseCmd {
        amount_minor: payload.amount_minor,
        date: payload.date,
        payee: payload.payee,
        category: payload.category,
        notes: payload.notes,
    };
    let expense = state.engine.expense(cmd).await?;
    tracing::info!(id = %expense.id, amount = %expense.amount, "expense created");

    Ok((StatusCode::CREATED, Json(view(expense))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseView>, ServerError> {
    let id = parse_id(&id)?;
    let patch = ExpensePatch {
        amount_minor: payload.amount_minor,
        date: payload.date,
        payee: payload.payee,
        category: payload.category,
        notes: payload.notes,
    };
    let expense = state.engine.update_expense(id, patch).await?;
    tracing::info!(%id, "expense updated");

    Ok(Json(view(expense)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let id = parse_id(&id)?;
    state.engine.delete_expense(id).await?;
    tracing::info!(%id, "expense deleted");

    Ok(StatusCode::NO_CONTENT)
}
