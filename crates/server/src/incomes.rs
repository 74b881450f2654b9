//! Income API endpoints

use api_types::transaction::{
    IncomeListResponse, IncomeNew, IncomeUpdate, IncomeView, TransactionList,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{DateRange, Income, IncomeCmd, IncomePatch};

use crate::{ServerError, server::{ServerState, parse_id}};

fn view(income: Income) -> IncomeView {
    IncomeView {
        id: income.id,
        amount_minor: income.amount.cents(),
        date: income.date,
        source: income.source,
        category: income.category,
        notes: income.notes,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionList>,
) -> Result<Json<IncomeListResponse>, ServerError> {
    let range = DateRange::new(payload.from, payload.to)?;
    let incomes = state.engine.list_incomes(&range).await?;

    Ok(Json(IncomeListResponse {
        incomes: incomes.into_iter().map(view).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IncomeNew>,
) -> Result<(StatusCode, Json<IncomeView>), ServerError> {
    let cmd = IncomeCmd {
        amount_minor: payload.amount_minor,
        date: payload.date,
        source: payload.source,
        category: payload.category,
        notes: payload.notes,
    };
    let income = state.engine.income(cmd).await?;
    tracing::info!(id = %income.id, amount = %income.amount, "income created");

    Ok((StatusCode::CREATED, Json(view(income))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IncomeUpdate>,
) -> Result<Json<IncomeView>, ServerError> {
    let id = parse_id(&id)?;
    let patch = IncomePatch {
        amount_minor: payload.amount_minor,
        date: payload.date,
        source: payload.source,
        category: payload.category,
        notes: payload.notes,
    };
    let income = state.engine.update_income(id, patch).await?;
    tracing::info!(%id, "income updated");

    Ok(Json(view(income)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let id = parse_id(&id)?;
    state.engine.delete_income(id).await?;
    tracing::info!(%id, "income deleted");

    Ok(StatusCode::NO_CONTENT)
}
