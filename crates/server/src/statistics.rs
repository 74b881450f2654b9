//! Summary API endpoint

use api_types::stats::{
    Granularity as ApiGranularity, OverallSummary, PeriodTotal, SummaryQuery, SummaryResponse,
};
use axum::{Json, extract::State};
use engine::{DateRange, Granularity, PeriodAggregate};

use crate::{ServerError, server::ServerState};

fn map_granularity(granularity: ApiGranularity) -> Granularity {
    match granularity {
        ApiGranularity::Month => Granularity::Month,
        ApiGranularity::Year => Granularity::Year,
    }
}

fn period_totals(aggregates: Vec<PeriodAggregate>) -> Vec<PeriodTotal> {
    aggregates
        .into_iter()
        .map(|agg| PeriodTotal {
            period: agg.period.to_string(),
            total_minor: agg.total.cents(),
        })
        .collect()
}

/// Overall totals plus the income and expense series for one window.
pub async fn get_summary(
    State(state): State<ServerState>,
    Json(payload): Json<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let range = DateRange::new(payload.from, payload.to)?;
    let summary = state
        .engine
        .summary(map_granularity(payload.granularity), &range)
        .await?;

    Ok(Json(SummaryResponse {
        overall: OverallSummary {
            income_total_minor: summary.overall.income_total.cents(),
            expense_total_minor: summary.overall.expense_total.cents(),
            net_minor: summary.overall.net.cents(),
            income_count: summary.overall.income_count,
            expense_count: summary.overall.expense_count,
        },
        income_summary: period_totals(summary.income),
        expense_summary: period_totals(summary.expense),
    }))
}
