use axum::{
    Router,
    routing::{patch, post},
};
use uuid::Uuid;

use std::sync::Arc;

use crate::{ServerError, expenses, incomes, statistics};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Parses a transaction id taken from the request path.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| ServerError::Generic(format!("invalid id: {raw}")))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/incomes", post(incomes::create))
        .route("/incomes/list", post(incomes::list))
        .route(
            "/incomes/{id}",
            patch(incomes::update).delete(incomes::delete),
        )
        .route("/expenses", post(expenses::create))
        .route("/expenses/list", post(expenses::list))
        .route(
            "/expenses/{id}",
            patch(expenses::update).delete(expenses::delete),
        )
        .route("/summary", post(statistics::get_summary))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
