//! Transaction store client.
//!
//! [`Store`] is the seam the controller talks to; [`Client`] implements it
//! against the HTTP API.

use std::future::Future;

use api_types::{
    stats::{SummaryQuery, SummaryResponse},
    transaction::{
        ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView, IncomeListResponse,
        IncomeNew, IncomeUpdate, IncomeView, TransactionList,
    },
};
use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::error::{DashboardError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("rejected: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

type ClientResult<T> = std::result::Result<T, ClientError>;

/// Request/response operations on the income and expense ledger.
pub trait Store {
    fn list_incomes(
        &self,
        query: &TransactionList,
    ) -> impl Future<Output = ClientResult<Vec<IncomeView>>> + Send;

    fn create_income(
        &self,
        payload: IncomeNew,
    ) -> impl Future<Output = ClientResult<IncomeView>> + Send;

    fn update_income(
        &self,
        id: Uuid,
        payload: IncomeUpdate,
    ) -> impl Future<Output = ClientResult<IncomeView>> + Send;

    fn delete_income(&self, id: Uuid) -> impl Future<Output = ClientResult<()>> + Send;

    fn list_expenses(
        &self,
        query: &TransactionList,
    ) -> impl Future<Output = ClientResult<Vec<ExpenseView>>> + Send;

    fn create_expense(
        &self,
        payload: ExpenseNew,
    ) -> impl Future<Output = ClientResult<ExpenseView>> + Send;

    fn update_expense(
        &self,
        id: Uuid,
        payload: ExpenseUpdate,
    ) -> impl Future<Output = ClientResult<ExpenseView>> + Send;

    fn delete_expense(&self, id: Uuid) -> impl Future<Output = ClientResult<()>> + Send;

    fn summary(
        &self,
        query: &SummaryQuery,
    ) -> impl Future<Output = ClientResult<SummaryResponse>> + Send;
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| DashboardError::Validation(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let res = request.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        let err = match status.as_u16() {
            404 => ClientError::NotFound,
            409 => ClientError::Conflict(body),
            400 | 422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        };
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let res = self.send(request).await?;
        Ok(res.json::<T>().await?)
    }
}

impl Store for Client {
    async fn list_incomes(&self, query: &TransactionList) -> ClientResult<Vec<IncomeView>> {
        let endpoint = self.endpoint("incomes/list")?;
        let res: IncomeListResponse = self.send_json(self.http.post(endpoint).json(query)).await?;
        Ok(res.incomes)
    }

    async fn create_income(&self, payload: IncomeNew) -> ClientResult<IncomeView> {
        let endpoint = self.endpoint("incomes")?;
        self.send_json(self.http.post(endpoint).json(&payload)).await
    }

    async fn update_income(&self, id: Uuid, payload: IncomeUpdate) -> ClientResult<IncomeView> {
        let endpoint = self.endpoint(&format!("incomes/{id}"))?;
        self.send_json(self.http.patch(endpoint).json(&payload)).await
    }

    async fn delete_income(&self, id: Uuid) -> ClientResult<()> {
        let endpoint = self.endpoint(&format!("incomes/{id}"))?;
        self.send(self.http.delete(endpoint)).await?;
        Ok(())
    }

    async fn list_expenses(&self, query: &TransactionList) -> ClientResult<Vec<ExpenseView>> {
        let endpoint = self.endpoint("expenses/list")?;
        let res: ExpenseListResponse =
            self.send_json(self.http.post(endpoint).json(query)).await?;
        Ok(res.expenses)
    }

    async fn create_expense(&self, payload: ExpenseNew) -> ClientResult<ExpenseView> {
        let endpoint = self.endpoint("expenses")?;
        self.send_json(self.http.post(endpoint).json(&payload)).await
    }

    async fn update_expense(&self, id: Uuid, payload: ExpenseUpdate) -> ClientResult<ExpenseView> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        self.send_json(self.http.patch(endpoint).json(&payload)).await
    }

    async fn delete_expense(&self, id: Uuid) -> ClientResult<()> {
        let endpoint = self.endpoint(&format!("expenses/{id}"))?;
        self.send(self.http.delete(endpoint)).await?;
        Ok(())
    }

    async fn summary(&self, query: &SummaryQuery) -> ClientResult<SummaryResponse> {
        let endpoint = self.endpoint("summary")?;
        self.send_json(self.http.post(endpoint).json(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_base_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(DashboardError::Validation(_))
        ));
    }

    #[test]
    fn endpoints_are_joined_on_base_url() {
        let client = Client::new("http://127.0.0.1:3000").unwrap();
        let id = Uuid::nil();
        assert_eq!(
            client.endpoint(&format!("expenses/{id}")).unwrap().as_str(),
            "http://127.0.0.1:3000/expenses/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            client.endpoint("summary").unwrap().as_str(),
            "http://127.0.0.1:3000/summary"
        );
    }
}
