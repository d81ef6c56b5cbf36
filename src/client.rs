use crate::cache::ReadingSource;
use crate::errors::ClientError;
use crate::models::{ApiErrorResponse, ReadingDataResponse, TokenResponse};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

/// HTTP client for the remote reading-data API.
#[derive(Debug, Clone)]
pub struct ReadingApiClient {
    base_url: String,
    http: Client,
}

impl ReadingApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("reading-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn login(&self, user_id: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/v3/token"))
            .json(&json!({
                "credentials": {
                    "user_id": user_id,
                    "password": password,
                }
            }))
            .send()
            .await?;
        handle_response(response).await
    }

    pub async fn reading_data(
        &self,
        token: &str,
        year_from: i32,
        year_to: Option<i32>,
    ) -> Result<ReadingDataResponse, ClientError> {
        let mut query = vec![("year_from", year_from.to_string())];
        if let Some(year_to) = year_to {
            query.push(("year_to", year_to.to_string()));
        }
        query.push(("use_cache", "true".to_string()));

        debug!(year_from, ?year_to, "fetching reading data");
        let response = self
            .http
            .get(self.endpoint("/api/v3/reading-data"))
            .query(&query)
            .bearer_auth(token)
            .send()
            .await?;
        handle_response(response).await
    }

    pub async fn month_reading_data(
        &self,
        token: &str,
        year: i32,
        month: u32,
    ) -> Result<ReadingDataResponse, ClientError> {
        debug!(year, month, "fetching month reading data");
        let response = self
            .http
            .post(self.endpoint("/api/v3/month-reading-data/basic"))
            .query(&[("year", year.to_string()), ("month", month.to_string())])
            .bearer_auth(token)
            .send()
            .await?;
        handle_response(response).await
    }

    pub fn session(&self, token: impl Into<String>, year_from: i32) -> ReadingSession<'_> {
        ReadingSession {
            client: self,
            token: token.into(),
            year_from,
        }
    }
}

/// An authenticated view of the API, usable as a cache refresh source.
pub struct ReadingSession<'a> {
    client: &'a ReadingApiClient,
    token: String,
    year_from: i32,
}

impl ReadingSource for ReadingSession<'_> {
    async fn fetch_full_range(&self) -> Result<ReadingDataResponse, ClientError> {
        self.client.reading_data(&self.token, self.year_from, None).await
    }

    async fn fetch_month(&self, year: i32, month: u32) -> Result<ReadingDataResponse, ClientError> {
        self.client.month_reading_data(&self.token, year, month).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.json::<ApiErrorResponse>().await.ok();
    warn!(status = status.as_u16(), "reading API request failed");
    match (status, body) {
        (StatusCode::UNAUTHORIZED, Some(body)) => Err(ClientError::Unauthorized(body.error.message)),
        (StatusCode::UNAUTHORIZED, None) => Err(ClientError::Unauthorized(status.to_string())),
        (_, Some(body)) => Err(ClientError::Api {
            code: body.error.code,
            message: body.error.message,
        }),
        (_, None) => Err(ClientError::Status(status.as_u16())),
    }
}
