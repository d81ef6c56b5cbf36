use axum::http::StatusCode;
use thiserror::Error;

/// Contract violations in the raw reading data handed to the stats engine.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid year key {0:?}")]
    InvalidYear(String),

    #[error("invalid month key {month:?} in year {year}")]
    InvalidMonth { year: i32, month: String },

    #[error("invalid day key {day:?} in {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: String },
}

/// Failures talking to the remote reading-data API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("API Error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("unexpected response status {0}")]
    Status(u16),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized(_) => Self::unauthorized(err.to_string()),
            _ => Self::bad_gateway(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
