use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{db, DateParseError};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidDate(#[from] DateParseError),
    #[error("Invalid date format. Please use YYYY-MM-DD. ({0})")]
    UnreadableDate(#[from] PathRejection),
    #[error("No data available for the given date range.")]
    NoData,
    #[error("Failed to read climate data: {0}")]
    DataSource(#[from] db::Error),
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidDate(_) | ApiError::UnreadableDate(_) => StatusCode::BAD_REQUEST,
            ApiError::NoData => StatusCode::NOT_FOUND,
            ApiError::DataSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("error serving climate data: {}", self);
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
