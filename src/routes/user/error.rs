use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("{0}")]
    ValidationError(#[source] serde_json::Error),

    #[error("User not found")]
    NotFoundError,

    #[error("User was modified concurrently")]
    ConflictError,

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => UserError::NotFoundError,
            StoreError::Conflict => UserError::ConflictError,
            other => UserError::UnexpectedError(anyhow::Error::new(other)),
        }
    }
}

/// Body returned for every failed request.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for UserError {
    fn status_code(&self) -> StatusCode {
        match self {
            UserError::ValidationError(_) => StatusCode::BAD_REQUEST,
            UserError::NotFoundError => StatusCode::NOT_FOUND,
            UserError::ConflictError => StatusCode::CONFLICT,
            UserError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let UserError::UnexpectedError(e) = self {
            tracing::error!(error.cause_chain = ?e, "Request failed");
        }
        let response = ErrorResponse {
            error: self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(response)
    }
}
