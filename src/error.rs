//! Error types for the Biblion server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed in API error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NoSuchMember = 2,
    NoSuchItem = 3,
    ItemNotAvailable = 4,
    Duplicate = 5,
    MaxBorrowsReached = 6,
    MaxRenewalsReached = 7,
    NotBorrowed = 8,
    BadValue = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Duplicate id: {0}")]
    Duplicate(String),

    #[error("Item unavailable: {0}")]
    ItemUnavailable(String),

    #[error("Borrow limit exceeded: {0}")]
    BorrowLimitExceeded(String),

    #[error("Renewal limit exceeded: {0}")]
    RenewalLimitExceeded(String),

    #[error("Not borrowed: {0}")]
    NotBorrowed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MemberNotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchMember, msg.clone())
            }
            AppError::ItemNotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, msg.clone())
            }
            AppError::Duplicate(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::ItemUnavailable(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ItemNotAvailable, msg.clone())
            }
            AppError::BorrowLimitExceeded(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::MaxBorrowsReached,
                msg.clone(),
            ),
            AppError::RenewalLimitExceeded(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::MaxRenewalsReached,
                msg.clone(),
            ),
            AppError::NotBorrowed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::NotBorrowed,
                msg.clone(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
