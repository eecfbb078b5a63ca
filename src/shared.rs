use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::auth::{CredentialValidator, TokenService};
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub token_service: Arc<TokenService>,
    pub credential_validator: CredentialValidator,
}

impl AppState {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        token_service: Arc<TokenService>,
        credential_validator: CredentialValidator,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            credential_validator,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid password format")]
    InvalidPassword,

    #[error("{0}")]
    Validation(String),

    #[error("Email {0} is already registered")]
    EmailTaken(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Status code each error kind maps to at the HTTP boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidEmail
            | AppError::InvalidPassword
            | AppError::Validation(_)
            | AppError::InvalidToken(_) => StatusCode::BAD_REQUEST,
            AppError::EmailTaken(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::TokenGeneration(_)
            | AppError::Config(_)
            | AppError::Database(_)
            | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal causes are logged, never echoed to the client.
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}
