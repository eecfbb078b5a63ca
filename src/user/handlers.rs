use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    service::UserService,
    types::{CreateUserRequest, UserListEntry, UserResponse},
};
use crate::auth::AccessClaims;
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a new user
///
/// POST /users
/// Public endpoint; returns the created user view including its access token
#[instrument(name = "create_user", skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    info!(email = %request.email, "Registering new user");

    // Use injected dependencies from app state
    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.token_service),
        state.credential_validator.clone(),
    );
    let user = service.create_user(request).await?;

    info!(
        user_id = %user.id,
        email = %user.email,
        "User registered successfully"
    );

    Ok((StatusCode::CREATED, Json(user)))
}

/// HTTP handler for listing all users
///
/// GET /users
/// Endpoint policy: requires the identity established by the jwt_auth
/// middleware; unauthenticated requests are rejected here, not there.
#[instrument(name = "list_users", skip(state, claims))]
pub async fn list_users(
    State(state): State<AppState>,
    claims: Option<Extension<AccessClaims>>,
) -> Result<Json<Vec<UserListEntry>>, AppError> {
    let Some(Extension(claims)) = claims else {
        warn!("Rejecting unauthenticated request to list users");
        return Err(AppError::Unauthorized(
            "A valid bearer token is required".to_string(),
        ));
    };

    info!(subject = %claims.sub, "Listing all users");

    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.token_service),
        state.credential_validator.clone(),
    );
    let users = service.list_users().await?;

    info!(user_count = users.len(), "Users listed successfully");

    Ok(Json(users))
}
