// Library crate for the user registration service
// This file exposes the public API for integration tests

pub mod auth;
pub mod config;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use auth::{AccessClaims, CredentialValidator, TokenService};
pub use shared::{AppError, AppState};
pub use user::repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};

use axum::{middleware, routing::post, Router};

/// Builds the application router: both user routes behind the pass-through
/// authentication middleware, with endpoint policy deciding access.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(user::create_user).get(user::list_users))
        .layer(middleware::from_fn_with_state(state.clone(), auth::jwt_auth))
        .with_state(state)
}
