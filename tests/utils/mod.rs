// Shared helpers for integration tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use tower::ServiceExt; // for `oneshot`

use user_api::config::{JwtConfig, DEFAULT_EMAIL_REGEX, DEFAULT_PASSWORD_REGEX};
use user_api::{AppState, CredentialValidator, InMemoryUserRepository, TokenService};

// base64 of "user-api-integration-test-secret"
pub const TEST_JWT_SECRET: &str = "dXNlci1hcGktaW50ZWdyYXRpb24tdGVzdC1zZWNyZXQ=";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret_base64: TEST_JWT_SECRET.to_string(),
        expiration_hours: 24,
        issuer: "user-api".to_string(),
    }
}

/// Builds the full application router backed by an in-memory repository,
/// returning the repository and token service for assertions.
pub fn test_app() -> (Router, Arc<InMemoryUserRepository>, Arc<TokenService>) {
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let token_service = Arc::new(TokenService::from_config(&test_jwt_config()).unwrap());
    let credential_validator =
        CredentialValidator::new(DEFAULT_EMAIL_REGEX, DEFAULT_PASSWORD_REGEX).unwrap();

    let state = AppState::new(
        Arc::clone(&user_repository) as Arc<dyn user_api::UserRepository + Send + Sync>,
        Arc::clone(&token_service),
        credential_validator,
    );

    (user_api::router(state), user_repository, token_service)
}

pub async fn post_users(app: Router, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn get_users(app: Router, bearer_token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri("/users");
    if let Some(token) = bearer_token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
