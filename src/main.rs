use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_api::auth::{CredentialValidator, TokenService};
use user_api::config::AppConfig;
use user_api::shared::AppState;
use user_api::user::repository::InMemoryUserRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting user registration service");

    // Configuration is read once; there is no runtime reload
    let config = AppConfig::from_env();

    // The signing key is decoded here and held for the process lifetime
    let token_service = Arc::new(
        TokenService::from_config(&config.jwt).expect("Invalid JWT signing configuration"),
    );
    let credential_validator = CredentialValidator::new(&config.email_regex, &config.password_regex)
        .expect("Invalid credential validation patterns");

    // Create shared application state with explicit constructor wiring
    // Easy to switch between implementations:
    let user_repository = Arc::new(InMemoryUserRepository::new());

    // For production with PostgreSQL:
    // let database_url = config.database_url.expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let user_repository = Arc::new(user_api::PostgresUserRepository::new(pool));

    let app_state = AppState::new(user_repository, token_service, credential_validator);

    let app = user_api::router(app_state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
