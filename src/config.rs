use std::env;

/// Default email pattern: standard addresses with an alphabetic TLD.
pub const DEFAULT_EMAIL_REGEX: &str = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Default password pattern: 8 to 64 characters from letters, digits and
/// common symbols. Operators can override via `PASSWORD_REGEX` to tighten
/// or loosen policy without a rebuild.
pub const DEFAULT_PASSWORD_REGEX: &str = r"^[A-Za-z0-9@$!%*?&#+._-]{8,64}$";

// Development fallback only; deployments must set JWT_SECRET.
const DEFAULT_JWT_SECRET: &str = "dXNlci1hcGktZGV2LXNlY3JldC1jaGFuZ2UtaW4tcHJvZA==";

const DEFAULT_EXPIRATION_HOURS: i64 = 24;
const DEFAULT_ISSUER: &str = "user-api";

/// JWT signing configuration. The secret is base64-encoded; it is decoded
/// exactly once when the token service is constructed at startup.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret_base64: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

/// Application configuration, read once from the environment at startup.
/// There is no runtime reload.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub email_regex: String,
    pub password_regex: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").ok(),
            email_regex: env::var("EMAIL_REGEX").unwrap_or_else(|_| DEFAULT_EMAIL_REGEX.into()),
            password_regex: env::var("PASSWORD_REGEX")
                .unwrap_or_else(|_| DEFAULT_PASSWORD_REGEX.into()),
            jwt: JwtConfig {
                secret_base64: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.into()),
                expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_EXPIRATION_HOURS),
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into()),
            },
        }
    }
}
