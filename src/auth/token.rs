use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::types::AccessClaims;
use crate::{config::JwtConfig, shared::AppError};

/// Fixed type marker embedded in every issued token.
pub const TOKEN_TYPE_ACCESS: &str = "access_token";

// Claim names owned by the service; caller-supplied claims must not use them.
const RESERVED_CLAIMS: [&str; 6] = ["sub", "iss", "iat", "exp", "userId", "type"];

/// Issues and verifies HS256-signed access tokens.
///
/// The signing key is decoded from the base64 secret exactly once when the
/// service is constructed at startup and is never rotated at runtime.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
    issuer: String,
}

impl TokenService {
    /// Builds the service from configuration. A secret that is not valid
    /// base64 is a fatal configuration error.
    pub fn from_config(config: &JwtConfig) -> Result<Self, AppError> {
        let secret = STANDARD.decode(&config.secret_base64).map_err(|e| {
            AppError::TokenGeneration(format!("signing secret is not valid base64: {e}"))
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            expiration_hours: config.expiration_hours,
            issuer: config.issuer.clone(),
        })
    }

    /// Creates a signed token for the given subject and user id, merging in
    /// caller-supplied extra claims. Extra claims that collide with a
    /// reserved claim name are rejected.
    #[instrument(skip(self, extra_claims))]
    pub fn issue(
        &self,
        subject: &str,
        user_id: Uuid,
        extra_claims: HashMap<String, Value>,
    ) -> Result<String, AppError> {
        if let Some(reserved) = extra_claims
            .keys()
            .find(|key| RESERVED_CLAIMS.contains(&key.as_str()))
        {
            return Err(AppError::TokenGeneration(format!(
                "extra claim '{reserved}' collides with a reserved claim name"
            )));
        }

        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = AccessClaims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
            user_id: user_id.to_string(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
            extra: extra_claims,
        };

        debug!(
            subject = %claims.sub,
            exp_timestamp = claims.exp,
            "Signing access token"
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            debug!(error = %e, "Failed to encode access token");
            AppError::TokenGeneration(e.to_string())
        })
    }

    /// Verifies the signature, expiry and issuer of a presented token and
    /// returns its claims. Any failure is an invalid-token error; what that
    /// means for the request is the caller's decision.
    #[instrument(skip(self, token))]
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| {
                debug!(
                    subject = %data.claims.sub,
                    exp = data.claims.exp,
                    "Access token verified successfully"
                );
                data.claims
            })
            .map_err(|e| {
                debug!(error = %e, "Failed to verify access token");
                AppError::InvalidToken(e.to_string())
            })
    }
}
