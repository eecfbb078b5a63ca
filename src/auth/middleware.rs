use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::shared::AppState;

/// JWT authentication middleware - reads the Authorization Bearer header and,
/// when the token verifies, attaches AccessClaims to the request extensions.
///
/// Requests without a bearer token, or with one that fails verification, pass
/// through unauthenticated; the access decision belongs to endpoint policy,
/// not to this middleware.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), auth::jwt_auth))
#[instrument(skip(state, req, next))]
pub async fn jwt_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = bearer else {
        debug!("No bearer token on request, continuing unauthenticated");
        return next.run(req).await;
    };

    match state.token_service.verify(&token) {
        Ok(claims) => {
            debug!(
                subject = %claims.sub,
                "Bearer token verified, identity attached to request"
            );
            req.extensions_mut().insert(claims);
        }
        Err(e) => {
            warn!(error = %e, "Invalid bearer token, continuing unauthenticated");
        }
    }

    next.run(req).await
}
