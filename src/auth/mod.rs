// Public API - what other modules can use
pub use middleware::jwt_auth;
pub use password::{hash_password, verify_password};
pub use token::{TokenService, TOKEN_TYPE_ACCESS};
pub use types::AccessClaims;
pub use validator::CredentialValidator;

// Internal modules
mod middleware;
mod password;
mod token;
mod types;
mod validator;
