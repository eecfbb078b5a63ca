use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// JWT claims carried by an access token. Standard claims are explicit
/// fields; caller-supplied claims (display name, role, active flag) are
/// flattened alongside them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    pub sub: String,
    pub iss: String,
    pub iat: usize, // Issued at timestamp (standard JWT claim)
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub token_type: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl AccessClaims {
    /// Looks up a caller-supplied claim by name.
    pub fn extra_claim(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}
