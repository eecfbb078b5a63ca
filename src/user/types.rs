use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{PhoneModel, UserModel};

/// Request payload for registering a new user.
///
/// Missing fields deserialize to their empty defaults so the registration
/// gates reject them as validation errors with the standard error body,
/// instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phones: Vec<PhoneDto>,
}

/// Phone record as it appears on the wire. Field names follow the public
/// API contract, including the `contrycode` spelling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhoneDto {
    pub number: String,
    pub citycode: String,
    pub contrycode: String,
}

impl PhoneDto {
    fn from_model(phone: &PhoneModel) -> Self {
        Self {
            number: phone.number.clone(),
            citycode: phone.citycode.clone(),
            contrycode: phone.contrycode.clone(),
        }
    }
}

/// Response for a successfully created user, including the issued token
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phones: Vec<PhoneDto>,
    pub isactive: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub token: String,
}

impl UserResponse {
    /// Explicit field-by-field projection from the entity; never the
    /// password hash.
    pub fn from_model(user: &UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phones: user.phones.iter().map(PhoneDto::from_model).collect(),
            isactive: user.is_active,
            created: user.created,
            modified: user.modified,
            last_login: user.last_login,
            token: user.token.clone(),
        }
    }
}

/// Reduced projection used by the listing endpoint; carries neither the
/// password hash nor the issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserListEntry {
    pub name: String,
    pub email: String,
    pub isactive: bool,
    pub phones: Vec<PhoneDto>,
}

impl UserListEntry {
    pub fn from_model(user: &UserModel) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            isactive: user.is_active,
            phones: user.phones.iter().map(PhoneDto::from_model).collect(),
        }
    }
}
