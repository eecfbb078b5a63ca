use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::UserModel,
    repository::UserRepository,
    types::{CreateUserRequest, UserListEntry, UserResponse},
};
use crate::{
    auth::{hash_password, CredentialValidator, TokenService},
    shared::AppError,
};

/// Role label embedded in the token claims at registration.
const USER_ROLE: &str = "USER";

/// Service for user registration and listing business logic
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    token_service: Arc<TokenService>,
    validator: CredentialValidator,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        token_service: Arc<TokenService>,
        validator: CredentialValidator,
    ) -> Self {
        Self {
            repository,
            token_service,
            validator,
        }
    }

    /// Registers a new user: validates the input, rejects duplicate emails,
    /// hashes the password, issues an access token and persists the user
    /// with its phones as one atomic unit. No persistence call happens when
    /// any gate fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        info!("Creating user");

        validate_structure(&request)?;

        if !self.validator.is_valid_email(&request.email) {
            return Err(AppError::InvalidEmail);
        }

        if !self.validator.is_valid_password(&request.password) {
            return Err(AppError::InvalidPassword);
        }

        if self.repository.exists_by_email(&request.email).await? {
            warn!("Email already registered");
            return Err(AppError::EmailTaken(request.email));
        }

        let password_hash = hash_password(&request.password)?;

        let mut user = UserModel::new(request.name, request.email, password_hash);
        for phone in &request.phones {
            user.attach_phone(
                phone.number.clone(),
                phone.citycode.clone(),
                phone.contrycode.clone(),
            );
        }
        debug!(user_id = %user.id, "Generated user ID");

        let extra_claims: HashMap<String, Value> = HashMap::from([
            ("name".to_string(), json!(user.name)),
            ("role".to_string(), json!(USER_ROLE)),
            ("isActive".to_string(), json!(user.is_active)),
        ]);
        user.token = self
            .token_service
            .issue(&user.email, user.id, extra_claims)?;

        // The repository enforces email uniqueness again at insert time; a
        // pre-check race surfaces here as the same conflict error.
        self.repository.create_user(&user).await?;

        info!(user_id = %user.id, "User created successfully");

        Ok(UserResponse::from_model(&user))
    }

    /// Lists all users projected to their reduced representation.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserListEntry>, AppError> {
        debug!("Listing all users");

        let users = self.repository.list_users().await?;

        info!(user_count = users.len(), "Users retrieved successfully");

        Ok(users.iter().map(UserListEntry::from_model).collect())
    }
}

/// Structural gates applied before format validation: required fields and
/// phone length bounds.
fn validate_structure(request: &CreateUserRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    if request.phones.is_empty() {
        return Err(AppError::Validation(
            "At least one phone is required".to_string(),
        ));
    }

    // Storage column limits; minimum lengths are not enforced at this gate
    for phone in &request.phones {
        if phone.number.is_empty() || phone.number.len() > 15 {
            return Err(AppError::Validation(
                "Phone number must be at most 15 characters".to_string(),
            ));
        }
        if phone.citycode.is_empty() || phone.citycode.len() > 4 {
            return Err(AppError::Validation(
                "City code must be 1 to 4 characters".to_string(),
            ));
        }
        if phone.contrycode.is_empty() || phone.contrycode.len() > 4 {
            return Err(AppError::Validation(
                "Country code must be 1 to 4 characters".to_string(),
            ));
        }
    }

    Ok(())
}
