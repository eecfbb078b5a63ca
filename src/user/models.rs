use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserModel {
    pub id: Uuid, // UUID v4, generated at creation, immutable
    pub name: String,
    pub email: String,
    pub password_hash: String, // argon2 encoded hash, never the plaintext
    #[sqlx(skip)]
    pub phones: Vec<PhoneModel>,
    pub is_active: bool,
    pub token: String, // most recently issued access token
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// Database model for the phones table. Each phone belongs to exactly one
/// user and is deleted with it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct PhoneModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub number: String,
    pub citycode: String,
    pub contrycode: String,
}

impl UserModel {
    /// Creates a new user model with a generated ID and current timestamps.
    /// Phones are attached afterwards with [`UserModel::attach_phone`].
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            phones: Vec::new(),
            is_active: true,
            token: String::new(),
            created: now,
            modified: now,
            last_login: now,
        }
    }

    /// Attaches an owned phone record to this user.
    pub fn attach_phone(&mut self, number: String, citycode: String, contrycode: String) {
        self.phones.push(PhoneModel {
            id: Uuid::new_v4(),
            user_id: self.id,
            number,
            citycode,
            contrycode,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_model() {
        let user = UserModel::new(
            "Test User".to_string(),
            "test@example.com".to_string(),
            "$argon2id$fake-hash".to_string(),
        );

        assert_eq!(user.name, "Test User");
        assert_eq!(user.email, "test@example.com");
        assert!(user.is_active);
        assert!(user.token.is_empty());
        assert!(user.phones.is_empty());
        assert_eq!(user.created, user.modified);
        assert_eq!(user.created, user.last_login);
    }

    #[test]
    fn test_attach_phone_sets_owner() {
        let mut user = UserModel::new(
            "Test User".to_string(),
            "test@example.com".to_string(),
            "hash".to_string(),
        );

        user.attach_phone("123456".to_string(), "1".to_string(), "57".to_string());

        assert_eq!(user.phones.len(), 1);
        let phone = &user.phones[0];
        assert_eq!(phone.user_id, user.id);
        assert_eq!(phone.number, "123456");
        assert_eq!(phone.citycode, "1");
        assert_eq!(phone.contrycode, "57");
    }
}
