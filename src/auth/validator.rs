use regex::Regex;

use crate::shared::AppError;

/// Validates email and password formats against operator-configured
/// patterns. Patterns come from configuration so policy can change without
/// a rebuild; both checks are side-effect free and never panic.
#[derive(Clone)]
pub struct CredentialValidator {
    email_pattern: Regex,
    password_pattern: Regex,
}

impl CredentialValidator {
    /// Compiles both patterns once. A pattern that fails to compile is a
    /// fatal configuration error.
    pub fn new(email_regex: &str, password_regex: &str) -> Result<Self, AppError> {
        let email_pattern = Regex::new(email_regex)
            .map_err(|e| AppError::Config(format!("invalid email pattern: {e}")))?;
        let password_pattern = Regex::new(password_regex)
            .map_err(|e| AppError::Config(format!("invalid password pattern: {e}")))?;

        Ok(Self {
            email_pattern,
            password_pattern,
        })
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        !email.is_empty() && self.email_pattern.is_match(email)
    }

    pub fn is_valid_password(&self, password: &str) -> bool {
        !password.is_empty() && self.password_pattern.is_match(password)
    }
}
