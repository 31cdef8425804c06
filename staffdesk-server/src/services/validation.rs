//! Input checks shared by signup and admin-initiated creation

use shared::{AppError, AppResult, ErrorCode};

use crate::auth::password::MIN_PASSWORD_LEN;

/// Trim and lower-case an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `local@domain.tld` with no whitespace and no extra `@`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // At least one dot with something on both sides
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if !is_valid_email(email) {
        return Err(AppError::with_message(ErrorCode::InvalidFormat, "Invalid email format"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    Ok(())
}

/// Identity fields common to every account creation, trimmed
#[derive(Debug, Clone)]
pub struct IdentityInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

impl IdentityInput {
    /// Trim everything, require every field, normalise and check the email
    pub fn parse(
        first_name: &str,
        last_name: &str,
        email: &str,
        username: &str,
        password: &str,
    ) -> AppResult<Self> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let username = username.trim();
        let email = normalize_email(email);

        if first_name.is_empty()
            || last_name.is_empty()
            || email.is_empty()
            || username.is_empty()
            || password.is_empty()
        {
            return Err(AppError::required("All fields are required"));
        }

        validate_email(&email)?;
        validate_password(password)?;

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            username: username.to_string(),
        })
    }
}
