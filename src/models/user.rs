//! Account and session models.

use serde::{Deserialize, Serialize};

use super::validation::{is_valid_email, is_valid_phone};
use crate::errors::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Owned active resumes, in creation order
    pub resume_ids: Vec<String>,
    pub default_resume_id: Option<String>,
    pub total_resumes_created: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A server-side login session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub secret: String,
    pub user_id: String,
    pub expires_at: String,
}

impl Session {
    /// Cookie value handed to the client.
    pub fn token(&self) -> String {
        format!("{}.{}", self.id, self.secret)
    }
}

/// Split a cookie token into `(session_id, secret)`.
pub fn split_token(token: &str) -> Option<(&str, &str)> {
    let (id, secret) = token.split_once('.')?;
    if id.is_empty() || secret.is_empty() {
        return None;
    }
    Some((id, secret))
}

/// Identity attached to authenticated requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Response body for `GET /auth/me`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub default_resume: Option<String>,
    pub total_resumes_created: i64,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            default_resume: user.default_resume_id.clone(),
            total_resumes_created: user.total_resumes_created,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub cpassword: Option<String>,
}

/// A registration that passed validation. The password is still plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewUser, AppError> {
        let field = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let (Some(name), Some(phone_number), Some(email), Some(password), Some(cpassword)) = (
            field(self.name),
            field(self.number),
            field(self.email),
            self.password.filter(|p| !p.is_empty()),
            self.cpassword.filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::Validation("Please fill all the fields".to_string()));
        };

        let email = email.to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }
        if !is_valid_phone(&phone_number) {
            return Err(AppError::Validation("Invalid phone number format".to_string()));
        }
        if password != cpassword {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(NewUser {
            name,
            phone_number,
            email,
            password,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
