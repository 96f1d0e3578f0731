//! Request and response bodies for the auth endpoints

use serde::{Deserialize, Serialize};

use avendro_session::{TokenPair, UserProfile};

use crate::registration::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are required and the email needs an `@`
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check_email(&self.email);
        errors.require("password", &self.password);
        errors.into_result()
    }
}

/// Body of a successful login or registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserProfile,
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize)]
pub(crate) struct LogoutRequest<'a> {
    pub refresh_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        assert!(LoginRequest::new("ben@example.com", "s3cret").validate().is_ok());

        let errors = LoginRequest::new("", "").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("This field is required."));
        assert_eq!(errors.get("password"), Some("This field is required."));

        let errors = LoginRequest::new("ben.example.com", "s3cret")
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid email address."));
        assert_eq!(errors.len(), 1);
    }
}
