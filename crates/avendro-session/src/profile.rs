//! User profile as returned by the backend
//!
//! The backend owns the schema. Only the fields the client routes or
//! displays on are typed; everything else is carried through `extra`
//! untouched so a stored profile round-trips.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserType {
    Borrower,
    LendingCompany,
    /// Any value this client does not know, kept verbatim
    Other(String),
}

impl UserType {
    pub fn as_str(&self) -> &str {
        match self {
            UserType::Borrower => "borrower",
            UserType::LendingCompany => "lending_company",
            UserType::Other(value) => value,
        }
    }
}

impl From<String> for UserType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "borrower" => UserType::Borrower,
            "lending_company" => UserType::LendingCompany,
            _ => UserType::Other(value),
        }
    }
}

impl From<UserType> for String {
    fn from(value: UserType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Staff role within an account. Shown in the UI, never used for routing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    Employee,
    Borrower,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::Borrower => "borrower",
            Role::Other(value) => value,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "employee" => Role::Employee,
            "borrower" => Role::Borrower,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>, user_type: UserType) -> Self {
        Self {
            id: None,
            email: email.into(),
            user_type,
            role: None,
            username: None,
            first_name: None,
            last_name: None,
            full_name: None,
            company_name: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Name for the header: company name for lenders, person name otherwise,
    /// falling back to the email address.
    pub fn display_name(&self) -> String {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if self.user_type == UserType::LendingCompany {
            if let Some(company) = non_empty(&self.company_name) {
                return company;
            }
        }

        if let Some(full_name) = non_empty(&self.full_name) {
            return full_name;
        }

        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let joined = joined.trim();
        if !joined.is_empty() {
            return joined.to_string();
        }

        self.email.clone()
    }
}
