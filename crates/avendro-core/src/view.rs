//! Top-level view selection
//!
//! The dashboard is chosen from `user_type` alone. `role` is shown in the
//! header but never decides which dashboard loads.

use serde::{Deserialize, Serialize};

use avendro_session::{UserProfile, UserType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    /// Public landing page with the login and register modals
    Landing,
    BorrowerDashboard,
    CompanyDashboard,
}

impl AppView {
    pub fn for_user(user: Option<&UserProfile>) -> Self {
        match user.map(|u| &u.user_type) {
            Some(UserType::Borrower) => AppView::BorrowerDashboard,
            Some(UserType::LendingCompany) => AppView::CompanyDashboard,
            Some(UserType::Other(user_type)) => {
                tracing::warn!(%user_type, "No dashboard for user type");
                AppView::Landing
            }
            None => AppView::Landing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppView::Landing => "landing",
            AppView::BorrowerDashboard => "borrower_dashboard",
            AppView::CompanyDashboard => "company_dashboard",
        }
    }

    pub fn is_dashboard(&self) -> bool {
        !matches!(self, AppView::Landing)
    }
}

impl std::fmt::Display for AppView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
