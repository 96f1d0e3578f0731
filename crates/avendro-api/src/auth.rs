//! Authentication endpoints and the session side effects they carry

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::registration::{BorrowerRegistrationRequest, CompanyRegistrationRequest};
use crate::types::{AuthResponse, LoginRequest, LogoutRequest, RefreshRequest, RefreshResponse};
use crate::Result;

use avendro_session::UserProfile;

const LOGIN_PATH: &str = "/auth/login/";
const REGISTER_BORROWER_PATH: &str = "/auth/register_borrower/";
const REGISTER_COMPANY_PATH: &str = "/auth/register_company/";
const LOGOUT_PATH: &str = "/auth/logout/";
const PROFILE_PATH: &str = "/auth/profile/";
const REFRESH_TOKEN_PATH: &str = "/auth/refresh_token/";

impl ApiClient {
    /// Log in and persist the returned tokens and profile
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .send_json(Method::POST, LOGIN_PATH, credentials)
            .await?;
        self.store_session(&response)?;

        tracing::info!(
            email = %response.user.email,
            user_type = %response.user.user_type,
            "Logged in"
        );
        Ok(response)
    }

    pub async fn register_borrower(
        &self,
        request: &BorrowerRegistrationRequest,
    ) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .send_json(Method::POST, REGISTER_BORROWER_PATH, request)
            .await?;
        self.store_session(&response)?;

        tracing::info!(email = %response.user.email, "Registered borrower");
        Ok(response)
    }

    pub async fn register_company(
        &self,
        request: &CompanyRegistrationRequest,
    ) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .send_json(Method::POST, REGISTER_COMPANY_PATH, request)
            .await?;
        self.store_session(&response)?;

        tracing::info!(
            email = %response.user.email,
            company = %request.company_name,
            "Registered lending company"
        );
        Ok(response)
    }

    /// Ask the backend to invalidate the refresh token, then clear the local
    /// session whatever the outcome. Only a failure to clear is returned.
    pub async fn logout(&self) -> Result<()> {
        let refresh_token = match self.session().refresh_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read refresh token for logout");
                None
            }
        };

        match self.invalidate_remote_session(refresh_token.as_deref()).await {
            Ok(status) if status.is_success() => tracing::debug!("Server session invalidated"),
            Ok(status) => tracing::warn!(status = status.as_u16(), "Logout rejected by server"),
            Err(e) => tracing::warn!(error = %e, "Logout request failed"),
        }

        self.session().clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn invalidate_remote_session(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<reqwest::StatusCode> {
        let response = self
            .request(Method::POST, LOGOUT_PATH)?
            .json(&LogoutRequest { refresh_token })
            .send()
            .await?;
        Ok(response.status())
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Without a stored refresh token this fails before any request is made.
    pub async fn refresh_token(&self) -> Result<RefreshResponse> {
        let Some(refresh) = self.session().refresh_token()? else {
            return Err(ApiError::NoRefreshToken);
        };

        let response: RefreshResponse = self
            .send_json(
                Method::POST,
                REFRESH_TOKEN_PATH,
                &RefreshRequest { refresh: &refresh },
            )
            .await?;

        if response.access.is_empty() {
            return Err(ApiError::Decode(serde::de::Error::custom(
                "refresh response has an empty access token",
            )));
        }

        if !self.session().update_access_token(&response.access)? {
            // Logged out while the request was in flight
            return Err(ApiError::NoRefreshToken);
        }

        tracing::debug!("Refreshed access token");
        Ok(response)
    }

    /// Profile of the authenticated user. A missing or expired token comes
    /// back from the backend as a 401.
    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.get_json(PROFILE_PATH).await
    }

    fn store_session(&self, response: &AuthResponse) -> Result<()> {
        self.session().persist(&response.tokens, &response.user)?;
        Ok(())
    }
}
