//! HTTP plumbing shared by every endpoint
//!
//! Every request carries `Content-Type: application/json` and, when the
//! store holds an access token, `Authorization: Bearer <token>`. The token is
//! read from the store per request. Calls are sent once; there is no retry,
//! timeout or cancellation.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use avendro_session::SessionManager;

use crate::error::ApiError;
use crate::Result;

pub struct ApiClient {
    http: reqwest::Client,
    /// Base URL without a trailing slash, e.g. `http://localhost:8000/api`
    base_url: String,
    session: SessionManager,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionManager) -> Result<Self> {
        let parsed =
            url::Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::InvalidBaseUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("avendro/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builder with the JSON content type and, if stored, the bearer token
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut request = self
            .http
            .request(method, self.endpoint(path))
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.session.access_token()? {
            request = request.bearer_auth(token);
        }

        Ok(request)
    }

    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path)?;
        self.execute(Method::GET, path, request).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path)?.json(body);
        self.execute(method, path, request).await
    }

    async fn execute<T>(&self, method: Method, path: &str, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "Request failed");
            ApiError::Network(e)
        })?;

        tracing::debug!(%method, path, status = response.status().as_u16(), "Response");
        handle_response(response).await
    }
}

/// Parse a 2xx body as `T`, or turn anything else into `ApiError::Status`
pub(crate) async fn handle_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), &body));
    }

    serde_json::from_slice(&body).map_err(ApiError::Decode)
}
