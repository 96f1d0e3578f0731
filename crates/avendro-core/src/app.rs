//! Client application state container
//!
//! Owns the local store, the session manager and the API client. The UI
//! shell keeps one instance and asks it which view to render.

use std::sync::Arc;

use avendro_api::{
    ApiClient, BorrowerRegistrationRequest, CompanyRegistrationRequest, LoginRequest,
};
use avendro_session::{SessionManager, UserProfile};
use avendro_storage::{Database, KeyValueStore};

use crate::config::Config;
use crate::view::AppView;
use crate::Result;

pub struct Avendro {
    config: Config,
    session: SessionManager,
    api: ApiClient,
}

impl Avendro {
    /// Open the on-disk store named by the config
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_store(config, Arc::new(db))
    }

    /// Use a caller-supplied store, e.g. `MemoryStore` in tests
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let session = SessionManager::new(store);
        let api = ApiClient::new(&config.api_base_url, session.clone())?;

        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Read the stored session and pick the first view.
    ///
    /// An unreadable stored session is discarded and the landing page shown.
    pub fn initialize(&self) -> Result<AppView> {
        let session = self.session.initialize()?;
        let view = AppView::for_user(session.as_ref().map(|s| &s.user));

        tracing::info!(view = %view, "Client initialized");
        Ok(view)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    // === Auth flows ===
    //
    // Required fields are checked locally before anything is sent.

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AppView> {
        credentials.validate()?;
        let response = self.api.login(credentials).await?;
        Ok(AppView::for_user(Some(&response.user)))
    }

    pub async fn register_borrower(&self, request: &BorrowerRegistrationRequest) -> Result<AppView> {
        request.validate()?;
        let response = self.api.register_borrower(request).await?;
        Ok(AppView::for_user(Some(&response.user)))
    }

    pub async fn register_company(&self, request: &CompanyRegistrationRequest) -> Result<AppView> {
        request.validate()?;
        let response = self.api.register_company(request).await?;
        Ok(AppView::for_user(Some(&response.user)))
    }

    pub async fn logout(&self) -> Result<AppView> {
        self.api.logout().await?;
        Ok(AppView::Landing)
    }

    // === Stored session ===

    /// View for the stored session. A partial or unreadable session is
    /// cleared and lands, the same as on startup.
    pub fn current_view(&self) -> Result<AppView> {
        let session = self.session.load()?;
        Ok(AppView::for_user(session.as_ref().map(|s| &s.user)))
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session.is_authenticated()?)
    }

    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        Ok(self.session.load()?.map(|session| session.user))
    }

    pub fn clear_auth(&self) -> Result<()> {
        Ok(self.session.clear()?)
    }
}
