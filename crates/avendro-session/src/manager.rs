//! Session Manager
//!
//! Reads the persisted session on load and keeps the three stored keys
//! consistent: they are written together and removed together.

use parking_lot::RwLock;
use std::sync::Arc;

use avendro_storage::KeyValueStore;

use crate::profile::UserProfile;
use crate::session::{Session, TokenPair};
use crate::Result;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_DATA_KEY: &str = "user_data";

pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY];

pub struct SessionManager {
    /// Persistent store shared with anything else using the same keys
    store: Arc<dyn KeyValueStore>,
    /// Last session read or written by this manager
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Load the persisted session, if any
    pub fn initialize(&self) -> Result<Option<Session>> {
        let session = self.load()?;

        match &session {
            Some(session) => tracing::info!(
                email = %session.user.email,
                user_type = %session.user.user_type,
                "Restored session"
            ),
            None => tracing::info!("No stored session"),
        }

        Ok(session)
    }

    /// Read all three keys from the store.
    ///
    /// A stored session that is only partly present, or whose profile does not
    /// parse, is removed and reported as no session.
    pub fn load(&self) -> Result<Option<Session>> {
        let access = self.store.get_item(ACCESS_TOKEN_KEY)?;
        let refresh = self.store.get_item(REFRESH_TOKEN_KEY)?;
        let user_data = self.store.get_item(USER_DATA_KEY)?;

        let session = match (access, refresh, user_data) {
            (None, None, None) => None,
            (Some(access), Some(refresh), Some(user_data)) if !access.is_empty() => {
                match serde_json::from_str::<UserProfile>(&user_data) {
                    Ok(user) => Some(Session {
                        access_token: access,
                        refresh_token: refresh,
                        user,
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "Discarding session with unreadable user data");
                        self.clear()?;
                        None
                    }
                }
            }
            _ => {
                tracing::warn!("Discarding partially stored session");
                self.clear()?;
                None
            }
        };

        *self.current.write() = session.clone();
        Ok(session)
    }

    /// Store tokens and profile together after login or registration
    pub fn persist(&self, tokens: &TokenPair, user: &UserProfile) -> Result<Session> {
        let user_data = serde_json::to_string(user)?;

        self.store.set_items(&[
            (ACCESS_TOKEN_KEY, tokens.access.as_str()),
            (REFRESH_TOKEN_KEY, tokens.refresh.as_str()),
            (USER_DATA_KEY, user_data.as_str()),
        ])?;

        let session = Session::new(tokens.clone(), user.clone());
        *self.current.write() = Some(session.clone());

        tracing::debug!(email = %user.email, "Persisted session");
        Ok(session)
    }

    /// Replace the access token only; the refresh token and profile stay.
    ///
    /// Writes nothing and returns `false` when the refresh token or profile
    /// is no longer stored, e.g. after a logout raced the refresh.
    pub fn update_access_token(&self, access: &str) -> Result<bool> {
        let updated = self.store.set_item_if_present(
            ACCESS_TOKEN_KEY,
            access,
            &[REFRESH_TOKEN_KEY, USER_DATA_KEY],
        )?;

        if !updated {
            tracing::warn!("Session cleared before the access token could be replaced");
            return Ok(false);
        }

        if let Some(session) = self.current.write().as_mut() {
            session.access_token = access.to_string();
        }

        tracing::debug!("Replaced access token");
        Ok(true)
    }

    /// Remove all three keys in one write
    pub fn clear(&self) -> Result<()> {
        self.store.remove_items(&SESSION_KEYS)?;
        *self.current.write() = None;

        tracing::info!("Cleared session");
        Ok(())
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get_item(ACCESS_TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get_item(REFRESH_TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.access_token()?.is_some())
    }

    /// Profile from the store; an unreadable one clears the session.
    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        let Some(user_data) = self.store.get_item(USER_DATA_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&user_data) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding session with unreadable user data");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Session as last loaded or persisted by this manager
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            current: Arc::clone(&self.current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::UserType;
    use avendro_storage::{Database, MemoryStore};

    fn tokens() -> TokenPair {
        TokenPair {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
        }
    }

    fn borrower() -> UserProfile {
        let mut user = UserProfile::new("ben@example.com", UserType::Borrower);
        user.first_name = Some("Ben".to_string());
        user.last_name = Some("Cruz".to_string());
        user
    }

    fn manager_with(store: &MemoryStore) -> SessionManager {
        SessionManager::new(Arc::new(store.clone()))
    }

    #[test]
    fn test_empty_store_has_no_session() {
        let store = MemoryStore::new();
        let manager = manager_with(&store);

        assert!(manager.initialize().unwrap().is_none());
        assert!(!manager.is_authenticated().unwrap());
        assert!(manager.current_user().unwrap().is_none());
    }

    #[test]
    fn test_persist_then_reload() {
        let store = MemoryStore::new();
        let manager = manager_with(&store);

        let session = manager.persist(&tokens(), &borrower()).unwrap();
        assert_eq!(session.access_token, "access-1");
        assert_eq!(store.keys(), vec!["access_token", "refresh_token", "user_data"]);

        // A fresh manager over the same store sees the same session
        let reloaded = manager_with(&store).load().unwrap().unwrap();
        assert_eq!(reloaded, session);
        assert!(manager.is_authenticated().unwrap());
    }

    #[test]
    fn test_malformed_user_data_clears_everything() {
        let malformed = [
            "",
            "{",
            "null",
            "42",
            "\"borrower\"",
            "[]",
            "{\"email\": \"x@example.com\"}",
            "{\"user_type\": \"borrower\"}",
            "{\"email\": 1, \"user_type\": \"borrower\"}",
        ];

        for user_data in malformed {
            let store = MemoryStore::new();
            store
                .set_items(&[
                    (ACCESS_TOKEN_KEY, "a"),
                    (REFRESH_TOKEN_KEY, "r"),
                    (USER_DATA_KEY, user_data),
                ])
                .unwrap();

            let manager = manager_with(&store);
            assert!(manager.load().unwrap().is_none(), "input: {user_data:?}");
            assert!(store.is_empty(), "input: {user_data:?}");
            assert!(!manager.is_authenticated().unwrap());
        }
    }

    #[test]
    fn test_partial_session_clears_everything() {
        let store = MemoryStore::new();
        store.set_item(ACCESS_TOKEN_KEY, "a").unwrap();

        assert!(manager_with(&store).load().unwrap().is_none());
        assert!(store.is_empty());

        let user_data = serde_json::to_string(&borrower()).unwrap();
        store
            .set_items(&[
                (ACCESS_TOKEN_KEY, ""),
                (REFRESH_TOKEN_KEY, "r"),
                (USER_DATA_KEY, user_data.as_str()),
            ])
            .unwrap();

        assert!(manager_with(&store).load().unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_current_user_with_bad_json_clears() {
        let store = MemoryStore::new();
        let manager = manager_with(&store);
        manager.persist(&tokens(), &borrower()).unwrap();

        store.set_item(USER_DATA_KEY, "not json").unwrap();

        assert!(manager.current_user().unwrap().is_none());
        assert!(store.is_empty());
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_update_access_token_keeps_the_rest() {
        let store = MemoryStore::new();
        let manager = manager_with(&store);
        manager.persist(&tokens(), &borrower()).unwrap();

        assert!(manager.update_access_token("access-2").unwrap());

        assert_eq!(manager.access_token().unwrap().as_deref(), Some("access-2"));
        assert_eq!(manager.refresh_token().unwrap().as_deref(), Some("refresh-1"));
        assert_eq!(manager.current().unwrap().access_token, "access-2");
        assert_eq!(manager.current_user().unwrap(), Some(borrower()));
    }

    #[test]
    fn test_update_after_clear_writes_nothing() {
        let store = MemoryStore::new();
        let manager = manager_with(&store);
        manager.persist(&tokens(), &borrower()).unwrap();
        manager.clear().unwrap();

        assert!(!manager.update_access_token("access-2").unwrap());
        assert!(store.is_empty());
        assert!(!manager.is_authenticated().unwrap());
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_update_without_profile_writes_nothing() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(REFRESH_TOKEN_KEY, "refresh-1").unwrap();
        let manager = SessionManager::new(Arc::new(db.clone()));

        assert!(!manager.update_access_token("access-2").unwrap());
        assert_eq!(db.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_clear_on_database() {
        let db = Database::open_in_memory().unwrap();
        let manager = SessionManager::new(Arc::new(db.clone()));

        manager.persist(&tokens(), &borrower()).unwrap();
        assert_eq!(db.len().unwrap(), 3);

        manager.clear().unwrap();
        assert!(db.is_empty().unwrap());
        assert!(manager.current().is_none());
    }
}
