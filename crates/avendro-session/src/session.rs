//! Session data structure

use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// The `tokens` object returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Bearer token attached to every request
    pub access_token: String,
    /// Token exchanged for a new access token
    pub refresh_token: String,
    /// Profile stored alongside the tokens
    pub user: UserProfile,
}

impl Session {
    pub fn new(tokens: TokenPair, user: UserProfile) -> Self {
        Self {
            access_token: tokens.access,
            refresh_token: tokens.refresh,
            user,
        }
    }

    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access: self.access_token.clone(),
            refresh: self.refresh_token.clone(),
        }
    }
}
