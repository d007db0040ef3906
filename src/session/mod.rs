//! Session module - signed-in user as an explicit application context

pub mod google;

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::db::{Database, USER_KEY};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed identity token: {0}")]
    MalformedToken(String),
    #[error("identity token has no subject claim")]
    MissingSubject,
    #[error("Google client ID is not configured (set GOOGLE_CLIENT_ID)")]
    MissingClientId,
    #[error("invalid sign-in URL: {0}")]
    InvalidUrl(String),
    #[error("userinfo request rejected: {0}")]
    Userinfo(StatusCode),
    #[error("userinfo request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Who is signed in. `None` means every view renders unauthenticated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn login(self, user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn logout(self) -> Self {
        Self { user: None }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.user.as_ref()?.access_token.as_deref()
    }
}

/// Session persisted in the key-value table
pub struct SessionStore<'a> {
    db: &'a Database,
}

impl<'a> SessionStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Restore the saved session; a corrupt entry is dropped
    pub fn load(&self) -> Result<Session> {
        let Some(raw) = self.db.get_item(USER_KEY)? else {
            return Ok(Session::anonymous());
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Session::anonymous().login(user)),
            Err(e) => {
                warn!("Error parsing saved user: {}", e);
                self.db.remove_item(USER_KEY)?;
                Ok(Session::anonymous())
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        match session.user() {
            Some(user) => self.db.write_json(USER_KEY, user),
            None => self.db.remove_item(USER_KEY),
        }
    }

    pub fn login(&self, session: Session, user: User) -> Result<Session> {
        info!("Signed in as {}", user.email);
        let session = session.login(user);
        self.save(&session)?;
        Ok(session)
    }

    /// Clears both the in-memory and the persisted session
    pub fn logout(&self, session: Session) -> Result<Session> {
        let session = session.logout();
        self.save(&session)?;
        Ok(session)
    }
}
