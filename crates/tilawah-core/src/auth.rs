//! Demo-only accounts kept in local storage
//!
//! Passwords are stored in plain text. This exists to exercise a login flow,
//! not to protect anything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::error::AuthError;
use crate::store::KeyValueStore;

/// Signed-in identifier
pub const USER_KEY: &str = "app_user";
/// JSON object of identifier -> password
pub const USERS_KEY: &str = "app_users";

pub const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in reader, handed explicitly to whatever needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

pub struct CredentialStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Session left behind by a previous login, if any
    pub fn restore_session(&self) -> Result<Option<Session>, AuthError> {
        let username = self.store.get(USER_KEY).map_err(storage_error)?;
        Ok(username
            .filter(|u| !u.is_empty())
            .map(|username| Session { username }))
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let users = self.users()?;
        if users.get(email).map(String::as_str) != Some(password) {
            return Err(AuthError::InvalidCredentials);
        }

        self.start_session(email)
    }

    pub fn signup(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Session, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        let mut users = self.users()?;
        if users.contains_key(email) {
            return Err(AuthError::AccountExists);
        }

        users.insert(email.to_string(), password.to_string());
        let encoded =
            serde_json::to_string(&users).map_err(|e| AuthError::Storage(e.to_string()))?;
        self.store.set(USERS_KEY, &encoded).map_err(storage_error)?;
        info!(user = email, "created demo account");

        self.start_session(email)
    }

    pub fn logout(&mut self, session: Session) -> Result<(), AuthError> {
        self.store.remove(USER_KEY).map_err(storage_error)?;
        info!(user = %session.username, "signed out");
        Ok(())
    }

    fn start_session(&mut self, email: &str) -> Result<Session, AuthError> {
        self.store.set(USER_KEY, email).map_err(storage_error)?;
        info!(user = email, "signed in");
        Ok(Session {
            username: email.to_string(),
        })
    }

    fn users(&self) -> Result<BTreeMap<String, String>, AuthError> {
        match self.store.get(USERS_KEY).map_err(storage_error)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| AuthError::Storage(e.to_string())),
            None => Ok(BTreeMap::new()),
        }
    }
}

fn storage_error(e: anyhow::Error) -> AuthError {
    AuthError::Storage(e.to_string())
}
