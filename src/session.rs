use tracing::warn;
use crate::config::{TOKEN_KEY, USER_KEY};
use crate::core::errors::ClientError;
use crate::core::storage::KeyValueStore;
use crate::models::models::{Session, User};

/// The auth token and the user summary, kept under two storage keys.
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save_token(&self, token: &str) -> Result<(), ClientError> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn get_token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn save_user(&self, user: &User) -> Result<(), ClientError> {
        self.store.set_json(USER_KEY, user)
    }

    /// A stored user that no longer parses reads as absent.
    pub fn get_user(&self) -> Result<Option<User>, ClientError> {
        let raw = match self.store.get(USER_KEY)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Ignoring unreadable stored user: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        self.save_token(&session.token)?;
        match &session.user {
            Some(user) => self.save_user(user),
            None => self.store.remove(USER_KEY),
        }
    }

    /// The persisted session, if a token is stored.
    pub fn load(&self) -> Result<Option<Session>, ClientError> {
        match self.get_token()? {
            Some(token) => Ok(Some(Session::new(token, self.get_user()?))),
            None => Ok(None),
        }
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }
}
