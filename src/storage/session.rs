use super::{KeyValueStore, MemoryStore};
use crate::domain::{Role, Session};
use crate::error::StorageError;
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_ROLE_KEY: &str = "user_role";
pub const USER_NAME_KEY: &str = "user_name";

/// Handle to the persisted session, shared by the API client and the controllers.
///
/// Nothing is cached: every read goes to the backing store.
#[derive(Debug, Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Current bearer token. An empty stored value counts as no token.
    pub async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(ACCESS_TOKEN_KEY).await?.filter(|t| !t.is_empty()))
    }

    pub async fn load(&self) -> Result<Option<Session>, StorageError> {
        let Some(token) = self.token().await? else {
            return Ok(None);
        };
        let role = self.store.get(USER_ROLE_KEY).await?.unwrap_or_default();
        let display_name = self.store.get(USER_NAME_KEY).await?.unwrap_or_default();
        Ok(Some(Session { token, role: Role::from(role), display_name }))
    }

    pub async fn persist(&self, session: &Session) -> Result<(), StorageError> {
        self.store.set(ACCESS_TOKEN_KEY, &session.token).await?;
        self.store.set(USER_ROLE_KEY, session.role.as_str()).await?;
        self.store.set(USER_NAME_KEY, &session.display_name).await?;
        tracing::debug!(role = %session.role, "session persisted");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(ACCESS_TOKEN_KEY).await?;
        self.store.remove(USER_ROLE_KEY).await?;
        self.store.remove(USER_NAME_KEY).await?;
        tracing::debug!("session cleared");
        Ok(())
    }
}
