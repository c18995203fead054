use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::{AdminSession, Cart, CustomerSession};

pub const CUSTOMER_KEY: &str = "bozorfood-user";
pub const CART_KEY: &str = "bozorfood-cart";
pub const ADMIN_KEY: &str = "bozorfood-admin";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Everything the client keeps between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub customer: CustomerSession,
    pub cart: Cart,
    pub admin: AdminSession,
}

/// JSON files under one directory, one per key.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Reads one value; a missing file yields the default.
    #[instrument(skip(self))]
    pub async fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, SessionError> {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved state");
                Ok(T::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value))]
    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(self.path(key), bytes).await?;
        debug!("State saved");
        Ok(())
    }

    pub async fn load_state(&self) -> Result<PersistedState, SessionError> {
        Ok(PersistedState {
            customer: self.load(CUSTOMER_KEY).await?,
            cart: self.load(CART_KEY).await?,
            admin: self.load(ADMIN_KEY).await?,
        })
    }

    pub async fn save_state(&self, state: &PersistedState) -> Result<(), SessionError> {
        self.save(CUSTOMER_KEY, &state.customer).await?;
        self.save(CART_KEY, &state.cart).await?;
        self.save(ADMIN_KEY, &state.admin).await
    }
}
