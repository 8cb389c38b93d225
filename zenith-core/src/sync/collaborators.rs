//! Contracts for the collaborators the sync manager talks to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::error::{LocalStoreError, ProfileError};
use crate::models::AppState;

/// Remote profile rows, one JSON state document per user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the stored document, `None` when the user has no row yet.
    async fn get_profile(&self, user_id: &str) -> Result<Option<Value>, ProfileError>;

    async fn create_profile(&self, user_id: &str, document: &AppState) -> Result<(), ProfileError>;

    async fn upsert_profile(
        &self,
        user_id: &str,
        document: &AppState,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ProfileError>;
}

/// Source of the currently authenticated user.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user_id(&self) -> Option<String>;
}

/// A single string slot of durable local storage for this installation.
pub trait LocalStore: Send + Sync {
    fn read(&self) -> Result<Option<String>, LocalStoreError>;

    fn write(&self, contents: &str) -> Result<(), LocalStoreError>;
}
