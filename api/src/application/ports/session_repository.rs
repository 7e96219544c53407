use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRow;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Opens a session for the user and returns the opaque handle handed to the client.
    async fn create(&self, user_id: Uuid, ttl_secs: i64) -> anyhow::Result<String>;
    /// User behind a live (unexpired) session handle.
    async fn find_user(&self, handle: &str) -> anyhow::Result<Option<UserRow>>;
    async fn delete(&self, handle: &str) -> anyhow::Result<()>;
    /// Drops expired sessions, returning how many were removed.
    async fn purge_expired(&self) -> anyhow::Result<u64>;
}
