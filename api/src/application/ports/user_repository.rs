use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::viewer::Viewer;

/// Account as stored. `password_hash` is absent for accounts that never set one.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
}

impl UserRow {
    pub fn into_viewer(self) -> Viewer {
        Viewer::authenticated(self.id, self.name)
    }
}

/// Registration input; `email` is expected already normalized.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser<'_>) -> anyhow::Result<UserRow>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>>;
    /// Backs viewer resolution in both auth modes.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>>;
}
