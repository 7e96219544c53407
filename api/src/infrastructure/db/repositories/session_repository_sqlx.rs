use async_trait::async_trait;
use base64::Engine as _;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::application::ports::session_repository::SessionRepository;
use crate::application::ports::user_repository::UserRow;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::user_repository_sqlx::user_from_row;

pub struct SqlxSessionRepository {
    pub pool: PgPool,
}

impl SqlxSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// only the digest of a handle is stored
fn hash_handle(handle: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(handle.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(&self, user_id: Uuid, ttl_secs: i64) -> anyhow::Result<String> {
        let mut raw = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut raw);
        let handle = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(ttl_secs.max(0));
        sqlx::query("INSERT INTO sessions (token_hash, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(hash_handle(&handle))
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;
        Ok(handle)
    }

    async fn find_user(&self, handle: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT u.id, u.email, u.name
               FROM sessions s
               JOIN users u ON u.id = s.user_id
               WHERE s.token_hash = $1 AND s.expires_at > now()"#,
        )
        .bind(hash_handle(handle))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn delete(&self, handle: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(hash_handle(handle))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
