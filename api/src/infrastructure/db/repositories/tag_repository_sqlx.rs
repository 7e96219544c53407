use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::tag_repository::TagRepository;
use crate::domain::notes::tag::Tag;
use crate::infrastructure::db::PgPool;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn tag_from_row(r: &PgRow) -> Tag {
    Tag {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        name: r.get("name"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn create_for_user(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Tag> {
        let row = sqlx::query(
            r#"INSERT INTO tags (owner_id, name) VALUES ($1, $2)
               RETURNING id, owner_id, name, created_at"#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag_from_row(&row))
    }

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"SELECT id, owner_id, name, created_at FROM tags
               WHERE owner_id = $1
               ORDER BY name ASC, id ASC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(tag_from_row).collect())
    }

    async fn find_own_tags(
        &self,
        owner_id: Uuid,
        ids: &[Uuid],
        names: &[String],
    ) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"SELECT id, owner_id, name, created_at FROM tags
               WHERE owner_id = $1 AND (id = ANY($2) OR name = ANY($3))
               ORDER BY name ASC, id ASC"#,
        )
        .bind(owner_id)
        .bind(ids)
        .bind(names)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(tag_from_row).collect())
    }
}
