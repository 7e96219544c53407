use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::tagging_repository::TaggingRepository;
use crate::domain::notes::tag::Tag;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::tag_repository_sqlx::tag_from_row;

pub struct SqlxTaggingRepository {
    pub pool: PgPool,
}

impl SqlxTaggingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaggingRepository for SqlxTaggingRepository {
    async fn replace_note_tags(&self, note_id: Uuid, tag_ids: &[Uuid]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        // row lock serializes concurrent replacements of the same note
        sqlx::query("SELECT id FROM notes WHERE id = $1 FOR UPDATE")
            .bind(note_id)
            .fetch_optional(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
            .bind(note_id)
            .execute(&mut *tx)
            .await?;
        if !tag_ids.is_empty() {
            sqlx::query(
                r#"INSERT INTO note_tags (note_id, tag_id)
                   SELECT $1, t FROM UNNEST($2::uuid[]) AS t
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(note_id)
            .bind(tag_ids)
            .execute(&mut *tx)
            .await?;
        }
        sqlx::query("UPDATE notes SET updated_at = now() WHERE id = $1")
            .bind(note_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_note_tags(&self, note_id: Uuid) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"SELECT t.id, t.owner_id, t.name, t.created_at
               FROM note_tags nt
               JOIN tags t ON t.id = nt.tag_id
               WHERE nt.note_id = $1
               ORDER BY t.name ASC, t.id ASC"#,
        )
        .bind(note_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(tag_from_row).collect())
    }
}
