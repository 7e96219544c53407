use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;
use crate::infrastructure::db::PgPool;

pub struct SqlxNoteRepository {
    pub pool: PgPool,
}

impl SqlxNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn note_from_row(r: &PgRow) -> Note {
    Note {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        title: r.get("title"),
        body: r.get("body"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl NoteRepository for SqlxNoteRepository {
    async fn create_for_user(
        &self,
        owner_id: Uuid,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Note> {
        let row = sqlx::query(
            r#"INSERT INTO notes (owner_id, title, body) VALUES ($1, $2, $3)
               RETURNING id, owner_id, title, body, created_at, updated_at"#,
        )
        .bind(owner_id)
        .bind(title)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(note_from_row(&row))
    }

    async fn find_owned(&self, owner_id: Uuid, note_id: Uuid) -> anyhow::Result<Option<Note>> {
        let row = sqlx::query(
            r#"SELECT id, owner_id, title, body, created_at, updated_at
               FROM notes WHERE id = $1 AND owner_id = $2"#,
        )
        .bind(note_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(note_from_row))
    }

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Note>> {
        let rows = sqlx::query(
            r#"SELECT id, owner_id, title, body, created_at, updated_at
               FROM notes WHERE owner_id = $1
               ORDER BY updated_at DESC LIMIT 100"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(note_from_row).collect())
    }
}
