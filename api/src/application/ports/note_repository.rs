use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notes::note::Note;

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create_for_user(&self, owner_id: Uuid, title: &str, body: &str)
    -> anyhow::Result<Note>;

    // Scoped to the owner: a note belonging to someone else resolves to None.
    async fn find_owned(&self, owner_id: Uuid, note_id: Uuid) -> anyhow::Result<Option<Note>>;

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Note>>;
}
