use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notes::tag::Tag;

#[async_trait]
pub trait TaggingRepository: Send + Sync {
    /// Swap the note's whole tag set for `tag_ids` in one atomic step.
    async fn replace_note_tags(&self, note_id: Uuid, tag_ids: &[Uuid]) -> anyhow::Result<()>;

    /// Current tags of the note, ordered by name then id.
    async fn list_note_tags(&self, note_id: Uuid) -> anyhow::Result<Vec<Tag>>;
}
