use uuid::Uuid;

use crate::application::dto::notes::NoteWithTagsDto;
use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::application::use_cases::notes::tag_note::edges_within;
use crate::domain::viewer::Viewer;

pub struct GetNote<'a, N, G>
where
    N: NoteRepository + ?Sized,
    G: TaggingRepository + ?Sized,
{
    pub notes: &'a N,
    pub tagging: &'a G,
}

impl<'a, N, G> GetNote<'a, N, G>
where
    N: NoteRepository + ?Sized,
    G: TaggingRepository + ?Sized,
{
    /// Anonymous viewers and notes owned by someone else both read as absent.
    pub async fn execute(
        &self,
        viewer: Option<&Viewer>,
        note_id: Uuid,
    ) -> anyhow::Result<Option<NoteWithTagsDto>> {
        let Some(owner_id) = viewer.and_then(Viewer::id) else {
            return Ok(None);
        };
        let Some(note) = self.notes.find_owned(owner_id, note_id).await? else {
            return Ok(None);
        };
        let current = self.tagging.list_note_tags(note.id).await?;
        let tags = edges_within(current.clone(), &current);
        Ok(Some(NoteWithTagsDto { note, tags }))
    }
}
