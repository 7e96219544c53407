use uuid::Uuid;

use crate::application::dto::tags::TagEdgeDto;
use crate::application::errors::ScopedError;
use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::ports::tagging_repository::TaggingRepository;
use crate::application::services::tagging::partition_tokens;
use crate::domain::notes::tag::Tag;
use crate::domain::viewer::Viewer;

/// Replaces a note's tags with the viewer's tags matched by id or name.
pub struct TagNote<'a, N, T, G>
where
    N: NoteRepository + ?Sized,
    T: TagRepository + ?Sized,
    G: TaggingRepository + ?Sized,
{
    pub notes: &'a N,
    pub tags: &'a T,
    pub tagging: &'a G,
}

impl<'a, N, T, G> TagNote<'a, N, T, G>
where
    N: NoteRepository + ?Sized,
    T: TagRepository + ?Sized,
    G: TaggingRepository + ?Sized,
{
    pub async fn execute(
        &self,
        viewer: Option<&Viewer>,
        note_id: &str,
        tokens: &[String],
    ) -> Result<Vec<TagEdgeDto>, ScopedError> {
        let owner_id = viewer
            .and_then(Viewer::id)
            .ok_or(ScopedError::Unauthorized)?;

        // ids that are not even UUIDs cannot name one of the viewer's notes
        let note = match Uuid::parse_str(note_id.trim()) {
            Ok(id) => self
                .notes
                .find_owned(owner_id, id)
                .await
                .map_err(ScopedError::Repository)?,
            Err(_) => None,
        }
        .ok_or(ScopedError::NotOwned)?;

        let lookup = partition_tokens(tokens);
        let resolved = if lookup.names.is_empty() {
            Vec::new()
        } else {
            self.tags
                .find_own_tags(owner_id, &lookup.ids, &lookup.names)
                .await
                .map_err(ScopedError::Repository)?
        };

        let ids: Vec<Uuid> = resolved.iter().map(|t| t.id).collect();
        self.tagging
            .replace_note_tags(note.id, &ids)
            .await
            .map_err(ScopedError::Repository)?;
        tracing::debug!(note_id = %note.id, tags = ids.len(), "note_tags_replaced");

        let current = self
            .tagging
            .list_note_tags(note.id)
            .await
            .map_err(ScopedError::Repository)?;
        Ok(edges_within(resolved, &current))
    }
}

/// Pairs each tag with its index in `collection`. Tags missing from the
/// collection are placed after it, in input order.
pub fn edges_within(tags: Vec<Tag>, collection: &[Tag]) -> Vec<TagEdgeDto> {
    let mut overflow = collection.len();
    tags.into_iter()
        .map(|tag| {
            let position = match collection.iter().position(|c| c.id == tag.id) {
                Some(p) => p,
                None => {
                    overflow += 1;
                    overflow - 1
                }
            };
            TagEdgeDto { tag, position }
        })
        .collect()
}
