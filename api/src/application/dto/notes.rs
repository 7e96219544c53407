use crate::application::dto::tags::TagEdgeDto;
use crate::domain::notes::note::Note;

#[derive(Debug, Clone)]
pub struct NoteWithTagsDto {
    pub note: Note,
    pub tags: Vec<TagEdgeDto>,
}
