use async_graphql::{ID, InputObject, SimpleObject};
use base64::Engine as _;

use crate::application::dto::notes::NoteWithTagsDto;
use crate::application::dto::tags::TagEdgeDto;
use crate::domain::notes::note::Note;
use crate::domain::notes::tag::Tag;
use crate::domain::viewer::Viewer;

#[derive(SimpleObject)]
#[graphql(name = "Viewer")]
pub struct GqlViewer {
    pub id: Option<ID>,
    pub is_authenticated: bool,
    pub name: Option<String>,
}

impl From<&Viewer> for GqlViewer {
    fn from(v: &Viewer) -> Self {
        GqlViewer {
            id: v.id().map(|id| ID(id.to_string())),
            is_authenticated: v.is_authenticated(),
            name: v.name().map(str::to_string),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "Tag")]
pub struct GqlTag {
    pub id: ID,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Tag> for GqlTag {
    fn from(t: Tag) -> Self {
        GqlTag {
            id: ID(t.id.to_string()),
            name: t.name,
            created_at: t.created_at,
        }
    }
}

/// A tag together with its place in a note's tag collection.
#[derive(SimpleObject)]
pub struct TagEdge {
    pub cursor: String,
    pub node: GqlTag,
}

pub fn encode_cursor(position: usize) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("cursor:{position}"))
}

impl From<TagEdgeDto> for TagEdge {
    fn from(e: TagEdgeDto) -> Self {
        TagEdge {
            cursor: encode_cursor(e.position),
            node: e.tag.into(),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Note")]
pub struct GqlNote {
    pub id: ID,
    pub title: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub tags: Vec<TagEdge>,
}

impl GqlNote {
    fn build(note: Note, tags: Vec<TagEdge>) -> Self {
        GqlNote {
            id: ID(note.id.to_string()),
            title: note.title,
            body: note.body,
            created_at: note.created_at,
            updated_at: note.updated_at,
            tags,
        }
    }
}

impl From<Note> for GqlNote {
    fn from(note: Note) -> Self {
        GqlNote::build(note, Vec::new())
    }
}

impl From<NoteWithTagsDto> for GqlNote {
    fn from(d: NoteWithTagsDto) -> Self {
        GqlNote::build(d.note, d.tags.into_iter().map(Into::into).collect())
    }
}

#[derive(InputObject)]
pub struct TagNoteInput {
    pub note_id: ID,
    /// Tag ids or tag names, freely mixed.
    pub tags: Vec<String>,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct TagNotePayload {
    pub tags: Vec<TagEdge>,
    pub client_mutation_id: Option<String>,
}
