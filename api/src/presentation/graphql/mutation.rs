use async_graphql::{Context, Object};

use crate::application::use_cases::notes::create_note::CreateNote;
use crate::application::use_cases::notes::tag_note::TagNote;
use crate::application::use_cases::tags::create_tag::CreateTag;
use crate::presentation::graphql::types::{GqlNote, GqlTag, TagNoteInput, TagNotePayload};
use crate::presentation::graphql::{app, field_error, viewer};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Replace a note's tags. Each entry may be a tag id or a tag name;
    /// entries matching none of the viewer's tags are ignored.
    async fn tag_note(
        &self,
        ctx: &Context<'_>,
        input: TagNoteInput,
    ) -> async_graphql::Result<TagNotePayload> {
        let app = app(ctx)?;
        let notes = app.note_repo();
        let tags = app.tag_repo();
        let tagging = app.tagging_repo();
        let uc = TagNote {
            notes: notes.as_ref(),
            tags: tags.as_ref(),
            tagging: tagging.as_ref(),
        };
        let edges = uc
            .execute(viewer(ctx), input.note_id.as_str(), &input.tags)
            .await
            .map_err(field_error)?;
        Ok(TagNotePayload {
            tags: edges.into_iter().map(Into::into).collect(),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn create_note(
        &self,
        ctx: &Context<'_>,
        title: String,
        body: Option<String>,
    ) -> async_graphql::Result<GqlNote> {
        let repo = app(ctx)?.note_repo();
        let uc = CreateNote {
            repo: repo.as_ref(),
        };
        let note = uc
            .execute(viewer(ctx), &title, body.as_deref())
            .await
            .map_err(field_error)?;
        Ok(note.into())
    }

    async fn create_tag(&self, ctx: &Context<'_>, name: String) -> async_graphql::Result<GqlTag> {
        let repo = app(ctx)?.tag_repo();
        let uc = CreateTag {
            repo: repo.as_ref(),
        };
        let tag = uc
            .execute(viewer(ctx), &name)
            .await
            .map_err(field_error)?;
        Ok(tag.into())
    }
}
