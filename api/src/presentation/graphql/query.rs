use async_graphql::{Context, ID, Object};
use uuid::Uuid;

use crate::application::use_cases::notes::get_note::GetNote;
use crate::application::use_cases::tags::list_tags::ListTags;
use crate::presentation::graphql::types::{GqlNote, GqlTag, GqlViewer};
use crate::presentation::graphql::{app, internal_error, viewer};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The requester, or null when no credential resolved.
    async fn viewer(&self, ctx: &Context<'_>) -> Option<GqlViewer> {
        viewer(ctx).map(GqlViewer::from)
    }

    /// One of the viewer's notes. Notes of other users read as null.
    async fn note(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<GqlNote>> {
        let Ok(note_id) = Uuid::parse_str(id.as_str()) else {
            return Ok(None);
        };
        let app = app(ctx)?;
        let notes = app.note_repo();
        let tagging = app.tagging_repo();
        let uc = GetNote {
            notes: notes.as_ref(),
            tagging: tagging.as_ref(),
        };
        let found = uc.execute(viewer(ctx), note_id).await.map_err(|e| {
            tracing::error!(%note_id, error = ?e, "note_lookup_failed");
            internal_error()
        })?;
        Ok(found.map(Into::into))
    }

    /// The viewer's own tags, by name.
    async fn tags(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlTag>> {
        let repo = app(ctx)?.tag_repo();
        let uc = ListTags {
            repo: repo.as_ref(),
        };
        let tags = uc.execute(viewer(ctx)).await.map_err(|e| {
            tracing::error!(error = ?e, "tag_list_failed");
            internal_error()
        })?;
        Ok(tags.into_iter().map(Into::into).collect())
    }
}
