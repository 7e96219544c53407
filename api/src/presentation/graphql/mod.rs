//! GraphQL schema: viewer-scoped queries plus the note tagging mutation.

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema};

use crate::application::errors::ScopedError;
use crate::bootstrap::app_context::AppContext;
use crate::domain::viewer::Viewer;
use mutation::MutationRoot;
use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Viewer attached to a single execution. `None` when no credential resolved.
pub struct RequestViewer(pub Option<Viewer>);

pub fn build_schema(ctx: AppContext) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ctx)
        .finish()
}

pub(crate) fn viewer<'a>(ctx: &'a Context<'_>) -> Option<&'a Viewer> {
    ctx.data_opt::<RequestViewer>().and_then(|v| v.0.as_ref())
}

pub(crate) fn app<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a AppContext> {
    ctx.data::<AppContext>()
}

/// Field error with a stable `extensions.code`.
pub(crate) fn field_error(err: ScopedError) -> async_graphql::Error {
    let code = match &err {
        ScopedError::Unauthorized => "UNAUTHORIZED",
        ScopedError::NotOwned => "NOT_OWNED",
        ScopedError::Repository(e) => {
            tracing::error!(error = ?e, "graphql_resolver_failed");
            return internal_error();
        }
    };
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

pub(crate) fn internal_error() -> async_graphql::Error {
    async_graphql::Error::new("Internal server error").extend_with(|_, ext| ext.set("code", "INTERNAL"))
}
