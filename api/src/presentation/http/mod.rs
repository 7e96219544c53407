use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod graphql;
pub mod health;

/// Routes served under `/api` that only need the application context.
pub fn api_routes(ctx: AppContext) -> Router {
    Router::new()
        .nest("/auth", auth::routes(ctx.clone()))
        .merge(graphql::routes(ctx))
}
