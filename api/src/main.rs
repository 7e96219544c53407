use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use notes_api::bootstrap::app_context::{AppContext, AppServices};
use notes_api::bootstrap::config::{AuthMode, Config};
use notes_api::infrastructure::auth::jwt::JwtTokenCodec;
use notes_api::infrastructure::db::repositories::{
    note_repository_sqlx::SqlxNoteRepository, session_repository_sqlx::SqlxSessionRepository,
    tag_repository_sqlx::SqlxTagRepository, tagging_repository_sqlx::SqlxTaggingRepository,
    user_repository_sqlx::SqlxUserRepository,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            notes_api::presentation::http::auth::register,
            notes_api::presentation::http::auth::login,
            notes_api::presentation::http::auth::logout,
            notes_api::presentation::http::auth::me,
            notes_api::presentation::http::graphql::execute,
            notes_api::presentation::http::health::health,
        ),
        components(schemas(
            notes_api::presentation::http::auth::RegisterRequest,
            notes_api::presentation::http::auth::LoginRequest,
            notes_api::presentation::http::auth::LoginResponse,
            notes_api::presentation::http::auth::UserResponse,
            notes_api::presentation::http::graphql::GraphqlRequest,
            notes_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "GraphQL", description = "GraphQL endpoint"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "notes_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(port = cfg.api_port, auth_mode = ?cfg.auth_mode, production = cfg.is_production, "Starting notes API");

    // Database
    let pool =
        notes_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.database_max_connections)
            .await?;
    notes_api::infrastructure::db::migrate(&pool).await?;

    let session_repo = Arc::new(SqlxSessionRepository::new(pool.clone()));
    let services = AppServices::new(
        Arc::new(SqlxUserRepository::new(pool.clone())),
        Arc::new(SqlxNoteRepository::new(pool.clone())),
        Arc::new(SqlxTagRepository::new(pool.clone())),
        Arc::new(SqlxTaggingRepository::new(pool.clone())),
        session_repo.clone(),
        Arc::new(JwtTokenCodec::new(
            cfg.jwt_secret_pem.clone(),
            cfg.jwt_expires_secs,
        )),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let api_router = Router::new()
        .nest("/api", notes_api::presentation::http::api_routes(ctx.clone()))
        .nest(
            "/api",
            notes_api::presentation::http::health::routes(pool.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, api_router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    });

    // Expired sessions only accumulate in session mode
    let purge_handle: Option<JoinHandle<()>> = if cfg.auth_mode == AuthMode::Session {
        Some(tokio::spawn(async move {
            use notes_api::application::ports::session_repository::SessionRepository;
            loop {
                match session_repo.purge_expired().await {
                    Ok(0) => {}
                    Ok(n) => tracing::debug!(removed = n, "expired_sessions_purged"),
                    Err(e) => tracing::error!(error = ?e, "session_purge_failed"),
                }
                sleep(SESSION_PURGE_INTERVAL).await;
            }
        }))
    } else {
        None
    };

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }
    if let Some(handle) = purge_handle {
        handle.abort();
    }
    info!("Shutdown complete");
    Ok(())
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // In production FRONTEND_URL is validated at startup; deny anything else
        _ if cfg.is_production => {
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        // Development convenience
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "shutdown_signal_failed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
