use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::access::Credentials;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::logout::Logout;
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::AuthMode;

pub const SESSION_COOKIE: &str = "session_id";

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 200, body = UserResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, StatusCode> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        name: req.name,
        password: req.password,
    };
    let user = uc.execute(&dto).await.map_err(|e| {
        tracing::debug!(error = ?e, "register_failed");
        StatusCode::CONFLICT
    })?;
    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        name: user.name,
    }))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), StatusCode> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let token = ctx.token_codec().issue(user.id).map_err(|e| {
        tracing::error!(error = ?e, "token_issue_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut headers = HeaderMap::new();
    if ctx.cfg.auth_mode == AuthMode::Session {
        let handle = ctx
            .session_repo()
            .create(user.id, ctx.cfg.session_ttl_secs)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "session_create_failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
        let cookie = build_session_cookie(
            &handle,
            ctx.cfg.session_ttl_secs,
            ctx.cfg.secure_cookies(),
        );
        headers.insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&cookie).unwrap_or(HeaderValue::from_static("")),
        );
    }
    tracing::info!(user_id = %user.id, mode = ?ctx.cfg.auth_mode, "login_succeeded");

    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            user: UserResponse {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        }),
    ))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses((status = 200, body = UserResponse)))]
pub async fn me(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, StatusCode> {
    let viewer = ctx
        .credential_resolver()
        .resolve(&credentials_from_headers(&headers))
        .await;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let row = uc
        .execute(viewer.as_ref())
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(UserResponse {
        id: row.id,
        email: row.email,
        name: row.name,
    }))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", responses((status = 204)))]
pub async fn logout(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<(HeaderMap, StatusCode), StatusCode> {
    let creds = credentials_from_headers(&headers);
    let sessions = ctx.session_repo();
    Logout {
        sessions: sessions.as_ref(),
    }
    .execute(creds.session.as_deref())
    .await
    .map_err(|e| {
        tracing::error!(error = ?e, "session_delete_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut out = HeaderMap::new();
    let cookie = build_session_cookie("", 0, ctx.cfg.secure_cookies());
    out.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).unwrap_or(HeaderValue::from_static("")),
    );
    Ok((out, StatusCode::NO_CONTENT))
}

// --- Credential extraction & cookie helpers ---

/// Raw credentials of a request: the `Authorization` header and the session cookie.
pub fn credentials_from_headers(headers: &HeaderMap) -> Credentials {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let session = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|c| get_cookie(c, SESSION_COOKIE));
    Credentials {
        authorization,
        session,
    }
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_session_cookie(handle: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE,
        handle,
        secure_attr,
        max_age_secs.max(0)
    )
}
