use async_graphql::Variables;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use utoipa::ToSchema;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::graphql::{AppSchema, RequestViewer, build_schema};
use crate::presentation::http::auth::credentials_from_headers;

#[derive(Debug, Deserialize, ToSchema)]
pub struct GraphqlRequest {
    pub query: String,
    /// A JSON object, or a string holding one.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub variables: Option<Value>,
    #[serde(default, rename = "operationName")]
    pub operation_name: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum MalformedInput {
    #[error("Unexpected parameter: {0}")]
    Unexpected(String),
    #[error("variables are not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
}

#[derive(Clone)]
pub struct GraphqlState {
    ctx: AppContext,
    schema: AppSchema,
}

pub fn routes(ctx: AppContext) -> Router {
    let schema = build_schema(ctx.clone());
    Router::new()
        .route("/graphql", post(execute))
        .with_state(GraphqlState { ctx, schema })
}

/// Coerces the `variables` parameter into a map.
///
/// Objects pass through; absent, null and blank strings become empty; other
/// strings are parsed as JSON and coerced again. Anything else is rejected.
pub fn ensure_variables(raw: Option<Value>) -> Result<Map<String, Value>, MalformedInput> {
    match raw {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Map::new()),
        Some(Value::String(s)) => {
            let parsed: Value = serde_json::from_str(&s).map_err(MalformedInput::InvalidJson)?;
            ensure_variables(Some(parsed))
        }
        Some(other) => Err(MalformedInput::Unexpected(other.to_string())),
    }
}

#[utoipa::path(post, path = "/api/graphql", tag = "GraphQL", request_body = GraphqlRequest,
    responses((status = 200, description = "GraphQL response"), (status = 400, description = "Malformed variables")))]
pub async fn execute(
    State(state): State<GraphqlState>,
    headers: HeaderMap,
    Json(body): Json<GraphqlRequest>,
) -> Response {
    let variables = match ensure_variables(body.variables) {
        Ok(v) => v,
        Err(e) => return request_failure(state.ctx.cfg.is_production, &e),
    };
    let viewer = state
        .ctx
        .credential_resolver()
        .resolve(&credentials_from_headers(&headers))
        .await;
    tracing::debug!(
        authenticated = viewer.as_ref().map(|v| v.is_authenticated()).unwrap_or(false),
        operation = body.operation_name.as_deref().unwrap_or(""),
        "graphql_execute"
    );

    let mut request = async_graphql::Request::new(body.query)
        .variables(Variables::from_json(Value::Object(variables)))
        .data(RequestViewer(viewer));
    if let Some(op) = body.operation_name.filter(|s| !s.is_empty()) {
        request = request.operation_name(op);
    }
    Json(state.schema.execute(request).await).into_response()
}

// Development responses carry the error chain; production ones stay generic.
fn request_failure(is_production: bool, err: &MalformedInput) -> Response {
    tracing::warn!(error = %err, "graphql_malformed_input");
    let body = if is_production {
        json!({ "errors": [{ "message": "Malformed request" }], "data": {} })
    } else {
        let chain: Vec<String> =
            std::iter::successors(Some(err as &(dyn std::error::Error + 'static)), |e| e.source())
                .map(|e| e.to_string())
                .collect();
        json!({ "errors": [{ "message": err.to_string(), "backtrace": chain }], "data": {} })
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::application::ports::token_codec::TokenCodec;
    use crate::bootstrap::app_context::AppServices;
    use crate::bootstrap::config::{AuthMode, Config};
    use crate::infrastructure::auth::jwt::JwtTokenCodec;
    use crate::test_support::MemoryStore;

    const SECRET: &str = "graphql-test-secret";

    const TAG_NOTE: &str = r#"mutation($noteId: ID!, $tags: [String!]!) {
        tagNote(input: { noteId: $noteId, tags: $tags }) {
            tags { cursor node { id name } }
        }
    }"#;

    #[test]
    fn variables_accept_objects_and_encoded_objects() {
        assert!(ensure_variables(None).unwrap().is_empty());
        assert!(ensure_variables(Some(Value::Null)).unwrap().is_empty());
        assert!(ensure_variables(Some(json!("  "))).unwrap().is_empty());
        assert_eq!(
            ensure_variables(Some(json!({"a": 1}))).unwrap()["a"],
            json!(1)
        );
        assert_eq!(
            ensure_variables(Some(json!(r#"{"a": "b"}"#))).unwrap()["a"],
            json!("b")
        );
        // doubly encoded
        assert_eq!(
            ensure_variables(Some(json!(r#""{\"a\": 2}""#))).unwrap()["a"],
            json!(2)
        );
    }

    #[test]
    fn variables_reject_other_shapes() {
        assert!(matches!(
            ensure_variables(Some(json!(3))),
            Err(MalformedInput::Unexpected(_))
        ));
        assert!(matches!(
            ensure_variables(Some(json!([1, 2]))),
            Err(MalformedInput::Unexpected(_))
        ));
        assert!(matches!(
            ensure_variables(Some(json!("[1]"))),
            Err(MalformedInput::Unexpected(_))
        ));
        assert!(matches!(
            ensure_variables(Some(json!("{not json"))),
            Err(MalformedInput::InvalidJson(_))
        ));
    }

    struct Harness {
        store: Arc<MemoryStore>,
        router: Router,
        codec: JwtTokenCodec,
    }

    fn harness(mode: AuthMode, is_production: bool) -> Harness {
        let store = Arc::new(MemoryStore::default());
        let mut cfg = Config::from_lookup(|_| None).unwrap();
        cfg.jwt_secret_pem = SECRET.into();
        cfg.auth_mode = mode;
        cfg.is_production = is_production;
        let services = AppServices::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(JwtTokenCodec::new(SECRET, 3600)),
        );
        Harness {
            router: routes(AppContext::new(cfg, services)),
            store,
            codec: JwtTokenCodec::new(SECRET, 3600),
        }
    }

    async fn post(router: &Router, auth: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut req = Request::post("/graphql").header(header::CONTENT_TYPE, "application/json");
        if let Some(a) = auth {
            req = req.header(header::AUTHORIZATION, a);
        }
        let resp = router
            .clone()
            .oneshot(req.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn tag_note_over_http_with_string_variables() {
        let h = harness(AuthMode::Token, false);
        let owner = h.store.add_user("v");
        let work = h.store.add_tag(owner, "work");
        let home = h.store.add_tag(owner, "home");
        let note = h.store.add_note(owner, "N");
        h.store.attach(note, home.id);
        let token = h.codec.issue(owner).unwrap();

        let vars = json!({ "noteId": note.to_string(), "tags": [work.id.to_string(), "nonexistent"] });
        let (status, body) = post(
            &h.router,
            Some(format!("Bearer {token}").as_str()),
            json!({ "query": TAG_NOTE, "variables": vars.to_string() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("errors").is_none(), "{body}");
        let edges = body["data"]["tagNote"]["tags"].as_array().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0]["node"]["name"], json!("work"));
        assert_eq!(edges[0]["node"]["id"], json!(work.id.to_string()));
        assert_eq!(h.store.note_tag_ids(note), vec![work.id]);
    }

    #[tokio::test]
    async fn anonymous_tag_note_is_a_field_error() {
        let h = harness(AuthMode::Token, false);
        let owner = h.store.add_user("v");
        let home = h.store.add_tag(owner, "home");
        let note = h.store.add_note(owner, "N");
        h.store.attach(note, home.id);

        let vars = json!({ "noteId": note.to_string(), "tags": ["work"] });
        for auth in [None, Some("Bearer garbage")] {
            let (status, body) =
                post(&h.router, auth, json!({ "query": TAG_NOTE, "variables": vars.clone() })).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["errors"][0]["message"], json!("This viewer doesn't exist"));
            assert_eq!(body["errors"][0]["extensions"]["code"], json!("UNAUTHORIZED"));
        }
        assert_eq!(h.store.note_tag_ids(note), vec![home.id]);
    }

    #[tokio::test]
    async fn foreign_note_is_not_owned() {
        let h = harness(AuthMode::Token, false);
        let me = h.store.add_user("me");
        let other = h.store.add_user("other");
        let note = h.store.add_note(other, "theirs");
        let token = h.codec.issue(me).unwrap();

        let (_, body) = post(
            &h.router,
            Some(token.as_str()),
            json!({
                "query": TAG_NOTE,
                "variables": { "noteId": note.to_string(), "tags": [] }
            }),
        )
        .await;
        assert_eq!(
            body["errors"][0]["message"],
            json!("This note doesn't belong to the viewer")
        );
        assert_eq!(body["errors"][0]["extensions"]["code"], json!("NOT_OWNED"));
    }

    #[tokio::test]
    async fn viewer_query_reflects_token() {
        let h = harness(AuthMode::Token, false);
        let me = h.store.add_user("me");
        let token = h.codec.issue(me).unwrap();
        let query = json!({ "query": "{ viewer { id isAuthenticated name } }" });

        let (_, body) = post(&h.router, Some(format!("Bearer {token}").as_str()), query.clone()).await;
        assert_eq!(body["data"]["viewer"]["id"], json!(me.to_string()));
        assert_eq!(body["data"]["viewer"]["isAuthenticated"], json!(true));

        let unknown = h.codec.issue(Uuid::new_v4()).unwrap();
        let expired = JwtTokenCodec::new(SECRET, -3600).issue(me).unwrap();
        let forged = JwtTokenCodec::new("not-the-secret", 3600).issue(me).unwrap();
        for token in [unknown, expired, forged, "garbage".to_string()] {
            let (status, body) =
                post(&h.router, Some(format!("Bearer {token}").as_str()), query.clone()).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.get("errors").is_none(), "{body}");
            assert_eq!(body["data"]["viewer"], Value::Null);
        }
    }

    #[tokio::test]
    async fn session_mode_reports_anonymous_viewer() {
        let h = harness(AuthMode::Session, false);
        let (_, body) = post(
            &h.router,
            None,
            json!({ "query": "{ viewer { id isAuthenticated } }" }),
        )
        .await;
        assert_eq!(body["data"]["viewer"]["isAuthenticated"], json!(false));
        assert_eq!(body["data"]["viewer"]["id"], Value::Null);
    }

    #[tokio::test]
    async fn malformed_variables_fail_the_request() {
        let h = harness(AuthMode::Token, false);
        let (status, body) =
            post(&h.router, None, json!({ "query": "{ viewer { id } }", "variables": 7 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["message"], json!("Unexpected parameter: 7"));
        assert!(body["errors"][0]["backtrace"].is_array());
        assert_eq!(body["data"], json!({}));

        let prod = harness(AuthMode::Token, true);
        let (status, body) =
            post(&prod.router, None, json!({ "query": "{ viewer { id } }", "variables": 7 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["message"], json!("Malformed request"));
        assert!(body["errors"][0].get("backtrace").is_none());
    }

    #[derive(Clone, Default)]
    struct WarnCounter(Arc<std::sync::atomic::AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn malformed_input_is_logged_in_every_environment() {
        use tracing_subscriber::layer::SubscriberExt;

        for is_production in [false, true] {
            let counter = WarnCounter::default();
            let subscriber = tracing_subscriber::registry().with(counter.clone());
            let resp = tracing::subscriber::with_default(subscriber, || {
                request_failure(is_production, &MalformedInput::Unexpected("7".into()))
            });
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(counter.0.load(std::sync::atomic::Ordering::SeqCst), 1);
        }
    }
}
