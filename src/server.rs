use crate::catalog::ProjectCatalog;
use crate::config::ServerConfig;
use crate::telemetry::{log_event, LogLevel};
use axum::{
    extract::{Path, Request, State},
    handler::Handler,
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::{
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::services::ServeDir;

const REQUEST_ID_HEADER: &str = "x-request-id";
const FALLBACK_SHELL: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Portfolio</title></head><body><div id=\"app\"></div></body></html>";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone)]
pub struct AppState {
    catalog: ProjectCatalog,
    index_html: Arc<str>,
    log_level: LogLevel,
}

impl AppState {
    pub fn new(catalog: ProjectCatalog, index_html: impl Into<Arc<str>>, log_level: LogLevel) -> Self {
        Self {
            catalog,
            index_html: index_html.into(),
            log_level,
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let catalog = ProjectCatalog::bundled()?;

    let index_path = config.index_path();
    let index_html = match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => html,
        Err(error) => {
            log_event(
                config.log_level,
                LogLevel::Warn,
                "index_shell_unavailable",
                serde_json::json!({
                    "path": index_path.display().to_string(),
                    "error": error.to_string(),
                }),
            );
            FALLBACK_SHELL.to_string()
        }
    };

    let project_count = catalog.len();
    let state = AppState::new(catalog, index_html, config.log_level);
    let app = router(state, &config);

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        config.log_level,
        LogLevel::Info,
        "server_listening",
        serde_json::json!({
            "address": bind_address,
            "dist_dir": config.dist_dir.display().to_string(),
            "projects": project_count,
        }),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let shell = unknown_path.with_state(state.clone());
    let static_files = ServeDir::new(&config.dist_dir).not_found_service(shell);

    Router::new()
        .route("/projects/{slug}", get(project_page))
        .route("/projects/{slug}/", get(project_page))
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(state.clone(), request_context))
        .with_state(state)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

// Unknown slugs get the same shell with a 404 so the client renders its not-found view.
async fn project_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.catalog.find(&slug) {
        Ok(_) => shell_response(&state, StatusCode::OK),
        Err(error) => {
            log_event(
                state.log_level,
                LogLevel::Info,
                "project_not_found",
                serde_json::json!({ "slug": slug, "reason": error.to_string() }),
            );
            shell_response(&state, StatusCode::NOT_FOUND)
        }
    }
}

async fn unknown_path(State(state): State<AppState>) -> Response {
    shell_response(&state, StatusCode::NOT_FOUND)
}

fn shell_response(state: &AppState, status: StatusCode) -> Response {
    (status, Html(state.index_html.to_string())).into_response()
}

async fn request_context(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();

    let response = with_request_id(next.run(request).await, &request_id);

    log_event(
        state.log_level,
        LogLevel::Info,
        "request_complete",
        serde_json::json!({
            "request_id": request_id,
            "method": method,
            "path": path,
            "status": response.status().as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis() as u64,
        }),
    );
    response
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    const SHELL: &str = "<html><body><div id=\"app\"></div></body></html>";

    fn test_state() -> AppState {
        AppState::new(
            ProjectCatalog::bundled().expect("bundled table parses"),
            SHELL,
            LogLevel::Warn,
        )
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn known_project_serves_shell_with_ok() {
        let response = project_page(State(test_state()), Path("logiro".to_string())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, SHELL);
    }

    #[tokio::test]
    async fn unknown_project_serves_shell_with_not_found() {
        let response = project_page(State(test_state()), Path("missing".to_string())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, SHELL);
    }

    #[tokio::test]
    async fn slug_lookup_is_case_sensitive() {
        let response = project_page(State(test_state()), Path("Logiro".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_paths_get_not_found_shell() {
        let response = unknown_path(State(test_state())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").and_then(|value| value.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
    }

    #[test]
    fn incoming_request_id_is_echoed() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  abc-123 "));

        assert_eq!(resolve_request_id(&headers), "abc-123");
    }

    #[test]
    fn missing_request_id_is_generated_uniquely() {
        let headers = HeaderMap::new();
        let first = resolve_request_id(&headers);
        let second = resolve_request_id(&headers);

        assert!(first.starts_with("req-"));
        assert_ne!(first, second);
    }

    #[test]
    fn request_id_header_is_attached_to_response() {
        let response = with_request_id(StatusCode::OK.into_response(), "req-1");
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).and_then(|value| value.to_str().ok()),
            Some("req-1")
        );
    }

    fn test_router() -> Router {
        let config = ServerConfig {
            dist_dir: std::env::temp_dir().join("portfolio-showcase-missing-dist"),
            ..ServerConfig::default()
        };
        router(test_state(), &config)
    }

    async fn send(uri: &str, request_id: Option<&str>) -> Response {
        let mut request = axum::http::Request::builder().uri(uri);
        if let Some(request_id) = request_id {
            request = request.header(REQUEST_ID_HEADER, request_id);
        }
        test_router()
            .oneshot(request.body(Body::empty()).expect("request builds"))
            .await
            .expect("router is infallible")
    }

    fn response_request_id(response: &Response) -> Option<String> {
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    }

    #[tokio::test]
    async fn routed_known_project_is_ok_and_echoes_request_id() {
        let response = send("/projects/logiro", Some("trace-42")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_request_id(&response).as_deref(), Some("trace-42"));
        assert_eq!(body_text(response).await, SHELL);
    }

    #[tokio::test]
    async fn routed_project_accepts_trailing_slash() {
        let response = send("/projects/logiro/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send("/projects/missing/", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn routed_unknown_project_is_not_found_with_generated_request_id() {
        let response = send("/projects/missing", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let request_id = response_request_id(&response).expect("request id attached");
        assert!(request_id.starts_with("req-"));
        assert_eq!(body_text(response).await, SHELL);
    }

    #[tokio::test]
    async fn routed_unknown_path_falls_back_to_not_found_shell() {
        let response = send("/no/such/page", Some("trace-7")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response_request_id(&response).as_deref(), Some("trace-7"));
        assert_eq!(body_text(response).await, SHELL);
    }
}
