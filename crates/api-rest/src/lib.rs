//! # API REST
//!
//! REST relay implementation for PDF Chat.
//!
//! Handles:
//! - HTTP endpoints with axum (`/api/upload`, `/api/chat`, `/health`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (multipart parsing, JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for the wire types and `pdfchat-core` for the relays themselves.

#![warn(rust_2018_idioms)]

use api_shared::{
    ChatReq, ChatRes, ErrorRes, HealthRes, HealthService, UploadRes, CHAT_PATH, HEALTH_PATH,
    UPLOAD_FIELD, UPLOAD_PATH,
};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use pdfchat_core::{
    config::{api_key_from_env_value, base_url_from_env_value},
    constants::{
        MSG_CHAT_FAILED, MSG_MISSING_PARAMS, MSG_NO_FILE, MSG_UPLOAD_FAILED, MSG_UPLOAD_OK,
    },
    CoreConfig, RelayError, RelayService, UploadFile,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Default listen address of the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across REST API handlers
///
/// Holds the relay service, which owns the configured document-service client.
#[derive(Clone, Debug)]
pub struct AppState {
    relay: RelayService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            relay: RelayService::new(cfg),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, upload, chat),
    components(schemas(HealthRes, UploadRes, ChatReq, ChatRes, ErrorRes))
)]
pub struct ApiDoc;

/// Resolve the core configuration from the process environment.
///
/// # Environment Variables
/// - `CHATPDF_API_KEY`: document-service key (required)
/// - `CHATPDF_BASE_URL`: document-service base URL (default: `https://api.chatpdf.com/v1`)
///
/// # Errors
/// Returns an error if the API key is missing or the resulting configuration is invalid.
pub fn config_from_env() -> anyhow::Result<CoreConfig> {
    let api_key = api_key_from_env_value(std::env::var("CHATPDF_API_KEY").ok())?;
    let base_url = base_url_from_env_value(std::env::var("CHATPDF_BASE_URL").ok());
    Ok(CoreConfig::new(api_key, base_url)?)
}

/// Build the relay router with documentation, CORS and no request body limit.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(UPLOAD_PATH, post(upload))
        .route(CHAT_PATH, post(chat))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::disable()),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the liveness of the relay server; the document service is not contacted.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "PDF file under the `pdf` field"
    ),
    responses(
        (status = 200, description = "PDF accepted by the document service", body = UploadRes),
        (status = 400, description = "No file uploaded", body = ErrorRes),
        (status = 500, description = "Document service failure", body = ErrorRes)
    )
)]
/// Relay an uploaded PDF to the document service
///
/// Reads the `pdf` multipart field and forwards it with its original file name and content
/// type. A body that is not multipart, or a form without `pdf`, counts as "no file".
///
/// # Returns
/// * `Ok(Json<UploadRes>)` - The service-issued `sourceId`
/// * `Err((StatusCode, Json<ErrorRes>))` - `400` without a file, `500` on any downstream failure
#[axum::debug_handler]
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadRes>, ApiError> {
    let file = match multipart {
        Ok(mut multipart) => match read_upload(&mut multipart).await {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Unreadable multipart body: {:?}", e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Upload is not multipart: {:?}", e);
            None
        }
    };

    match state.relay.upload(file).await {
        Ok(source_id) => Ok(Json(UploadRes {
            source_id: source_id.to_string(),
            message: MSG_UPLOAD_OK.into(),
        })),
        Err(e) => Err(relay_failure(e, MSG_NO_FILE, MSG_UPLOAD_FAILED)),
    }
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Reply from the document service", body = ChatRes),
        (status = 400, description = "Missing message or sourceId", body = ErrorRes),
        (status = 500, description = "Document service failure", body = ErrorRes)
    )
)]
/// Relay one chat turn to the document service
///
/// # Returns
/// * `Ok(Json<ChatRes>)` - Only the reply content
/// * `Err((StatusCode, Json<ErrorRes>))` - `400` for a missing or empty field (or a body that
///   is not JSON), `500` on any downstream failure
#[axum::debug_handler]
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatReq>, JsonRejection>,
) -> Result<Json<ChatRes>, ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            tracing::warn!("Rejected chat body: {:?}", e);
            return Err(bad_request(MSG_MISSING_PARAMS));
        }
    };

    match state.relay.chat(&req.message, &req.source_id).await {
        Ok(reply) => Ok(Json(ChatRes { reply })),
        Err(e) => Err(relay_failure(e, MSG_MISSING_PARAMS, MSG_CHAT_FAILED)),
    }
}

// Takes the first `pdf` field; other fields are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;
        return Ok(Some(UploadFile {
            field_name: UPLOAD_FIELD.to_string(),
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn bad_request(message: &'static str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorRes::new(message)))
}

fn relay_failure(e: RelayError, missing: &'static str, failed: &'static str) -> ApiError {
    if e.is_client_error() {
        tracing::warn!("Relay rejected request: {}", e);
        return bad_request(missing);
    }
    tracing::error!("Relay error: {:?}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorRes::new(failed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "pdfchat-test-boundary";

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn downstream() -> Router {
        Router::new()
            .route(
                "/sources/add-file",
                post(|mut multipart: Multipart| async move {
                    let field = multipart.next_field().await.unwrap().unwrap();
                    let name = field.file_name().unwrap_or_default().to_string();
                    Json(json!({ "sourceId": format!("src_{}", name) }))
                }),
            )
            .route(
                "/chats/message",
                post(|Json(body): Json<Value>| async move {
                    let content = format!(
                        "{} says {}",
                        body["sourceId"].as_str().unwrap(),
                        body["messages"][0]["content"].as_str().unwrap()
                    );
                    Json(json!({ "content": content, "references": [] }))
                }),
            )
    }

    fn failing_downstream() -> Router {
        let fail = || async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "stack trace: secret internal detail",
            )
        };
        Router::new()
            .route("/sources/add-file", post(fail))
            .route("/chats/message", post(fail))
    }

    async fn app_with(downstream: Router) -> Router {
        let base = spawn(downstream).await;
        let cfg = CoreConfig::new("test-key".into(), base).unwrap();
        router(AppState::new(Arc::new(cfg)))
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file_name, bytes) in parts {
            let disposition = match file_name {
                Some(file_name) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n",
                    name, file_name
                ),
                None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", name),
            };
            body.extend_from_slice(format!("--{}\r\n{}\r\n", BOUNDARY, disposition).as_bytes());
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::post(UPLOAD_PATH)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::post(CHAT_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_alive() {
        let app = app_with(downstream()).await;
        let request = Request::get(HEALTH_PATH).body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn upload_returns_source_id_and_message() {
        let app = app_with(downstream()).await;
        let request = multipart_request(&[("pdf", Some("paper.pdf"), &b"%PDF-1.7"[..])]);
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sourceId"], "src_paper.pdf");
        assert_eq!(body["message"], MSG_UPLOAD_OK);
    }

    #[tokio::test]
    async fn upload_form_without_pdf_field_is_400() {
        let app = app_with(downstream()).await;
        let request = multipart_request(&[("note", None, &b"hello"[..])]);
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_NO_FILE);
    }

    #[tokio::test]
    async fn upload_empty_form_is_400() {
        let app = app_with(downstream()).await;
        let (status, body) = send(app, multipart_request(&[])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_NO_FILE);
    }

    #[tokio::test]
    async fn upload_non_multipart_body_is_400() {
        let app = app_with(downstream()).await;
        let request = Request::post(UPLOAD_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MSG_NO_FILE);
    }

    #[tokio::test]
    async fn uploaded_source_id_is_accepted_by_chat() {
        let app = app_with(downstream()).await;
        let request = multipart_request(&[("pdf", Some("a.pdf"), &b"%PDF"[..])]);
        let (_, uploaded) = send(app.clone(), request).await;
        let source_id = uploaded["sourceId"].as_str().unwrap();

        let body = json!({ "message": "hello", "sourceId": source_id }).to_string();
        let (status, reply) = send(app, chat_request(&body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply, json!({ "reply": "src_a.pdf says hello" }));
    }

    #[tokio::test]
    async fn chat_missing_or_empty_fields_are_400() {
        let app = app_with(downstream()).await;
        for body in [
            r#"{"message":"","sourceId":"src"}"#,
            r#"{"message":"hi"}"#,
            r#"{"sourceId":"src"}"#,
            "{}",
            "not json",
        ] {
            let (status, reply) = send(app.clone(), chat_request(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(reply["error"], MSG_MISSING_PARAMS);
        }
    }

    #[tokio::test]
    async fn downstream_failure_is_generic_500() {
        let app = app_with(failing_downstream()).await;

        let body = r#"{"message":"hi","sourceId":"src"}"#;
        let (status, reply) = send(app.clone(), chat_request(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply, json!({ "error": MSG_CHAT_FAILED }));

        let request = multipart_request(&[("pdf", Some("a.pdf"), &b"%PDF"[..])]);
        let (status, reply) = send(app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply, json!({ "error": MSG_UPLOAD_FAILED }));
        assert!(!reply.to_string().contains("secret"));
    }

    #[test]
    fn openapi_lists_relay_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/upload"));
        assert!(doc.paths.paths.contains_key("/api/chat"));
    }
}
