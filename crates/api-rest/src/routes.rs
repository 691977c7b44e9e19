//! HTTP routes for the VHD REST API.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use vhd_core::{AssessmentError, AssessmentService, RawDeviceRecord};

use crate::relay::{ChatRelay, ChatReq, RelayOutcome};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub assessments: Arc<AssessmentService>,
    pub relay: Arc<ChatRelay>,
}

impl AppState {
    pub fn new(assessments: AssessmentService, relay: ChatRelay) -> Self {
        Self {
            assessments: Arc::new(assessments),
            relay: Arc::new(relay),
        }
    }
}

/// Health check response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, chat_relay, chat_relay_hint, create_assessment),
    components(schemas(HealthRes, ChatReq, crate::relay::ChatMessage))
)]
struct ApiDoc;

/// Builds the REST router with all routes, documentation, and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/chat", post(chat_relay).get(chat_relay_hint))
        .route("/assessments", post(create_assessment))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the VHD service. Used for
/// monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "VHD API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Upstream chat completion, returned unchanged"),
        (status = 500, description = "Relay could not reach the upstream endpoint")
    )
)]
/// Forward a chat request to the upstream chat-completion endpoint
///
/// The request body and the caller's `Authorization` header are forwarded
/// verbatim; the upstream JSON body comes back unchanged with the upstream
/// status code. Failures are reported once, as `{message, error}`, and are
/// never retried automatically.
#[axum::debug_handler]
async fn chat_relay(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChatReq>,
) -> (StatusCode, Json<serde_json::Value>) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .map(|value| value.as_bytes());

    match state.relay.forward(authorization, &req).await {
        RelayOutcome::Upstream { status, body } => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(body))
        }
        RelayOutcome::Unreachable { error } => {
            tracing::error!("chat relay error: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "failed to reach the upstream chat endpoint",
                    "error": error.to_string(),
                })),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/chat",
    responses(
        (status = 405, description = "The relay accepts POST only")
    )
)]
/// Method hint for the chat relay
///
/// Browsing to the relay URL returns a JSON hint rather than an empty 405.
#[axum::debug_handler]
async fn chat_relay_hint(State(_state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({
            "message": "the chat relay accepts POST only",
            "hint": "POST /api/chat with {model, messages}",
        })),
    )
}

#[utoipa::path(
    post,
    path = "/assessments",
    responses(
        (status = 200, description = "Health assessment report"),
        (status = 400, description = "Structurally malformed reading"),
        (status = 500, description = "Internal server error")
    )
)]
/// Run one scoring pass over a posted device record
///
/// Normalises the raw record, classifies each vital sign, evaluates the
/// sub-models, and returns the assembled report. Missing vital signs are
/// reported as explicit no-data results; a malformed record is a 400 with a
/// single descriptive message and no partial report.
#[axum::debug_handler]
async fn create_assessment(
    State(state): State<AppState>,
    Json(record): Json<RawDeviceRecord>,
) -> Result<Json<vhd_core::HealthAssessment>, (StatusCode, Json<serde_json::Value>)> {
    match state.assessments.assess_raw(&record) {
        Ok(assessment) => Ok(Json(assessment)),
        Err(err @ AssessmentError::Structural(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": err.to_string() })),
        )),
        Err(err) => {
            tracing::error!("assessment error: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": "Internal error" })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use vhd_core::CoreConfig;

    fn test_router() -> Router {
        let relay =
            ChatRelay::new("http://127.0.0.1:9/unreachable".into()).expect("client builds");
        router(AppState::new(
            AssessmentService::new(CoreConfig::default()),
            relay,
        ))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn test_get_on_chat_relay_is_405_with_hint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert!(json["hint"].as_str().unwrap().contains("POST"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_reports_relay_error() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"model":"test","messages":[{"role":"user","content":"hi"}]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_relay_route_passes_raw_authorization_bytes() {
        let auth = axum::http::HeaderValue::from_bytes(b"Bearer k\xc3\xa9y").unwrap();
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .header(header::AUTHORIZATION, auth)
                    .body(Body::from(
                        r#"{"model":"test","messages":[{"role":"user","content":"hi"}]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        // The non-ASCII value reaches the relay attempt instead of being
        // stripped; only the unreachable upstream fails the call.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_assessment_route_returns_report() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/assessments")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"bloodPressure":{"systolic":120,"diastolic":80,"pulse":72}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["composite_score"]["score"].is_number());
        assert!(json["basic_vital_signs"]["blood_oxygen"]["status"] == "no_data");
    }

    #[tokio::test]
    async fn test_assessment_route_rejects_partial_block() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/assessments")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"bloodPressure":{"systolic":120}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("diastolic"));
    }
}
