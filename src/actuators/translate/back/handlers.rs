use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::IgnoredAny;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use super::RelayState;
use crate::{
    actuators::translate::dto::TranslateRequest,
    infer::{ApiError, GenerateContentRequest, ParseError, parsing},
    service::{self, CoercibleResult, UPSTREAM_FALLBACK_MESSAGE},
};

pub const RELAY_PATH: &str = "/api/translate";

pub fn build_router(state: Arc<RelayState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    Router::new()
        .route("/health", get(health_check))
        .route(
            RELAY_PATH,
            post(translate_handler).fallback(method_not_allowed),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn method_not_allowed(method: Method) -> service::Error {
    service::Error::MethodNotAllowed {
        method,
        allowed: Box::new([Method::POST]),
    }
}

pub async fn translate_handler(
    State(state): State<Arc<RelayState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> service::Result<Response> {
    let Json(request) =
        payload.map_err(|rejection| service::Error::BadRequest(rejection.body_text().into()))?;

    let Some(credential) = state.credentials.credential() else {
        error!("API key is not configured.");
        return Err(service::Error::Misconfigured);
    };

    let upstream_request = GenerateContentRequest::new(
        request.user_query.as_deref(),
        request.system_prompt.as_deref(),
    );

    let reply = match state.generator.generate(&credential, &upstream_request).await {
        Ok(reply) => reply,
        Err(err) => {
            error!("Generation request failed: {}", err);
            return Err(service::Error::Internal(err.into()));
        }
    };

    if !reply.is_success() {
        let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let message = parsing::error_message(&reply.body)
            .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.into());
        warn!(status = reply.status, "Generation API error: {}", message);
        return Err(service::Error::UpstreamStatus { status, message });
    }

    // Success bodies are relayed as-is; only their syntax is checked
    serde_json::from_str::<IgnoredAny>(&reply.body)
        .map_err(|err| {
            error!("Generation API returned a success body that is not JSON: {}", err);
            ApiError::from(ParseError::InvalidJson(err))
        })
        .into_service_result()?;

    info!("Relayed generation of {} bytes", reply.body.len());
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        String::from(reply.body),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::actuators::translate::back::{
        Credential, CredentialSource, EnvCredential, StaticCredential,
    };
    use crate::infer::{GeminiClient, Generator, UpstreamReply};

    struct StubGenerator {
        status: u16,
        body: &'static str,
        calls: AtomicUsize,
        seen: Mutex<Option<(String, GenerateContentRequest)>>,
    }

    impl StubGenerator {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Generator for StubGenerator {
        async fn generate(
            &self,
            credential: &Credential,
            request: &GenerateContentRequest,
        ) -> Result<UpstreamReply, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = Some((credential.expose().to_owned(), request.clone()));
            Ok(UpstreamReply {
                status: self.status,
                body: self.body.into(),
            })
        }
    }

    fn app(credentials: Arc<dyn CredentialSource>, generator: Arc<StubGenerator>) -> Router {
        build_router(Arc::new(RelayState {
            credentials,
            generator,
        }))
    }

    fn keyed_app(generator: Arc<StubGenerator>) -> Router {
        app(Arc::new(StaticCredential::new(Some("test-key"))), generator)
    }

    fn post_translate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(RELAY_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn translate_body() -> String {
        json!({ "userQuery": "User's raw thought: \"meetings\"", "systemPrompt": "decode it" })
            .to_string()
    }

    async fn read_body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    mod method_check {
        use super::*;

        #[tokio::test]
        async fn get_is_rejected_with_allow_header() {
            let generator = StubGenerator::new(200, "{}");
            let response = keyed_app(generator.clone())
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri(RELAY_PATH)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            let allow = response.headers()[header::ALLOW].to_str().unwrap().to_owned();
            assert!(allow.contains("POST"), "Allow was {allow}");
            let body: Value = serde_json::from_str(&read_body(response).await).unwrap();
            assert_eq!(body["error"], "Method GET Not Allowed");
            assert_eq!(generator.calls(), 0);
        }

        #[tokio::test]
        async fn health_check_reports_ok() {
            let response = keyed_app(StubGenerator::new(200, "{}"))
                .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(read_body(response).await, r#"{"status":"ok"}"#);
        }
    }

    mod configuration {
        use super::*;

        #[tokio::test]
        async fn missing_credential_fails_without_upstream_call() {
            let generator = StubGenerator::new(200, "{}");
            let response = app(Arc::new(StaticCredential::new(None)), generator.clone())
                .oneshot(post_translate(&translate_body()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body: Value = serde_json::from_str(&read_body(response).await).unwrap();
            assert_eq!(body["error"], "API key is not configured.");
            assert_eq!(generator.calls(), 0);
        }

        #[tokio::test]
        async fn unset_environment_variable_counts_as_missing() {
            let generator = StubGenerator::new(200, "{}");
            let response = app(
                Arc::new(EnvCredential::new("THOUGHT_TRANSLATOR_TEST_UNSET_KEY")),
                generator.clone(),
            )
            .oneshot(post_translate(&translate_body()))
            .await
            .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(generator.calls(), 0);
        }
    }

    mod relaying {
        use super::*;

        const GENERATION: &str = r#"{"candidates":[{"content":{"parts":[{"text":"Hello"}],"role":"model"},"finishReason":"STOP"}],"modelVersion":"gemini-test"}"#;

        #[tokio::test]
        async fn success_body_is_relayed_unmodified() {
            let generator = StubGenerator::new(200, GENERATION);
            let response = keyed_app(generator.clone())
                .oneshot(post_translate(&translate_body()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json"
            );
            assert_eq!(read_body(response).await, GENERATION);
            assert_eq!(generator.calls(), 1);
        }

        #[tokio::test]
        async fn forwards_prompts_and_credential_once() {
            let generator = StubGenerator::new(200, GENERATION);
            keyed_app(generator.clone())
                .oneshot(post_translate(&translate_body()))
                .await
                .unwrap();

            let (key, request) = generator.seen.lock().unwrap().take().unwrap();
            assert_eq!(key, "test-key");
            assert_eq!(
                serde_json::to_value(&request).unwrap(),
                json!({
                    "contents": [{ "parts": [{ "text": "User's raw thought: \"meetings\"" }] }],
                    "systemInstruction": { "parts": [{ "text": "decode it" }] },
                })
            );
            assert_eq!(generator.calls(), 1);
        }

        #[tokio::test]
        async fn absent_fields_are_passed_through() {
            let generator = StubGenerator::new(200, GENERATION);
            let response = keyed_app(generator.clone())
                .oneshot(post_translate("{}"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let (_, request) = generator.seen.lock().unwrap().take().unwrap();
            assert!(request.contents[0].parts[0].text.is_none());
        }

        #[tokio::test]
        async fn upstream_status_and_message_are_passed_through() {
            let generator = StubGenerator::new(
                429,
                r#"{ "error": { "code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" } }"#,
            );
            let response = keyed_app(generator)
                .oneshot(post_translate(&translate_body()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
            assert!(read_body(response).await.contains("quota exceeded"));
        }

        #[tokio::test]
        async fn unstructured_upstream_error_keeps_status() {
            let generator = StubGenerator::new(503, "Service Unavailable");
            let response = keyed_app(generator)
                .oneshot(post_translate(&translate_body()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
            let body: Value = serde_json::from_str(&read_body(response).await).unwrap();
            assert_eq!(body["error"], UPSTREAM_FALLBACK_MESSAGE);
        }

        #[tokio::test]
        async fn transport_failure_is_a_generic_server_error() {
            // Nothing listens on a port once its listener is dropped
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let router = build_router(Arc::new(RelayState {
                credentials: Arc::new(StaticCredential::new(Some("test-key"))),
                generator: Arc::new(GeminiClient::new(&format!("http://{addr}"), "test-model")),
            }));
            let response = router
                .oneshot(post_translate(&translate_body()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = read_body(response).await;
            assert_eq!(body, r#"{"error":"Internal server error."}"#);
            assert!(!body.contains("test-key"));
        }

        #[tokio::test]
        async fn any_json_success_body_is_relayed() {
            for body in [
                r#"{"candidates":null}"#,
                r#"{"candidates":[{"content":{"parts":[{"text":5}]}}]}"#,
                "[]",
            ] {
                let generator = StubGenerator::new(200, body);
                let response = keyed_app(generator)
                    .oneshot(post_translate(&translate_body()))
                    .await
                    .unwrap();

                assert_eq!(response.status(), StatusCode::OK, "body {body}");
                assert_eq!(read_body(response).await, body);
            }
        }

        #[tokio::test]
        async fn non_json_success_body_is_a_generic_server_error() {
            let generator = StubGenerator::new(200, "<html>oops</html>");
            let response = keyed_app(generator)
                .oneshot(post_translate(&translate_body()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }

        #[tokio::test]
        async fn undecodable_body_is_a_bad_request() {
            let generator = StubGenerator::new(200, GENERATION);
            let response = keyed_app(generator.clone())
                .oneshot(post_translate("not json"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body: Value = serde_json::from_str(&read_body(response).await).unwrap();
            assert!(body["error"].as_str().unwrap().starts_with("Bad Request"));
            assert_eq!(generator.calls(), 0);
        }
    }
}
