//! HttpPromptDispatcher -- concrete [`PromptBackend`] over HTTP.
//!
//! Both call shapes go to `POST {base_url}/api/prompt` with a JSON body.
//! Failures are sorted into the three [`DispatchError`] kinds; nothing is
//! retried.

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use parley_core::backend::provider::PromptBackend;
use parley_types::chat::SessionId;
use parley_types::config::ClientConfig;
use parley_types::error::DispatchError;
use parley_types::profile::Profile;
use parley_types::prompt::{BootstrapReply, FollowUpReply};

use super::types::{PromptRequest, PromptResponse};

/// Conversation backend reached over HTTP.
pub struct HttpPromptDispatcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPromptDispatcher {
    /// Path of the single backend endpoint.
    pub const PROMPT_PATH: &'static str = "/api/prompt";

    /// Create a dispatcher for the backend described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DispatchError::NetworkFailure(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                Self::PROMPT_PATH
            ),
        })
    }

    /// Full URL every call is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &PromptRequest) -> Result<PromptResponse, DispatchError> {
        let kind = request.kind();
        let started = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DispatchError::NetworkFailure(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        debug!(
            call = kind,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "prompt endpoint responded"
        );

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(call = kind, error = %e, "failed to read error response body");
                    String::new()
                }
            };
            warn!(call = kind, status = status.as_u16(), "prompt endpoint returned an error status");
            return Err(DispatchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            DispatchError::NetworkFailure(format!("failed to read response body: {e}"))
        })?;

        serde_json::from_str(&body)
            .map_err(|e| DispatchError::Protocol(format!("failed to parse response: {e}")))
    }
}

// HttpPromptDispatcher does not derive Debug; reqwest::Client output is noise.

impl PromptBackend for HttpPromptDispatcher {
    async fn bootstrap(&self, profile: &Profile) -> Result<BootstrapReply, DispatchError> {
        let response = self.post(&PromptRequest::bootstrap(profile)).await?;

        let session_id = response
            .session_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                DispatchError::Protocol("bootstrap response is missing sessionId".to_string())
            })?;

        Ok(BootstrapReply {
            message: response.message,
            session_id: SessionId::new(session_id),
        })
    }

    async fn follow_up(
        &self,
        session_id: &SessionId,
        prompt: &str,
    ) -> Result<FollowUpReply, DispatchError> {
        let response = self
            .post(&PromptRequest::follow_up(session_id, prompt))
            .await?;

        Ok(FollowUpReply {
            message: response.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Backend that records each request and answers with `reply`.
    fn recording_router(seen: Seen, reply: Value) -> Router {
        Router::new().route(
            "/api/prompt",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen.clone();
                let reply = reply.clone();
                async move {
                    let content_type = headers
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.lock().unwrap().push((content_type, body));
                    Json(reply)
                }
            }),
        )
    }

    fn dispatcher(base_url: &str) -> HttpPromptDispatcher {
        let config = ClientConfig::default().with_base_url(base_url);
        HttpPromptDispatcher::new(&config).unwrap()
    }

    fn profile() -> Profile {
        Profile::new(52, "gardening", "").unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = ClientConfig {
            base_url: "https://chat.example.com/".to_string(),
            request_timeout_secs: 5,
        };
        let dispatcher = HttpPromptDispatcher::new(&config).unwrap();
        assert_eq!(dispatcher.endpoint(), "https://chat.example.com/api/prompt");
    }

    #[tokio::test]
    async fn test_bootstrap_round_trip() {
        let seen = Seen::default();
        let base = spawn_backend(recording_router(
            seen.clone(),
            json!({"message": "Hello gardener", "sessionId": "abc"}),
        ))
        .await;

        let reply = dispatcher(&base).bootstrap(&profile()).await.unwrap();
        assert_eq!(reply.message, "Hello gardener");
        assert_eq!(reply.session_id, SessionId::new("abc"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("application/json"));
        assert_eq!(
            seen[0].1,
            json!({"firstPost": true, "age": 52, "hobby": "gardening", "other": ""})
        );
    }

    #[tokio::test]
    async fn test_follow_up_round_trip() {
        let seen = Seen::default();
        let base = spawn_backend(recording_router(seen.clone(), json!({"message": "* water daily"})))
            .await;

        let reply = dispatcher(&base)
            .follow_up(&SessionId::new("abc"), "tips?")
            .await
            .unwrap();
        assert_eq!(reply.message, "* water daily");
        assert_eq!(
            seen.lock().unwrap()[0].1,
            json!({"firstPost": false, "prompt": "tips?", "sessionId": "abc"})
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let router = Router::new().route(
            "/api/prompt",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let base = spawn_backend(router).await;

        let err = dispatcher(&base)
            .follow_up(&SessionId::new("abc"), "hi")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::Http {
                status: 500,
                body: "model crashed".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 64\r\n\r\npartial")
                .await
                .unwrap();
        });

        let err = dispatcher(&format!("http://{addr}"))
            .follow_up(&SessionId::new("abc"), "hi")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::Http {
                status: 502,
                body: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_protocol_error() {
        let router = Router::new().route("/api/prompt", post(|| async { "definitely not json" }));
        let base = spawn_backend(router).await;

        let err = dispatcher(&base)
            .follow_up(&SessionId::new("abc"), "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Protocol(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_missing_message_is_protocol_error() {
        let base = spawn_backend(recording_router(Seen::default(), json!({"sessionId": "abc"})))
            .await;

        let err = dispatcher(&base).bootstrap(&profile()).await.unwrap_err();
        assert!(matches!(err, DispatchError::Protocol(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_bootstrap_without_session_id_is_protocol_error() {
        let base = spawn_backend(recording_router(Seen::default(), json!({"message": "hi"}))).await;

        let err = dispatcher(&base).bootstrap(&profile()).await.unwrap_err();
        assert_eq!(
            err,
            DispatchError::Protocol("bootstrap response is missing sessionId".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = dispatcher(&format!("http://{addr}"))
            .bootstrap(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::NetworkFailure(_)), "got {err:?}");
    }
}
