//! Outbound chat relay.
//!
//! The dashboard's chat panel talks to a third-party chat-completion API
//! through this same-origin relay. The relay is deliberately minimal: one
//! forwarding call, the caller's `Authorization` header passed through
//! verbatim, the upstream JSON body and status returned unchanged. No
//! retries, no queueing, no protocol translation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    /// Speaker role ("system", "user", or "assistant").
    pub role: String,
    pub content: String,
}

/// Request body accepted by `POST /api/chat` and forwarded upstream.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReq {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Outcome of one relay attempt.
///
/// `Upstream` carries whatever the upstream returned, success or failure,
/// with its original status code. `Unreachable` means the request itself
/// failed (DNS, connect, timeout) and no upstream status exists.
#[derive(Debug)]
pub enum RelayOutcome {
    Upstream {
        status: u16,
        body: serde_json::Value,
    },
    Unreachable {
        error: reqwest::Error,
    },
}

/// Relay client bound to one upstream endpoint.
#[derive(Debug, Clone)]
pub struct ChatRelay {
    client: reqwest::Client,
    upstream_url: String,
}

impl ChatRelay {
    /// Creates a relay targeting `upstream_url`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the HTTP client cannot be
    /// built.
    pub fn new(upstream_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            upstream_url,
        })
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Forwards one chat request upstream.
    ///
    /// The `Authorization` header value, when present, is attached
    /// byte-for-byte as received; the relay never inspects or logs it. A
    /// non-JSON upstream body is wrapped in a `{message, error}` envelope but
    /// keeps the upstream status.
    pub async fn forward(&self, authorization: Option<&[u8]>, req: &ChatReq) -> RelayOutcome {
        let mut request = self.client.post(&self.upstream_url).json(req);
        if let Some(value) = authorization {
            // The bytes came out of a parsed header, so they are valid here.
            if let Ok(value) = reqwest::header::HeaderValue::from_bytes(value) {
                request = request.header(reqwest::header::AUTHORIZATION, value);
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => return RelayOutcome::Unreachable { error },
        };

        let status = response.status().as_u16();
        let body = match response.json::<serde_json::Value>().await {
            Ok(body) => body,
            Err(error) => serde_json::json!({
                "message": "upstream returned a non-JSON body",
                "error": error.to_string(),
            }),
        };

        RelayOutcome::Upstream { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forward_accepts_non_ascii_authorization_bytes() {
        // Header values may carry opaque non-ASCII bytes; they must be
        // attached, not dropped. The upstream is unreachable, so the attempt
        // failing at the transport layer means the header was accepted.
        let relay =
            ChatRelay::new("http://127.0.0.1:9/unreachable".into()).expect("client builds");
        let req = ChatReq {
            model: "test".into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
        };
        let outcome = relay.forward(Some(b"Bearer k\xc3\xa9y"), &req).await;
        assert!(matches!(outcome, RelayOutcome::Unreachable { .. }));
    }
}
