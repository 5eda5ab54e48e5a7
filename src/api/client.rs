//! HTTP auth client.
//!
//! Thin wrapper over the backend `/auth` endpoints. One request per call, no
//! retry. Pure decoding in `decode_auth_response` for testability.

use std::time::Duration;

use serde::Serialize;

use super::types::{ApiError, AuthApi, AuthEnvelope, AuthPayload, RegisterForm};

/// Shown when the backend rejects a request without supplying a message.
const REJECTION_FALLBACK: &str = "authentication failed";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Builds a client for the backend at `base_url` (e.g.
    /// `http://localhost:4000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_auth<B>(&self, path: &str, body: &B) -> Result<AuthPayload, ApiError>
    where
        B: Serialize + Sync,
    {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_auth_response(status, &text)
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let body = LoginBody { email, password };
        self.post_auth("/auth/login", &body).await
    }

    async fn register(&self, form: &RegisterForm) -> Result<AuthPayload, ApiError> {
        self.post_auth("/auth/register", form).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("/auth/logout"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                "logout rejected".to_string()
            } else {
                body.trim().to_string()
            };
            Err(ApiError::Server { status, message })
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

// =============================================================================
// DECODING
// =============================================================================

/// Maps an HTTP status and body onto the auth payload or a structured error.
///
/// Precedence: 401/403 is a credential rejection regardless of body; any
/// other non-2xx is a server failure (the status wins over a `success` flag);
/// a 2xx envelope with `success=false` is a rejection; a 2xx success without
/// a payload is a malformed response.
fn decode_auth_response(status: u16, body: &str) -> Result<AuthPayload, ApiError> {
    let ok_status = (200..300).contains(&status);

    let envelope: AuthEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(if ok_status {
                ApiError::Parse(e.to_string())
            } else {
                ApiError::Server {
                    status,
                    message: body.trim().to_string(),
                }
            });
        }
    };

    let message = envelope
        .message
        .unwrap_or_else(|| REJECTION_FALLBACK.to_string());

    if status == 401 || status == 403 {
        return Err(ApiError::InvalidCredentials(message));
    }
    if !ok_status {
        return Err(ApiError::Server { status, message });
    }
    if !envelope.success {
        return Err(ApiError::InvalidCredentials(message));
    }

    envelope
        .data
        .ok_or_else(|| ApiError::Parse("success response carried no user payload".to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
