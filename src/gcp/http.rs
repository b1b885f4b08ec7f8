//! HTTP utilities for GCP REST API calls

use super::auth::Authenticator;
use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and masks potentially sensitive patterns
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper that attaches bearer credentials to every request.
///
/// Calls resolve to `None` (rather than an error) when the request was
/// abandoned for authentication reasons: either no token was available, or
/// the server answered 401. In both cases sign-in is triggered exactly once
/// and the caller is expected to retry after the user has signed in.
#[derive(Clone)]
pub struct AuthedClient {
    client: Client,
    auth: Arc<dyn Authenticator>,
}

impl AuthedClient {
    /// Create a new HTTP client around an authenticator
    pub fn new(auth: Arc<dyn Authenticator>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gcdicom/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, auth })
    }

    /// Make an authenticated GET request.
    ///
    /// Caller-supplied `headers` are sent as-is; the Authorization entry is
    /// added on top of them. On 2xx the raw response is handed back with the
    /// body unread. On any other failure status the body text becomes the
    /// error message.
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<Option<Response>> {
        let Some(token) = self.auth.access_token().await else {
            tracing::warn!("No access token available, triggering sign-in");
            self.auth.sign_in().await;
            return Ok(None);
        };

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .headers(headers)
            .bearer_auth(&token)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Request unauthorized (401), triggering sign-in");
            self.auth.sign_in().await;
            return Ok(None);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .context("Failed to read response body")?;
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!(body));
        }

        Ok(Some(response))
    }

    /// Make an authenticated GET request and parse the response as JSON.
    ///
    /// An empty body (204-style responses) maps to `Value::Null`.
    pub async fn get_json(&self, url: &str) -> Result<Option<Value>> {
        let Some(response) = self.get(url, HeaderMap::new()).await? else {
            return Ok(None);
        };

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if body.is_empty() {
            return Ok(Some(Value::Null));
        }

        Ok(Some(
            serde_json::from_str(&body).context("Failed to parse response JSON")?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated, 500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\x07b\nc"), "abc");
    }
}
