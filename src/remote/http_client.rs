use super::*;

const API_ROOT: &str = "/api/v1";

impl ApiClient {
    pub(super) async fn ensure_ok(
        &self,
        resp: reqwest::Response,
        label: &str,
    ) -> Result<reqwest::Response, TransportError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TransportError::Unauthorized);
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(TransportError::Forbidden {
                label: label.to_string(),
            });
        }
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        Err(TransportError::Status {
            label: label.to_string(),
            status: status.as_u16(),
            message: error_message(&text),
        })
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.config.access_token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('/'),
            API_ROOT,
            path
        )
    }
}

/// Pull the human-readable message out of an API error body.
pub(super) fn error_message(body: &str) -> String {
    const MAX: usize = 200;
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        return "no response body".to_string();
    }
    body.chars().take(MAX).collect()
}
