//! Practicum homework-status API client
//!
//! This module implements the StatusSource trait for the Practicum API and
//! the response-shape checks the poll loop runs on every body.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::{BotError, Result};

/// Anything that can answer "what changed since `from_date`"
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the raw JSON body for submissions updated since `from_date`
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Practicum API client
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Create a client for `endpoint` authenticated with `token`
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| BotError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        log::debug!("Requesting {} with from_date={}", self.endpoint, from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", self.auth_header())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::Request(format!("{}: {}", self.endpoint, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| BotError::Request(format!("Failed to read response body: {}", e)))?;

        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient").field("endpoint", &self.endpoint).finish()
    }
}

/// Check the body is `{"homeworks": [...], ...}` and return the list
pub fn validate_response(response: &Value) -> Result<&Vec<Value>> {
    let body = response.as_object().ok_or(BotError::ResponseNotObject)?;
    let homeworks = body
        .get("homeworks")
        .ok_or_else(|| BotError::MissingKey("homeworks".to_string()))?;
    homeworks.as_array().ok_or(BotError::HomeworksNotList)
}

/// Cursor for the next poll, if the server supplied one
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;
    use serde_json::json;

    #[test]
    fn test_validate_response_not_object() {
        for body in [json!([]), json!("homeworks"), json!(null), json!(17)] {
            assert!(matches!(validate_response(&body), Err(BotError::ResponseNotObject)));
        }
    }

    #[test]
    fn test_validate_response_missing_homeworks() {
        let body = json!({"current_date": 1000});
        assert!(matches!(validate_response(&body), Err(BotError::MissingKey(ref k)) if k == "homeworks"));
    }

    #[test]
    fn test_validate_response_homeworks_not_list() {
        let body = json!({"homeworks": {"homework_name": "hw1"}});
        assert!(matches!(validate_response(&body), Err(BotError::HomeworksNotList)));
    }

    #[test]
    fn test_validate_response_empty_list() {
        let body = json!({"homeworks": [], "current_date": 2000});
        assert!(validate_response(&body).unwrap().is_empty());
    }

    #[test]
    fn test_validate_response_returns_records_in_order() {
        let body = json!({"homeworks": [
            {"homework_name": "new", "status": "approved"},
            {"homework_name": "old", "status": "rejected"}
        ]});
        let homeworks = validate_response(&body).unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(homeworks[0]["homework_name"], "new");
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({"current_date": 1000})), Some(1000));
        assert_eq!(current_date(&json!({"current_date": "1000"})), None);
        assert_eq!(current_date(&json!({"homeworks": []})), None);
    }

    #[test]
    fn test_client_auth_header() {
        let client = PracticumClient::new("https://example.test/api/", "abc").unwrap();
        assert_eq!(client.auth_header(), "OAuth abc");
        assert_eq!(client.endpoint(), "https://example.test/api/");
        assert!(!format!("{:?}", client).contains("OAuth"));
    }

    #[tokio::test]
    async fn test_fetch_sends_oauth_header_and_from_date() {
        let (base, server) = serve_once("200 OK", r#"{"homeworks": [], "current_date": 1300}"#).await;
        let client = PracticumClient::new(format!("{}/api/", base), "tok").unwrap();

        let body = client.fetch(1234).await.unwrap();
        assert_eq!(body, json!({"homeworks": [], "current_date": 1300}));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/?from_date=1234 HTTP/1.1\r\n"), "{request}");
        assert!(request.to_lowercase().contains("\r\nauthorization: oauth tok\r\n"), "{request}");
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status_is_unexpected_status() {
        let (base, server) = serve_once("503 Service Unavailable", r#"{"error": "down"}"#).await;
        let endpoint = format!("{}/api/", base);
        let client = PracticumClient::new(endpoint.clone(), "tok").unwrap();

        let err = client.fetch(1234).await.unwrap_err();
        assert!(matches!(err, BotError::UnexpectedStatus { status: 503, endpoint: ref e } if *e == endpoint));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_json_error() {
        let (base, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = PracticumClient::new(format!("{}/api/", base), "tok").unwrap();

        assert!(matches!(client.fetch(0).await, Err(BotError::Json(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_request_error() {
        // Port 9 (discard) on localhost is not expected to be listening
        let client = PracticumClient::new("http://127.0.0.1:9/", "abc").unwrap();
        let err = client.fetch(0).await.unwrap_err();
        assert!(matches!(err, BotError::Request(_)));
    }
}
