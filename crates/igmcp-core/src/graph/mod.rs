//! Instagram Graph API gateway.
//!
//! `GraphClient` maps one logical operation to one upstream HTTP call:
//! it assembles the URL, attaches the access token as a query parameter,
//! and normalizes embedded error payloads into [`Error::Upstream`]. The
//! Graph API signals failures inside a 200-status JSON body, so the HTTP
//! status is not consulted — only the decoded body.
//!
//! The actual round trip sits behind the [`HttpSend`] capability so the
//! publish workflows and the tool executor can be exercised against a
//! recording double. No retries are performed at any layer.

pub mod endpoints;
pub mod mock;
pub mod publish;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;

use crate::error::Error;

/// Graph API base. Instagram is served through the Facebook Graph API.
pub const GRAPH_API_BASE: &str = "https://graph.facebook.com/v22.0";

/// One HTTP round trip: URL + verb + optional JSON body to a decoded JSON
/// response. Implementations surface transport-level failures (DNS,
/// timeout, non-JSON body) as [`Error::Transport`].
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> Result<Value, Error>;
}

/// Production [`HttpSend`] backed by `reqwest`.
pub struct ReqwestSender {
    http: reqwest::Client,
}

impl ReqwestSender {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpSend for ReqwestSender {
    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> Result<Value, Error> {
        let mut request = self.http.request(method, url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }
}

/// Stateless gateway to the Instagram Graph API.
#[derive(Clone)]
pub struct GraphClient {
    sender: Arc<dyn HttpSend>,
    access_token: String,
    base_url: String,
}

impl GraphClient {
    pub fn new(sender: Arc<dyn HttpSend>, access_token: impl Into<String>) -> Self {
        Self {
            sender,
            access_token: access_token.into(),
            base_url: GRAPH_API_BASE.to_string(),
        }
    }

    /// Override the base URL. Test hook only — the tool surface never
    /// exposes this.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issue one Graph API call.
    ///
    /// The access token is always appended as `access_token`; extra query
    /// parameters follow. POST/DELETE carry `body` as JSON. A decoded body
    /// containing an `error` object is converted into [`Error::Upstream`]
    /// with code and message preserved verbatim.
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
        params: &[(&str, &str)],
    ) -> Result<Value, Error> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| Error::Transport(format!("Invalid URL for {}: {}", path, e)))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(%method, path, "graph api call");

        let data = self.sender.send(method, url, body).await?;

        if let Some(err) = data.get("error") {
            let code = err.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            return Err(Error::Upstream { code, message });
        }

        Ok(data)
    }

    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, Error> {
        self.request(path, Method::GET, None, params).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, Error> {
        self.request(path, Method::POST, Some(body), &[]).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, Error> {
        self.request(path, Method::DELETE, None, &[]).await
    }

    /// GET an edge that answers `{ "data": [...] }` and unwrap the array.
    /// Absent `data` yields an empty array, matching the Graph API's
    /// behavior for exhausted edges.
    pub async fn get_list(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, Error> {
        let response = self.get(path, params).await?;
        Ok(response
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSend;
    use super::*;
    use serde_json::json;

    fn client(mock: &Arc<MockSend>) -> GraphClient {
        GraphClient::new(mock.clone() as Arc<dyn HttpSend>, "tok")
    }

    #[tokio::test]
    async fn test_access_token_attached_as_query_param() {
        let mock = MockSend::returning(vec![json!({"id": "1"})]);
        let result = client(&mock).get("17890", &[("fields", "id,username")]).await;
        assert!(result.is_ok());

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "GET");
        assert!(calls[0].url.contains("/17890?"));
        assert!(calls[0].url.contains("access_token=tok"));
        assert!(calls[0].url.contains("fields=id%2Cusername"));
    }

    #[tokio::test]
    async fn test_embedded_error_object_maps_to_upstream_error() {
        let mock = MockSend::returning(vec![json!({
            "error": { "message": "Invalid OAuth access token.", "type": "OAuthException", "code": 190 }
        })]);

        let err = client(&mock).get("me", &[]).await.unwrap_err();
        match err {
            Error::Upstream { code, message } => {
                assert_eq!(code, 190);
                assert_eq!(message, "Invalid OAuth access token.");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_display_preserves_code_and_message() {
        let mock = MockSend::returning(vec![json!({
            "error": { "message": "Unsupported request", "code": 100 }
        })]);

        let err = client(&mock).get("bad", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Instagram API Error (100): Unsupported request");
    }

    #[tokio::test]
    async fn test_get_list_unwraps_data_array() {
        let mock = MockSend::returning(vec![
            json!({"data": [{"id": "a"}, {"id": "b"}]}),
            json!({"paging": {}}),
        ]);
        let c = client(&mock);

        let list = c.get_list("17890/media", &[]).await.unwrap();
        assert_eq!(list.as_array().unwrap().len(), 2);

        // Missing `data` yields an empty array, not an error.
        let empty = c.get_list("17890/media", &[]).await.unwrap();
        assert_eq!(empty, json!([]));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let mock = MockSend::failing("connection refused");
        let err = client(&mock).get("me", &[]).await.unwrap_err();
        match err {
            Error::Transport(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected Transport, got {:?}", other),
        }
    }
}
