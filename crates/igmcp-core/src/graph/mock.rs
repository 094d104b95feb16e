//! Recording [`HttpSend`] double.
//!
//! Used by this crate's own tests and by downstream integration tests to
//! assert on the exact upstream call sequence (count, order, verb, URL,
//! body) without any network traffic.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;

use super::HttpSend;
use crate::error::Error;

/// One recorded upstream call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub url: String,
    pub body: Option<Value>,
}

impl RecordedCall {
    /// Path portion of the recorded URL (no scheme/host/query).
    pub fn path(&self) -> String {
        Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }
}

enum Script {
    /// Response bodies served in order; the last one repeats once
    /// exhausted. A body carrying an `error` object exercises the
    /// client's embedded-error mapping.
    Responses(Vec<Value>),
    /// Every call fails with a transport error.
    TransportFailure(String),
}

/// Scriptable, recording HTTP sender.
pub struct MockSend {
    calls: Mutex<Vec<RecordedCall>>,
    script: Script,
    served: Mutex<usize>,
}

impl MockSend {
    /// Serve the given response bodies in order (last one repeats).
    pub fn returning(responses: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Script::Responses(responses),
            served: Mutex::new(0),
        })
    }

    /// Fail every call with a transport error.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Script::TransportFailure(message.to_string()),
            served: Mutex::new(0),
        })
    }

    /// A Graph-style response body embedding an error object. Serve it
    /// from [`MockSend::returning`] to make one call fail upstream.
    pub fn error_body(code: i64, message: &str) -> Value {
        serde_json::json!({
            "error": { "message": message, "type": "OAuthException", "code": code }
        })
    }

    /// All calls recorded so far, in issue order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpSend for MockSend {
    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> Result<Value, Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            url: url.to_string(),
            body,
        });

        let index = {
            let mut served = self.served.lock().unwrap();
            let current = *served;
            *served += 1;
            current
        };

        match &self.script {
            Script::Responses(responses) => {
                let last = responses.len().saturating_sub(1);
                Ok(responses
                    .get(index.min(last))
                    .cloned()
                    .unwrap_or(Value::Object(Default::default())))
            }
            Script::TransportFailure(message) => Err(Error::Transport(message.clone())),
        }
    }
}
