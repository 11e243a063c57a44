//! Test utilities for provider client tests.
//!
//! [`ScriptedTransport`] replays a fixed sequence of responses and records
//! every request it receives.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use storie_error::{HttpError, StorieResult};
use storie_interface::{HttpResponse, HttpTransport};
use tokio::time::Instant;

/// One scripted outcome.
#[allow(dead_code)]
pub enum Step {
    /// Respond with a status and body
    Respond(u16, String),
    /// Fail without a response
    NetworkError(&'static str),
}

/// A request seen by the transport.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub bearer: String,
    pub body: serde_json::Value,
    pub at: Instant,
}

/// Transport that replays scripted steps in order.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> StorieResult<HttpResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            bearer: bearer.to_string(),
            body: body.clone(),
            at: Instant::now(),
        });

        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Step::NetworkError(message)) => Err(HttpError::new(message).into()),
            None => Ok(HttpResponse::new(500, "script exhausted")),
        }
    }
}

/// A 2xx image response carrying the given outputs.
#[allow(dead_code)]
pub fn image_ok(outputs: &[&str]) -> Step {
    Step::Respond(
        200,
        serde_json::json!({"code": 200, "data": {"outputs": outputs}}).to_string(),
    )
}

/// A 429 response.
#[allow(dead_code)]
pub fn rate_limited() -> Step {
    Step::Respond(429, r#"{"message": "Too many requests"}"#.to_string())
}

/// A chat completion with a single choice.
#[allow(dead_code)]
pub fn chat_ok(content: &str) -> Step {
    Step::Respond(
        200,
        serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 30, "total_tokens": 42}
        })
        .to_string(),
    )
}
