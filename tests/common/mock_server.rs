//! Mock `OpenAI`-compatible and Ollama server for integration tests
//!
//! Chat routes play back scripted replies; embedding routes answer with
//! [`mock_embedding`] of each input.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_json::json;
use serde_json::Value;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Successful completion with this content
    Text(String),
    /// Streamed completion, one chunk per token
    Stream(Vec<String>),
    /// Error status with a plain-text body
    Status(u16, String),
}

impl MockReply {
    pub fn text(content: &str) -> Self {
        Self::Text(content.to_string())
    }

    pub fn stream(tokens: &[&str]) -> Self {
        Self::Stream(tokens.iter().map(|t| (*t).to_string()).collect())
    }

    pub fn status(code: u16, body: &str) -> Self {
        Self::Status(code, body.to_string())
    }
}

#[derive(Default)]
pub struct MockState {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<Value>>,
}

impl MockState {
    /// Request bodies received so far
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record(&self, body: Value) {
        self.requests.lock().unwrap().push(body);
    }

    fn next_reply(&self, body: Value) -> MockReply {
        self.record(body);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::text("default reply"))
    }
}

/// Start the server on an ephemeral port; returns its base URL and state
pub async fn spawn_mock_server(replies: Vec<MockReply>) -> (String, Arc<MockState>) {
    let state = Arc::new(MockState {
        replies: Mutex::new(VecDeque::from(replies)),
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/chat/completions", post(openai_chat))
        .route("/api/chat", post(ollama_chat))
        .route("/embeddings", post(openai_embeddings))
        .route("/api/embeddings", post(ollama_embeddings))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

async fn openai_chat(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    match state.next_reply(body) {
        MockReply::Text(content) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        MockReply::Stream(tokens) => {
            let mut body = String::new();
            for token in tokens {
                let chunk = json!({"choices": [{"index": 0, "delta": {"content": token}}]});
                body.push_str(&format!("data: {chunk}\n\n"));
            }
            body.push_str("data: [DONE]\n\n");
            ([(CONTENT_TYPE, "text/event-stream")], body).into_response()
        }
        MockReply::Status(code, message) => status_response(code, message),
    }
}

async fn ollama_chat(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    match state.next_reply(body) {
        MockReply::Text(content) => Json(json!({
            "model": "mock",
            "message": {"role": "assistant", "content": content},
            "done": true
        }))
        .into_response(),
        MockReply::Stream(tokens) => {
            let mut body = String::new();
            for token in tokens {
                let chunk = json!({"message": {"role": "assistant", "content": token}, "done": false});
                body.push_str(&format!("{chunk}\n"));
            }
            body.push_str(&format!("{}\n", json!({"done": true})));
            ([(CONTENT_TYPE, "application/x-ndjson")], body).into_response()
        }
        MockReply::Status(code, message) => status_response(code, message),
    }
}

/// Vector served for `text`: `[bytes, words, 1.0]`, plus an extra
/// component when the text mentions "wide"
pub fn mock_embedding(text: &str) -> Vec<f32> {
    let mut embedding = vec![text.len() as f32, text.split_whitespace().count() as f32, 1.0];
    if text.contains("wide") {
        embedding.push(0.5);
    }
    embedding
}

/// Batch endpoint. Items come back in reverse order with their `index`;
/// inputs mentioning "drop" get no item at all.
async fn openai_embeddings(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let inputs: Vec<String> = body["input"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    let model = body["model"].clone();
    state.record(body);

    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, text)| !text.contains("drop"))
        .map(|(index, text)| {
            json!({"object": "embedding", "index": index, "embedding": mock_embedding(text)})
        })
        .collect();
    Json(json!({"object": "list", "data": data, "model": model}))
}

async fn ollama_embeddings(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let embedding = mock_embedding(body["prompt"].as_str().unwrap_or_default());
    state.record(body);
    Json(json!({"embedding": embedding}))
}

fn status_response(code: u16, message: String) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, message).into_response()
}
