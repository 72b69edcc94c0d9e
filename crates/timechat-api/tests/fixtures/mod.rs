use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock server utilities for testing the streaming client
pub struct PollinationsMockServer {
    server: MockServer,
}

impl PollinationsMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/openai", self.server.uri())
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.server.uri())
    }

    /// Mock a successful streaming chat response with the given SSE body
    pub async fn mock_chat_stream(&self, body: impl Into<String>) {
        Mock::given(method("POST"))
            .and(path("/openai"))
            .and(body_partial_json(json!({
                "stream": true,
                "tool_choice": "auto",
                "private": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body.into(), "text/event-stream"))
            .mount(&self.server)
            .await;
    }

    /// Mock a rate-limited chat response
    pub async fn mock_chat_rate_limited(&self) {
        Mock::given(method("POST"))
            .and(path("/openai"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": "Rate limit exceeded"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a server-side failure from the chat endpoint
    pub async fn mock_chat_server_error(&self) {
        Mock::given(method("POST"))
            .and(path("/openai"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&self.server)
            .await;
    }

    /// Mock a successful reference-image upload
    pub async fn mock_upload_success(&self, public_url: &str) {
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "url": public_url
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a failing reference-image upload
    pub async fn mock_upload_failure(&self) {
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(500).set_body_string("storage unavailable"))
            .mount(&self.server)
            .await;
    }
}

/// One SSE event carrying a content delta
pub fn content_event(text: &str) -> String {
    format!(
        "data: {}\n",
        json!({"choices": [{"delta": {"content": text}}]})
    )
}

/// One SSE event carrying a tool-call fragment
pub fn tool_call_event(index: u32, name: Option<&str>, arguments: Option<&str>) -> String {
    let mut function = serde_json::Map::new();
    if let Some(name) = name {
        function.insert("name".to_string(), json!(name));
    }
    if let Some(arguments) = arguments {
        function.insert("arguments".to_string(), json!(arguments));
    }
    format!(
        "data: {}\n",
        json!({"choices": [{"delta": {"tool_calls": [{"index": index, "function": function}]}}]})
    )
}

/// The stream terminator
pub fn done_event() -> String {
    "data: [DONE]\n".to_string()
}
