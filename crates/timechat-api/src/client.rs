use std::sync::Arc;

use colored::Colorize;
use futures_util::StreamExt;
use reqwest::StatusCode;

use timechat_logging::{log_request, log_response_error, log_stream_chunk};
use timechat_models::{
    image_generation_tool, ApiMessage, ChatRequest, ImageAttachment, ImageGenerationParams,
    Message, PersonaConfig, GENERATE_IMAGE_FUNCTION,
};

use crate::error::ApiError;
use crate::image::image_markdown;
use crate::stream::{LineOutcome, StreamAccumulator};
use crate::upload::{convert_attachments_to_urls, HttpImageUploader, ImageUploader, UPLOAD_API_URL};

/// Streaming chat completions endpoint.
pub const TEXT_API_URL: &str = "https://text.pollinations.ai/openai";

/// Configuration for the Pollinations client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Chat completions endpoint URL
    pub api_url: String,
    /// Reference-image upload endpoint URL
    pub upload_url: String,
    /// API token; also embedded in generated image URLs when present
    pub token: Option<String>,
    /// Log requests and raw stream chunks to the console
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: TEXT_API_URL.to_string(),
            upload_url: UPLOAD_API_URL.to_string(),
            token: None,
            verbose: false,
        }
    }
}

/// Client for one inference endpoint, reusable across chat turns.
///
/// Each call to [`generate_response`](Self::generate_response) owns its
/// session state exclusively; nothing is shared between concurrent turns.
pub struct PollinationsClient {
    config: ClientConfig,
    http: reqwest::Client,
    uploader: Arc<dyn ImageUploader>,
}

impl PollinationsClient {
    pub fn new(config: ClientConfig) -> Self {
        let uploader = Arc::new(HttpImageUploader::new(config.upload_url.clone()));
        Self {
            config,
            http: reqwest::Client::new(),
            uploader,
        }
    }

    /// Swap the upload collaborator (tests inject a stub here).
    pub fn with_uploader(mut self, uploader: Arc<dyn ImageUploader>) -> Self {
        self.uploader = uploader;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request body: persona system prompt followed by the visible
    /// history mapped onto wire roles.
    pub fn build_request(&self, persona: &PersonaConfig, history: &[Message]) -> ChatRequest {
        let mut messages = vec![ApiMessage::new("system", persona.system_prompt)];
        messages.extend(history.iter().map(|message| {
            let role = if message.is_from_assistant {
                "assistant"
            } else {
                "user"
            };
            ApiMessage::new(role, message.content.clone())
        }));

        ChatRequest {
            model: persona.model.to_string(),
            messages,
            private: true,
            token: self.config.token.clone(),
            tools: vec![image_generation_tool()],
            tool_choice: "auto".to_string(),
            stream: true,
        }
    }

    /// Stream one assistant turn.
    ///
    /// `on_update` receives the full accumulated text (never a delta); the
    /// `is_done` flag is true exactly once, on the last invocation. After an
    /// `Err` no further updates are delivered. The returned string equals the
    /// content of the final update.
    pub async fn generate_response<F>(
        &self,
        persona: &PersonaConfig,
        history: &[Message],
        attachments: &[ImageAttachment],
        mut on_update: F,
    ) -> Result<String, ApiError>
    where
        F: FnMut(&str, bool),
    {
        let request = self.build_request(persona, history);
        log_request(
            &self.config.api_url,
            &request,
            self.config.token.as_deref(),
            self.config.verbose,
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_response_error(status, &body, self.config.verbose);
            return Err(ApiError::Status(status));
        }

        let mut accumulator = StreamAccumulator::new();
        let mut chunk_counter = 0usize;

        // Scope the body reader so it is released before finalization,
        // whichever way the loop exits.
        {
            let mut stream = response.bytes_stream();
            'read: while let Some(chunk) = stream.next().await {
                let bytes = chunk?;
                accumulator.push_bytes(&bytes);

                while let Some(line) = accumulator.next_line() {
                    if !line.trim().is_empty() {
                        chunk_counter += 1;
                        log_stream_chunk(chunk_counter, &line, self.config.verbose);
                    }
                    match accumulator.process_line(&line) {
                        LineOutcome::Content => on_update(accumulator.content(), false),
                        LineOutcome::Done => break 'read,
                        LineOutcome::Ignored => {}
                    }
                }
            }
        }

        self.resolve_tool_calls(&mut accumulator, attachments, &mut on_update)
            .await;

        on_update(accumulator.content(), true);
        Ok(accumulator.into_content())
    }

    /// Turn accumulated `generate_image` calls into appended markdown image
    /// fragments, in ascending index order.
    async fn resolve_tool_calls<F>(
        &self,
        accumulator: &mut StreamAccumulator,
        attachments: &[ImageAttachment],
        on_update: &mut F,
    ) where
        F: FnMut(&str, bool),
    {
        let calls = accumulator.take_tool_calls();
        if calls.is_empty() {
            return;
        }

        // The first attachment is uploaded at most once, shared by every
        // image fragment of this turn.
        let mut reference_url: Option<String> = None;
        let mut reference_attempted = false;

        for call in calls.values() {
            if call.name != GENERATE_IMAGE_FUNCTION {
                continue;
            }

            match serde_json::from_str::<ImageGenerationParams>(&call.arguments) {
                Ok(params) => {
                    if !reference_attempted {
                        reference_attempted = true;
                        if let Some(first) = attachments.first() {
                            let urls = convert_attachments_to_urls(
                                self.uploader.as_ref(),
                                std::slice::from_ref(first),
                            )
                            .await;
                            reference_url = urls.into_iter().next();
                        }
                    }

                    let markdown = image_markdown(
                        &params,
                        self.config.token.as_deref(),
                        reference_url.as_deref(),
                    );
                    accumulator.append_text("\n\n");
                    accumulator.append_text(&markdown);
                }
                Err(e) => {
                    eprintln!(
                        "{} Error processing image generation: {}",
                        "warning:".yellow(),
                        e
                    );
                    accumulator.append_text(
                        "\n\nSorry, I had trouble generating that image. Please try again.",
                    );
                }
            }

            on_update(accumulator.content(), false);
        }
    }
}
