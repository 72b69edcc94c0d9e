use timechat_api::{ApiError, PollinationsClient};
use timechat_models::{ImageAttachment, ImageData, Message, Persona};

/// Next free message id for a history (ids are small and monotonically
/// increasing, starting at 1 for the persona greeting).
pub fn next_message_id(history: &[Message]) -> u64 {
    history.iter().map(|m| m.id).max().unwrap_or(0) + 1
}

/// One user turn: the input text plus any attached images.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    pub text: String,
    /// Opaque display references carried on the user message.
    pub image_data: Option<ImageData>,
    /// Raw image bytes, used as the reference for generated images.
    pub attachments: Vec<ImageAttachment>,
}

impl TurnRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Run a complete chat turn against `history`, mutating it in place.
///
/// Pushes the user message, then a streaming assistant message whose
/// `content` is rewritten on every update; `is_streaming` is cleared when
/// the final update arrives (or the turn fails). `on_update` sees the
/// assistant message after each change. Errors go to `on_error`; the
/// assistant message keeps whatever partial content was delivered.
///
/// Callers must not issue overlapping turns against the same history.
pub async fn run_turn<U, E>(
    client: &PollinationsClient,
    persona: Persona,
    history: &mut Vec<Message>,
    request: TurnRequest,
    mut on_update: U,
    mut on_error: E,
) where
    U: FnMut(&Message),
    E: FnMut(&ApiError),
{
    let user_id = next_message_id(history);
    let mut user_message = Message::user(user_id, request.text);
    user_message.image_data = request.image_data;
    history.push(user_message);

    let mut assistant = Message::streaming(user_id + 1);

    let result = client
        .generate_response(
            &persona.config(),
            history,
            &request.attachments,
            |content, is_done| {
                assistant.content = content.to_string();
                if is_done {
                    assistant.is_streaming = false;
                }
                on_update(&assistant);
            },
        )
        .await;

    if let Err(error) = result {
        assistant.is_streaming = false;
        on_error(&error);
    }

    history.push(assistant);
}
