use serde::{Deserialize, Serialize};

/// A single entry in the visible conversation.
///
/// Created by the caller before each turn and mutated in place while the
/// assistant response streams: `content` grows append-only and
/// `is_streaming` is cleared once the final update has been delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    #[serde(default)]
    pub content: String,
    pub is_from_assistant: bool,
    #[serde(default)]
    pub has_animated: bool,
    #[serde(default)]
    pub is_streaming: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_data: Option<ImageData>,
}

impl Message {
    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            is_from_assistant: false,
            has_animated: false,
            is_streaming: false,
            image_data: None,
        }
    }

    pub fn assistant(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            is_from_assistant: true,
            has_animated: false,
            is_streaming: false,
            image_data: None,
        }
    }

    /// An assistant message that is still receiving streamed content.
    pub fn streaming(id: u64) -> Self {
        let mut message = Self::assistant(id, "");
        message.is_streaming = true;
        message
    }
}

/// Opaque image reference(s) attached to a message for display purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageData {
    Single(String),
    Multiple(Vec<String>),
}

/// Raw bytes of a user-supplied image, uploaded on demand when a generated
/// image should be conditioned on it.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    1920
}

/// Arguments of a completed `generate_image` tool call.
///
/// The [1080, 2048] range for width and height is advertised to the model in
/// the tool schema; values outside it are accepted here as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationParams {
    pub prompt: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}
