use serde::{Deserialize, Serialize};
use serde_json::json;

/// Function name the model invokes to request an image.
pub const GENERATE_IMAGE_FUNCTION: &str = "generate_image";

/// Request body for the streaming chat completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub tools: Vec<Tool>,
    pub tool_choice: String,
    pub stream: bool,
}

/// Wire-format message (role + content only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

impl ApiMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Tool definition advertised to the model
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDef,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// The single tool this application exposes: image generation.
pub fn image_generation_tool() -> Tool {
    Tool {
        tool_type: "function".to_string(),
        function: FunctionDef {
            name: GENERATE_IMAGE_FUNCTION.to_string(),
            description: "Generate an image ONLY when the user wants you to generate images \
                directly. Just respond in text when not needed. Ask the user directly for \
                clarification with the description before making the image."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "Description of the image to generate. Use a fully \
                            detailed prompt. Look carefully for small details like added text \
                            and style, and add details like dreamy effects to make the image \
                            aesthetically pleasing."
                    },
                    "width": {
                        "type": "integer",
                        "description": "Width of the image in pixels",
                        "default": 1080,
                        "minimum": 1080,
                        "maximum": 2048
                    },
                    "height": {
                        "type": "integer",
                        "description": "Height of the image in pixels",
                        "default": 1920,
                        "minimum": 1080,
                        "maximum": 2048
                    }
                },
                "required": ["prompt"]
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_tool_schema_shape() {
        let tool = image_generation_tool();
        assert_eq!(tool.tool_type, "function");
        assert_eq!(tool.function.name, GENERATE_IMAGE_FUNCTION);

        let params = &tool.function.parameters;
        assert_eq!(params["required"][0], "prompt");
        assert_eq!(params["properties"]["width"]["minimum"], 1080);
        assert_eq!(params["properties"]["height"]["maximum"], 2048);
    }

    #[test]
    fn chat_request_omits_missing_token() {
        let request = ChatRequest {
            model: "openai".to_string(),
            messages: vec![ApiMessage::new("user", "hi")],
            private: true,
            token: None,
            tools: vec![image_generation_tool()],
            tool_choice: "auto".to_string(),
            stream: true,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("token").is_none());
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["stream"], true);
        assert_eq!(body["private"], true);
    }
}
