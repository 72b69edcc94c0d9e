// Models module - data structures for chat state and API communication
pub mod persona;
pub mod requests;
pub mod responses;
pub mod types;

// Re-export commonly used types
pub use persona::{Persona, PersonaConfig};
pub use requests::{
    image_generation_tool, ApiMessage, ChatRequest, FunctionDef, Tool, GENERATE_IMAGE_FUNCTION,
};
pub use responses::{Delta, FunctionCallDelta, StreamChunk, StreamChoice, ToolCallDelta};
pub use types::{ImageAttachment, ImageData, ImageGenerationParams, Message};
