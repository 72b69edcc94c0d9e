//! # timechat-api
//!
//! Streaming client for the Pollinations chat completions endpoint, plus the
//! image-generation tool-call plumbing built on top of it:
//!
//! - **Stream accumulator**: consumes the chunked SSE response, incrementally
//!   assembling free text and fragmented tool-call invocations.
//! - **Tool-call resolver**: at stream end, turns accumulated
//!   `generate_image` calls into markdown image fragments, optionally
//!   conditioned on an uploaded reference image.
//!
//! The caller sees a single continuous textual stream: every update callback
//! carries the full accumulated text, and the final callback fires exactly
//! once, last.
//!
//! ## Example
//!
//! ```rust,no_run
//! use timechat_api::{ClientConfig, PollinationsClient};
//! use timechat_models::{Message, Persona};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PollinationsClient::new(ClientConfig::default());
//!     let history = vec![Message::user(1, "draw me a cat")];
//!
//!     let final_text = client
//!         .generate_response(&Persona::Default.config(), &history, &[], |content, is_done| {
//!             if is_done {
//!                 println!("{}", content);
//!             }
//!         })
//!         .await?;
//!
//!     println!("final: {}", final_text);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod image;
pub mod stream;
pub mod upload;

// Re-export commonly used types
pub use client::{ClientConfig, PollinationsClient, TEXT_API_URL};
pub use error::ApiError;
pub use image::{generate_image_url, image_markdown, FALLBACK_IMAGE_TOKEN, IMAGE_API_URL};
pub use stream::{LineOutcome, StreamAccumulator, ToolCallBuilder};
pub use upload::{
    convert_attachments_to_urls, HttpImageUploader, ImageUploader, UPLOAD_API_URL,
};
