//! Conversation management for timechat
//!
//! This crate owns the per-turn glue between the visible message list and
//! the streaming client: it creates the user and assistant messages, mutates
//! the assistant message in place as updates arrive, and maps stream errors
//! onto the caller's error callback.

pub mod session;

pub use session::{next_message_id, run_turn, TurnRequest};
