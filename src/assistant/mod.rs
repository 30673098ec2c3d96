// src/assistant/mod.rs

pub mod engine;
pub mod plugin;
pub mod responses;

pub use engine::{AssistantDisplayMode, ChatThread, ThinkingSequence};
pub use plugin::{AssistantPlugin, AssistantState, ChatMessageSubmitted, ThinkingComplete};
