//! OpenAI chat-completions client.

mod client;
mod conversions;
mod dto;

pub use client::OpenAIChatClient;
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
