//! Text and image provider clients for Storie.
//!
//! # Available Providers
//!
//! - **OpenAI chat completions** ([`OpenAIChatClient`]), implementing
//!   [`storie_interface::TextDriver`]
//! - **Wavespeed image generation** ([`WavespeedClient`]), implementing
//!   [`storie_interface::ImageDriver`] with retry on HTTP 429
//!
//! Both clients send requests through an [`storie_interface::HttpTransport`];
//! [`ReqwestTransport`] is the production implementation.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storie_core::{GenerateRequest, Message, StorieConfig};
//! use storie_interface::TextDriver;
//! use storie_models::{OpenAIChatClient, ReqwestTransport};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorieConfig::load()?;
//! let client = OpenAIChatClient::from_config(&config.text, Arc::new(ReqwestTransport::new()))?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Tell me a bedtime story")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;
mod transport;
mod wavespeed;

pub use openai::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage, OpenAIChatClient};
pub use transport::ReqwestTransport;
pub use wavespeed::{WavespeedClient, extract_outputs, linear_backoff};
