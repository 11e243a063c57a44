//! Core data types for the Storie storybook generator.
//!
//! This crate holds the data model shared by every other crate:
//!
//! - Storybook and page records ([`Storybook`], [`StoryPage`]) and their
//!   insert/patch forms
//! - The ephemeral story outline ([`StoryStructure`], [`Act`])
//! - Provider-neutral request DTOs for chat completion and image generation
//! - Typed generation events ([`GenerationEvent`])
//! - Layered configuration ([`StorieConfig`])

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod act;
mod config;
mod event;
mod image;
mod message;
mod page;
mod request;
mod role;
mod session;
mod storybook;

pub use act::{ACT_TITLES, Act, PAGE_COUNT, StoryStructure};
pub use config::{BackendConfig, ImageConfig, StorieConfig, StorybookConfig, TextConfig};
pub use event::GenerationEvent;
pub use image::{ImagePayload, ImageRequest, ImageRequestBuilder};
pub use message::Message;
pub use page::{NewStoryPage, PageUpdate, StoryPage};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, TokenUsage};
pub use role::Role;
pub use session::Session;
pub use storybook::{
    NewStorybook, StoryRequest, Storybook, StorybookStatus, StorybookUpdate, StorybookWithPages,
    VisualStyle, provisional_title,
};
