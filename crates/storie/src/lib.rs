//! Storie - illustrated bedtime storybooks from a one-line idea.
//!
//! Storie turns a short premise, a child's name and a visual style into a
//! four-page storybook: a text model writes a titled four-act outline, an
//! image model illustrates every act, and a hosted backend stores the result.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storie::{
//!     Credentials, StorieConfig, StoryRequest, TracingObserver, VisualStyle, build_service,
//!     connect,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorieConfig::load()?;
//!     let backend = connect(&config, Credentials::from_env()).await?;
//!     let service = build_service(&config, backend)?;
//!
//!     let request = StoryRequest {
//!         prompt: "A sleepy dragon who collects moonbeams".into(),
//!         child_name: "Noah".into(),
//!         visual_style: VisualStyle::Watercolor,
//!     };
//!     let user = service.current_user().await?;
//!     let outcome = service.create_and_generate(user, &request, &TracingObserver).await?;
//!     println!("{}", outcome.storybook.title);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storie_error` - Error types
//! - `storie_core` - Data model, events and configuration
//! - `storie_interface` - Provider, transport and backend traits
//! - `storie_models` - OpenAI-compatible chat and Wavespeed image clients
//! - `storie_storage` - Local content-addressed blob store
//! - `storie_backend` - Hosted and in-memory backends, storybook repository
//! - `storie_generation` - Prompts, generators, pipeline and service
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
pub mod telemetry;

pub use app::{Credentials, build_pipeline, build_service, connect, providers};

pub use storie_backend::*;
pub use storie_core::*;
pub use storie_error::*;
pub use storie_generation::*;
pub use storie_interface::*;
pub use storie_models::*;
pub use storie_storage::*;
