//! Persistence backends for Storie.
//!
//! - [`HostedBackend`]: REST client for the hosted backend-as-a-service
//!   (auth sessions, table records, storage buckets)
//! - [`InMemoryBackend`]: process-local backend for offline runs and tests
//! - [`StorybookRepository`]: typed storybook/page operations over any
//!   [`storie_interface::Backend`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod hosted;
mod memory;
mod repository;

pub use hosted::{HostedBackend, filter_params, query_params};
pub use memory::InMemoryBackend;
pub use repository::{PAGES_TABLE, STORYBOOKS_TABLE, StorybookRepository};
