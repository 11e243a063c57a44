//! Trait definitions for the Storie storybook generator.
//!
//! Generators depend on these capabilities rather than on concrete clients,
//! so providers and backends can be swapped (or scripted in tests):
//!
//! - [`TextDriver`] / [`ImageDriver`]: model providers
//! - [`HttpTransport`]: JSON POSTs used by the provider clients
//! - [`SessionStore`], [`RowStore`], [`BlobStore`]: the hosted backend,
//!   bundled as [`Backend`]
//! - [`GenerationObserver`]: receives pipeline progress events

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod observer;
mod query;
mod traits;
mod transport;

pub use backend::{Backend, BlobStore, RowStore, SessionStore, StoredBlob};
pub use observer::GenerationObserver;
pub use query::{Direction, Filter, Order, Query};
pub use traits::{ImageDriver, TextDriver};
pub use transport::{HttpResponse, HttpTransport};
