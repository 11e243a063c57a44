//! Hosted backend REST client.

mod client;
mod params;

pub use client::HostedBackend;
pub use params::{filter_params, query_params};
