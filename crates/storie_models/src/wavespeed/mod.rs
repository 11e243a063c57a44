//! Wavespeed image-generation client.

mod client;
mod retry;

pub use client::{WavespeedClient, extract_outputs};
pub use retry::linear_backoff;
