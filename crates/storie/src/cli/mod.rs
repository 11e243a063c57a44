//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storie binary.

mod commands;
mod draft;
mod storybook;

pub use commands::{Cli, Commands};
pub use draft::draft;
pub use storybook::{create, delete, list, regenerate, show, styles, wait};
