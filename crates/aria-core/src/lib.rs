//! # aria-core
//!
//! Core types, traits, and error handling for the Aria music player.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
