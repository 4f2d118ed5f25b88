//! Infrastructure layer for Parley.
//!
//! Contains the HTTP implementation of the `PromptBackend` trait defined in
//! `parley-core`, configuration loading, and start-up context capture.

pub mod config;
pub mod launch;
pub mod prompt;
