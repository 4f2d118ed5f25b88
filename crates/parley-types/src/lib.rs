//! Shared domain types for Parley.
//!
//! This crate contains the types passed between the session engine, the
//! backend dispatcher and the terminal shell: profiles, history entries,
//! formatted blocks, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod format;
pub mod launch;
pub mod profile;
pub mod prompt;
