//! Backend abstractions for Parley.
//!
//! - `PromptBackend`: RPITIT trait for the bootstrap / follow-up calls

pub mod provider;
