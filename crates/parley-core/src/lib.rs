//! Conversation engine for Parley.
//!
//! This crate holds the session controller, the history log and the response
//! formatter, plus the `PromptBackend` port that the infrastructure layer
//! implements. It depends only on `parley-types` -- never on
//! `parley-infra` or any HTTP crate.

pub mod backend;
pub mod chat;
