//! HTTP implementation of the conversation backend.
//!
//! This module provides the [`HttpPromptDispatcher`] which implements the
//! [`PromptBackend`](parley_core::backend::provider::PromptBackend) trait
//! against the backend's `/api/prompt` endpoint.

pub mod client;
pub mod types;

pub use client::HttpPromptDispatcher;
