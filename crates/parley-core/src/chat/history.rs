//! Append-only conversation history.
//!
//! Entries are displayed in insertion order. The only mutation besides
//! `append` is `replace_last`, which turns the trailing pending placeholder
//! into a final answer or an error while keeping its position.

use parley_types::chat::{Entry, Message};
use parley_types::error::HistoryError;

/// Ordered log of conversation messages.
///
/// Invariants:
/// - `order` values are dense from 0 and never reused;
/// - at most one entry is pending, and only ever the last one.
#[derive(Debug, Default)]
pub struct HistoryLog {
    messages: Vec<Message>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its `order`.
    ///
    /// Fails if a pending entry already exists; nothing may be appended
    /// behind a placeholder.
    pub fn append(&mut self, entry: Entry) -> Result<u64, HistoryError> {
        if let Some(pending) = self.pending() {
            return Err(HistoryError::AlreadyPending(pending.order));
        }

        let order = self.messages.len() as u64;
        self.messages.push(Message::from_entry(order, entry));
        Ok(order)
    }

    /// Replace the pending last entry, preserving its `order`.
    pub fn replace_last(&mut self, entry: Entry) -> Result<u64, HistoryError> {
        let last = self.messages.last_mut().ok_or(HistoryError::Empty)?;
        if !last.is_pending() {
            return Err(HistoryError::NotPending);
        }

        let order = last.order;
        *last = Message::from_entry(order, entry);
        Ok(order)
    }

    /// The pending placeholder, if one is outstanding.
    pub fn pending(&self) -> Option<&Message> {
        self.messages.last().filter(|m| m.is_pending())
    }

    /// Copy of every message in display order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
