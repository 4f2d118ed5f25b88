//! The conversation session engine.
//!
//! - `controller`: `SessionController`, the entry point used by the shell
//! - `history`: append-only `HistoryLog` with replace-the-placeholder semantics
//! - `format`: pure parser from backend text to `FormattedBlock`s

pub mod controller;
pub mod format;
pub mod history;
