//! Structured markup derived from backend text.
//!
//! Blocks are never stored; they are recomputed from a message's raw text
//! whenever it is rendered.

use serde::{Deserialize, Serialize};

/// A run of text that is either emphasized or plain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One rendered line of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "spans", rename_all = "snake_case")]
pub enum FormattedBlock {
    Paragraph(Vec<Span>),
    /// A single-item list; consecutive bullet lines are not merged.
    BulletItem(Vec<Span>),
}

impl FormattedBlock {
    pub fn spans(&self) -> &[Span] {
        match self {
            FormattedBlock::Paragraph(spans) | FormattedBlock::BulletItem(spans) => spans,
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, FormattedBlock::BulletItem(_))
    }
}
