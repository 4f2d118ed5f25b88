//! Successful backend replies, independent of the wire encoding.

use crate::chat::SessionId;

/// Reply to the bootstrap call that opens a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReply {
    pub message: String,
    pub session_id: SessionId,
}

/// Reply to a follow-up message inside an open conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpReply {
    pub message: String,
}
