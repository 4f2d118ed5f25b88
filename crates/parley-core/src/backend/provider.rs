//! PromptBackend trait definition.
//!
//! The core abstraction over the remote conversation service. Uses RPITIT
//! so implementations can be plain `async fn`s without boxing.

use parley_types::chat::SessionId;
use parley_types::error::DispatchError;
use parley_types::profile::Profile;
use parley_types::prompt::{BootstrapReply, FollowUpReply};

/// The two call shapes the conversation backend understands.
///
/// Implementations perform exactly one attempt per call and report every
/// failure as a [`DispatchError`]; they hold no conversation state.
///
/// The HTTP implementation lives in parley-infra (`HttpPromptDispatcher`).
pub trait PromptBackend: Send + Sync {
    /// Open a conversation by submitting the user's profile.
    fn bootstrap(
        &self,
        profile: &Profile,
    ) -> impl std::future::Future<Output = Result<BootstrapReply, DispatchError>> + Send;

    /// Send a follow-up message inside an open conversation.
    fn follow_up(
        &self,
        session_id: &SessionId,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<FollowUpReply, DispatchError>> + Send;
}
