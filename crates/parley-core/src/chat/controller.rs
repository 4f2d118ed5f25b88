//! Session controller: the conversation engine behind the UI shell.
//!
//! Sequences the bootstrap and follow-up protocols, owns the session id, the
//! loading flag, the input draft and the history log. Backend failures never
//! escape as errors; they become a `system_error` entry in the history.
//!
//! The controller is shared by reference (`&self` everywhere) so the shell
//! can read `snapshot()` and `is_loading()` while a submission is in flight.
//! State sits behind a mutex that is never held across an await.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, trace, warn};

use parley_types::chat::{Entry, Message, SessionId};
use parley_types::error::{DispatchError, SessionError};
use parley_types::launch::LaunchContext;
use parley_types::profile::Profile;

use crate::backend::provider::PromptBackend;
use crate::chat::history::HistoryLog;

/// What happened to a submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The placeholder was replaced by the backend's answer.
    Answered,
    /// The placeholder was replaced by a `system_error` entry.
    Failed(DispatchError),
    /// The controller was disposed before the call completed; nothing changed.
    Dropped,
}

impl SubmitOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, SubmitOutcome::Answered)
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    session: Option<SessionId>,
    profile: Option<Profile>,
    loading: bool,
    history: HistoryLog,
    draft: String,
}

/// Drives one conversation with a [`PromptBackend`].
pub struct SessionController<B> {
    backend: B,
    launch: LaunchContext,
    state: Mutex<ControllerState>,
    disposed: CancellationToken,
}

impl<B: PromptBackend> SessionController<B> {
    pub fn new(backend: B, launch: LaunchContext) -> Self {
        Self {
            backend,
            launch,
            state: Mutex::new(ControllerState::default()),
            disposed: CancellationToken::new(),
        }
    }

    /// Submit the user profile to open the conversation.
    ///
    /// Allowed only while no session exists; a failed bootstrap may be
    /// retried with another call.
    pub async fn submit_profile(&self, profile: Profile) -> Result<SubmitOutcome, SessionError> {
        {
            let mut state = self.lock();
            self.ensure_idle(&state)?;
            if state.session.is_some() {
                return Err(SessionError::Validation(
                    "profile already submitted for this session".to_string(),
                ));
            }
            state.history.append(Entry::pending_assistant())?;
            state.loading = true;
        }
        let in_flight = InFlight::arm(self);

        let span = info_span!(
            "parley.bootstrap",
            campaign = self.launch.campaign_label(),
            age = profile.age(),
        );

        let call = self.backend.bootstrap(&profile).instrument(span);
        let result = tokio::select! {
            biased;
            () = self.disposed.cancelled() => return Ok(SubmitOutcome::Dropped),
            result = call => result,
        };

        self.settle(in_flight, result, |state, reply| {
            info!(session_id = %reply.session_id, "conversation opened");
            state.session = Some(reply.session_id);
            state.profile = Some(profile);
            Entry::assistant(reply.message)
        })
    }

    /// Send a follow-up message inside the open conversation.
    ///
    /// On success the draft is cleared; on failure it keeps `text` so the
    /// shell can offer a retry.
    pub async fn submit_message(&self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let session_id = {
            let mut state = self.lock();
            self.ensure_idle(&state)?;
            if text.trim().is_empty() {
                return Err(SessionError::Validation("message is empty".to_string()));
            }
            let Some(session_id) = state.session.clone() else {
                return Err(SessionError::Validation(
                    "no session yet: submit a profile first".to_string(),
                ));
            };

            state.history.append(Entry::user(text))?;
            state.history.append(Entry::pending_assistant())?;
            state.draft = text.to_string();
            state.loading = true;
            session_id
        };
        let in_flight = InFlight::arm(self);

        trace!(prompt = text, "sending follow-up");
        let span = info_span!(
            "parley.follow_up",
            campaign = self.launch.campaign_label(),
            session_id = %session_id,
        );

        let call = self.backend.follow_up(&session_id, text).instrument(span);
        let result = tokio::select! {
            biased;
            () = self.disposed.cancelled() => return Ok(SubmitOutcome::Dropped),
            result = call => result,
        };

        self.settle(in_flight, result, |state, reply| {
            state.draft.clear();
            Entry::assistant(reply.message)
        })
    }

    /// Apply a finished backend call to the history.
    ///
    /// `loading` is cleared before the placeholder is replaced so it is
    /// released even if the replacement reports an inconsistency.
    fn settle<T>(
        &self,
        in_flight: InFlight<'_>,
        result: Result<T, DispatchError>,
        accept: impl FnOnce(&mut ControllerState, T) -> Entry,
    ) -> Result<SubmitOutcome, SessionError> {
        in_flight.disarm();
        let mut state = self.lock();
        if self.disposed.is_cancelled() {
            debug!("controller disposed, dropping late completion");
            return Ok(SubmitOutcome::Dropped);
        }
        state.loading = false;

        match result {
            Ok(reply) => {
                let entry = accept(&mut *state, reply);
                state.history.replace_last(entry)?;
                Ok(SubmitOutcome::Answered)
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "backend call failed");
                state.history.replace_last(Entry::system_error())?;
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }

    fn ensure_idle(&self, state: &ControllerState) -> Result<(), SessionError> {
        if self.disposed.is_cancelled() {
            return Err(SessionError::Disposed);
        }
        if state.loading {
            return Err(SessionError::Busy);
        }
        Ok(())
    }
}

impl<B> SessionController<B> {
    /// Copy of the history in display order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().history.snapshot()
    }

    /// Whether a submission is in flight; the shell disables input while true.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.lock().session.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.lock().profile.clone()
    }

    pub fn launch(&self) -> &LaunchContext {
        &self.launch
    }

    /// Current contents of the input buffer.
    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().draft = text.into();
    }

    /// Tear the controller down. In-flight calls complete as
    /// [`SubmitOutcome::Dropped`] and later submissions are rejected.
    pub fn dispose(&self) {
        let _state = self.lock();
        self.disposed.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.is_cancelled()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Held across the backend await of a submission.
///
/// If the submission future is dropped before `settle` runs, the guard
/// releases `loading` and turns the placeholder into a `system_error` entry.
/// A disposed controller is left untouched.
struct InFlight<'a> {
    state: &'a Mutex<ControllerState>,
    disposed: &'a CancellationToken,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn arm<B>(controller: &'a SessionController<B>) -> Self {
        Self {
            state: &controller.state,
            disposed: &controller.disposed,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed || self.disposed.is_cancelled() {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.loading = false;
        warn!("submission abandoned before the backend answered");
        if let Err(err) = state.history.replace_last(Entry::system_error()) {
            warn!(error = %err, "could not close abandoned placeholder");
        }
    }
}
