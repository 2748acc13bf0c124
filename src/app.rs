//! Application controller
//!
//! Owns the form session for one session scope, dispatches actions coming
//! from the host and mirrors every applied change to storage.

use tracing::{debug, info, warn};

use crate::state::{FieldUpdate, FormRecord, FormSession};
use crate::storage::{SessionId, SessionSnapshot, SessionStorage, StorageError};

/// A mutation requested by the host
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    SetCurrentStep(usize),
    UpdateStepValidation {
        step: usize,
        is_complete: bool,
        is_valid: bool,
    },
    UpdateField(FieldUpdate),
    UpdateFormData(FormRecord),
    NextStep,
    PrevStep,
    ResetForm,
}

/// Whether an action changed the session or was silently dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Ignored,
}

impl From<bool> for ActionOutcome {
    fn from(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::Ignored
        }
    }
}

pub struct App<S: SessionStorage> {
    session_id: SessionId,
    session: FormSession,
    storage: S,
    restored: bool,
}

impl<S: SessionStorage> App<S> {
    /// Open a session scope, restoring its snapshot when one is usable
    ///
    /// An absent, unreadable or incompatible snapshot yields a fresh session.
    pub fn open(session_id: SessionId, storage: S) -> Self {
        let restored = match storage.load(session_id) {
            Ok(Some(snapshot)) => match snapshot.restore(session_id) {
                Ok(session) => {
                    debug!(%session_id, step = session.current_step(), "restored session");
                    Some(session)
                }
                Err(err) => {
                    warn!(%session_id, error = %err, "discarding incompatible snapshot");
                    None
                }
            },
            Ok(None) => {
                info!(%session_id, "no snapshot stored, starting fresh");
                None
            }
            Err(err) => {
                warn!(%session_id, error = %err, "could not read snapshot, starting fresh");
                None
            }
        };

        Self {
            session_id,
            restored: restored.is_some(),
            session: restored.unwrap_or_default(),
            storage,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// True when the session came from a stored snapshot
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    pub fn apply(&mut self, action: SessionAction) -> ActionOutcome {
        let outcome = match action {
            SessionAction::SetCurrentStep(step) => self.session.set_current_step(step).into(),
            SessionAction::UpdateStepValidation {
                step,
                is_complete,
                is_valid,
            } => self
                .session
                .update_step_validation(step, is_complete, is_valid)
                .into(),
            SessionAction::UpdateField(update) => {
                debug!(field = %update.field_id(), "field updated");
                self.session.update_field(update);
                ActionOutcome::Applied
            }
            SessionAction::UpdateFormData(record) => {
                self.session.update_form_data(record);
                ActionOutcome::Applied
            }
            SessionAction::NextStep => self.session.next_step().into(),
            SessionAction::PrevStep => self.session.prev_step().into(),
            SessionAction::ResetForm => {
                self.session.reset_form();
                info!(session_id = %self.session_id, "form reset");
                ActionOutcome::Applied
            }
        };

        if outcome == ActionOutcome::Applied {
            self.persist();
        }
        outcome
    }

    /// Write the current session to storage (best-effort)
    pub fn persist(&self) {
        let snapshot = SessionSnapshot::capture(self.session_id, &self.session);
        if let Err(err) = self.storage.save(&snapshot) {
            warn!(session_id = %self.session_id, error = %err, "failed to mirror session");
        }
    }

    /// End the session scope and drop its stored snapshot
    pub fn end(self) -> Result<(), StorageError> {
        info!(session_id = %self.session_id, "ending session");
        self.storage.clear(self.session_id)
    }
}
