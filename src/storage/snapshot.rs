//! Serialized form of a session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::SnapshotError;
use crate::state::{FormRecord, FormSession, StepValidation, MAX_STEPS};

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Key of one session scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Session fields as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_step: usize,
    pub max_steps: usize,
    #[serde(default)]
    pub step_validations: Vec<Option<StepValidation>>,
    #[serde(default)]
    pub form_data: FormRecord,
}

/// Everything needed to bring a session back after a reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub version: u32,
    pub session_id: SessionId,
    pub saved_at: DateTime<Utc>,
    pub state: SessionState,
}

impl SessionSnapshot {
    pub fn capture(session_id: SessionId, session: &FormSession) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            session_id,
            saved_at: Utc::now(),
            state: SessionState {
                current_step: session.current_step(),
                max_steps: session.max_steps(),
                step_validations: session.step_validations().to_vec(),
                form_data: session.form_data().clone(),
            },
        }
    }

    /// Rebuild the session, rejecting snapshots that do not fit this build
    pub fn restore(self, expected: SessionId) -> Result<FormSession, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        if self.session_id != expected {
            return Err(SnapshotError::SessionMismatch {
                expected,
                found: self.session_id,
            });
        }
        if self.state.max_steps != MAX_STEPS {
            return Err(SnapshotError::StepCountMismatch {
                found: self.state.max_steps,
            });
        }

        let SessionState {
            current_step,
            step_validations,
            form_data,
            ..
        } = self.state;
        FormSession::from_parts(current_step, step_validations, form_data)
            .ok_or(SnapshotError::StepOutOfRange(current_step))
    }
}
