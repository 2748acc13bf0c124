//! Trait abstraction for snapshot storage to enable mocking in tests

use super::{SessionId, SessionSnapshot, StorageError};

/// Host storage holding one snapshot per session scope
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage {
    /// Read the snapshot for a session, `None` if nothing was stored yet
    fn load(&self, session_id: SessionId) -> Result<Option<SessionSnapshot>, StorageError>;

    /// Replace the stored snapshot for `snapshot.session_id`
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError>;

    /// Forget a session; clearing an unknown session is not an error
    fn clear(&self, session_id: SessionId) -> Result<(), StorageError>;
}
