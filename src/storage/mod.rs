//! Session-scoped snapshot storage
//!
//! The form session is mirrored to storage after every applied mutation and
//! read back when the same session is opened again.

mod error;
mod file;
mod snapshot;
mod traits;

pub use error::{SnapshotError, StorageError};
pub use file::FileSessionStorage;
pub use snapshot::{SessionId, SessionSnapshot};
pub use traits::SessionStorage;

#[cfg(test)]
pub use traits::MockSessionStorage;
