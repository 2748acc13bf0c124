//! File-backed snapshot storage: one JSON file per session

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{SessionId, SessionSnapshot, SessionStorage, StorageError};

/// Stores `<session-id>.json` files under a single directory
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, session_id: SessionId) -> PathBuf {
        self.dir.join(format!("{session_id}.json"))
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self, session_id: SessionId) -> Result<Option<SessionSnapshot>, StorageError> {
        let path = self.snapshot_path(session_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Decode { path, source })
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let path = self.snapshot_path(snapshot.session_id);
        let content = serde_json::to_string_pretty(snapshot).map_err(StorageError::Encode)?;
        atomic_write(&path, content.as_bytes()).map_err(|source| StorageError::Io { path, source })
    }

    fn clear(&self, session_id: SessionId) -> Result<(), StorageError> {
        let path = self.snapshot_path(session_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// Write to `{path}.tmp`, flush, then rename over `path` so a crash mid-write
/// leaves the previous snapshot intact.
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldUpdate, FormSession};
    use pretty_assertions::assert_eq;

    fn storage() -> (tempfile::TempDir, FileSessionStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("sessions"));
        (dir, storage)
    }

    fn snapshot(session_id: SessionId) -> SessionSnapshot {
        let mut session = FormSession::new();
        session.update_field(FieldUpdate::County("Cook".to_string()));
        session.update_step_validation(0, true, true);
        SessionSnapshot::capture(session_id, &session)
    }

    #[test]
    fn test_load_missing_returns_none() {
        let (_dir, storage) = storage();
        assert!(storage.load(SessionId::new()).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, storage) = storage();
        let id = SessionId::new();
        let saved = snapshot(id);

        storage.save(&saved).unwrap();

        assert_eq!(storage.load(id).unwrap(), Some(saved));
        assert!(!storage.dir().join(format!("{id}.json.tmp")).exists());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let (_dir, storage) = storage();
        let first = SessionId::new();
        storage.save(&snapshot(first)).unwrap();

        assert!(storage.load(SessionId::new()).unwrap().is_none());
        assert!(storage.load(first).unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites() {
        let (_dir, storage) = storage();
        let id = SessionId::new();
        storage.save(&snapshot(id)).unwrap();

        let newer = SessionSnapshot::capture(id, &FormSession::new());
        storage.save(&newer).unwrap();

        assert_eq!(storage.load(id).unwrap(), Some(newer));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let (_dir, storage) = storage();
        let id = SessionId::new();
        fs::create_dir_all(storage.dir()).unwrap();
        fs::write(storage.dir().join(format!("{id}.json")), "{ not json").unwrap();

        let result = storage.load(id);
        assert!(matches!(result, Err(StorageError::Decode { .. })));
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let (_dir, storage) = storage();
        let id = SessionId::new();
        storage.save(&snapshot(id)).unwrap();

        storage.clear(id).unwrap();

        assert!(storage.load(id).unwrap().is_none());
    }

    #[test]
    fn test_clear_unknown_session_is_ok() {
        let (_dir, storage) = storage();
        assert!(storage.clear(SessionId::new()).is_ok());
    }
}
