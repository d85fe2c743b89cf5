//! Local draft store persisted as a JSON file inside a capability-scoped
//! directory.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::io;
use tracing::{debug, warn};

use crate::draft::{domain::DraftSnapshot, ports::LocalDraftStore};

/// Local draft store writing `<key>.json` inside one directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written snapshot.
#[derive(Debug)]
pub struct FileLocalDraftStore {
    dir: Dir,
    file_name: String,
    temp_name: String,
}

impl FileLocalDraftStore {
    /// Opens (creating if needed) `path` and stores snapshots under `key`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(path: impl AsRef<Utf8Path>, key: &str) -> io::Result<Self> {
        let dir_path = path.as_ref();
        Dir::create_ambient_dir_all(dir_path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(dir_path, ambient_authority())?;
        Ok(Self::from_dir(dir, key))
    }

    /// Wraps an already-opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir, key: &str) -> Self {
        Self {
            dir,
            file_name: format!("{key}.json"),
            temp_name: format!(".{key}.json.tmp"),
        }
    }

    /// Returns the snapshot file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn write_atomically(&self, contents: &[u8]) -> io::Result<()> {
        self.dir.write(&self.temp_name, contents)?;
        self.dir.rename(&self.temp_name, &self.dir, &self.file_name)
    }
}

impl LocalDraftStore for FileLocalDraftStore {
    fn save(&self, snapshot: &DraftSnapshot) {
        let encoded = match serde_json::to_vec_pretty(snapshot) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(file = %self.file_name, error = %err, "failed to encode draft snapshot");
                return;
            }
        };
        if let Err(err) = self.write_atomically(&encoded) {
            warn!(file = %self.file_name, error = %err, "failed to write draft snapshot");
        }
    }

    fn load(&self) -> Option<DraftSnapshot> {
        let raw = match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(file = %self.file_name, error = %err, "failed to read draft snapshot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(file = %self.file_name, error = %err, "ignoring unreadable draft snapshot");
                None
            }
        }
    }

    fn clear(&self) {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => debug!(file = %self.file_name, "cleared local draft snapshot"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(file = %self.file_name, error = %err, "failed to clear draft snapshot");
            }
        }
    }
}
