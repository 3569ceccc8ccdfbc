//! The single on-disk record

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::record::Snapshot;
use crate::error::PigError;

/// Save, load and delete the game record at a fixed path
#[derive(Debug, Clone)]
pub struct PersistenceStore {
    path: PathBuf,
}

impl PersistenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a game is in progress
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the record, `None` if there is no game in progress
    pub fn load(&self) -> Result<Option<Snapshot>, PigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No record at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = Snapshot::decode(&text)?;
        log::info!(
            "Loaded record for {} players from {}",
            snapshot.config.player_count(),
            self.path.display()
        );
        Ok(Some(snapshot))
    }

    /// Replace the record with `snapshot`
    ///
    /// Written to a sibling temp file and renamed into place, so a reader
    /// sees either the old record or the new one.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), PigError> {
        let tmp = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(snapshot.encode().as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        log::debug!(
            "Saved record (player {}, scores {:?})",
            snapshot.state.current_player + 1,
            snapshot.state.scores
        );
        Ok(())
    }

    /// Remove the record; a missing record is not an error
    pub fn delete(&self) -> Result<(), PigError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Deleted record {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::sim::{GameConfig, GameState};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Store backed by a unique file in the temp directory
    pub(crate) fn temp_store(tag: &str) -> PersistenceStore {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "pig_{}_{}_{}.txt",
            tag,
            std::process::id(),
            n
        ));
        let _ = fs::remove_file(&path);
        PersistenceStore::new(path)
    }

    fn sample() -> Snapshot {
        let config = GameConfig::new(3).unwrap();
        let mut state = GameState::new(&config);
        state.scores = vec![4, 9, 0];
        state.current_player = 1;
        state.current_roll = 3;
        state.turn_accumulator = 8;
        Snapshot::new(config, state)
    }

    #[test]
    fn test_load_absent() {
        let store = temp_store("absent");
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let store = temp_store("roundtrip");
        let snap = sample();
        store.save(&snap).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), Some(snap));
        store.delete().unwrap();
    }

    #[test]
    fn test_save_overwrites() {
        let store = temp_store("overwrite");
        let mut snap = sample();
        store.save(&snap).unwrap();
        snap.state.scores[2] = 6;
        snap.state.turn_over = true;
        store.save(&snap).unwrap();
        assert_eq!(store.load().unwrap(), Some(snap));
        assert!(!store.tmp_path().exists());
        store.delete().unwrap();
    }

    #[test]
    fn test_delete_removes_record() {
        let store = temp_store("delete");
        store.save(&sample()).unwrap();
        store.delete().unwrap();
        assert!(!store.exists());
        // second delete is a no-op
        store.delete().unwrap();
    }

    #[test]
    fn test_malformed_record_is_fatal() {
        let store = temp_store("malformed");
        fs::write(store.path(), "2\n0\nseven\n").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            PigError::Record(RecordError::InvalidField { field: "score", .. })
        ));
        // the broken record is left for the operator
        assert!(store.exists());
        store.delete().unwrap();
    }
}
