//! Final save on interrupt
//!
//! The game loop publishes every snapshot it saves. If the process is asked
//! to stop (Ctrl-C, SIGTERM) the handler writes the last published snapshot
//! and exits. Both writers go through the same lock.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PigError;
use crate::persistence::{PersistenceStore, Snapshot};

/// Exit status after an interrupt, as a shell reports SIGINT
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Shared latest snapshot plus the store it belongs in
#[derive(Debug, Clone)]
pub struct SaveHook {
    store: PersistenceStore,
    latest: Arc<Mutex<Option<Snapshot>>>,
}

impl SaveHook {
    pub fn new(store: PersistenceStore) -> Self {
        Self {
            store,
            latest: Arc::new(Mutex::new(None)),
        }
    }

    pub fn store(&self) -> &PersistenceStore {
        &self.store
    }

    /// Register the process interrupt handler (once per process)
    pub fn install(&self) -> Result<(), PigError> {
        let hook = self.clone();
        ctrlc::set_handler(move || {
            log::info!("Interrupted, saving game");
            if let Err(e) = hook.flush() {
                log::error!("Final save failed: {e}");
            }
            std::process::exit(INTERRUPTED_EXIT_CODE);
        })?;
        Ok(())
    }

    /// Record `snapshot` as the latest state and save it
    pub fn publish(&self, snapshot: Snapshot) -> Result<(), PigError> {
        let mut latest = self.lock();
        self.store.save(&snapshot)?;
        *latest = Some(snapshot);
        Ok(())
    }

    /// Save the latest published snapshot, if any
    pub fn flush(&self) -> Result<(), PigError> {
        let latest = self.lock();
        match latest.as_ref() {
            Some(snapshot) => self.store.save(snapshot),
            None => Ok(()),
        }
    }

    /// Forget the snapshot and delete the record; later flushes are no-ops
    pub fn finish(&self) -> Result<(), PigError> {
        let mut latest = self.lock();
        *latest = None;
        self.store.delete()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Snapshot>> {
        // a panic while holding the lock cannot leave a half-written snapshot
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::tests::temp_store;
    use crate::sim::{GameConfig, GameState};

    fn snapshot(score: u32) -> Snapshot {
        let config = GameConfig::new(2).unwrap();
        let mut state = GameState::new(&config);
        state.scores[0] = score;
        Snapshot::new(config, state)
    }

    #[test]
    fn test_flush_without_publish_writes_nothing() {
        let hook = SaveHook::new(temp_store("hook_empty"));
        hook.flush().unwrap();
        assert!(!hook.store().exists());
    }

    #[test]
    fn test_publish_saves_and_flush_rewrites() {
        let hook = SaveHook::new(temp_store("hook_publish"));
        hook.publish(snapshot(3)).unwrap();
        assert_eq!(hook.store().load().unwrap(), Some(snapshot(3)));

        hook.store().delete().unwrap();
        hook.flush().unwrap();
        assert_eq!(hook.store().load().unwrap(), Some(snapshot(3)));
        hook.store().delete().unwrap();
    }

    #[test]
    fn test_finish_disarms_flush() {
        let hook = SaveHook::new(temp_store("hook_finish"));
        hook.publish(snapshot(12)).unwrap();
        hook.finish().unwrap();
        assert!(!hook.store().exists());

        hook.flush().unwrap();
        assert!(!hook.store().exists());
    }

    #[test]
    fn test_clones_share_snapshot() {
        let hook = SaveHook::new(temp_store("hook_clone"));
        let handler_side = hook.clone();
        hook.publish(snapshot(5)).unwrap();
        hook.store().delete().unwrap();

        handler_side.flush().unwrap();
        assert_eq!(hook.store().load().unwrap(), Some(snapshot(5)));
        hook.store().delete().unwrap();
    }
}
