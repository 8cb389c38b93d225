use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::models::AppState;

/// Owner of the single state document.
///
/// Readers only ever see committed snapshots; every mutation goes through
/// [`StateStore::apply`] (or [`StateStore::try_apply`]) which reads the latest
/// snapshot and publishes a new one in one step.
///
/// The session generation changes whenever the document is swapped for a
/// different session (login, logout), so work captured under an older
/// generation can be recognised as stale.
#[derive(Debug)]
pub struct StateStore {
    current: RwLock<Arc<AppState>>,
    generation: AtomicU64,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl StateStore {
    pub fn new(state: AppState) -> Self {
        Self {
            current: RwLock::new(Arc::new(state)),
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the last committed snapshot.
    pub fn snapshot(&self) -> Arc<AppState> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Builds a new snapshot from the latest one and publishes it.
    pub fn apply<F>(&self, transform: F) -> Arc<AppState>
    where
        F: FnOnce(&AppState) -> AppState,
    {
        let mut guard = self.write();
        let next = Arc::new(transform(&guard));
        *guard = Arc::clone(&next);
        next
    }

    /// Like [`apply`](Self::apply), but a rejected transform publishes nothing.
    pub fn try_apply<F, E>(&self, transform: F) -> Result<Arc<AppState>, E>
    where
        F: FnOnce(&AppState) -> Result<AppState, E>,
    {
        let mut guard = self.write();
        let next = Arc::new(transform(&guard)?);
        *guard = Arc::clone(&next);
        Ok(next)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Starts a new session generation and returns it.
    pub fn begin_session(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replaces the document under a new session generation.
    pub fn reset(&self, state: AppState) -> u64 {
        let mut guard = self.write();
        let generation = self.begin_session();
        *guard = Arc::new(state);
        generation
    }

    /// Publishes `state` only if no other session started since `generation`.
    pub fn replace_if_current(&self, state: AppState, generation: u64) -> Option<Arc<AppState>> {
        let mut guard = self.write();
        if self.generation() != generation {
            return None;
        }
        let next = Arc::new(state);
        *guard = Arc::clone(&next);
        Some(next)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<AppState>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}
