use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use super::collaborators::{LocalStore, ProfileStore, SessionProvider};
use super::scheduler::{CoalescingScheduler, Dispatch};
use crate::models::AppState;
use crate::state::{merge_onto_default, StateStore};

/// Quiet period before a burst of mutations is written remotely.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub debounce: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Where the document installed by [`SyncManager::load_for_user`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No remote row existed; a default one was created.
    New,
    /// The remote row was merged onto defaults.
    Existing,
    /// The remote read failed; the local copy was used.
    LocalFallback,
    /// The remote read failed and there was no local copy.
    Defaults,
    /// The session ended while loading; nothing was installed.
    Discarded,
}

/// Authentication state changes reported by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession(Option<String>),
    SignedIn(String),
    TokenRefreshed(String),
    SignedOut,
}

impl AuthEvent {
    /// The user the event leaves signed in, if any.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthEvent::InitialSession(user_id) => user_id.as_deref(),
            AuthEvent::SignedIn(user_id) | AuthEvent::TokenRefreshed(user_id) => Some(user_id),
            AuthEvent::SignedOut => None,
        }
    }
}

struct PendingCommit {
    generation: u64,
    state: Arc<AppState>,
}

struct RemoteCommitter {
    store: Arc<StateStore>,
    profiles: Arc<dyn ProfileStore>,
    sessions: Arc<dyn SessionProvider>,
}

impl RemoteCommitter {
    async fn commit(&self, state: &AppState) {
        let Some(user_id) = self.sessions.current_user_id().await else {
            tracing::debug!("No active session, skipping remote commit");
            return;
        };

        match self.profiles.upsert_profile(&user_id, state, Utc::now()).await {
            Ok(()) => tracing::debug!("Committed state for {}", user_id),
            Err(e) => tracing::error!("Failed to commit state for {}: {}", user_id, e),
        }
    }
}

#[async_trait]
impl Dispatch<PendingCommit> for RemoteCommitter {
    async fn dispatch(&self, pending: PendingCommit) {
        if pending.generation != self.store.generation() {
            tracing::debug!("Dropping commit from an ended session");
            return;
        }
        self.commit(&pending.state).await;
    }
}

/// Keeps the in-memory document, the local fallback copy and the remote
/// profile row in step for one signed-in user at a time.
pub struct SyncManager {
    store: Arc<StateStore>,
    remote: Arc<RemoteCommitter>,
    local: Arc<dyn LocalStore>,
    scheduler: CoalescingScheduler<PendingCommit>,
}

impl SyncManager {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        sessions: Arc<dyn SessionProvider>,
        local: Arc<dyn LocalStore>,
        options: SyncOptions,
    ) -> Self {
        let store = Arc::new(StateStore::default());
        let remote = Arc::new(RemoteCommitter {
            store: Arc::clone(&store),
            profiles,
            sessions,
        });
        let scheduler =
            CoalescingScheduler::<PendingCommit>::new(options.debounce, remote.clone());
        Self {
            store,
            remote,
            local,
            scheduler,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<AppState> {
        self.store.snapshot()
    }

    /// Installs the document for `user_id`: the remote row if there is one,
    /// otherwise a freshly created default row, otherwise (remote
    /// unreachable) the local copy or defaults. Never fails.
    pub async fn load_for_user(&self, user_id: &str) -> LoadOutcome {
        let generation = self.store.begin_session();
        self.scheduler.cancel();

        let (mut state, outcome) = match self.remote.profiles.get_profile(user_id).await {
            Ok(Some(document)) => (merge_onto_default(document), LoadOutcome::Existing),
            Ok(None) => {
                let fresh = AppState::default();
                if let Err(e) = self.remote.profiles.create_profile(user_id, &fresh).await {
                    tracing::error!("Failed to create profile for {}: {}", user_id, e);
                }
                (fresh, LoadOutcome::New)
            }
            Err(e) => {
                tracing::warn!("Remote load failed for {}, trying local copy: {}", user_id, e);
                match self.read_local() {
                    Some(local) => (local, LoadOutcome::LocalFallback),
                    None => (AppState::default(), LoadOutcome::Defaults),
                }
            }
        };
        state.is_logged_in = true;

        match self.store.replace_if_current(state, generation) {
            Some(installed) => {
                self.commit_local(&installed);
                tracing::info!("Loaded state for {} ({:?})", user_id, outcome);
                outcome
            }
            None => {
                tracing::info!("Session changed while loading {}, discarding", user_id);
                LoadOutcome::Discarded
            }
        }
    }

    /// Writes the local fallback copy. Only signed-in documents are kept.
    pub fn commit_local(&self, state: &AppState) {
        if !state.is_logged_in {
            return;
        }
        let result = serde_json::to_string(state)
            .map_err(Into::into)
            .and_then(|json| self.local.write(&json));
        if let Err(e) = result {
            tracing::warn!("Failed to write local state: {}", e);
        }
    }

    /// Writes `state` to the current user's remote row right away.
    pub async fn commit_remote(&self, state: &AppState) {
        self.remote.commit(state).await;
    }

    /// Queues `state` for a debounced remote write under the current session.
    pub fn schedule_remote_commit(&self, state: Arc<AppState>) {
        self.schedule_for(state, self.store.generation());
    }

    /// Applies a mutation and persists the result.
    pub fn apply<F>(&self, transform: F) -> Arc<AppState>
    where
        F: FnOnce(&AppState) -> AppState,
    {
        match self.try_apply(|state| Ok::<_, Infallible>(transform(state))) {
            Ok(next) => next,
            Err(never) => match never {},
        }
    }

    /// Applies a fallible mutation. A rejected mutation changes and writes
    /// nothing.
    pub fn try_apply<F, E>(&self, transform: F) -> Result<Arc<AppState>, E>
    where
        F: FnOnce(&AppState) -> Result<AppState, E>,
    {
        let mut generation = 0;
        let next = self.store.try_apply(|state| {
            generation = self.store.generation();
            transform(state)
        })?;

        self.commit_local(&next);
        if next.is_logged_in {
            self.schedule_for(Arc::clone(&next), generation);
        }
        Ok(next)
    }

    /// Drops the signed-in document, keeping only the theme preference.
    pub fn reset_on_logout(&self) {
        self.scheduler.cancel();
        let theme = self.store.snapshot().theme;
        self.store.reset(AppState::signed_out(theme));
        tracing::info!("Signed out, state reset");
    }

    pub async fn handle_auth_event(&self, event: AuthEvent) -> Option<LoadOutcome> {
        match event.user_id() {
            Some(user_id) => Some(self.load_for_user(user_id).await),
            None => {
                self.reset_on_logout();
                None
            }
        }
    }

    /// Sends any pending remote write now and waits for it to finish.
    pub async fn flush(&self) {
        self.scheduler.flush().await;
    }

    pub fn has_pending_commit(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn schedule_for(&self, state: Arc<AppState>, generation: u64) {
        self.scheduler.schedule(PendingCommit { generation, state });
    }

    fn read_local(&self) -> Option<AppState> {
        match self.local.read() {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => Some(merge_onto_default(value)),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable local state: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read local state: {}", e);
                None
            }
        }
    }
}
