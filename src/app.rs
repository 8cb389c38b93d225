//! Per-invocation application context: the signed-in session and the sync
//! manager holding that user's state.

use chrono::{Local, NaiveDate, Utc};
use std::error::Error;
use std::sync::Arc;

use crate::config::Config;
use crate::remote::{AuthError, GeminiClient, SupabaseClient};
use crate::session::{Session, SessionStore};
use zenith_core::{AppState, FileLocalStore, LoadOutcome, SyncManager, SyncOptions};

pub struct App {
    session: Session,
    manager: SyncManager,
    outcome: LoadOutcome,
}

impl App {
    /// Opens the stored session, refreshing its token when close to expiry,
    /// and loads the user's state.
    pub async fn open(config: &Config) -> Result<Self, Box<dyn Error>> {
        let sessions = SessionStore::new(config.data_dir.value.clone());
        let mut session = sessions.load()?.ok_or(AuthError::NotLoggedIn)?;

        if session.needs_refresh() {
            let client = supabase(config);
            match client.refresh(&session).await {
                Ok(refreshed) => {
                    sessions.save(&refreshed)?;
                    session = refreshed;
                }
                Err(AuthError::HttpError(e)) => {
                    // Offline: keep the stale token, loading falls back to the local copy
                    tracing::warn!("Could not refresh session: {}", e);
                }
                Err(e) => {
                    tracing::warn!("Session refresh rejected: {}", e);
                    return Err(AuthError::SessionExpired.into());
                }
            }
        }

        Ok(Self::with_session(config, session).await)
    }

    /// Loads state for an already established session.
    pub async fn with_session(config: &Config, session: Session) -> Self {
        let data_dir = config.data_dir.value.clone();
        let profiles = supabase(config).with_access_token(&session.access_token);
        let manager = SyncManager::new(
            Arc::new(profiles),
            Arc::new(SessionStore::new(data_dir.clone())),
            Arc::new(FileLocalStore::new(data_dir)),
            SyncOptions {
                debounce: config.debounce(),
            },
        );

        let outcome = manager.load_for_user(&session.user_id).await;
        match outcome {
            LoadOutcome::LocalFallback => {
                eprintln!("Warning: working offline from the local copy.")
            }
            LoadOutcome::Defaults => {
                eprintln!("Warning: could not reach the server; starting from defaults.")
            }
            _ => {}
        }

        Self {
            session,
            manager,
            outcome,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn outcome(&self) -> LoadOutcome {
        self.outcome
    }

    pub fn state(&self) -> Arc<AppState> {
        self.manager.snapshot()
    }

    pub fn apply<F>(&self, transform: F) -> Arc<AppState>
    where
        F: FnOnce(&AppState) -> AppState,
    {
        self.manager.apply(transform)
    }

    pub fn try_apply<F, E>(&self, transform: F) -> Result<Arc<AppState>, E>
    where
        F: FnOnce(&AppState) -> Result<AppState, E>,
    {
        self.manager.try_apply(transform)
    }

    /// Sends the pending remote write before the process exits.
    pub async fn finish(self) {
        self.manager.flush().await;
    }
}

pub fn supabase(config: &Config) -> SupabaseClient {
    SupabaseClient::new(&config.supabase_url.value, &config.supabase_key.value)
}

pub fn gemini(config: &Config) -> GeminiClient {
    GeminiClient::new(
        config.gemini_api_key.value.clone(),
        &config.gemini_model.value,
    )
}

/// Calendar-day key for water and task records, taken in UTC so documents
/// agree on "today" with the other clients of the same profile row.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Day the cached quote belongs to. The quote turns over at local midnight.
pub fn quote_day() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_utc_date() {
        let before = Utc::now().date_naive();
        let day = today();
        let after = Utc::now().date_naive();
        assert!(day == before || day == after);
    }

    #[test]
    fn test_quote_day_is_local_date() {
        let before = Local::now().date_naive();
        let day = quote_day();
        let after = Local::now().date_naive();
        assert!(day == before || day == after);
    }
}
