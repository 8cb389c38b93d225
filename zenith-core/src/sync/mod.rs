//! State synchronization.
//!
//! [`SyncManager`] owns the state store for a session. It reconciles the
//! remote document on login, writes the local fallback copy after every
//! mutation and coalesces remote writes through a [`CoalescingScheduler`].
//!
//! ## Degradation
//!
//! Nothing here is fatal. Remote read failures fall back to the local copy and
//! then to defaults; remote write failures are logged and retried implicitly
//! by the next mutation's commit.

mod collaborators;
mod error;
mod local;
mod manager;
mod scheduler;

pub use collaborators::{LocalStore, ProfileStore, SessionProvider};
pub use error::{LocalStoreError, ProfileError};
pub use local::{FileLocalStore, STORAGE_KEY};
pub use manager::{AuthEvent, LoadOutcome, SyncManager, SyncOptions, DEFAULT_DEBOUNCE};
pub use scheduler::{CoalescingScheduler, Dispatch};
