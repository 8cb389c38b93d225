//! Zenith Core Library
//!
//! State model, sync policy, derived views and the daily quote cache shared by
//! Zenith front ends.

pub mod models;
pub mod quote;
pub mod state;
pub mod sync;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use models::{
    AppState, ChecklistItem, Meal, MealSlot, MusicSession, Note, NoteLink, Priority, QuestionLog,
    Reminder, StudySession, StudySubject, Task, Theme, Topic, UserProfile, WaterEntry,
};
pub use quote::{
    study_advice, CachedQuote, GenerationError, GenerationOptions, QuoteCache, TextGenerator,
};
pub use state::{merge_onto_default, StateStore, ValidationError};
pub use sync::{
    AuthEvent, CoalescingScheduler, Dispatch, FileLocalStore, LoadOutcome, LocalStore,
    LocalStoreError, ProfileError, ProfileStore, SessionProvider, SyncManager, SyncOptions,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
