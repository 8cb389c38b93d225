//! In-memory state document: the single-updater store, load-time
//! reconciliation and the pure transforms applied through the store.

mod error;
pub mod ops;
mod reconcile;
mod store;

pub use error::ValidationError;
pub use reconcile::merge_onto_default;
pub use store::StateStore;
