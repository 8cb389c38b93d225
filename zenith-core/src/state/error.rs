use thiserror::Error;

/// Edge validation failures. A rejected transform leaves the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: &'static str, name: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("At least one note category must remain")]
    LastCategory,

    #[error("At least one instrument must remain")]
    LastInstrument,

    #[error("Invalid weekday {0}. Use 0 (Sunday) to 6 (Saturday)")]
    InvalidDay(u8),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("Invalid time '{0}'. Use HH:MM")]
    InvalidTime(String),
}
