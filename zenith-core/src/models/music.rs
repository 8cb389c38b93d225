use serde::{Deserialize, Serialize};

/// One logged instrument practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicSession {
    pub id: String,
    pub instrument: String,
    /// Minutes practiced
    #[serde(deserialize_with = "super::lenient_u32")]
    pub duration: u32,
    /// Epoch milliseconds
    pub date: i64,
    #[serde(default)]
    pub notes: String,
}
