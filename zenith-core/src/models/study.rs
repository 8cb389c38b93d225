use serde::{Deserialize, Serialize};

/// Topic name recorded when a session or question log has no specific topic.
pub const GENERAL_TOPIC: &str = "Geral";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySubject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Running total of studied hours
    #[serde(default)]
    pub total_hours: f64,
}

impl StudySubject {
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }
}

/// A timed study session. Sessions are only appended (newest first) or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub topic_name: String,
    #[serde(deserialize_with = "super::lenient_u32")]
    pub duration_minutes: u32,
    /// Epoch milliseconds
    pub date: i64,
}

/// Number of practice questions answered for a subject/topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionLog {
    pub id: String,
    pub subject_id: String,
    pub subject_name: String,
    pub topic_name: String,
    #[serde(deserialize_with = "super::lenient_u32")]
    pub count: u32,
    /// Epoch milliseconds
    pub date: i64,
}
