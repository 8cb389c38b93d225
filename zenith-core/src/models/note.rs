use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLink {
    pub label: String,
    pub url: String,
}

impl NoteLink {
    /// Builds a link, prefixing `https://` when the url carries no http(s) scheme.
    pub fn new(label: impl Into<String>, url: &str) -> Self {
        let url = url.trim();
        let lower = url.to_lowercase();
        let url = if lower.starts_with("http://") || lower.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        };
        Self {
            label: label.into().trim().to_string(),
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub completed: bool,
}

/// A free-form note filed under one of the note categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub is_pinned: bool,
    /// Creation time, epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
    /// Opaque image reference handed over by the attachment collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub links: Vec<NoteLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<ChecklistItem>,
}
