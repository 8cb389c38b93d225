use super::{not_found, required};
use crate::models::{generate_id, AppState, Note, NoteLink};
use crate::state::ValidationError;

/// Editable note fields. Pin state and creation time are owned by the note.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Defaults to the first category when unset
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub links: Vec<NoteLink>,
}

/// Creates a note (when `editing` is `None`) or replaces the editable fields
/// of an existing one, keeping its pin state and creation time.
pub fn save_note(
    state: &AppState,
    editing: Option<&str>,
    draft: NoteDraft,
    now_ms: i64,
) -> Result<AppState, ValidationError> {
    let title = required(&draft.title, "Note title")?;
    let category = match draft.category {
        Some(c) => {
            let c = c.trim().to_string();
            if !state.note_categories.contains(&c) {
                return Err(not_found("Category", &c));
            }
            c
        }
        None => state
            .note_categories
            .first()
            .cloned()
            .ok_or(ValidationError::LastCategory)?,
    };

    let mut next = state.clone();
    match editing {
        Some(id) => {
            let note = next
                .notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| not_found("Note", id))?;
            note.title = title;
            note.content = draft.content;
            note.category = category;
            note.image_url = draft.image_url;
            note.links = draft.links;
        }
        None => {
            let note = Note {
                id: generate_id(None),
                title,
                content: draft.content,
                category,
                is_pinned: false,
                created_at: now_ms,
                image_url: draft.image_url,
                links: draft.links,
                checklist: Vec::new(),
            };
            next.notes.insert(0, note);
        }
    }
    Ok(next)
}

pub fn delete_note(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    if !state.notes.iter().any(|n| n.id == id) {
        return Err(not_found("Note", id));
    }
    let mut next = state.clone();
    next.notes.retain(|n| n.id != id);
    Ok(next)
}

pub fn toggle_pin(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    let mut next = state.clone();
    let note = next
        .notes
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or_else(|| not_found("Note", id))?;
    note.is_pinned = !note.is_pinned;
    Ok(next)
}

pub fn add_category(state: &AppState, name: &str) -> Result<AppState, ValidationError> {
    let name = required(name, "Category name")?;
    if state.note_categories.contains(&name) {
        return Err(ValidationError::Duplicate {
            kind: "Category",
            name,
        });
    }
    let mut next = state.clone();
    next.note_categories.push(name);
    Ok(next)
}

/// Removes a category. The last remaining category cannot be removed; notes
/// filed under the removed one move to the first remaining category.
pub fn delete_category(state: &AppState, name: &str) -> Result<AppState, ValidationError> {
    if !state.note_categories.iter().any(|c| c == name) {
        return Err(not_found("Category", name));
    }
    if state.note_categories.len() <= 1 {
        return Err(ValidationError::LastCategory);
    }
    let mut next = state.clone();
    next.note_categories.retain(|c| c != name);
    if let Some(fallback) = next.note_categories.first().cloned() {
        for note in next.notes.iter_mut().filter(|n| n.category == name) {
            note.category = fallback.clone();
        }
    }
    Ok(next)
}
