//! State transforms.
//!
//! Every operation takes the current snapshot and returns the next one; none
//! of them touch persistence. Fallible operations reject edge input with a
//! [`ValidationError`] and produce no new state.

mod meals;
mod music;
mod notes;
mod settings;
mod study;
mod tasks;
mod water;

pub use meals::{add_manual_item, remove_manual_item_at, remove_manual_item_named, update_meal};
pub use music::{add_instrument, add_music_session, delete_instrument, delete_music_session};
pub use notes::{
    add_category, delete_category, delete_note, save_note, toggle_pin, NoteDraft,
};
pub use settings::{set_avatar, set_theme, set_user_name, set_water_goal, toggle_theme};
pub use study::{
    add_subject, add_topic, delete_study_log, delete_subject, delete_topic, log_questions,
    log_study_session, StudyLogKind,
};
pub use tasks::{add_task, delete_task, toggle_task};
pub use water::{add_reminder, add_water, remove_reminder, reset_today, toggle_reminder};

use chrono::NaiveTime;

use super::ValidationError;

/// Trims `value`, rejecting it when nothing is left.
fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn not_found(kind: &'static str, id: &str) -> ValidationError {
    ValidationError::NotFound {
        kind,
        id: id.to_string(),
    }
}

/// Normalizes a time of day to zero-padded HH:MM.
fn time_of_day(value: &str) -> Result<String, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}
