use chrono::NaiveDate;

use super::{not_found, required, time_of_day};
use crate::models::{generate_id, AppState, Reminder, WaterEntry};
use crate::state::ValidationError;

/// Adds `ml` to today's entry, creating it on the first drink of the day.
pub fn add_water(state: &AppState, today: NaiveDate, ml: u32) -> Result<AppState, ValidationError> {
    if ml == 0 {
        return Err(ValidationError::NotPositive("Amount"));
    }
    let mut next = state.clone();
    match next.water_history.iter_mut().find(|e| e.date == today) {
        Some(entry) => entry.amount = entry.amount.saturating_add(ml),
        None => next.water_history.push(WaterEntry::new(today, ml)),
    }
    Ok(next)
}

/// Zeroes today's entry. Other days are untouched.
pub fn reset_today(state: &AppState, today: NaiveDate) -> AppState {
    let mut next = state.clone();
    for entry in next.water_history.iter_mut().filter(|e| e.date == today) {
        entry.amount = 0;
    }
    next
}

pub fn toggle_reminder(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    let mut next = state.clone();
    let reminder = next
        .water_reminders
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found("Reminder", id))?;
    reminder.is_active = !reminder.is_active;
    Ok(next)
}

pub fn add_reminder(state: &AppState, time: &str, label: &str) -> Result<AppState, ValidationError> {
    let time = time_of_day(time)?;
    let label = required(label, "Reminder label")?;
    let mut next = state.clone();
    next.water_reminders
        .push(Reminder::new(generate_id(None), time, label, true));
    next.water_reminders.sort_by(|a, b| a.time.cmp(&b.time));
    Ok(next)
}

pub fn remove_reminder(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    if !state.water_reminders.iter().any(|r| r.id == id) {
        return Err(not_found("Reminder", id));
    }
    let mut next = state.clone();
    next.water_reminders.retain(|r| r.id != id);
    Ok(next)
}
