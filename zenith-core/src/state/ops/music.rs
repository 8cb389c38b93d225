use super::{not_found, required};
use crate::models::{generate_id, AppState, MusicSession};
use crate::state::ValidationError;

pub fn add_music_session(
    state: &AppState,
    instrument: &str,
    minutes: u32,
    notes: &str,
    now_ms: i64,
) -> Result<AppState, ValidationError> {
    let instrument = required(instrument, "Instrument")?;
    if minutes == 0 {
        return Err(ValidationError::NotPositive("Duration"));
    }
    let mut next = state.clone();
    next.music_sessions.insert(
        0,
        MusicSession {
            id: generate_id(None),
            instrument,
            duration: minutes,
            date: now_ms,
            notes: notes.trim().to_string(),
        },
    );
    Ok(next)
}

pub fn delete_music_session(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    if !state.music_sessions.iter().any(|s| s.id == id) {
        return Err(not_found("Music session", id));
    }
    let mut next = state.clone();
    next.music_sessions.retain(|s| s.id != id);
    Ok(next)
}

pub fn add_instrument(state: &AppState, name: &str) -> Result<AppState, ValidationError> {
    let name = required(name, "Instrument name")?;
    if state.music_instruments.contains(&name) {
        return Err(ValidationError::Duplicate {
            kind: "Instrument",
            name,
        });
    }
    let mut next = state.clone();
    next.music_instruments.push(name);
    Ok(next)
}

/// Removes an instrument; the last remaining one cannot be removed.
/// Logged sessions keep the instrument name they were recorded with.
pub fn delete_instrument(state: &AppState, name: &str) -> Result<AppState, ValidationError> {
    if !state.music_instruments.iter().any(|i| i == name) {
        return Err(not_found("Instrument", name));
    }
    if state.music_instruments.len() <= 1 {
        return Err(ValidationError::LastInstrument);
    }
    let mut next = state.clone();
    next.music_instruments.retain(|i| i != name);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_delete_session() {
        let state = add_music_session(&AppState::default(), "Piano", 45, " escalas ", 7).unwrap();
        assert_eq!(state.music_sessions[0].duration, 45);
        assert_eq!(state.music_sessions[0].notes, "escalas");

        let id = state.music_sessions[0].id.clone();
        let state = delete_music_session(&state, &id).unwrap();
        assert!(state.music_sessions.is_empty());
    }

    #[test]
    fn test_zero_minutes_rejected() {
        assert!(add_music_session(&AppState::default(), "Piano", 0, "", 0).is_err());
    }

    #[test]
    fn test_last_instrument_cannot_be_removed() {
        let mut state = AppState::default();
        state.music_instruments = vec!["Voz".into(), "Piano".into()];

        let state = delete_instrument(&state, "Piano").unwrap();
        assert_eq!(
            delete_instrument(&state, "Voz"),
            Err(ValidationError::LastInstrument)
        );
        assert_eq!(state.music_instruments, vec!["Voz".to_string()]);
    }

    #[test]
    fn test_add_instrument_rejects_duplicate() {
        assert!(add_instrument(&AppState::default(), "Piano").is_err());
        let state = add_instrument(&AppState::default(), "Ukulele").unwrap();
        assert_eq!(state.music_instruments.last().unwrap(), "Ukulele");
    }
}
