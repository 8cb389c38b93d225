use super::required;
use crate::models::{AppState, Theme};
use crate::state::ValidationError;

pub fn toggle_theme(state: &AppState) -> AppState {
    set_theme(state, state.theme.toggled())
}

pub fn set_theme(state: &AppState, theme: Theme) -> AppState {
    AppState {
        theme,
        ..state.clone()
    }
}

pub fn set_user_name(state: &AppState, name: &str) -> Result<AppState, ValidationError> {
    let name = required(name, "Name")?;
    let mut next = state.clone();
    next.user.name = name;
    Ok(next)
}

pub fn set_water_goal(state: &AppState, ml: u32) -> Result<AppState, ValidationError> {
    if ml == 0 {
        return Err(ValidationError::NotPositive("Water goal"));
    }
    let mut next = state.clone();
    next.user.water_goal = ml;
    Ok(next)
}

/// Stores an already-encoded image reference, or clears it with `None`.
pub fn set_avatar(state: &AppState, reference: Option<String>) -> AppState {
    let mut next = state.clone();
    next.user.avatar_url = reference.filter(|r| !r.trim().is_empty());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_theme() {
        let state = toggle_theme(&AppState::default());
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(toggle_theme(&state).theme, Theme::Light);
    }

    #[test]
    fn test_set_water_goal() {
        let state = set_water_goal(&AppState::default(), 2500).unwrap();
        assert_eq!(state.user.water_goal, 2500);
        assert!(set_water_goal(&state, 0).is_err());
    }

    #[test]
    fn test_set_user_name() {
        assert_eq!(set_user_name(&AppState::default(), " Ana ").unwrap().user.name, "Ana");
        assert!(set_user_name(&AppState::default(), "").is_err());
    }

    #[test]
    fn test_set_avatar() {
        let state = set_avatar(&AppState::default(), Some("data:image/png;base64,AA".into()));
        assert!(state.user.avatar_url.is_some());
        assert!(set_avatar(&state, None).user.avatar_url.is_none());
    }
}
