//! The root state document, one per user and the unit of persistence.
//!
//! Field names serialize in camelCase so documents written by earlier
//! clients load unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    Meal, MusicSession, Note, QuestionLog, Reminder, StudySession, StudySubject, Task,
    UserProfile, WaterEntry, DAYS_IN_WEEK,
};

pub const DEFAULT_NOTE_CATEGORIES: [&str; 4] = ["Pessoal", "Estudos", "Ideias", "Trabalho"];

pub const DEFAULT_INSTRUMENTS: [&str; 7] = [
    "Violão", "Teclado", "Bateria", "Voz", "Guitarra", "Piano", "Baixo",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Invalid theme '{}'. Valid options: light, dark", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub is_logged_in: bool,
    pub user: UserProfile,
    pub water_history: Vec<WaterEntry>,
    pub water_reminders: Vec<Reminder>,
    pub notes: Vec<Note>,
    pub note_categories: Vec<String>,
    pub tasks: Vec<Task>,
    pub meals: Vec<Meal>,
    pub study_subjects: Vec<StudySubject>,
    pub study_sessions: Vec<StudySession>,
    pub question_logs: Vec<QuestionLog>,
    pub music_sessions: Vec<MusicSession>,
    pub music_instruments: Vec<String>,
    pub manual_shopping_items: Vec<String>,
    pub theme: Theme,
}

impl Default for AppState {
    /// The canonical default document. New accounts start from it and
    /// reconciliation fills missing fields from it.
    fn default() -> Self {
        Self {
            is_logged_in: false,
            user: UserProfile::default(),
            water_history: Vec::new(),
            water_reminders: Reminder::defaults(),
            notes: Vec::new(),
            note_categories: DEFAULT_NOTE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            tasks: Vec::new(),
            meals: Meal::empty_week(),
            study_subjects: Vec::new(),
            study_sessions: Vec::new(),
            question_logs: Vec::new(),
            music_sessions: Vec::new(),
            music_instruments: DEFAULT_INSTRUMENTS.iter().map(|i| i.to_string()).collect(),
            manual_shopping_items: Vec::new(),
            theme: Theme::Light,
        }
    }
}

impl AppState {
    /// Restores structural invariants on a freshly loaded document:
    /// exactly seven meals indexed by weekday, and at least one note
    /// category and one instrument.
    pub fn normalized(mut self) -> Self {
        if self.meals.len() != DAYS_IN_WEEK
            || self.meals.iter().enumerate().any(|(i, m)| m.day as usize != i)
        {
            let mut week = Meal::empty_week();
            for meal in self.meals.drain(..) {
                if let Some(slot) = week.get_mut(meal.day as usize) {
                    *slot = meal;
                }
            }
            self.meals = week;
        }
        if self.note_categories.is_empty() {
            self.note_categories = AppState::default().note_categories;
        }
        if self.music_instruments.is_empty() {
            self.music_instruments = AppState::default().music_instruments;
        }
        self
    }

    /// Fresh default document that keeps only the theme preference.
    pub fn signed_out(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let state = AppState::default();
        assert!(!state.is_logged_in);
        assert_eq!(state.meals.len(), 7);
        assert_eq!(state.note_categories.len(), 4);
        assert_eq!(state.music_instruments.len(), 7);
        assert_eq!(state.water_reminders.len(), 4);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(AppState::default()).unwrap();
        assert!(json.get("isLoggedIn").is_some());
        assert!(json.get("manualShoppingItems").is_some());
        assert!(json.get("musicInstruments").is_some());
    }

    #[test]
    fn test_normalized_rebuilds_meal_week() {
        let mut state = AppState::default();
        let mut tuesday = Meal::empty(2);
        tuesday.lunch = "Arroz".into();
        state.meals = vec![tuesday];

        let state = state.normalized();
        assert_eq!(state.meals.len(), 7);
        assert_eq!(state.meals[2].lunch, "Arroz");
        assert_eq!(state.meals[0].day, 0);
    }

    #[test]
    fn test_normalized_restores_empty_lists() {
        let mut state = AppState::default();
        state.note_categories.clear();
        state.music_instruments.clear();

        let state = state.normalized();
        assert_eq!(state.note_categories[0], "Pessoal");
        assert_eq!(state.music_instruments[0], "Violão");
    }

    #[test]
    fn test_signed_out_keeps_theme() {
        let state = AppState::signed_out(Theme::Dark);
        assert_eq!(state.theme, Theme::Dark);
        assert!(!state.is_logged_in);
    }

    #[test]
    fn test_theme_toggle_and_parse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::from_str("DARK").unwrap(), Theme::Dark);
        assert!(Theme::from_str("blue").is_err());
    }
}
