use chrono::NaiveDate;
use serde::Serialize;

use super::{daily_task_progress, today_amount};
use crate::models::AppState;

/// Headline numbers for the home screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub task_progress: u8,
    pub water_today_ml: u32,
    pub study_hours: f64,
    pub music_sessions: usize,
}

pub fn dashboard_summary(state: &AppState, today: NaiveDate) -> DashboardSummary {
    DashboardSummary {
        task_progress: daily_task_progress(&state.tasks, today),
        water_today_ml: today_amount(&state.water_history, today),
        study_hours: state.study_subjects.iter().map(|s| s.total_hours).sum(),
        music_sessions: state.music_sessions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ops;

    #[test]
    fn test_dashboard_summary() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let state = ops::add_water(&AppState::default(), today, 750).unwrap();
        let state = ops::add_music_session(&state, "Voz", 20, "", 0).unwrap();

        let summary = dashboard_summary(&state, today);
        assert_eq!(summary.water_today_ml, 750);
        assert_eq!(summary.music_sessions, 1);
        assert_eq!(summary.task_progress, 0);
        assert_eq!(summary.study_hours, 0.0);
    }
}
