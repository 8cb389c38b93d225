//! Derived views.
//!
//! Pure functions over a state snapshot. They never mutate state and hold no
//! cache, so they can be recomputed on every render.

mod dashboard;
mod hydration;
mod music;
mod notes;
mod shopping;
mod study;
mod tasks;

pub use dashboard::{dashboard_summary, DashboardSummary};
pub use hydration::{hydration_stats, today_amount, HydrationStats};
pub use music::{music_practice_total, PracticeTotal};
pub use notes::filter_notes;
pub use shopping::{shopping_list, ShoppingEntry};
pub use study::{study_analytics, AnalyticsBucket, Metric, SubjectFilter};
pub use tasks::{daily_task_progress, tasks_for_day, weekly_tasks};

/// Rounds to one decimal place, as the analytics and statistics display them.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
