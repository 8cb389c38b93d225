use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{WaterEntry, DEFAULT_WATER_GOAL};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrationStats {
    pub today_ml: u32,
    /// Progress towards the daily goal, capped at 100
    pub progress_percent: f64,
    /// Mean liters per recorded day
    pub average_liters: f64,
    /// Consecutive days meeting the goal, ending today or yesterday
    pub streak: u32,
    /// Liters recorded over all days
    pub total_liters: f64,
}

/// Amount recorded for `today`, 0 when nothing was logged yet.
pub fn today_amount(history: &[WaterEntry], today: NaiveDate) -> u32 {
    history
        .iter()
        .filter(|e| e.date == today)
        .fold(0u32, |total, e| total.saturating_add(e.amount))
}

/// Computes hydration statistics. A zero goal is treated as the default goal.
pub fn hydration_stats(history: &[WaterEntry], water_goal: u32, today: NaiveDate) -> HydrationStats {
    let goal = if water_goal == 0 {
        DEFAULT_WATER_GOAL
    } else {
        water_goal
    };
    let today_ml = today_amount(history, today);
    let progress_percent = (today_ml as f64 / goal as f64 * 100.0).min(100.0);

    let total_ml: u64 = history.iter().map(|e| e.amount as u64).sum();
    let average_liters = if history.is_empty() {
        0.0
    } else {
        total_ml as f64 / history.len() as f64 / 1000.0
    };

    HydrationStats {
        today_ml,
        progress_percent,
        average_liters,
        streak: streak(history, goal, today),
        total_liters: total_ml as f64 / 1000.0,
    }
}

// Walks back one calendar day at a time. Today only counts once the goal is
// met; an unmet today is skipped rather than ending the streak. Any earlier
// day below the goal, or without a record, ends it.
fn streak(history: &[WaterEntry], goal: u32, today: NaiveDate) -> u32 {
    let mut by_date: HashMap<NaiveDate, u32> = HashMap::new();
    for entry in history {
        let total = by_date.entry(entry.date).or_insert(0);
        *total = total.saturating_add(entry.amount);
    }
    let met = |day: &NaiveDate| by_date.get(day).is_some_and(|amount| *amount >= goal);

    let mut day = if met(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    let mut count = 0;
    while let Some(d) = day {
        if !met(&d) {
            break;
        }
        count += 1;
        day = d.pred_opt();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn entry(d: u32, amount: u32) -> WaterEntry {
        WaterEntry::new(day(d), amount)
    }

    #[test]
    fn test_streak_skips_unmet_today() {
        let history = vec![entry(11, 2000), entry(12, 2100), entry(13, 2500), entry(14, 400)];
        assert_eq!(hydration_stats(&history, 2000, day(14)).streak, 3);
    }

    #[test]
    fn test_streak_counts_met_today() {
        let history = vec![entry(12, 2100), entry(13, 2500), entry(14, 2000)];
        assert_eq!(hydration_stats(&history, 2000, day(14)).streak, 3);
    }

    #[test]
    fn test_streak_without_today_entry() {
        let history = vec![entry(12, 2100), entry(13, 2500)];
        assert_eq!(hydration_stats(&history, 2000, day(14)).streak, 2);
    }

    #[test]
    fn test_streak_broken_by_earlier_failure() {
        let history = vec![entry(11, 3000), entry(12, 500), entry(13, 2500), entry(14, 0)];
        assert_eq!(hydration_stats(&history, 2000, day(14)).streak, 1);
    }

    #[test]
    fn test_streak_broken_by_gap() {
        let history = vec![entry(10, 3000), entry(11, 3000), entry(13, 2500)];
        assert_eq!(hydration_stats(&history, 2000, day(14)).streak, 1);
    }

    #[test]
    fn test_progress_capped() {
        let history = vec![entry(14, 3000)];
        let stats = hydration_stats(&history, 2000, day(14));
        assert_eq!(stats.today_ml, 3000);
        assert_eq!(stats.progress_percent, 100.0);

        let stats = hydration_stats(&[entry(14, 500)], 2000, day(14));
        assert_eq!(stats.progress_percent, 25.0);
    }

    #[test]
    fn test_zero_goal_uses_default() {
        let stats = hydration_stats(&[entry(14, 1000)], 0, day(14));
        assert_eq!(stats.progress_percent, 50.0);
    }

    #[test]
    fn test_average_and_total() {
        let history = vec![entry(12, 1000), entry(13, 2000), entry(14, 3000)];
        let stats = hydration_stats(&history, 2000, day(14));
        assert_eq!(stats.average_liters, 2.0);
        assert_eq!(stats.total_liters, 6.0);
    }

    #[test]
    fn test_empty_history() {
        let stats = hydration_stats(&[], 2000, day(14));
        assert_eq!(stats.today_ml, 0);
        assert_eq!(stats.average_liters, 0.0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.total_liters, 0.0);
    }

    #[test]
    fn test_duplicate_day_entries_saturate() {
        let history = vec![entry(14, u32::MAX), entry(14, 10)];
        assert_eq!(today_amount(&history, day(14)), u32::MAX);
        assert_eq!(hydration_stats(&history, 2000, day(14)).streak, 1);
    }
}
