use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options: low, medium, high",
                s
            )),
        }
    }
}

/// A scheduled to-do for a specific calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Time of day as HH:MM
    pub time: String,
    pub date: NaiveDate,
    /// Weekday of `date`, 0 = Sunday
    pub day: u8,
    pub priority: Priority,
    pub completed: bool,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        time: impl Into<String>,
        date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            time: time.into(),
            date,
            day: weekday_index(date),
            priority,
            completed: false,
        }
    }
}

/// Weekday index used across the app (0 = Sunday .. 6 = Saturday).
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
