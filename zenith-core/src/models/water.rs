use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Water consumed on one calendar day. At most one entry exists per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub date: NaiveDate,
    /// Accumulated ml for the day
    #[serde(deserialize_with = "super::lenient_u32")]
    pub amount: u32,
}

impl WaterEntry {
    pub fn new(date: NaiveDate, amount: u32) -> Self {
        Self { date, amount }
    }
}

/// A user-editable hydration reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    /// Time of day as HH:MM
    pub time: String,
    pub label: String,
    pub is_active: bool,
}

impl Reminder {
    pub fn new(
        id: impl Into<String>,
        time: impl Into<String>,
        label: impl Into<String>,
        is_active: bool,
    ) -> Self {
        Self {
            id: id.into(),
            time: time.into(),
            label: label.into(),
            is_active,
        }
    }

    /// The four reminders every new account starts with.
    pub fn defaults() -> Vec<Reminder> {
        vec![
            Reminder::new("1", "08:00", "Despertar Hidratado", true),
            Reminder::new("2", "11:30", "Antes do Almoço", true),
            Reminder::new("3", "15:00", "Pausa do Trabalho", false),
            Reminder::new("4", "19:00", "Meta Final", true),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reminders() {
        let reminders = Reminder::defaults();
        assert_eq!(reminders.len(), 4);
        assert_eq!(reminders[0].time, "08:00");
        assert!(!reminders[2].is_active);
    }

    #[test]
    fn test_water_entry_date_format() {
        let entry = WaterEntry::new(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(), 500);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2026-01-14");
        assert_eq!(json["amount"], 500);
    }
}
