mod auth;
mod config_cmd;
mod dashboard;
mod meal;
mod music;
mod note;
mod settings;
mod study;
mod task;
mod water;

pub use auth::{logout, LoginCommand, SignupCommand, WhoamiCommand};
pub use config_cmd::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use meal::MealCommand;
pub use music::MusicCommand;
pub use note::NoteCommand;
pub use settings::SettingsCommand;
pub use study::StudyCommand;
pub use task::TaskCommand;
pub use water::WaterCommand;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use clap::ValueEnum;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses a YYYY-MM-DD date, defaulting to today.
pub fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate, String> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD format.", s)),
        None => Ok(crate::app::today()),
    }
}

/// Finds the single item whose id equals `key`, or starts with it, or whose
/// name matches it case-insensitively.
pub fn resolve<'a, T>(
    items: &'a [T],
    key: &str,
    kind: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Result<&'a T, String> {
    let key = key.trim();
    if let Some(exact) = items.iter().find(|item| id(item) == key) {
        return Ok(exact);
    }

    let lowered = key.to_lowercase();
    let by_name: Vec<&T> = items
        .iter()
        .filter(|item| name(item).to_lowercase() == lowered)
        .collect();
    if let [single] = by_name.as_slice() {
        return Ok(*single);
    }

    let by_prefix: Vec<&T> = items.iter().filter(|item| id(item).starts_with(key)).collect();
    match by_prefix.as_slice() {
        [single] if !key.is_empty() => Ok(*single),
        [] => Err(format!("{} '{}' not found", kind, key)),
        _ => Err(format!("{} '{}' is ambiguous; use a longer id", kind, key)),
    }
}

/// Shortened id for tables.
pub fn short_id(id: &str) -> &str {
    let end = id
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    &id[..end]
}

/// Formats an epoch-milliseconds timestamp in local time.
pub fn format_timestamp(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => format_local(dt),
        None => "-".to_string(),
    }
}

fn format_local(dt: DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Text progress bar of `width` cells for a 0-100 percentage.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item {
        id: &'static str,
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: "subj-abc123",
                name: "Matemática",
            },
            Item {
                id: "subj-abd456",
                name: "Física",
            },
        ]
    }

    fn find<'a>(items: &'a [Item], key: &str) -> Result<&'a Item, String> {
        resolve(items, key, "Subject", |i| i.id, |i| i.name)
    }

    #[test]
    fn test_resolve_by_id_name_and_prefix() {
        let items = items();
        assert_eq!(find(&items, "subj-abd456").unwrap().name, "Física");
        assert_eq!(find(&items, "matemática").unwrap().id, "subj-abc123");
        assert_eq!(find(&items, "subj-abc").unwrap().name, "Matemática");
    }

    #[test]
    fn test_resolve_errors() {
        let items = items();
        assert!(find(&items, "subj-ab").unwrap_err().contains("ambiguous"));
        assert!(find(&items, "zzz").unwrap_err().contains("not found"));
        assert!(find(&items, "").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date_or_today(Some("2024-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date_or_today(Some("29/02/2024")).is_err());
        assert_eq!(parse_date_or_today(None).unwrap(), crate::app::today());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(50.0, 10), "[#####-----]");
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(150.0, 4), "[####]");
    }
}
