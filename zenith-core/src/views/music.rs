use serde::Serialize;
use std::fmt;

use crate::models::MusicSession;

/// Total practice time split into hours and remaining minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PracticeTotal {
    pub hours: u64,
    pub minutes: u32,
}

impl fmt::Display for PracticeTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (0, m) => write!(f, "{} MIN", m),
            (h, 0) => write!(f, "{}H", h),
            (h, m) => write!(f, "{}H {}M", h, m),
        }
    }
}

pub fn music_practice_total(sessions: &[MusicSession]) -> PracticeTotal {
    let total: u64 = sessions.iter().map(|s| u64::from(s.duration)).sum();
    PracticeTotal {
        hours: total / 60,
        minutes: (total % 60) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(minutes: u32) -> MusicSession {
        MusicSession {
            id: minutes.to_string(),
            instrument: "Piano".into(),
            duration: minutes,
            date: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_practice_total_display() {
        assert_eq!(music_practice_total(&[session(45)]).to_string(), "45 MIN");
        assert_eq!(music_practice_total(&[session(60), session(65)]).to_string(), "2H 5M");
        assert_eq!(music_practice_total(&[session(120)]).to_string(), "2H");
        assert_eq!(music_practice_total(&[]).to_string(), "0 MIN");
    }

    #[test]
    fn test_practice_total_large_durations() {
        let total = music_practice_total(&[session(u32::MAX), session(u32::MAX)]);
        let minutes = 2 * u64::from(u32::MAX);
        assert_eq!(total.hours, minutes / 60);
        assert_eq!(u64::from(total.minutes), minutes % 60);
    }
}
