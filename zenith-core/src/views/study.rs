//! Study analytics buckets for charts.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::round1;
use crate::models::{QuestionLog, StudySession, StudySubject, GENERAL_TOPIC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Hours,
    Questions,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Hours => write!(f, "hours"),
            Metric::Questions => write!(f, "questions"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hours" => Ok(Metric::Hours),
            "questions" => Ok(Metric::Questions),
            _ => Err(format!(
                "Invalid metric '{}'. Valid options: hours, questions",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    /// One bucket per subject
    All,
    /// One bucket per topic of the given subject id
    Subject(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsBucket {
    pub name: String,
    pub value: f64,
}

/// Groups study effort by subject, or by topic within one subject.
///
/// With [`SubjectFilter::All`], hours come from each subject's running total
/// and questions are summed from the logs. Within a subject, hours are summed
/// from session durations; sessions and logs whose topic matches none of the
/// subject's current topics go to a synthetic "Geral" bucket. Values are
/// rounded to one decimal and empty buckets are dropped.
pub fn study_analytics(
    subjects: &[StudySubject],
    sessions: &[StudySession],
    question_logs: &[QuestionLog],
    metric: Metric,
    filter: &SubjectFilter,
) -> Vec<AnalyticsBucket> {
    let buckets = match filter {
        SubjectFilter::All => subjects
            .iter()
            .map(|s| {
                let value = match metric {
                    Metric::Hours => s.total_hours,
                    Metric::Questions => question_logs
                        .iter()
                        .filter(|q| q.subject_id == s.id)
                        .map(|q| q.count as f64)
                        .sum(),
                };
                AnalyticsBucket {
                    name: s.name.clone(),
                    value: round1(value),
                }
            })
            .collect(),
        SubjectFilter::Subject(id) => match subjects.iter().find(|s| &s.id == id) {
            Some(subject) => topic_buckets(subject, sessions, question_logs, metric),
            None => Vec::new(),
        },
    };
    buckets.into_iter().filter(|b| b.value > 0.0).collect()
}

fn topic_buckets(
    subject: &StudySubject,
    sessions: &[StudySession],
    question_logs: &[QuestionLog],
    metric: Metric,
) -> Vec<AnalyticsBucket> {
    // (topic name, value) pairs for this subject only
    let entries: Vec<(&str, f64)> = match metric {
        Metric::Hours => sessions
            .iter()
            .filter(|s| s.subject_id == subject.id)
            .map(|s| (s.topic_name.as_str(), s.duration_minutes as f64 / 60.0))
            .collect(),
        Metric::Questions => question_logs
            .iter()
            .filter(|q| q.subject_id == subject.id)
            .map(|q| (q.topic_name.as_str(), q.count as f64))
            .collect(),
    };

    let mut buckets: Vec<AnalyticsBucket> = subject
        .topics
        .iter()
        .map(|t| AnalyticsBucket {
            name: t.name.clone(),
            value: round1(
                entries
                    .iter()
                    .filter(|(name, _)| *name == t.name)
                    .map(|(_, v)| v)
                    .sum(),
            ),
        })
        .collect();

    let general: f64 = entries
        .iter()
        .filter(|(name, _)| !subject.topics.iter().any(|t| t.name == *name))
        .map(|(_, v)| v)
        .sum();
    if general > 0.0 {
        buckets.push(AnalyticsBucket {
            name: GENERAL_TOPIC.to_string(),
            value: round1(general),
        });
    }
    buckets
}
