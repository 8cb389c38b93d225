use super::{not_found, required};
use crate::models::{
    generate_id, AppState, QuestionLog, StudySession, StudySubject, Topic, GENERAL_TOPIC,
};
use crate::state::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyLogKind {
    Session,
    Questions,
}

pub fn add_subject(state: &AppState, name: &str) -> Result<AppState, ValidationError> {
    let name = required(name, "Subject name")?;
    let mut next = state.clone();
    next.study_subjects.push(StudySubject {
        id: generate_id(Some("subj")),
        name,
        topics: Vec::new(),
        total_hours: 0.0,
    });
    Ok(next)
}

/// Deletes a subject together with every session and question log that
/// references it.
pub fn delete_subject(state: &AppState, id: &str) -> Result<AppState, ValidationError> {
    if !state.study_subjects.iter().any(|s| s.id == id) {
        return Err(not_found("Subject", id));
    }
    let mut next = state.clone();
    next.study_subjects.retain(|s| s.id != id);
    next.study_sessions.retain(|s| s.subject_id != id);
    next.question_logs.retain(|q| q.subject_id != id);
    Ok(next)
}

pub fn add_topic(state: &AppState, subject_id: &str, name: &str) -> Result<AppState, ValidationError> {
    let name = required(name, "Topic name")?;
    let mut next = state.clone();
    let subject = find_subject_mut(&mut next, subject_id)?;
    subject.topics.push(Topic {
        id: generate_id(Some("top")),
        name,
        progress: 0.0,
    });
    Ok(next)
}

pub fn delete_topic(
    state: &AppState,
    subject_id: &str,
    topic_id: &str,
) -> Result<AppState, ValidationError> {
    let mut next = state.clone();
    let subject = find_subject_mut(&mut next, subject_id)?;
    if subject.topic(topic_id).is_none() {
        return Err(not_found("Topic", topic_id));
    }
    subject.topics.retain(|t| t.id != topic_id);
    Ok(next)
}

/// Records a finished timer run of `seconds` for a subject (and optionally a
/// topic). The subject's running total grows by the exact hours, rounded to
/// two decimals; the session itself stores whole minutes, at least one.
pub fn log_study_session(
    state: &AppState,
    subject_id: &str,
    topic_id: Option<&str>,
    seconds: u64,
    now_ms: i64,
) -> Result<AppState, ValidationError> {
    if seconds == 0 {
        return Err(ValidationError::NotPositive("Duration"));
    }
    let mut next = state.clone();
    let subject = find_subject_mut(&mut next, subject_id)?;
    let topic_name = topic_name(subject, topic_id);

    let hours = seconds as f64 / 3600.0;
    subject.total_hours = ((subject.total_hours + hours) * 100.0).round() / 100.0;
    let duration_minutes = ((seconds as f64 / 60.0).round() as u32).max(1);

    let session = StudySession {
        id: generate_id(Some("sess")),
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        topic_name,
        duration_minutes,
        date: now_ms,
    };
    next.study_sessions.insert(0, session);
    Ok(next)
}

pub fn log_questions(
    state: &AppState,
    subject_id: &str,
    topic_id: Option<&str>,
    count: u32,
    now_ms: i64,
) -> Result<AppState, ValidationError> {
    if count == 0 {
        return Err(ValidationError::NotPositive("Question count"));
    }
    let subject = state
        .study_subjects
        .iter()
        .find(|s| s.id == subject_id)
        .ok_or_else(|| not_found("Subject", subject_id))?;

    let log = QuestionLog {
        id: generate_id(Some("qlog")),
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        topic_name: topic_name(subject, topic_id),
        count,
        date: now_ms,
    };
    let mut next = state.clone();
    next.question_logs.insert(0, log);
    Ok(next)
}

pub fn delete_study_log(
    state: &AppState,
    id: &str,
    kind: StudyLogKind,
) -> Result<AppState, ValidationError> {
    let mut next = state.clone();
    let removed = match kind {
        StudyLogKind::Session => {
            let before = next.study_sessions.len();
            next.study_sessions.retain(|s| s.id != id);
            before != next.study_sessions.len()
        }
        StudyLogKind::Questions => {
            let before = next.question_logs.len();
            next.question_logs.retain(|q| q.id != id);
            before != next.question_logs.len()
        }
    };
    if removed {
        Ok(next)
    } else {
        Err(not_found("Study log", id))
    }
}

fn find_subject_mut<'a>(
    state: &'a mut AppState,
    subject_id: &str,
) -> Result<&'a mut StudySubject, ValidationError> {
    state
        .study_subjects
        .iter_mut()
        .find(|s| s.id == subject_id)
        .ok_or_else(|| not_found("Subject", subject_id))
}

// Unknown or missing topics are recorded under the general bucket.
fn topic_name(subject: &StudySubject, topic_id: Option<&str>) -> String {
    topic_id
        .and_then(|id| subject.topic(id))
        .map(|t| t.name.clone())
        .unwrap_or_else(|| GENERAL_TOPIC.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_subject(name: &str) -> (AppState, String) {
        let state = add_subject(&AppState::default(), name).unwrap();
        let id = state.study_subjects.last().unwrap().id.clone();
        (state, id)
    }

    #[test]
    fn test_add_subject() {
        let (state, id) = with_subject(" Math ");
        assert!(id.starts_with("subj-"));
        assert_eq!(state.study_subjects[0].name, "Math");
        assert!(add_subject(&state, "").is_err());
    }

    #[test]
    fn test_log_session_updates_hours_and_minutes() {
        let (state, id) = with_subject("Math");
        let state = log_study_session(&state, &id, None, 5400, 10).unwrap();

        assert_eq!(state.study_subjects[0].total_hours, 1.5);
        assert_eq!(state.study_sessions[0].duration_minutes, 90);
        assert_eq!(state.study_sessions[0].topic_name, GENERAL_TOPIC);
    }

    #[test]
    fn test_short_session_counts_one_minute() {
        let (state, id) = with_subject("Math");
        let state = log_study_session(&state, &id, None, 20, 0).unwrap();
        assert_eq!(state.study_sessions[0].duration_minutes, 1);
        assert_eq!(state.study_subjects[0].total_hours, 0.01);
    }

    #[test]
    fn test_log_questions_with_topic() {
        let (state, id) = with_subject("Math");
        let state = add_topic(&state, &id, "Algebra").unwrap();
        let topic_id = state.study_subjects[0].topics[0].id.clone();

        let state = log_questions(&state, &id, Some(&topic_id), 12, 0).unwrap();
        assert_eq!(state.question_logs[0].topic_name, "Algebra");
        assert_eq!(state.question_logs[0].count, 12);
        assert!(log_questions(&state, &id, None, 0, 0).is_err());
    }

    #[test]
    fn test_delete_subject_cascades_only_its_logs() {
        let (state, math) = with_subject("Math");
        let state = add_subject(&state, "History").unwrap();
        let history = state.study_subjects[1].id.clone();

        let state = log_study_session(&state, &math, None, 600, 0).unwrap();
        let state = log_study_session(&state, &history, None, 600, 0).unwrap();
        let state = log_questions(&state, &math, None, 5, 0).unwrap();
        let state = log_questions(&state, &history, None, 7, 0).unwrap();

        let state = delete_subject(&state, &math).unwrap();
        assert_eq!(state.study_subjects.len(), 1);
        assert!(state.study_sessions.iter().all(|s| s.subject_id == history));
        assert!(state.question_logs.iter().all(|q| q.subject_id == history));
        assert_eq!(state.study_sessions.len(), 1);
        assert_eq!(state.question_logs.len(), 1);
    }

    #[test]
    fn test_delete_topic() {
        let (state, id) = with_subject("Math");
        let state = add_topic(&state, &id, "Algebra").unwrap();
        let topic_id = state.study_subjects[0].topics[0].id.clone();

        let state = delete_topic(&state, &id, &topic_id).unwrap();
        assert!(state.study_subjects[0].topics.is_empty());
        assert!(delete_topic(&state, &id, &topic_id).is_err());
    }

    #[test]
    fn test_delete_study_log() {
        let (state, id) = with_subject("Math");
        let state = log_questions(&state, &id, None, 3, 0).unwrap();
        let log_id = state.question_logs[0].id.clone();

        assert!(delete_study_log(&state, &log_id, StudyLogKind::Session).is_err());
        let state = delete_study_log(&state, &log_id, StudyLogKind::Questions).unwrap();
        assert!(state.question_logs.is_empty());
    }
}
