//! Study subjects, session logging and analytics.

use clap::{Args, Subcommand};
use std::error::Error;
use std::io::{self, Write};
use std::time::Instant;

use super::{format_timestamp, resolve, OutputFormat};
use crate::app::{gemini, now_ms, App};
use crate::config::Config;
use zenith_core::state::ops::{self, StudyLogKind};
use zenith_core::views::{study_analytics, Metric, SubjectFilter};
use zenith_core::{study_advice, AppState, StudySubject, TextGenerator};

#[derive(Args)]
pub struct StudyCommand {
    #[command(subcommand)]
    pub command: StudySubcommand,
}

#[derive(Subcommand)]
pub enum StudySubcommand {
    /// Manage subjects
    Subject {
        #[command(subcommand)]
        command: SubjectSubcommand,
    },

    /// Manage topics of a subject
    Topic {
        #[command(subcommand)]
        command: TopicSubcommand,
    },

    /// Record a finished study session
    Log {
        /// Subject id or name
        subject: String,

        /// Minutes studied
        #[arg(long, short, conflicts_with = "seconds", required_unless_present = "seconds")]
        minutes: Option<u64>,

        /// Seconds studied
        #[arg(long)]
        seconds: Option<u64>,

        /// Topic id or name
        #[arg(long, short)]
        topic: Option<String>,
    },

    /// Time a session interactively; press Enter to stop
    Timer {
        /// Subject id or name
        subject: String,

        /// Topic id or name
        #[arg(long, short)]
        topic: Option<String>,
    },

    /// Record answered practice questions
    Questions {
        /// Subject id or name
        subject: String,

        /// Number of questions
        count: u32,

        /// Topic id or name
        #[arg(long, short)]
        topic: Option<String>,
    },

    /// Delete a session or question log
    DeleteLog {
        /// Log id (or unique prefix)
        id: String,
    },

    /// Show recent sessions and question logs
    History {
        /// Number of entries of each kind
        #[arg(long, short, default_value = "10")]
        limit: usize,
    },

    /// Chart study effort by subject, or by topic within a subject
    Analytics {
        /// Metric (hours, questions)
        #[arg(long, short, default_value = "hours")]
        metric: Metric,

        /// Break down one subject by topic
        #[arg(long, short)]
        subject: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Ask for a quick study tip
    Tip {
        /// Subject name
        subject: String,
    },
}

#[derive(Subcommand)]
pub enum SubjectSubcommand {
    /// Add a subject
    Add { name: String },

    /// Delete a subject with its sessions and logs
    Delete {
        /// Subject id or name
        subject: String,
    },

    /// List subjects and topics
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum TopicSubcommand {
    /// Add a topic to a subject
    Add {
        /// Subject id or name
        subject: String,

        /// Topic name
        name: String,
    },

    /// Delete a topic
    Delete {
        /// Subject id or name
        subject: String,

        /// Topic id or name
        topic: String,
    },
}

impl StudyCommand {
    pub async fn run(&self, app: &App, config: &Config) -> Result<(), Box<dyn Error>> {
        match &self.command {
            StudySubcommand::Subject { command } => run_subject(app, command),
            StudySubcommand::Topic { command } => run_topic(app, command),

            StudySubcommand::Log {
                subject,
                minutes,
                seconds,
                topic,
            } => {
                let seconds = seconds.or(minutes.map(|m| m * 60)).unwrap_or_default();
                log_session(app, subject, topic.as_deref(), seconds)
            }

            StudySubcommand::Timer { subject, topic } => {
                // Validate before starting the clock
                find_subject(&app.state(), subject)?;
                println!("Timer running. Press Enter to stop.");
                io::stdout().flush()?;
                let started = Instant::now();
                let mut line = String::new();
                io::stdin().read_line(&mut line)?;
                let seconds = started.elapsed().as_secs();
                if seconds == 0 {
                    println!("Timer stopped before a full second; nothing recorded.");
                    return Ok(());
                }
                log_session(app, subject, topic.as_deref(), seconds)
            }

            StudySubcommand::Questions {
                subject,
                count,
                topic,
            } => {
                let state = app.state();
                let subject = find_subject(&state, subject)?;
                let topic_id = find_topic_id(subject, topic.as_deref())?;
                app.try_apply(|s| {
                    ops::log_questions(s, &subject.id, topic_id.as_deref(), *count, now_ms())
                })?;
                println!("Logged {} questions for {}.", count, subject.name);
                Ok(())
            }

            StudySubcommand::DeleteLog { id } => {
                let (id, kind) = find_log(&app.state(), id)?;
                app.try_apply(|s| ops::delete_study_log(s, &id, kind))?;
                println!("Log deleted.");
                Ok(())
            }

            StudySubcommand::History { limit } => {
                let state = app.state();
                println!("Sessions");
                println!("{}", "=".repeat(44));
                for session in state.study_sessions.iter().take(*limit) {
                    println!(
                        "{}  {:<15} {:<15} {:>4} min  {}",
                        format_timestamp(session.date),
                        session.subject_name,
                        session.topic_name,
                        session.duration_minutes,
                        session.id
                    );
                }
                println!("\nQuestions");
                println!("{}", "=".repeat(44));
                for log in state.question_logs.iter().take(*limit) {
                    println!(
                        "{}  {:<15} {:<15} {:>4} q    {}",
                        format_timestamp(log.date),
                        log.subject_name,
                        log.topic_name,
                        log.count,
                        log.id
                    );
                }
                Ok(())
            }

            StudySubcommand::Analytics {
                metric,
                subject,
                format,
            } => {
                let state = app.state();
                let filter = match subject {
                    Some(key) => SubjectFilter::Subject(find_subject(&state, key)?.id.clone()),
                    None => SubjectFilter::All,
                };
                let buckets = study_analytics(
                    &state.study_subjects,
                    &state.study_sessions,
                    &state.question_logs,
                    *metric,
                    &filter,
                );

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&buckets)?);
                    }
                    OutputFormat::Text => {
                        if buckets.is_empty() {
                            println!("No {} recorded yet.", metric);
                        }
                        let max = buckets.iter().map(|b| b.value).fold(0.0, f64::max);
                        for bucket in &buckets {
                            println!(
                                "{:<20} {} {}",
                                bucket.name,
                                bar(bucket.value, max, 30),
                                bucket.value
                            );
                        }
                    }
                }
                Ok(())
            }

            StudySubcommand::Tip { subject } => {
                let client = gemini(config);
                let generator: Option<&dyn TextGenerator> = config
                    .gemini_api_key
                    .value
                    .as_ref()
                    .map(|_| &client as &dyn TextGenerator);
                println!("{}", study_advice(generator, subject).await);
                Ok(())
            }
        }
    }
}

fn run_subject(app: &App, command: &SubjectSubcommand) -> Result<(), Box<dyn Error>> {
    match command {
        SubjectSubcommand::Add { name } => {
            app.try_apply(|s| ops::add_subject(s, name))?;
            println!("Subject added: {}", name.trim());
            Ok(())
        }
        SubjectSubcommand::Delete { subject } => {
            let id = find_subject(&app.state(), subject)?.id.clone();
            app.try_apply(|s| ops::delete_subject(s, &id))?;
            println!("Subject deleted.");
            Ok(())
        }
        SubjectSubcommand::List { format } => {
            let state = app.state();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&state.study_subjects)?);
                }
                OutputFormat::Text => {
                    if state.study_subjects.is_empty() {
                        println!("No subjects yet.");
                    }
                    for subject in &state.study_subjects {
                        println!("{:<20} {:>6.2} h  ({})", subject.name, subject.total_hours, subject.id);
                        for topic in &subject.topics {
                            println!("  - {}  ({})", topic.name, topic.id);
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

fn run_topic(app: &App, command: &TopicSubcommand) -> Result<(), Box<dyn Error>> {
    match command {
        TopicSubcommand::Add { subject, name } => {
            let id = find_subject(&app.state(), subject)?.id.clone();
            app.try_apply(|s| ops::add_topic(s, &id, name))?;
            println!("Topic added: {}", name.trim());
            Ok(())
        }
        TopicSubcommand::Delete { subject, topic } => {
            let state = app.state();
            let subject = find_subject(&state, subject)?;
            let topic_id = find_topic_id(subject, Some(topic))?.unwrap_or_default();
            app.try_apply(|s| ops::delete_topic(s, &subject.id, &topic_id))?;
            println!("Topic deleted.");
            Ok(())
        }
    }
}

fn log_session(
    app: &App,
    subject: &str,
    topic: Option<&str>,
    seconds: u64,
) -> Result<(), Box<dyn Error>> {
    let state = app.state();
    let subject = find_subject(&state, subject)?;
    let topic_id = find_topic_id(subject, topic)?;
    let next = app.try_apply(|s| {
        ops::log_study_session(s, &subject.id, topic_id.as_deref(), seconds, now_ms())
    })?;
    if let Some(session) = next.study_sessions.first() {
        println!(
            "Logged {} min of {} ({}).",
            session.duration_minutes, session.subject_name, session.topic_name
        );
    }
    Ok(())
}

fn find_subject<'a>(state: &'a AppState, key: &str) -> Result<&'a StudySubject, String> {
    resolve(
        &state.study_subjects,
        key,
        "Subject",
        |s| s.id.as_str(),
        |s| s.name.as_str(),
    )
}

fn find_topic_id(subject: &StudySubject, key: Option<&str>) -> Result<Option<String>, String> {
    match key {
        Some(key) => resolve(
            &subject.topics,
            key,
            "Topic",
            |t| t.id.as_str(),
            |t| t.name.as_str(),
        )
        .map(|t| Some(t.id.clone())),
        None => Ok(None),
    }
}

/// Finds a session or question log by id or unique id prefix.
fn find_log(state: &AppState, key: &str) -> Result<(String, StudyLogKind), String> {
    let key = key.trim();
    let mut matches: Vec<(String, StudyLogKind)> = state
        .study_sessions
        .iter()
        .filter(|s| s.id.starts_with(key))
        .map(|s| (s.id.clone(), StudyLogKind::Session))
        .chain(
            state
                .question_logs
                .iter()
                .filter(|q| q.id.starts_with(key))
                .map(|q| (q.id.clone(), StudyLogKind::Questions)),
        )
        .collect();

    if let Some(exact) = matches.iter().position(|(id, _)| id == key) {
        return Ok(matches.swap_remove(exact));
    }
    match matches.len() {
        1 if !key.is_empty() => Ok(matches.remove(0)),
        0 => Err(format!("Study log '{}' not found", key)),
        _ => Err(format!("Study log '{}' is ambiguous; use a longer id", key)),
    }
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return String::new();
    }
    "█".repeat(((value / max) * width as f64).round() as usize)
}
