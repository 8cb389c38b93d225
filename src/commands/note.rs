//! Notes and note category commands.

use clap::{Args, Subcommand};
use std::error::Error;

use super::{format_timestamp, resolve, short_id, OutputFormat};
use crate::app::{now_ms, App};
use zenith_core::state::ops::{self, NoteDraft};
use zenith_core::views::filter_notes;
use zenith_core::{AppState, Note, NoteLink};

#[derive(Args)]
pub struct NoteCommand {
    #[command(subcommand)]
    pub command: NoteSubcommand,
}

#[derive(Subcommand)]
pub enum NoteSubcommand {
    /// Create a note
    Add {
        /// Note title
        title: String,

        /// Note body
        #[arg(long, short, default_value = "")]
        content: String,

        /// Category (defaults to the first one)
        #[arg(long)]
        category: Option<String>,

        /// Image reference
        #[arg(long)]
        image: Option<String>,

        /// Link as "label=url" or a bare url (repeatable)
        #[arg(long = "link")]
        links: Vec<String>,
    },

    /// Edit a note; omitted fields are kept
    Edit {
        /// Note id (or unique prefix) or title
        note: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short)]
        content: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Image reference ("" removes it)
        #[arg(long)]
        image: Option<String>,

        /// Replace all links (repeatable)
        #[arg(long = "link")]
        links: Vec<String>,
    },

    /// List notes, pinned first then newest
    List {
        /// Case-insensitive text to look for in title or content
        #[arg(long, short, default_value = "")]
        search: String,

        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a note
    Show {
        /// Note id (or unique prefix) or title
        note: String,
    },

    /// Pin or unpin a note
    Pin {
        /// Note id (or unique prefix) or title
        note: String,
    },

    /// Delete a note
    Delete {
        /// Note id (or unique prefix) or title
        note: String,
    },

    /// Manage note categories
    Category {
        #[command(subcommand)]
        command: CategorySubcommand,
    },
}

#[derive(Subcommand)]
pub enum CategorySubcommand {
    /// List categories
    List,

    /// Add a category
    Add { name: String },

    /// Remove a category; its notes move to the first remaining one
    Remove { name: String },
}

impl NoteCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn Error>> {
        match &self.command {
            NoteSubcommand::Add {
                title,
                content,
                category,
                image,
                links,
            } => {
                let draft = NoteDraft {
                    title: title.clone(),
                    content: content.clone(),
                    category: category.clone(),
                    image_url: image.clone().filter(|i| !i.trim().is_empty()),
                    links: links.iter().map(|l| parse_link(l)).collect(),
                };
                let state = app.try_apply(|s| ops::save_note(s, None, draft, now_ms()))?;
                if let Some(note) = state.notes.first() {
                    println!("Created note {} in {}", short_id(&note.id), note.category);
                }
                Ok(())
            }

            NoteSubcommand::Edit {
                note,
                title,
                content,
                category,
                image,
                links,
            } => {
                let current = find_note(&app.state(), note)?;
                let draft = NoteDraft {
                    title: title.clone().unwrap_or_else(|| current.title.clone()),
                    content: content.clone().unwrap_or_else(|| current.content.clone()),
                    category: Some(category.clone().unwrap_or_else(|| current.category.clone())),
                    image_url: match image {
                        Some(image) => Some(image.clone()).filter(|i| !i.trim().is_empty()),
                        None => current.image_url.clone(),
                    },
                    links: if links.is_empty() {
                        current.links.clone()
                    } else {
                        links.iter().map(|l| parse_link(l)).collect()
                    },
                };
                app.try_apply(|s| ops::save_note(s, Some(current.id.as_str()), draft, now_ms()))?;
                println!("Note updated.");
                Ok(())
            }

            NoteSubcommand::List {
                search,
                category,
                format,
            } => {
                let state = app.state();
                let notes = filter_notes(&state.notes, search, category.as_deref());

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&notes)?);
                    }
                    OutputFormat::Text => {
                        if notes.is_empty() {
                            println!("No notes found.");
                        }
                        for note in notes {
                            let pin = if note.is_pinned { "*" } else { " " };
                            println!(
                                "{} {:<8} {:<30} [{}] {}",
                                pin,
                                short_id(&note.id),
                                note.title,
                                note.category,
                                format_timestamp(note.created_at)
                            );
                        }
                    }
                }
                Ok(())
            }

            NoteSubcommand::Show { note } => {
                let note = find_note(&app.state(), note)?;
                print_note(&note);
                Ok(())
            }

            NoteSubcommand::Pin { note } => {
                let id = find_note(&app.state(), note)?.id;
                let state = app.try_apply(|s| ops::toggle_pin(s, &id))?;
                let pinned = state.notes.iter().any(|n| n.id == id && n.is_pinned);
                println!("{}", if pinned { "Note pinned." } else { "Note unpinned." });
                Ok(())
            }

            NoteSubcommand::Delete { note } => {
                let id = find_note(&app.state(), note)?.id;
                app.try_apply(|s| ops::delete_note(s, &id))?;
                println!("Note deleted.");
                Ok(())
            }

            NoteSubcommand::Category { command } => match command {
                CategorySubcommand::List => {
                    let state = app.state();
                    for category in &state.note_categories {
                        let count = state.notes.iter().filter(|n| &n.category == category).count();
                        println!("{:<20} {} notes", category, count);
                    }
                    Ok(())
                }
                CategorySubcommand::Add { name } => {
                    app.try_apply(|s| ops::add_category(s, name))?;
                    println!("Category added: {}", name.trim());
                    Ok(())
                }
                CategorySubcommand::Remove { name } => {
                    app.try_apply(|s| ops::delete_category(s, name))?;
                    println!("Category removed: {}", name);
                    Ok(())
                }
            },
        }
    }
}

fn find_note(state: &AppState, key: &str) -> Result<Note, String> {
    resolve(
        &state.notes,
        key,
        "Note",
        |n| n.id.as_str(),
        |n| n.title.as_str(),
    )
    .cloned()
}

/// Parses "label=url"; a bare url is its own label.
fn parse_link(input: &str) -> NoteLink {
    match input.split_once('=') {
        Some((label, url)) if !label.contains("://") && !label.trim().is_empty() => {
            NoteLink::new(label.trim(), url.trim())
        }
        _ => NoteLink::new(input.trim(), input.trim()),
    }
}

fn print_note(note: &Note) {
    println!("{}{}", note.title, if note.is_pinned { " (pinned)" } else { "" });
    println!("{}", "=".repeat(44));
    println!("Category: {}", note.category);
    println!("Created:  {}", format_timestamp(note.created_at));
    println!("Id:       {}", note.id);
    if let Some(image) = &note.image_url {
        println!("Image:    {}", image);
    }
    if !note.content.is_empty() {
        println!("\n{}", note.content);
    }
    if !note.links.is_empty() {
        println!("\nLinks:");
        for link in &note.links {
            println!("  {} <{}>", link.label, link.url);
        }
    }
    if !note.checklist.is_empty() {
        println!("\nChecklist:");
        for item in &note.checklist {
            println!("  [{}] {}", if item.completed { "x" } else { " " }, item.text);
        }
    }
}
