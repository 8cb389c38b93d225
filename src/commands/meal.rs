//! Weekly meal plan and shopping list commands.

use clap::{Args, Subcommand};
use std::error::Error;

use super::OutputFormat;
use crate::app::App;
use zenith_core::state::ops;
use zenith_core::views::shopping_list;
use zenith_core::{Meal, MealSlot};

const DAY_NAMES: [[&str; 3]; 7] = [
    ["domingo", "sunday", "sun"],
    ["segunda", "monday", "mon"],
    ["terça", "tuesday", "tue"],
    ["quarta", "wednesday", "wed"],
    ["quinta", "thursday", "thu"],
    ["sexta", "friday", "fri"],
    ["sábado", "saturday", "sat"],
];

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Show the meal plan
    Show {
        /// Only this day (0-6 from Sunday, or a weekday name)
        #[arg(long, short)]
        day: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Set a meal slot for a day
    Set {
        /// Day (0-6 from Sunday, or a weekday name)
        day: String,

        /// Slot (breakfast, lunch, snack, dinner, notes)
        slot: MealSlot,

        /// Free text; separate foods with commas
        text: String,
    },

    /// Show the consolidated shopping list for the week
    Shopping {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add an item to the shopping list by hand
    ShopAdd {
        /// Item name
        item: String,
    },

    /// Remove a hand-added shopping item
    ShopRemove {
        /// Item name, or its position in the manual list (starting at 1)
        item: String,
    },
}

impl MealCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn Error>> {
        match &self.command {
            MealSubcommand::Show { day, format } => {
                let state = app.state();
                let meals: Vec<&Meal> = match day {
                    Some(day) => {
                        let day = parse_day(day)?;
                        state.meals.iter().filter(|m| m.day == day).collect()
                    }
                    None => state.meals.iter().collect(),
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&meals)?);
                    }
                    OutputFormat::Text => {
                        for meal in meals {
                            print_meal(meal);
                        }
                    }
                }
                Ok(())
            }

            MealSubcommand::Set { day, slot, text } => {
                let day = parse_day(day)?;
                let state = app.try_apply(|s| ops::update_meal(s, day, *slot, text))?;
                if let Some(meal) = state.meals.iter().find(|m| m.day == day) {
                    print_meal(meal);
                }
                Ok(())
            }

            MealSubcommand::Shopping { format } => {
                let state = app.state();
                let items = shopping_list(&state.meals, &state.manual_shopping_items);

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "items": items,
                            "manual_items": state.manual_shopping_items,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        println!("Shopping List");
                        println!("{}", "=".repeat(44));
                        if items.is_empty() {
                            println!("Nothing to buy. Plan some meals first.");
                        }
                        for item in &items {
                            println!("[ ] {}", item);
                        }
                    }
                }
                Ok(())
            }

            MealSubcommand::ShopAdd { item } => {
                app.try_apply(|s| ops::add_manual_item(s, item))?;
                println!("Added to shopping list: {}", item.trim());
                Ok(())
            }

            MealSubcommand::ShopRemove { item } => {
                match item.trim().parse::<usize>() {
                    Ok(position) if position >= 1 => {
                        app.try_apply(|s| ops::remove_manual_item_at(s, position - 1))?;
                    }
                    _ => {
                        app.try_apply(|s| ops::remove_manual_item_named(s, item))?;
                    }
                }
                println!("Removed from shopping list.");
                Ok(())
            }
        }
    }
}

/// Parses a weekday given as 0-6 (Sunday first) or by name.
fn parse_day(input: &str) -> Result<u8, String> {
    let lowered = input.trim().to_lowercase();
    if let Ok(day) = lowered.parse::<u8>() {
        if (day as usize) < DAY_NAMES.len() {
            return Ok(day);
        }
    }
    DAY_NAMES
        .iter()
        .position(|names| names.contains(&lowered.as_str()))
        .map(|day| day as u8)
        .ok_or_else(|| format!("Invalid day '{}'. Use 0-6 (Sunday first) or a weekday name", input))
}

fn print_meal(meal: &Meal) {
    let name = DAY_NAMES
        .get(meal.day as usize)
        .map(|names| names[0])
        .unwrap_or("?");
    println!("{}", capitalize(name));
    for slot in [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
        MealSlot::Notes,
    ] {
        let text = meal.get(slot);
        if !text.is_empty() {
            println!("  {:<10} {}", slot.to_string(), text);
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_numbers() {
        assert_eq!(parse_day("0").unwrap(), 0);
        assert_eq!(parse_day("6").unwrap(), 6);
        assert!(parse_day("7").is_err());
    }

    #[test]
    fn test_parse_day_names() {
        assert_eq!(parse_day("Segunda").unwrap(), 1);
        assert_eq!(parse_day("saturday").unwrap(), 6);
        assert_eq!(parse_day(" TUE ").unwrap(), 2);
        assert_eq!(parse_day("sábado").unwrap(), 6);
        assert!(parse_day("someday").is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("terça"), "Terça");
        assert_eq!(capitalize(""), "");
    }
}
