use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The meal plan always holds one entry per weekday.
pub const DAYS_IN_WEEK: usize = 7;

/// Editable fields of a day's meal plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
    Notes,
}

impl MealSlot {
    /// Slots that describe food (and therefore feed the shopping list).
    pub const FOOD: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
    ];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSlot::Breakfast => write!(f, "breakfast"),
            MealSlot::Lunch => write!(f, "lunch"),
            MealSlot::Snack => write!(f, "snack"),
            MealSlot::Dinner => write!(f, "dinner"),
            MealSlot::Notes => write!(f, "notes"),
        }
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "snack" => Ok(MealSlot::Snack),
            "dinner" => Ok(MealSlot::Dinner),
            "notes" => Ok(MealSlot::Notes),
            _ => Err(format!(
                "Invalid meal slot '{}'. Valid options: breakfast, lunch, snack, dinner, notes",
                s
            )),
        }
    }
}

/// Free-text meal plan for one weekday (0 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub day: u8,
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub snack: String,
    #[serde(default)]
    pub dinner: String,
    #[serde(default)]
    pub notes: String,
}

impl Meal {
    pub fn empty(day: u8) -> Self {
        Self {
            id: format!("meal-{}", day),
            day,
            breakfast: String::new(),
            lunch: String::new(),
            snack: String::new(),
            dinner: String::new(),
            notes: String::new(),
        }
    }

    /// Seven empty days, Sunday first.
    pub fn empty_week() -> Vec<Meal> {
        (0..DAYS_IN_WEEK as u8).map(Meal::empty).collect()
    }

    pub fn get(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snack => &self.snack,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, slot: MealSlot, text: impl Into<String>) {
        let text = text.into();
        match slot {
            MealSlot::Breakfast => self.breakfast = text,
            MealSlot::Lunch => self.lunch = text,
            MealSlot::Snack => self.snack = text,
            MealSlot::Dinner => self.dinner = text,
            MealSlot::Notes => self.notes = text,
        }
    }
}
