//! Weekly shopping list consolidated from the free-text meal plan.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Meal, MealSlot};

const DELIMITERS: [char; 4] = [',', ';', '.', '\n'];

/// One consolidated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingEntry {
    pub name: String,
    /// Number of times the item appears across the week and manual entries
    pub count: u32,
}

impl fmt::Display for ShoppingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<25} x{}", self.name, self.count)
    }
}

/// Builds the shopping list for the week.
///
/// Meal slots are split on `, ; .` and newlines; fragments are trimmed and
/// lower-cased, fragments of two characters or fewer are dropped, and the
/// first letter is capitalized. Manual items are counted under their exact
/// trimmed text, so a manual "leite" and a meal-derived "Leite" stay separate
/// lines. The result is sorted by name, ignoring case and accents.
pub fn shopping_list(meals: &[Meal], manual_items: &[String]) -> Vec<ShoppingEntry> {
    let mut counts: HashMap<String, u32> = HashMap::new();

    for meal in meals {
        for slot in MealSlot::FOOD {
            for fragment in meal.get(slot).split(DELIMITERS.as_slice()) {
                let item = fragment.trim().to_lowercase();
                if item.chars().count() > 2 {
                    *counts.entry(capitalize(&item)).or_insert(0) += 1;
                }
            }
        }
    }

    for raw in manual_items {
        let item = raw.trim();
        if !item.is_empty() {
            *counts.entry(item.to_string()).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<ShoppingEntry> = counts
        .into_iter()
        .map(|(name, count)| ShoppingEntry { name, count })
        .collect();
    entries.sort_by_cached_key(|e| (sort_key(&e.name), e.name.to_lowercase(), e.name.clone()));
    entries
}

// Case- and accent-insensitive ordering: "Água" sorts with the a's.
fn sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn capitalize(item: &str) -> String {
    let mut chars = item.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_with(day: usize, slot: MealSlot, text: &str) -> Vec<Meal> {
        let mut week = Meal::empty_week();
        week[day].set(slot, text);
        week
    }

    fn count_of(list: &[ShoppingEntry], name: &str) -> Option<u32> {
        list.iter().find(|e| e.name == name).map(|e| e.count)
    }

    #[test]
    fn test_splits_and_capitalizes() {
        let meals = week_with(1, MealSlot::Breakfast, "Ovos, Pão\nLeite");
        let list = shopping_list(&meals, &[]);

        assert_eq!(list.len(), 3);
        assert_eq!(count_of(&list, "Ovos"), Some(1));
        assert_eq!(count_of(&list, "Pão"), Some(1));
        assert_eq!(count_of(&list, "Leite"), Some(1));
    }

    #[test]
    fn test_counts_across_week_and_slots() {
        let mut meals = Meal::empty_week();
        meals[0].breakfast = "Ovos, Pão\nLeite".into();
        meals[3].snack = "leite; OVOS".into();
        meals[6].dinner = "ovos.".into();

        let list = shopping_list(&meals, &[]);
        assert_eq!(count_of(&list, "Ovos"), Some(3));
        assert_eq!(count_of(&list, "Leite"), Some(2));
        assert_eq!(count_of(&list, "Pão"), Some(1));
    }

    #[test]
    fn test_short_fragments_excluded() {
        let meals = week_with(2, MealSlot::Lunch, "Arroz, e, ok, Feijão");
        let list = shopping_list(&meals, &[]);
        assert_eq!(list.len(), 2);
        assert!(count_of(&list, "E").is_none());
        assert!(count_of(&list, "Ok").is_none());
    }

    #[test]
    fn test_notes_slot_ignored() {
        let meals = week_with(2, MealSlot::Notes, "Comprar Queijo");
        assert!(shopping_list(&meals, &[]).is_empty());
    }

    #[test]
    fn test_manual_items_keep_exact_key() {
        let meals = week_with(0, MealSlot::Lunch, "Leite");
        let manual = vec!["leite".to_string(), " Leite ".to_string(), "Sabão".to_string()];
        let list = shopping_list(&meals, &manual);

        // "Leite" from the meal and " Leite " trimmed coincide; "leite" stays separate
        assert_eq!(count_of(&list, "Leite"), Some(2));
        assert_eq!(count_of(&list, "leite"), Some(1));
        assert_eq!(count_of(&list, "Sabão"), Some(1));
    }

    #[test]
    fn test_manual_items_not_split_or_filtered_by_length() {
        let manual = vec!["Ab".to_string(), "Pão, Queijo".to_string(), "  ".to_string()];
        let list = shopping_list(&Meal::empty_week(), &manual);
        assert_eq!(list.len(), 2);
        assert_eq!(count_of(&list, "Ab"), Some(1));
        assert_eq!(count_of(&list, "Pão, Queijo"), Some(1));
    }

    #[test]
    fn test_sorted_by_name() {
        let meals = week_with(4, MealSlot::Dinner, "Tomate, alface, Batata");
        let names: Vec<_> = shopping_list(&meals, &[])
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Alface", "Batata", "Tomate"]);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let meals = week_with(3, MealSlot::Lunch, "Tomate, Água, Banana, Óleo, açúcar");
        let names: Vec<_> = shopping_list(&meals, &[])
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Açúcar", "Água", "Banana", "Óleo", "Tomate"]);
    }
}
