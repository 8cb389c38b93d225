use super::{not_found, required};
use crate::models::{AppState, MealSlot, DAYS_IN_WEEK};
use crate::state::ValidationError;

pub fn update_meal(
    state: &AppState,
    day: u8,
    slot: MealSlot,
    text: &str,
) -> Result<AppState, ValidationError> {
    if day as usize >= DAYS_IN_WEEK {
        return Err(ValidationError::InvalidDay(day));
    }
    let mut next = state.clone();
    let meal = next
        .meals
        .iter_mut()
        .find(|m| m.day == day)
        .ok_or(ValidationError::InvalidDay(day))?;
    meal.set(slot, text);
    Ok(next)
}

/// Appends an extra shopping item, kept with its original casing.
pub fn add_manual_item(state: &AppState, text: &str) -> Result<AppState, ValidationError> {
    let item = required(text, "Item name")?;
    let mut next = state.clone();
    next.manual_shopping_items.push(item);
    Ok(next)
}

pub fn remove_manual_item_at(state: &AppState, index: usize) -> Result<AppState, ValidationError> {
    if index >= state.manual_shopping_items.len() {
        return Err(not_found("Shopping item", &index.to_string()));
    }
    let mut next = state.clone();
    next.manual_shopping_items.remove(index);
    Ok(next)
}

/// Removes one manual item whose trimmed text equals `name` exactly.
///
/// Names come from the consolidated shopping list, where manual items are
/// keyed by their exact trimmed text.
pub fn remove_manual_item_named(state: &AppState, name: &str) -> Result<AppState, ValidationError> {
    let index = state
        .manual_shopping_items
        .iter()
        .position(|item| item.trim() == name)
        .ok_or_else(|| not_found("Shopping item", name))?;
    remove_manual_item_at(state, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_meal() {
        let state = update_meal(&AppState::default(), 2, MealSlot::Lunch, "Arroz, Feijão").unwrap();
        assert_eq!(state.meals[2].lunch, "Arroz, Feijão");
        assert_eq!(state.meals.len(), 7);
    }

    #[test]
    fn test_update_meal_invalid_day() {
        assert_eq!(
            update_meal(&AppState::default(), 7, MealSlot::Lunch, "x"),
            Err(ValidationError::InvalidDay(7))
        );
    }

    #[test]
    fn test_add_manual_item_trims_and_keeps_case() {
        let state = add_manual_item(&AppState::default(), "  Papel Toalha ").unwrap();
        assert_eq!(state.manual_shopping_items, vec!["Papel Toalha".to_string()]);
        assert!(add_manual_item(&state, "   ").is_err());
    }

    #[test]
    fn test_remove_manual_item_named_removes_one() {
        let mut state = AppState::default();
        state.manual_shopping_items = vec!["Sabão".into(), "Leite".into(), "Sabão".into()];

        let state = remove_manual_item_named(&state, "Sabão").unwrap();
        assert_eq!(
            state.manual_shopping_items,
            vec!["Leite".to_string(), "Sabão".to_string()]
        );
    }

    #[test]
    fn test_remove_manual_item_named_is_exact() {
        let mut state = AppState::default();
        state.manual_shopping_items = vec!["Sabão".into()];
        assert!(remove_manual_item_named(&state, "sabão").is_err());
    }

    #[test]
    fn test_remove_manual_item_at() {
        let mut state = AppState::default();
        state.manual_shopping_items = vec!["A1".into(), "B2".into()];
        let state = remove_manual_item_at(&state, 0).unwrap();
        assert_eq!(state.manual_shopping_items, vec!["B2".to_string()]);
        assert!(remove_manual_item_at(&state, 5).is_err());
    }
}
