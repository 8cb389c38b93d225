use crate::models::Note;

/// Notes matching `search` (case-insensitive, title or content) and, when
/// given, `category`. Pinned notes come first, then newest first.
pub fn filter_notes<'a>(notes: &'a [Note], search: &str, category: Option<&str>) -> Vec<&'a Note> {
    let needle = search.to_lowercase();
    let mut matched: Vec<&Note> = notes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&needle) || n.content.to_lowercase().contains(&needle)
        })
        .filter(|n| category.map_or(true, |c| n.category == c))
        .collect();
    matched.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, category: &str, pinned: bool, created_at: i64) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            category: category.into(),
            is_pinned: pinned,
            created_at,
            image_url: None,
            links: Vec::new(),
            checklist: Vec::new(),
        }
    }

    #[test]
    fn test_pinned_first_then_newest() {
        let notes = vec![
            note("old", "a", "Pessoal", false, 1),
            note("new", "b", "Pessoal", false, 3),
            note("pin", "c", "Pessoal", true, 0),
        ];
        let ids: Vec<_> = filter_notes(&notes, "", None).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["pin", "new", "old"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut with_content = note("x", "Compras", "Pessoal", false, 0);
        with_content.content = "Lembrar do LEITE".into();
        let notes = vec![with_content, note("y", "Outra", "Pessoal", false, 0)];

        assert_eq!(filter_notes(&notes, "leite", None).len(), 1);
        assert_eq!(filter_notes(&notes, "COMPRAS", None).len(), 1);
    }

    #[test]
    fn test_category_filter() {
        let notes = vec![
            note("x", "a", "Pessoal", false, 0),
            note("y", "b", "Trabalho", false, 0),
        ];
        let found = filter_notes(&notes, "", Some("Trabalho"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "y");
    }
}
