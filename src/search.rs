//! Search and Table Ordering
//!
//! Pure helpers behind the todo table: the search filter over the loaded
//! collection and the column sort comparators.

use std::collections::HashMap;

use crate::models::{TodoItem, UserProfile};

/// Display name shown (and searched) for an author without a profile.
pub const ANONYMOUS: &str = "Anonymous";

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    TimeStamp,
    Title,
    Description,
    DueDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascend,
    Descend,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascend => SortOrder::Descend,
            SortOrder::Descend => SortOrder::Ascend,
        }
    }
}

/// Resolve an author uid to a display name.
pub fn author_name<'a>(users: &'a HashMap<String, UserProfile>, uid: &str) -> &'a str {
    users.get(uid).map(|u| u.name.as_str()).unwrap_or(ANONYMOUS)
}

/// The subsequence of `todos` matching `search`, original order preserved.
///
/// An empty search returns the collection unchanged. Otherwise a todo is
/// visible when any field matches the lower-cased search text: timestamp,
/// due date, status, description, title and author name by substring, tags
/// by prefix. The prefix rule for tags is deliberate: searching `urg`
/// should find `urgent-review` but not `super-urgent`.
pub fn visible_todos(
    todos: &[TodoItem],
    search: &str,
    users: &HashMap<String, UserProfile>,
) -> Vec<TodoItem> {
    if search.is_empty() {
        return todos.to_vec();
    }
    let needle = search.to_lowercase();
    todos
        .iter()
        .filter(|todo| matches_search(todo, &needle, users))
        .cloned()
        .collect()
}

/// Field checks short-circuit left to right; `needle` must be lower-cased.
fn matches_search(todo: &TodoItem, needle: &str, users: &HashMap<String, UserProfile>) -> bool {
    todo.time_stamp.contains(needle)
        || todo.due_date.contains(needle)
        || todo
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().starts_with(needle))
        || todo.status.as_str().to_lowercase().contains(needle)
        || todo.description.to_lowercase().contains(needle)
        || todo.title.to_lowercase().contains(needle)
        || author_name(users, &todo.author).to_lowercase().contains(needle)
}

/// Every tag in use, deduplicated, in first-seen order. Feeds the tag
/// suggestions in the dialog.
pub fn unique_tags(todos: &[TodoItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for todo in todos {
        for tag in &todo.tags {
            if !seen.contains(tag) {
                seen.push(tag.clone());
            }
        }
    }
    seen
}

/// Sort for a table column. `YYYY-MM-DD` dates sort correctly as strings,
/// so the date columns compare lexicographically too. An absent due date
/// sorts last in either direction, keeping dated rows together at the top.
pub fn sort_todos(todos: &mut [TodoItem], key: SortKey, order: SortOrder) {
    todos.sort_by(|a, b| {
        let ordering = match key {
            SortKey::TimeStamp => a.time_stamp.cmp(&b.time_stamp),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Description => a.description.cmp(&b.description),
            SortKey::DueDate => match (a.has_due_date(), b.has_due_date()) {
                (false, false) => std::cmp::Ordering::Equal,
                // Empty due dates go last regardless of direction, so the
                // comparator compensates for the later reversal.
                (false, true) => match order {
                    SortOrder::Ascend => std::cmp::Ordering::Greater,
                    SortOrder::Descend => std::cmp::Ordering::Less,
                },
                (true, false) => match order {
                    SortOrder::Ascend => std::cmp::Ordering::Less,
                    SortOrder::Descend => std::cmp::Ordering::Greater,
                },
                (true, true) => a.due_date.cmp(&b.due_date),
            },
        };
        match order {
            SortOrder::Ascend => ordering,
            SortOrder::Descend => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    fn todo(id: &str, title: &str, tags: &[&str]) -> TodoItem {
        TodoItem {
            id: id.into(),
            title: title.into(),
            description: format!("{title} description"),
            status: Status::Open,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            time_stamp: "2024-05-01".into(),
            due_date: "".into(),
            author: "u1".into(),
        }
    }

    fn users_with(uid: &str, name: &str) -> HashMap<String, UserProfile> {
        let mut users = HashMap::new();
        users.insert(
            uid.to_string(),
            UserProfile {
                name: name.into(),
                photo_url: None,
            },
        );
        users
    }

    #[test]
    fn empty_search_returns_collection_unchanged() {
        let todos = vec![todo("a", "Buy milk", &[]), todo("b", "Fix bug", &[])];
        assert_eq!(visible_todos(&todos, "", &HashMap::new()), todos);
    }

    #[test]
    fn search_is_case_insensitive_and_order_preserving() {
        let todos = vec![
            todo("a", "Buy milk", &[]),
            todo("b", "Fix bug", &[]),
            todo("c", "Buy stamps", &[]),
        ];
        let visible = visible_todos(&todos, "BUY", &HashMap::new());
        let ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn tags_match_by_prefix_not_substring() {
        let todos = vec![
            todo("a", "one", &["urgent-review"]),
            todo("b", "two", &["super-urgent"]),
        ];
        let visible = visible_todos(&todos, "urg", &HashMap::new());
        let ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn tag_prefix_and_title_substring_scenario() {
        // A matches "groc" via tag prefix, B via its grocery-urgent tag;
        // "milk" only hits A's title.
        let todos = vec![
            todo("a", "Buy milk", &["grocery"]),
            todo("b", "Fix bug", &["grocery-urgent"]),
        ];
        assert_eq!(visible_todos(&todos, "groc", &HashMap::new()).len(), 2);
        let visible = visible_todos(&todos, "milk", &HashMap::new());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a");
    }

    #[test]
    fn status_due_date_and_timestamp_match_by_substring() {
        let mut overdue = todo("a", "one", &[]);
        overdue.status = Status::Overdue;
        overdue.due_date = "2024-06-15".into();
        let todos = vec![overdue, todo("b", "two", &[])];

        assert_eq!(visible_todos(&todos, "overdue", &HashMap::new()).len(), 1);
        assert_eq!(visible_todos(&todos, "06-15", &HashMap::new()).len(), 1);
        // Both share the creation date.
        assert_eq!(visible_todos(&todos, "2024-05", &HashMap::new()).len(), 2);
    }

    #[test]
    fn author_matches_by_resolved_display_name() {
        let todos = vec![todo("a", "one", &[])];
        let users = users_with("u1", "Marta");
        assert_eq!(visible_todos(&todos, "mart", &users).len(), 1);
        assert_eq!(visible_todos(&todos, "mart", &HashMap::new()).len(), 0);
        // Unresolved authors surface as Anonymous and are searchable as such.
        assert_eq!(visible_todos(&todos, "anony", &HashMap::new()).len(), 1);
    }

    #[test]
    fn no_match_yields_empty() {
        let todos = vec![todo("a", "Buy milk", &["grocery"])];
        assert!(visible_todos(&todos, "zzz", &HashMap::new()).is_empty());
    }

    #[test]
    fn unique_tags_deduplicates_in_first_seen_order() {
        let todos = vec![
            todo("a", "one", &["work", "home"]),
            todo("b", "two", &["home", "errand"]),
        ];
        assert_eq!(unique_tags(&todos), vec!["work", "home", "errand"]);
    }

    #[test]
    fn due_date_sort_keeps_empty_dates_last_in_both_directions() {
        let mut todos = vec![
            todo("a", "one", &[]),
            todo("b", "two", &[]),
            todo("c", "three", &[]),
        ];
        todos[0].due_date = "".into();
        todos[1].due_date = "2024-06-01".into();
        todos[2].due_date = "2024-07-01".into();

        sort_todos(&mut todos, SortKey::DueDate, SortOrder::Ascend);
        let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        sort_todos(&mut todos, SortKey::DueDate, SortOrder::Descend);
        let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn title_sort_orders_both_directions() {
        let mut todos = vec![todo("a", "zebra", &[]), todo("b", "apple", &[])];
        sort_todos(&mut todos, SortKey::Title, SortOrder::Ascend);
        assert_eq!(todos[0].id, "b");
        sort_todos(&mut todos, SortKey::Title, SortOrder::Descend);
        assert_eq!(todos[0].id, "a");
    }
}
