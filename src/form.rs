//! Todo Dialog Form Data
//!
//! Raw field values of the create/edit dialog plus the normalization that
//! turns them into a store-ready draft. Validation messages live here too so
//! the dialog and its tests agree on the limits.

use serde::Serialize;

use crate::models::{Status, TodoItem};

pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 1000;

/// Whether the dialog creates a new todo or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

impl FormMode {
    /// Status choices offered by the dialog: creation is restricted to
    /// Open/Working, editing allows all four.
    pub fn status_choices(&self) -> &'static [Status] {
        match self {
            FormMode::Create => &Status::CREATABLE,
            FormMode::Update => &Status::ALL,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "CREATE",
            FormMode::Update => "UPDATE",
        }
    }
}

/// Field values as entered in the dialog.
///
/// `id` is the hidden state carried by an edit form; `time_stamp` and
/// `due_date` are the two halves of the date-range input. The first half is
/// fixed by the dialog (today for create, the original creation date for
/// edit), the second is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoForm {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: Status,
    /// Raw tag entry, `#token` syntax.
    pub tags_input: String,
    pub time_stamp: String,
    pub due_date: String,
}

impl TodoForm {
    /// Blank form for the create dialog, creation date pinned to today.
    pub fn for_create() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            status: Status::Open,
            tags_input: String::new(),
            time_stamp: today(),
            due_date: String::new(),
        }
    }

    /// Prefill for the edit dialog; tags are re-joined in `#token` form.
    pub fn from_item(todo: &TodoItem) -> Self {
        Self {
            id: Some(todo.id.clone()),
            title: todo.title.clone(),
            description: todo.description.clone(),
            status: todo.status,
            tags_input: join_tags(&todo.tags),
            time_stamp: todo.time_stamp.clone(),
            due_date: todo.due_date.clone(),
        }
    }
}

/// Mutable fields of a todo, normalized and ready to send to the store.
/// The controller attaches `author` on create; `id` never travels in the
/// document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub tags: Vec<String>,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

impl TodoDraft {
    pub fn from_form(form: &TodoForm) -> Self {
        Self {
            title: form.title.clone(),
            description: form.description.clone(),
            status: form.status,
            tags: parse_tags(&form.tags_input),
            time_stamp: form.time_stamp.clone(),
            due_date: form.due_date.clone(),
        }
    }

    /// Apply the draft to an existing todo, keeping the immutable fields.
    pub fn applied_to(&self, todo: &TodoItem) -> TodoItem {
        TodoItem {
            id: todo.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            tags: self.tags.clone(),
            time_stamp: self.time_stamp.clone(),
            due_date: self.due_date.clone(),
            author: todo.author.clone(),
        }
    }
}

/// Split raw tag entry on `#`, trim the tokens, drop empties and
/// duplicates. First occurrence wins, so the result keeps entry order.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for token in input.trim().split('#') {
        let token = token.trim();
        if !token.is_empty() && !tags.iter().any(|t| t == token) {
            tags.push(token.to_string());
        }
    }
    tags
}

/// Inverse of [`parse_tags`] for the edit prefill: `["a", "b"]` -> `"#a #b"`.
pub fn join_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Today's date in the store's `YYYY-MM-DD` format.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Title validation message, `None` when valid.
pub fn validate_title(title: &str) -> Option<&'static str> {
    if title.is_empty() {
        Some("Please input todo's title!")
    } else if title.chars().count() > TITLE_MAX {
        Some("Maximum title length is 100 characters.")
    } else {
        None
    }
}

/// Description validation message, `None` when valid.
pub fn validate_description(description: &str) -> Option<&'static str> {
    if description.is_empty() {
        Some("Please provide some description.")
    } else if description.chars().count() > DESCRIPTION_MAX {
        Some("Maximum description length is 1000 characters.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_deduplicates() {
        assert_eq!(parse_tags("#a #b #a  #b"), vec!["a", "b"]);
    }

    #[test]
    fn parse_tags_handles_empty_and_bare_hashes() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags("   ").is_empty());
        assert!(parse_tags("###").is_empty());
        assert_eq!(parse_tags("no-hash-prefix"), vec!["no-hash-prefix"]);
    }

    #[test]
    fn parse_tags_is_case_sensitive() {
        assert_eq!(parse_tags("#Work #work"), vec!["Work", "work"]);
    }

    #[test]
    fn join_tags_round_trips_through_parse() {
        let tags = vec!["grocery".to_string(), "urgent-review".to_string()];
        assert_eq!(join_tags(&tags), "#grocery #urgent-review");
        assert_eq!(parse_tags(&join_tags(&tags)), tags);
    }

    #[test]
    fn draft_normalizes_form_fields() {
        let mut form = TodoForm::for_create();
        form.title = "Buy milk".into();
        form.description = "2 liters".into();
        form.tags_input = "#grocery #grocery".into();
        form.due_date = "2024-06-01".into();

        let draft = TodoDraft::from_form(&form);
        assert_eq!(draft.tags, vec!["grocery"]);
        assert_eq!(draft.due_date, "2024-06-01");
        assert_eq!(draft.time_stamp, form.time_stamp);
    }

    #[test]
    fn applied_to_preserves_immutable_fields() {
        let original = TodoItem {
            id: "t1".into(),
            title: "Old".into(),
            description: "old".into(),
            status: Status::Open,
            tags: vec![],
            time_stamp: "2024-05-01".into(),
            due_date: "".into(),
            author: "u1".into(),
        };
        let mut form = TodoForm::from_item(&original);
        form.title = "New".into();
        form.status = Status::Done;

        let updated = TodoDraft::from_form(&form).applied_to(&original);
        assert_eq!(updated.id, "t1");
        assert_eq!(updated.author, "u1");
        assert_eq!(updated.time_stamp, "2024-05-01");
        assert_eq!(updated.title, "New");
        assert_eq!(updated.status, Status::Done);
    }

    #[test]
    fn edit_prefill_carries_hidden_id_and_joined_tags() {
        let todo = TodoItem {
            id: "t9".into(),
            title: "Fix bug".into(),
            description: "in prod".into(),
            status: Status::Working,
            tags: vec!["work".into(), "urgent".into()],
            time_stamp: "2024-05-01".into(),
            due_date: "2024-06-01".into(),
            author: "u1".into(),
        };
        let form = TodoForm::from_item(&todo);
        assert_eq!(form.id.as_deref(), Some("t9"));
        assert_eq!(form.tags_input, "#work #urgent");
    }

    #[test]
    fn validation_enforces_required_and_max_length() {
        assert!(validate_title("").is_some());
        assert!(validate_title(&"x".repeat(TITLE_MAX)).is_none());
        assert!(validate_title(&"x".repeat(TITLE_MAX + 1)).is_some());

        assert!(validate_description("").is_some());
        assert!(validate_description(&"x".repeat(DESCRIPTION_MAX)).is_none());
        assert!(validate_description(&"x".repeat(DESCRIPTION_MAX + 1)).is_some());
    }
}
