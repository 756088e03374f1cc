//! Frontend Models
//!
//! Data structures matching the remote store documents.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a todo.
///
/// Creation only offers Open and Working; editing allows all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Open,
    Working,
    Done,
    Overdue,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Open, Status::Working, Status::Done, Status::Overdue];
    pub const CREATABLE: [Status; 2] = [Status::Open, Status::Working];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Working => "Working",
            Status::Done => "Done",
            Status::Overdue => "Overdue",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Status::Open),
            "Working" => Ok(Status::Working),
            "Done" => Ok(Status::Done),
            "Overdue" => Ok(Status::Overdue),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Todo item as held in memory.
///
/// `id` is assigned by the store on creation and never changes afterwards,
/// same for `time_stamp` and `author`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    /// Deduplicated, case-sensitive tag tokens.
    pub tags: Vec<String>,
    /// Creation date, `YYYY-MM-DD`.
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    /// Due date, `YYYY-MM-DD`, empty string when absent.
    #[serde(rename = "dueDate")]
    pub due_date: String,
    /// Uid of the authenticated user who created the todo.
    pub author: String,
}

impl TodoItem {
    pub fn has_due_date(&self) -> bool {
        !self.due_date.is_empty()
    }
}

/// Public profile of a user, keyed by uid in the users collection.
/// Upserted every time its owner signs in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Result of a successful authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl UserIdentity {
    /// Profile document written to the users collection on sign-in.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.display_name.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>(), Ok(status));
        }
    }

    #[test]
    fn status_rejects_unknown_names() {
        assert!("open".parse::<Status>().is_err());
        assert!("".parse::<Status>().is_err());
    }

    #[test]
    fn todo_serializes_with_store_field_names() {
        let todo = TodoItem {
            id: "t1".into(),
            title: "Buy milk".into(),
            description: "2 liters".into(),
            status: Status::Open,
            tags: vec!["grocery".into()],
            time_stamp: "2024-05-01".into(),
            due_date: "".into(),
            author: "u1".into(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["timeStamp"], "2024-05-01");
        assert_eq!(json["dueDate"], "");
        assert_eq!(json["status"], "Open");
    }
}
