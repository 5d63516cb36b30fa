use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest title a Todo may carry, in characters.
pub const MAX_TITLE_LENGTH: usize = 30;

/// Display state derived from the `finished` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Active,
    Finished,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Active => "active",
            TodoStatus::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id: String,
    title: String,
    finished: bool,
    created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates an unfinished Todo with a fresh id, stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            finished: false,
            created_at: current_timestamp(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(
        id: String,
        title: String,
        finished: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            finished,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> TodoStatus {
        if self.finished {
            TodoStatus::Finished
        } else {
            TodoStatus::Active
        }
    }

    /// One-way transition; the caller is responsible for rejecting a second finish.
    pub fn mark_finished(&mut self) {
        self.finished = true;
    }
}

/// Current time truncated to milliseconds, the precision every store keeps.
fn current_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let before = Utc::now();
        let todo = Todo::new("Buy milk");

        assert_eq!(todo.title(), "Buy milk");
        assert!(!todo.is_finished());
        assert_eq!(todo.status(), TodoStatus::Active);
        assert!(Uuid::parse_str(todo.id()).is_ok());
        assert!(todo.created_at().timestamp_millis() >= before.timestamp_millis());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Todo::new("a");
        let b = Todo::new("b");

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_mark_finished() {
        let mut todo = Todo::new("Write report");
        let created_at = todo.created_at();

        todo.mark_finished();

        assert!(todo.is_finished());
        assert_eq!(todo.status(), TodoStatus::Finished);
        assert_eq!(todo.created_at(), created_at);
    }

    #[test]
    fn test_reconstitute_keeps_fields() {
        let created_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let todo = Todo::reconstitute("id-1".to_string(), "t".to_string(), true, created_at);

        assert_eq!(todo.id(), "id-1");
        assert_eq!(todo.title(), "t");
        assert!(todo.is_finished());
        assert_eq!(todo.created_at(), created_at);
    }
}
