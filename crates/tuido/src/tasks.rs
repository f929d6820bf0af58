#![forbid(unsafe_code)]

//! Task entity and the owning store.
//!
//! The store is the single owner of the task collection. All mutation goes
//! through [`TaskStore::create`], [`TaskStore::toggle`], and
//! [`TaskStore::delete`]; views only ever borrow the slice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities in display order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidPriority),
        }
    }
}

/// Error for a priority value outside the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("priority must be low, medium, or high")]
pub struct InvalidPriority;

/// The validated payload a form submission produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Trimmed title.
    pub title: String,
    /// Description as typed (may be empty).
    pub description: String,
    /// Selected priority.
    pub priority: Priority,
}

/// A task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id.
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Always `>= created_at`; bumped on toggle.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Stable short marker derived from the id, for row lookup in views.
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }

    /// Accessible label for the row's delete control.
    ///
    /// The title is embedded verbatim, quotes and all.
    #[must_use]
    pub fn delete_label(&self) -> String {
        format!("Delete task \"{}\"", self.title)
    }
}

/// Owner of the ordered task collection (newest first).
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task from a draft and prepend it.
    ///
    /// Stamps a fresh UUID and `created_at == updated_at == now`. Returns the
    /// new task's id.
    pub fn create(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> String {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        let id = task.id.clone();
        self.tasks.insert(0, task);
        id
    }

    /// Flip `completed` and bump `updated_at` for the matching id.
    ///
    /// The matching task is replaced with a fresh value; every other element
    /// is left untouched. Returns `false` for an unknown id.
    pub fn toggle(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let old = &self.tasks[index];
        self.tasks[index] = Task {
            completed: !old.completed,
            updated_at: now,
            ..old.clone()
        };
        true
    }

    /// Remove the matching id, preserving the order of the rest.
    ///
    /// Idempotent: deleting an unknown id leaves the store unchanged and
    /// returns `false`.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }
}
