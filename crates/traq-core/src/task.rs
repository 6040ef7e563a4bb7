//! Task wire types and the form draft buffer.
//!
//! The backend owns all task state. `Task` mirrors what the API returns;
//! `TaskDraft` is the transient input buffer staged for create/update and
//! is never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task, serialized with the exact strings the backend uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not yet done.
    #[default]
    Uncompleted,
    /// Done.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl TaskStatus {
    /// All statuses, in the order the status selector cycles through them.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Uncompleted,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// The backend's string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Uncompleted => "Uncompleted",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Current status.
    pub status: TaskStatus,
}

/// Transient form buffer staged for create/update submissions.
///
/// `status` is a plain string mirroring the form's select input rather than
/// a [`TaskStatus`]: the reset-after-update path leaves it empty (see
/// [`TaskDraft::reset_after_update`]), which no enum member represents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Title input.
    pub title: String,
    /// Status input; valid values are the [`TaskStatus`] strings.
    pub status: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            status: TaskStatus::Uncompleted.as_str().to_string(),
        }
    }
}

impl TaskDraft {
    /// Stage an existing task's fields for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            status: task.status.as_str().to_string(),
        }
    }

    /// Reset after a successful create: empty title, `Uncompleted` status.
    pub fn reset_for_create(&mut self) {
        *self = Self::default();
    }

    /// Reset after a successful update: empty title and an **empty status
    /// string**.
    ///
    /// The empty status is a long-standing quirk of this client; it is not a
    /// valid [`TaskStatus`] value, and the intended default was never
    /// confirmed, so the behaviour is kept as-is.
    pub fn reset_after_update(&mut self) {
        self.title.clear();
        self.status.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
