//! # traq-core
//!
//! Domain types shared across the traq client crates.
//!
//! Tasks are owned by the backend; the client only holds transient,
//! possibly-stale copies for display. This crate carries the wire shapes
//! and the display formatting, nothing more.

#![deny(unsafe_code)]

pub mod task;
pub mod time_format;

pub use task::{Task, TaskDraft, TaskStatus};
pub use time_format::format_hms;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _task = Task {
            id: 1,
            title: "Buy milk".to_string(),
            status: TaskStatus::Uncompleted,
        };
        let _draft = TaskDraft::default();
        let _s = format_hms(0);
    }
}
