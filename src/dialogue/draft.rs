//! Task draft accumulation and completion detection
//!
//! A `TaskDraft` collects the answers of an in-progress capture dialogue one
//! field per turn. The moment all three fields are non-empty the draft is
//! taken as a `CompletedTask` and reset, ready for the next dialogue.

use serde::Serialize;

/// In-progress task record accumulated across dialogue turns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title, set when a trigger phrase arrives with remainder text
    pub title: String,
    /// Due date as raw trimmed speech, no date parsing
    pub due_date: String,
    /// Priority as raw trimmed speech, not constrained to high/medium/low
    pub priority: String,
}

impl TaskDraft {
    /// All three fields are filled in
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.due_date.is_empty() && !self.priority.is_empty()
    }

    /// Take the completed task out of the draft, leaving it all-empty.
    ///
    /// Returns `None` if any field is still missing.
    pub fn take_completed(&mut self) -> Option<CompletedTask> {
        if !self.is_complete() {
            return None;
        }
        let task = CompletedTask {
            title: std::mem::take(&mut self.title),
            due_date: std::mem::take(&mut self.due_date),
            priority: std::mem::take(&mut self.priority),
        };
        Some(task)
    }
}

/// A finished task record handed to the task sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTask {
    pub title: String,
    pub due_date: String,
    pub priority: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft_incomplete() {
        let draft = TaskDraft::default();
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_partial_draft_incomplete() {
        let draft = TaskDraft {
            title: "buy milk".to_string(),
            due_date: "tomorrow".to_string(),
            priority: String::new(),
        };
        assert!(!draft.is_complete());
        assert_eq!(draft.clone().take_completed(), None);
    }

    #[test]
    fn test_take_completed_resets_draft() {
        let mut draft = TaskDraft {
            title: "buy milk".to_string(),
            due_date: "tomorrow".to_string(),
            priority: "high".to_string(),
        };

        let task = draft.take_completed().expect("draft was complete");
        assert_eq!(task.title, "buy milk");
        assert_eq!(task.due_date, "tomorrow");
        assert_eq!(task.priority, "high");

        // Draft is indistinguishable from a freshly initialized one
        assert_eq!(draft, TaskDraft::default());
    }

    #[test]
    fn test_completed_task_serialization() {
        let task = CompletedTask {
            title: "walk the dog".to_string(),
            due_date: "friday".to_string(),
            priority: "low".to_string(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("walk the dog"));
        assert!(json.contains("priority"));
    }
}
