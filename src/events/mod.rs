//! Events module for dialogue observability
//!
//! Provides structured event types for listening toggles, captured task
//! fields, and recognition failures.

use serde::{Deserialize, Serialize};

/// Events emitted by the coordinator and the dialogue engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueEvent {
    /// Speech capture activated via the activation toggle
    ListeningStarted,

    /// Speech capture deactivated via the activation toggle
    ListeningStopped,

    /// A trigger phrase with a non-empty title started a dialogue
    TitleCaptured {
        /// Extracted task title
        title: String,
    },

    /// The due-date question was answered
    DueDateCaptured {
        /// Raw trimmed due-date text
        due_date: String,
    },

    /// The priority question was answered
    PriorityCaptured {
        /// Raw trimmed priority text
        priority: String,
    },

    /// All three fields filled; a task record was handed to the sink
    TaskCompleted {
        /// Title of the completed task
        title: String,
    },

    /// Speech recognition reported an error for one capture attempt
    RecognitionFailed {
        /// Recognizer error code
        code: String,
    },

    /// An Idle-state utterance matched no trigger phrase
    CommandNotRecognized,
}

impl std::fmt::Display for DialogueEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogueEvent::ListeningStarted => write!(f, "LISTENING_STARTED"),
            DialogueEvent::ListeningStopped => write!(f, "LISTENING_STOPPED"),
            DialogueEvent::TitleCaptured { title } => {
                write!(f, "TITLE_CAPTURED ({})", title)
            }
            DialogueEvent::DueDateCaptured { due_date } => {
                write!(f, "DUE_DATE_CAPTURED ({})", due_date)
            }
            DialogueEvent::PriorityCaptured { priority } => {
                write!(f, "PRIORITY_CAPTURED ({})", priority)
            }
            DialogueEvent::TaskCompleted { title } => {
                write!(f, "TASK_COMPLETED ({})", title)
            }
            DialogueEvent::RecognitionFailed { code } => {
                write!(f, "RECOGNITION_FAILED ({})", code)
            }
            DialogueEvent::CommandNotRecognized => write!(f, "COMMAND_NOT_RECOGNIZED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = DialogueEvent::TitleCaptured {
            title: "buy milk".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("title_captured"));
        assert!(json.contains("buy milk"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"listening_started"}"#;
        let event: DialogueEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, DialogueEvent::ListeningStarted));
    }
}
