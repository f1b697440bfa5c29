//! Dialogue module: the task-capture conversation core
//!
//! Provides an explicit state machine with three states:
//! - Idle: default state, waiting for a trigger phrase
//! - AwaitingDueDate: title captured, due-date question pending
//! - AwaitingPriority: due date captured, priority question pending

mod draft;
mod engine;

pub use draft::{CompletedTask, TaskDraft};
pub use engine::{DialogueEngine, DialogueState, Effect};
