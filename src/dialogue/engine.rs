//! Core dialogue state machine implementation
//!
//! Handles transitions between Idle, AwaitingDueDate, and AwaitingPriority
//! states based on recognized utterances. Transition logic is pure: each
//! incoming capture event produces a list of effects (speak a prompt, hand
//! off a completed task) that the async run loop executes afterwards.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::capture::CaptureEvent;
use crate::events::DialogueEvent;
use crate::speech::Speaker;

use super::draft::{CompletedTask, TaskDraft};

/// Fixed substrings that start a new task-capture dialogue
const TRIGGER_PHRASES: [&str; 2] = ["add task", "create task"];

pub const PROMPT_TITLE_SET: &str = "Task title set. Do you want to set a due date?";
pub const PROMPT_ASK_TITLE: &str = "What is the task title?";
pub const PROMPT_NOT_UNDERSTOOD: &str =
    "I didn't understand that. You can say 'Add task' followed by the task title.";
pub const PROMPT_ASK_PRIORITY: &str =
    "Got it. What priority should I set? High, medium, or low?";
pub const PROMPT_RECOGNITION_ERROR: &str =
    "There was an error with speech recognition. Please try again.";

/// The three possible states of a capture dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    /// No pending question, waiting for a trigger phrase
    Idle,
    /// Title captured, waiting for a due-date utterance
    AwaitingDueDate,
    /// Title and due date captured, waiting for a priority utterance
    AwaitingPriority,
}

impl Default for DialogueState {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for DialogueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogueState::Idle => write!(f, "Idle"),
            DialogueState::AwaitingDueDate => write!(f, "AwaitingDueDate"),
            DialogueState::AwaitingPriority => write!(f, "AwaitingPriority"),
        }
    }
}

/// Side effect requested by a transition, executed by the run loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Queue an utterance for speech playback
    Speak(String),
    /// Hand a finished task record to the task sink
    CompleteTask(CompletedTask),
}

/// The state machine that turns recognized utterances into task records
pub struct DialogueEngine {
    /// Current dialogue state
    state: DialogueState,
    /// In-progress task record
    draft: TaskDraft,
    /// Channel for emitting dialogue events
    event_tx: broadcast::Sender<DialogueEvent>,
}

impl DialogueEngine {
    /// Create a new dialogue engine
    pub fn new(event_tx: broadcast::Sender<DialogueEvent>) -> Self {
        Self {
            state: DialogueState::Idle,
            draft: TaskDraft::default(),
            event_tx,
        }
    }

    /// Get the current state
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// Snapshot of the in-progress draft
    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Run the engine, processing capture events and executing effects
    pub async fn run(
        &mut self,
        mut capture_rx: mpsc::Receiver<CaptureEvent>,
        speaker: Arc<dyn Speaker>,
        task_tx: mpsc::Sender<CompletedTask>,
    ) {
        info!("dialogue engine started in Idle state");

        while let Some(event) = capture_rx.recv().await {
            for effect in self.handle_capture_event(event) {
                match effect {
                    Effect::Speak(text) => speaker.speak(&text),
                    Effect::CompleteTask(task) => {
                        if task_tx.send(task).await.is_err() {
                            warn!("task sink closed, dropping completed task");
                        }
                    }
                }
            }
        }

        info!("dialogue engine stopped");
    }

    /// React to one capture event. Pure with respect to the outside world:
    /// all side effects are returned for the caller to execute.
    pub fn handle_capture_event(&mut self, event: CaptureEvent) -> Vec<Effect> {
        match event {
            CaptureEvent::Utterance(text) => self.handle_utterance(&text),
            CaptureEvent::Error(code) => self.handle_recognition_error(&code),
        }
    }

    /// Handle one recognized utterance
    fn handle_utterance(&mut self, raw: &str) -> Vec<Effect> {
        let transcript = raw.to_lowercase();
        debug!(%transcript, state = %self.state, "utterance received");

        let mut effects = match self.state {
            DialogueState::Idle => self.handle_from_idle(&transcript),
            DialogueState::AwaitingDueDate => self.handle_due_date(&transcript),
            DialogueState::AwaitingPriority => self.handle_priority(&transcript),
        };

        // Completion is an invariant check over the draft, not a property of
        // any particular transition: whenever all three fields are filled,
        // the task is emitted and the draft resets for the next dialogue.
        if let Some(task) = self.draft.take_completed() {
            self.transition_to(DialogueState::Idle);
            self.emit(DialogueEvent::TaskCompleted {
                title: task.title.clone(),
            });
            effects.push(Effect::CompleteTask(task));
        }

        effects
    }

    /// Idle: look for a trigger phrase and try to extract a title
    fn handle_from_idle(&mut self, transcript: &str) -> Vec<Effect> {
        if !contains_trigger_phrase(transcript) {
            self.emit(DialogueEvent::CommandNotRecognized);
            return vec![Effect::Speak(PROMPT_NOT_UNDERSTOOD.to_string())];
        }

        let title = strip_trigger_phrases(transcript);
        if title.is_empty() {
            // Trigger heard but no title yet; stay Idle and ask for one
            return vec![Effect::Speak(PROMPT_ASK_TITLE.to_string())];
        }

        self.draft.title = title.clone();
        self.transition_to(DialogueState::AwaitingDueDate);
        self.emit(DialogueEvent::TitleCaptured { title });
        vec![Effect::Speak(PROMPT_TITLE_SET.to_string())]
    }

    /// AwaitingDueDate: any utterance is taken verbatim as the due date
    fn handle_due_date(&mut self, transcript: &str) -> Vec<Effect> {
        let due_date = transcript.trim().to_string();
        self.draft.due_date = due_date.clone();
        self.transition_to(DialogueState::AwaitingPriority);
        self.emit(DialogueEvent::DueDateCaptured { due_date });
        vec![Effect::Speak(PROMPT_ASK_PRIORITY.to_string())]
    }

    /// AwaitingPriority: any utterance is taken verbatim as the priority
    fn handle_priority(&mut self, transcript: &str) -> Vec<Effect> {
        let priority = transcript.trim().to_string();
        self.draft.priority = priority.clone();
        self.transition_to(DialogueState::Idle);
        self.emit(DialogueEvent::PriorityCaptured { priority });
        Vec::new()
    }

    /// A recognition failure leaves state and draft untouched
    fn handle_recognition_error(&mut self, code: &str) -> Vec<Effect> {
        warn!(code, state = %self.state, "speech recognition error");
        self.emit(DialogueEvent::RecognitionFailed {
            code: code.to_string(),
        });
        vec![Effect::Speak(PROMPT_RECOGNITION_ERROR.to_string())]
    }

    /// Perform a state transition
    fn transition_to(&mut self, new_state: DialogueState) {
        if new_state != self.state {
            info!(from = %self.state, to = %new_state, "state transition");
            self.state = new_state;
        }
    }

    /// Emit a dialogue event to subscribers
    fn emit(&self, event: DialogueEvent) {
        debug!(?event, "emitting dialogue event");
        let _ = self.event_tx.send(event);
    }
}

/// Whether the transcript contains any trigger phrase, anywhere in the text.
/// Substring matching tolerates recognizer noise around the command words.
fn contains_trigger_phrase(transcript: &str) -> bool {
    TRIGGER_PHRASES
        .iter()
        .any(|phrase| transcript.contains(phrase))
}

/// Remove the first occurrence of each trigger phrase and trim the rest.
///
/// Only the first literal occurrence of each phrase is stripped; a title
/// that itself contains "add task" mid-string loses that substring.
fn strip_trigger_phrases(transcript: &str) -> String {
    let mut title = transcript.to_string();
    for phrase in TRIGGER_PHRASES {
        title = title.replacen(phrase, "", 1);
    }
    title.trim().to_string()
}
