//! Speech playback seam
//!
//! Prompts are queued for synthesis fire-and-forget: the engine never waits
//! for playback to finish and a queued utterance cannot be revoked.

use tracing::info;

/// Text-to-speech playback collaborator
pub trait Speaker: Send + Sync {
    /// Enqueue text for audible synthesis; no completion notification
    fn speak(&self, text: &str);
}

/// Speaker used until a platform synthesizer is wired in: prompts are
/// logged instead of voiced, keeping every spoken interaction observable.
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, text: &str) {
        info!(utterance = text, "speak");
    }
}
