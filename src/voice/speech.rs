//! Speech collaborator seams.
//!
//! Recording, platform speech recognition, and audio playback live in the
//! host app; this crate only defines the contracts it consumes.

use async_trait::async_trait;

use crate::error::AgentError;

/// Outcome of one transcription attempt.
///
/// `Unintelligible` is a distinguished result, not an error: the recognizer
/// worked but could not make out words, and the orchestrator should re-prompt
/// rather than fall back.
#[derive(Debug, Clone, PartialEq)]
pub enum Transcript {
    Text(String),
    Unintelligible,
}

/// Converts recorded audio into a transcript for a given language tag.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: &[u8], language: &str) -> Result<Transcript, AgentError>;
}

/// Speaks utterances asynchronously; playback control is best-effort.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn speak(&self, utterance: &str, language: &str) -> Result<(), AgentError>;
    async fn stop(&self);
    async fn pause(&self);
    async fn resume(&self);
}
