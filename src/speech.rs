//! Speech collaborator seams.
//!
//! Narration and recognition are external capabilities behind traits so the
//! control loop can be exercised with fakes. Recognition failures are typed
//! rather than swallowed; the loop maps every one of them to "no command"
//! in a single place.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeakError {
    #[error("speech synthesizer unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
    #[error("speech synthesizer exited with {0}")]
    Failed(std::process::ExitStatus),
}

#[derive(Debug, Error)]
pub enum ListenError {
    #[error("speech recognizer unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
    #[error("no speech detected within the listen window")]
    NoSpeech,
    #[error("speech recognizer exited with {0}")]
    Failed(std::process::ExitStatus),
}

/// Speech synthesis collaborator. `speak` returns only after playback
/// has completed.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), SpeakError>;
}

/// Speech recognition collaborator. Listens for up to its configured
/// window and transcribes what it heard.
#[async_trait]
pub trait Listener: Send + Sync {
    async fn listen(&self) -> Result<String, ListenError>;
}
