//! Production speech adapters.
//!
//! Synthesis and recognition run as external commands, the same way the
//! dictation tools in this family shell out to their platform helpers.
//! Console and silent fallbacks keep headless deployments runnable.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use crate::speech::{ListenError, Listener, Narrator, SpeakError};

/// Speaks by invoking an external TTS command with the text appended as
/// the final argument, waiting for the process (and its playback) to exit.
pub struct SubprocessNarrator {
    argv: Vec<String>,
}

impl SubprocessNarrator {
    /// `argv` must be non-empty; the first element is the program.
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

#[async_trait]
impl Narrator for SubprocessNarrator {
    async fn speak(&self, text: &str) -> Result<(), SpeakError> {
        debug!("Speaking {} chars via {:?}", text.len(), self.argv[0]);

        // Cancellation drops this future; the child dies with it.
        let mut child = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .arg(text)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(SpeakError::Unavailable)?;
        let status = child.wait().await.map_err(SpeakError::Unavailable)?;

        if !status.success() {
            return Err(SpeakError::Failed(status));
        }
        Ok(())
    }
}

/// Log-only voice output for machines without a synthesizer.
pub struct ConsoleNarrator;

#[async_trait]
impl Narrator for ConsoleNarrator {
    async fn speak(&self, text: &str) -> Result<(), SpeakError> {
        info!("[voice] {text}");
        Ok(())
    }
}

/// Listens by running an external recognizer command that prints its
/// transcript to stdout. The process is killed at the window deadline.
pub struct SubprocessListener {
    argv: Vec<String>,
    window: Duration,
}

impl SubprocessListener {
    /// `argv` must be non-empty; the first element is the program.
    pub fn new(argv: Vec<String>, window: Duration) -> Self {
        Self { argv, window }
    }
}

#[async_trait]
impl Listener for SubprocessListener {
    async fn listen(&self) -> Result<String, ListenError> {
        let child = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(ListenError::Unavailable)?;

        let output = match tokio::time::timeout(self.window, child.wait_with_output()).await {
            Ok(result) => result.map_err(ListenError::Unavailable)?,
            Err(_) => {
                debug!("Recognizer exceeded the {:?} listen window", self.window);
                return Err(ListenError::NoSpeech);
            }
        };

        if !output.status.success() {
            return Err(ListenError::Failed(output.status));
        }

        let heard = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if heard.is_empty() {
            return Err(ListenError::NoSpeech);
        }
        debug!("Heard: {heard:?}");
        Ok(heard)
    }
}

/// Listener for deployments without a microphone: never hears anything.
pub struct SilentListener;

#[async_trait]
impl Listener for SilentListener {
    async fn listen(&self) -> Result<String, ListenError> {
        Err(ListenError::NoSpeech)
    }
}

/// Pick a narrator for the configured synthesis command.
pub fn narrator_from_command(argv: &[String]) -> Box<dyn Narrator> {
    if argv.is_empty() {
        info!("No speak command configured, voice output goes to the log");
        Box::new(ConsoleNarrator)
    } else {
        Box::new(SubprocessNarrator::new(argv.to_vec()))
    }
}

/// Pick a listener for the configured recognizer command.
pub fn listener_from_command(argv: &[String], window: Duration) -> Box<dyn Listener> {
    if argv.is_empty() {
        info!("No listen command configured, command polling will hear nothing");
        Box::new(SilentListener)
    } else {
        Box::new(SubprocessListener::new(argv.to_vec(), window))
    }
}
