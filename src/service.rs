//! Control loop orchestration.
//!
//! FETCH_NEWS → SCAN → PLAY_MEDIA → PLAY_TRANSCRIPTS → SLEEP, repeated
//! until the cancellation token fires. Within every phase, each narrated
//! item is followed by a command poll; a spoken "stop" breaks the current
//! item loop only.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{self, VoiceCommand};
use crate::config::Config;
use crate::error::PhaseError;
use crate::feed::FeedSource;
use crate::journal::{Journal, JournalEntry, JournalEvent};
use crate::library;
use crate::player::MediaPlayer;
use crate::speech::{Listener, Narrator};
use crate::summarize::{summarize, Summary};

const ONLINE_ANNOUNCEMENT: &str = "News narrator online.";
const COMMAND_PROMPT: &str = "Command: next, skip, stop, or repeat.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FetchNews,
    PlayMedia,
    PlayTranscripts,
    Sleep,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchNews => write!(f, "FETCH_NEWS"),
            Self::PlayMedia => write!(f, "PLAY_MEDIA"),
            Self::PlayTranscripts => write!(f, "PLAY_TRANSCRIPTS"),
            Self::Sleep => write!(f, "SLEEP"),
        }
    }
}

/// The assistant loop with all collaborators passed in explicitly.
pub struct Assistant {
    config: Config,
    journal: Journal,
    feeds: Box<dyn FeedSource>,
    narrator: Box<dyn Narrator>,
    listener: Box<dyn Listener>,
    player: Box<dyn MediaPlayer>,
    cancel: CancellationToken,
}

impl Assistant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        journal: Journal,
        feeds: Box<dyn FeedSource>,
        narrator: Box<dyn Narrator>,
        listener: Box<dyn Listener>,
        player: Box<dyn MediaPlayer>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            journal,
            feeds,
            narrator,
            listener,
            player,
            cancel,
        }
    }

    /// Run cycles until cancellation. There is no other way out.
    pub async fn run(&self) {
        self.announce_online().await;

        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            if self.run_cycle().await.is_err() {
                break;
            }

            info!("Phase: {}", Phase::Sleep);
            let pause = Duration::from_secs_f64(self.config.cycle.pause_secs);
            let announcement = format!(
                "Cycle complete. Checking again in {}.",
                pause_phrase(pause.as_secs())
            );
            if let Err(e) = self.speak(&announcement).await {
                if e.is_cancelled() {
                    break;
                }
                warn!("Cycle announcement failed: {e}");
            }

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        info!("Narrator loop stopped");
    }

    /// Announce startup and run exactly one cycle.
    pub async fn run_once(&self) {
        self.announce_online().await;
        let _ = self.run_cycle().await;
    }

    /// One pass over feeds, media, and transcripts.
    ///
    /// Collaborator failures skip the affected feed or file phase with a
    /// warning; the only `Err` out of here is cancellation.
    pub async fn run_cycle(&self) -> Result<(), PhaseError> {
        info!("Phase: {}", Phase::FetchNews);
        for url in &self.config.feeds.urls {
            match self.narrate_feed(url).await {
                Ok(()) => {}
                Err(PhaseError::Cancelled) => return Err(PhaseError::Cancelled),
                Err(e) => warn!("Skipping feed {url}: {e}"),
            }
        }

        let inventory = match library::scan(&self.config.library.folder) {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!("Library scan failed, skipping media and transcripts: {e}");
                return Ok(());
            }
        };
        match self
            .speak(&library::describe(inventory.total(), self.config.voice.style))
            .await
        {
            Ok(()) => {}
            Err(PhaseError::Cancelled) => return Err(PhaseError::Cancelled),
            Err(e) => warn!("Library overview failed: {e}"),
        }

        info!("Phase: {}", Phase::PlayMedia);
        match self.play_media(&inventory.media).await {
            Ok(()) => {}
            Err(PhaseError::Cancelled) => return Err(PhaseError::Cancelled),
            Err(e) => warn!("Media phase aborted: {e}"),
        }

        info!("Phase: {}", Phase::PlayTranscripts);
        match self.read_transcripts(&inventory.transcripts).await {
            Ok(()) => {}
            Err(PhaseError::Cancelled) => return Err(PhaseError::Cancelled),
            Err(e) => warn!("Transcript phase aborted: {e}"),
        }

        Ok(())
    }

    async fn announce_online(&self) {
        if let Err(e) = self.speak(ONLINE_ANNOUNCEMENT).await {
            warn!("Startup announcement failed: {e}");
        }
    }

    async fn narrate_feed(&self, url: &str) -> Result<(), PhaseError> {
        self.speak("Fetching the latest news.").await?;

        let items = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(PhaseError::Cancelled),
            result = self.feeds.fetch(url) => result?,
        };

        for item in items {
            let Summary { summary, topics } = summarize(item.summary_source());

            self.speak(&format!("News: {}", item.title)).await?;
            self.speak(&format!("Summary: {summary}")).await?;
            self.speak_topics(&topics).await?;

            self.journal.append(JournalEntry::now(JournalEvent::News {
                source: url.to_string(),
                title: item.title,
                summary,
                topics,
            }))?;

            if self.poll_command().await?.is_stop() {
                info!("Stop command, moving to the next feed");
                break;
            }
        }
        Ok(())
    }

    async fn play_media(&self, files: &[PathBuf]) -> Result<(), PhaseError> {
        for file in files {
            self.speak(&format!("Playing {}", display_name(file))).await?;
            self.play_or_pause(file).await?;

            self.journal.append(JournalEntry::now(JournalEvent::Media {
                file: file.clone(),
            }))?;

            if self.poll_command().await?.is_stop() {
                info!("Stop command, ending media playback");
                break;
            }
        }
        Ok(())
    }

    async fn read_transcripts(&self, files: &[PathBuf]) -> Result<(), PhaseError> {
        for file in files {
            let text = match std::fs::read_to_string(file) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping unreadable transcript {}: {e}", file.display());
                    continue;
                }
            };
            let Summary { summary, topics } = summarize(&text);

            self.speak(&format!("Transcript: {}", display_name(file))).await?;
            self.speak(&format!("Summary: {summary}")).await?;
            self.speak_topics(&topics).await?;

            self.journal
                .append(JournalEntry::now(JournalEvent::Transcript {
                    file: file.clone(),
                    summary,
                    topics,
                }))?;

            if self.poll_command().await?.is_stop() {
                info!("Stop command, ending transcript narration");
                break;
            }
        }
        Ok(())
    }

    /// Preview a media file; fall back to a timed pause when it cannot
    /// be played.
    async fn play_or_pause(&self, file: &Path) -> Result<(), PhaseError> {
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(PhaseError::Cancelled),
            result = self.player.play_snippet(file) => result,
        };

        if let Err(e) = result {
            warn!("Cannot preview {}: {e}, pausing instead", file.display());
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(PhaseError::Cancelled),
                _ = tokio::time::sleep(self.snippet_duration()) => {}
            }
        }
        Ok(())
    }

    /// Speak the prompt and listen once. Every recognition failure is the
    /// empty command; the distinction stays visible at debug level only.
    async fn poll_command(&self) -> Result<VoiceCommand, PhaseError> {
        self.speak(COMMAND_PROMPT).await?;

        let heard = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(PhaseError::Cancelled),
            result = self.listener.listen() => match result {
                Ok(text) => text,
                Err(e) => {
                    debug!("Recognition failed ({e}), treating as no command");
                    String::new()
                }
            },
        };

        let cmd = command::parse(&heard);
        if let VoiceCommand::Unrecognized(text) = &cmd {
            debug!("Heard {text:?}, no matching command");
        }
        Ok(cmd)
    }

    async fn speak(&self, text: &str) -> Result<(), PhaseError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(PhaseError::Cancelled),
            result = self.narrator.speak(text) => result.map_err(PhaseError::from),
        }
    }

    async fn speak_topics(&self, topics: &[String]) -> Result<(), PhaseError> {
        if topics.is_empty() {
            return Ok(());
        }
        self.speak(&format!("Topics: {}", topics.join(", "))).await
    }

    fn snippet_duration(&self) -> Duration {
        Duration::from_secs_f64(self.config.library.snippet_secs)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Spoken form of the inter-cycle pause.
fn pause_phrase(secs: u64) -> String {
    if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{secs} seconds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_phrase_prefers_minutes() {
        assert_eq!(pause_phrase(300), "5 minutes");
        assert_eq!(pause_phrase(60), "1 minute");
        assert_eq!(pause_phrase(90), "90 seconds");
        assert_eq!(pause_phrase(5), "5 seconds");
    }

    #[test]
    fn display_name_uses_the_file_name() {
        assert_eq!(display_name(Path::new("/media/shows/a.mp3")), "a.mp3");
    }
}
