//! Media snippet playback.
//!
//! Plays a bounded preview of an audio file through rodio. Decode and
//! output work is blocking, so it runs on the blocking pool and is polled
//! against the cancellation token the same way speech playback is.

use async_trait::async_trait;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("cannot open media file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode media file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("audio output unavailable: {0}")]
    Output(String),
}

/// Playback collaborator.
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Play up to the configured snippet length of `path`, returning when
    /// playback finishes, the bound is hit, or cancellation fires.
    async fn play_snippet(&self, path: &Path) -> Result<(), PlayError>;
}

/// rodio-backed snippet player.
pub struct RodioPlayer {
    snippet: Duration,
    cancel: CancellationToken,
}

impl RodioPlayer {
    pub fn new(snippet: Duration, cancel: CancellationToken) -> Self {
        Self { snippet, cancel }
    }
}

#[async_trait]
impl MediaPlayer for RodioPlayer {
    async fn play_snippet(&self, path: &Path) -> Result<(), PlayError> {
        let path = path.to_path_buf();
        let snippet = self.snippet;
        let cancel = self.cancel.clone();

        tokio::task::spawn_blocking(move || {
            let file = File::open(&path).map_err(|source| PlayError::Open {
                path: path.clone(),
                source,
            })?;
            let decoder =
                rodio::Decoder::new(BufReader::new(file)).map_err(|source| PlayError::Decode {
                    path: path.clone(),
                    source,
                })?;

            let stream = rodio::OutputStreamBuilder::open_default_stream()
                .map_err(|e| PlayError::Output(e.to_string()))?;
            let sink = rodio::Sink::connect_new(stream.mixer());
            sink.append(decoder);

            debug!("Previewing {} for up to {:?}", path.display(), snippet);

            // Poll for completion, the snippet deadline, or cancellation.
            let deadline = Instant::now() + snippet;
            loop {
                if sink.empty() {
                    break;
                }
                if cancel.is_cancelled() || Instant::now() >= deadline {
                    sink.stop();
                    break;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Ok(())
        })
        .await
        .unwrap_or_else(|e| Err(PlayError::Output(e.to_string())))
    }
}
