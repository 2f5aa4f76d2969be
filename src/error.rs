//! Phase-level error kinds.
//!
//! A collaborator failure aborts the phase unit it occurred in (one feed,
//! one file loop) and is logged; the overall loop keeps running.
//! Cancellation travels through the same channel so every phase can be
//! unwound promptly on shutdown.

use thiserror::Error;

use crate::feed::FeedError;
use crate::journal::JournalError;
use crate::speech::SpeakError;

#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("shutdown requested")]
    Cancelled,
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Speak(#[from] SpeakError),
    #[error(transparent)]
    Journal(#[from] JournalError),
}

impl PhaseError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PhaseError::Cancelled)
    }
}
