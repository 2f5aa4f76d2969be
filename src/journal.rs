//! Action journal: an append-only JSON array on disk.
//!
//! Every narrated action is recorded. Each append loads the full array,
//! pushes one entry, and rewrites the whole file pretty-printed. Single
//! process, single writer; there is no concurrent-writer protection.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("journal format error at {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One journaled action: when it happened plus what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(flatten)]
    pub event: JournalEvent,
}

/// The narrated action, tagged by `type` in the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JournalEvent {
    News {
        source: String,
        title: String,
        summary: String,
        topics: Vec<String>,
    },
    Media {
        file: PathBuf,
    },
    Transcript {
        file: PathBuf,
        summary: String,
        topics: Vec<String>,
    },
}

impl JournalEntry {
    /// Stamp an event with the current wall-clock time.
    pub fn now(event: JournalEvent) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            event,
        }
    }
}

/// JSON-array journal file.
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry: load the full array, push, rewrite the file.
    pub fn append(&self, entry: JournalEntry) -> Result<(), JournalError> {
        let mut entries = self.load()?;
        entries.push(entry);

        let json = serde_json::to_string_pretty(&entries).map_err(|source| {
            JournalError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| JournalError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Journaled entry #{} to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Load every entry. A missing file is an empty journal; a corrupt one
    /// is an error, not a silent reset.
    pub fn load(&self) -> Result<Vec<JournalEntry>, JournalError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(JournalError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| JournalError::Format {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_journal() -> (Journal, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("journal.json"));
        (journal, dir)
    }

    fn news_entry(title: &str) -> JournalEntry {
        JournalEntry {
            timestamp: 1_700_000_000,
            event: JournalEvent::News {
                source: "https://example.com/rss".into(),
                title: title.into(),
                summary: "a summary".into(),
                topics: vec!["topic".into()],
            },
        }
    }

    #[test]
    fn missing_file_is_empty_journal() {
        let (journal, _dir) = temp_journal();
        assert!(journal.load().unwrap().is_empty());
    }

    #[test]
    fn appends_preserve_order() {
        let (journal, _dir) = temp_journal();
        let e1 = news_entry("first");
        let e2 = JournalEntry {
            timestamp: 1_700_000_001,
            event: JournalEvent::Media {
                file: PathBuf::from("/media/a.mp3"),
            },
        };

        journal.append(e1.clone()).unwrap();
        journal.append(e2.clone()).unwrap();

        assert_eq!(journal.load().unwrap(), vec![e1, e2]);
    }

    #[test]
    fn file_is_a_pretty_printed_json_array() {
        let (journal, _dir) = temp_journal();
        journal.append(news_entry("only")).unwrap();

        let raw = fs::read_to_string(journal.path()).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["type"], "news");
        assert_eq!(array[0]["title"], "only");
        assert_eq!(array[0]["timestamp"], 1_700_000_000i64);
    }

    #[test]
    fn transcript_entries_round_trip() {
        let (journal, _dir) = temp_journal();
        let entry = JournalEntry {
            timestamp: 42,
            event: JournalEvent::Transcript {
                file: PathBuf::from("/media/talk.txt"),
                summary: "lines".into(),
                topics: vec!["words".into(), "things".into()],
            },
        };
        journal.append(entry.clone()).unwrap();
        assert_eq!(journal.load().unwrap(), vec![entry]);
    }

    #[test]
    fn corrupt_file_surfaces_an_error() {
        let (journal, _dir) = temp_journal();
        fs::write(journal.path(), "not valid json{{{").unwrap();

        assert!(matches!(
            journal.load(),
            Err(JournalError::Format { .. })
        ));
        assert!(journal.append(news_entry("x")).is_err());
    }
}
