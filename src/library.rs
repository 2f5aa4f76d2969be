//! Media library scanning.
//!
//! One recursive walk partitions files into media and transcripts by a
//! fixed set of extensions. Suffix matching is case-sensitive, the walk
//! order is whatever the filesystem yields, and nothing is persisted
//! between scans.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::config::OverviewStyle;

/// Recognized media file suffixes.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    ".mp3", ".m4a", ".wav", ".sw", ".aac", ".flac", ".mp4", ".mov",
];

/// Recognized transcript file suffixes.
pub const TRANSCRIPT_EXTENSIONS: &[&str] = &[".txt", ".srt"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read library folder {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of one library walk.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub media: Vec<PathBuf>,
    pub transcripts: Vec<PathBuf>,
}

impl Inventory {
    pub fn total(&self) -> usize {
        self.media.len() + self.transcripts.len()
    }
}

/// Walk `root` recursively and partition files by extension.
///
/// An unreadable root is an error; unreadable subdirectories are skipped
/// with a warning, like the usual directory walker.
pub fn scan(root: &Path) -> Result<Inventory, ScanError> {
    let mut inventory = Inventory::default();
    let mut pending = vec![root.to_path_buf()];
    let mut first = true;

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(source) if first => {
                return Err(ScanError::Root { path: dir, source });
            }
            Err(e) => {
                warn!("Skipping unreadable directory {}: {e}", dir.display());
                continue;
            }
        };
        first = false;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if MEDIA_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
                    inventory.media.push(path);
                } else if TRANSCRIPT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
                    inventory.transcripts.push(path);
                }
            }
        }
    }

    Ok(inventory)
}

/// Render the spoken library overview for a scan.
pub fn describe(count: usize, style: OverviewStyle) -> String {
    match style {
        OverviewStyle::Short => format!("I found {count} media items in the library."),
        OverviewStyle::Detailed => format!(
            "The library contains {count} podcasts, recordings, or transcripts. \
             I can read or summarize them interactively."
        ),
        OverviewStyle::Technical => {
            format!("Scanned {count} media and transcript files from the library folder.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn partitions_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.mp3");
        touch(dir.path(), "b.srt");
        touch(dir.path(), "c.txt");
        touch(dir.path(), "d.pdf");

        let inventory = scan(dir.path()).unwrap();

        let media: HashSet<String> = inventory
            .media
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        let transcripts: HashSet<String> = inventory
            .transcripts
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(media, HashSet::from(["a.mp3".to_string()]));
        assert_eq!(
            transcripts,
            HashSet::from(["b.srt".to_string(), "c.txt".to_string()])
        );
    }

    #[test]
    fn walks_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shows").join("archive");
        fs::create_dir_all(&nested).unwrap();
        touch(&nested, "deep.flac");
        touch(dir.path(), "top.wav");

        let inventory = scan(dir.path()).unwrap();
        assert_eq!(inventory.media.len(), 2);
        assert!(inventory.transcripts.is_empty());
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "loud.MP3");
        touch(dir.path(), "quiet.mp3");

        let inventory = scan(dir.path()).unwrap();
        assert_eq!(inventory.media.len(), 1);
        assert!(inventory.media[0].ends_with("quiet.mp3"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("no-such-folder");
        assert!(matches!(scan(&gone), Err(ScanError::Root { .. })));
    }

    #[test]
    fn overview_styles_mention_the_count() {
        for style in [
            OverviewStyle::Short,
            OverviewStyle::Detailed,
            OverviewStyle::Technical,
        ] {
            assert!(describe(7, style).contains('7'));
        }
    }
}
