//! Configuration management for news-narrator-rs.
//!
//! Loads config from YAML files in standard locations. Every section and
//! field has a default, so a missing or partial file still yields a
//! runnable configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Feed URLs narrated in order, one inner item loop each.
    pub urls: Vec<String>,
    /// HTTP timeout for a single feed fetch, in seconds.
    pub fetch_timeout: f64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            urls: vec![],
            fetch_timeout: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Root folder scanned recursively for media and transcript files.
    pub folder: PathBuf,
    /// Length of the audio preview per media file; also the pause used
    /// when a file cannot be decoded.
    pub snippet_secs: f64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("media"),
            snippet_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub path: PathBuf,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("narrator_journal.json"),
        }
    }
}

/// Spoken library overview style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewStyle {
    Short,
    Detailed,
    Technical,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Speech synthesis command; the text to speak is appended as the final
    /// argument. Empty means log-only console output.
    pub speak_command: Vec<String>,
    /// Speech recognition command; must print the transcript to stdout.
    /// Empty means listening is disabled (every poll hears nothing).
    pub listen_command: Vec<String>,
    /// Bound on a single listen, in seconds.
    pub listen_window: f64,
    /// Style of the spoken library overview.
    pub style: OverviewStyle,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            speak_command: vec!["espeak-ng".into()],
            listen_command: vec![],
            listen_window: 5.0,
            style: OverviewStyle::Short,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Pause between full cycles, in seconds.
    pub pause_secs: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self { pause_secs: 300.0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feeds: FeedsConfig,
    pub library: LibraryConfig,
    pub journal: JournalConfig,
    pub voice: VoiceConfig,
    pub cycle: CycleConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./config.yaml
    /// 2. ~/.config/news-narrator/config.yaml
    /// 3. /etc/news-narrator/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("config.yaml")),
                dirs::home_dir().map(|h| h.join(".config/news-narrator/config.yaml")),
                Some(PathBuf::from("/etc/news-narrator/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match serde_yml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let config = Config::default();
        assert!(config.feeds.urls.is_empty());
        assert_eq!(config.journal.path, PathBuf::from("narrator_journal.json"));
        assert_eq!(config.cycle.pause_secs, 300.0);
        assert_eq!(config.voice.listen_window, 5.0);
        assert_eq!(config.voice.style, OverviewStyle::Short);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = r#"
feeds:
  urls:
    - "https://example.com/rss"
voice:
  style: detailed
"#;
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.feeds.urls.len(), 1);
        assert_eq!(config.feeds.fetch_timeout, 15.0);
        assert_eq!(config.voice.style, OverviewStyle::Detailed);
        assert_eq!(config.cycle.pause_secs, 300.0);
    }
}
