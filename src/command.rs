//! Voice command parsing.
//!
//! The prompt advertises `next`, `skip`, `stop`, and `repeat`, but only
//! `stop` changes loop behavior: it breaks out of the current item loop.
//! The other words fall through as unrecognized text.

/// Result of matching transcribed speech against known commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    /// Break out of the current item loop.
    Stop,
    /// Speech was transcribed but matched no acted-on command.
    Unrecognized(String),
    /// Nothing was heard.
    None,
}

impl VoiceCommand {
    pub fn is_stop(&self) -> bool {
        matches!(self, VoiceCommand::Stop)
    }
}

/// Match transcribed speech against commands, case-insensitively.
pub fn parse(heard: &str) -> VoiceCommand {
    if heard.trim().is_empty() {
        return VoiceCommand::None;
    }
    if heard.to_lowercase().contains("stop") {
        return VoiceCommand::Stop;
    }
    VoiceCommand::Unrecognized(heard.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_matches_as_substring_case_insensitive() {
        assert_eq!(parse("Please STOP now"), VoiceCommand::Stop);
        assert_eq!(parse("stop"), VoiceCommand::Stop);
        assert_eq!(parse("unstoppable"), VoiceCommand::Stop);
    }

    #[test]
    fn other_advertised_words_are_not_commands() {
        assert_eq!(
            parse("Next one"),
            VoiceCommand::Unrecognized("Next one".to_string())
        );
        assert_eq!(
            parse("skip"),
            VoiceCommand::Unrecognized("skip".to_string())
        );
        assert_eq!(
            parse("repeat"),
            VoiceCommand::Unrecognized("repeat".to_string())
        );
    }

    #[test]
    fn silence_is_none() {
        assert_eq!(parse(""), VoiceCommand::None);
        assert_eq!(parse("   "), VoiceCommand::None);
    }
}
