//! Spoken request classification.

/// What the shopper asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceIntent {
    /// Accept the pending suggestion
    Accept,
    /// Decline the pending suggestion
    Decline,
    /// Pause navigation
    Stop,
    /// Say the last direction again
    Repeat,
    /// Ask about traffic
    Traffic,
    /// Ask how far is left
    Distance,
    /// Ask how long is left
    Eta,
    /// Ask for suggestions
    Suggest,
    /// Ask what can be said
    Help,
    /// Anything else
    Unknown,
}

impl VoiceIntent {
    /// Classify a transcript by keyword; the first matching rule wins.
    ///
    /// Keywords match whole words, or word prefixes for keywords of four
    /// letters or more ("suggestions" matches "suggest"). Multi-word
    /// keywords match as phrases.
    pub fn parse(transcript: &str) -> Self {
        let text = transcript.to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let phrase = words.join(" ");

        let matches = |keyword: &str| {
            if keyword.contains(' ') {
                phrase.contains(keyword)
            } else {
                words
                    .iter()
                    .any(|w| *w == keyword || (keyword.len() >= 4 && w.starts_with(keyword)))
            }
        };
        let has = |keywords: &[&str]| keywords.iter().any(|k| matches(*k));

        if has(&["yes", "add", "okay"]) {
            VoiceIntent::Accept
        } else if has(&["no", "skip", "not now"]) {
            VoiceIntent::Decline
        } else if has(&["stop", "pause"]) {
            VoiceIntent::Stop
        } else if has(&["repeat"]) {
            VoiceIntent::Repeat
        } else if has(&["traffic"]) {
            VoiceIntent::Traffic
        } else if has(&["distance"]) {
            VoiceIntent::Distance
        } else if has(&["eta"]) {
            VoiceIntent::Eta
        } else if has(&["suggest", "recommend"]) {
            VoiceIntent::Suggest
        } else if has(&["help", "commands"]) {
            VoiceIntent::Help
        } else {
            VoiceIntent::Unknown
        }
    }

    /// Intent name for logging
    pub fn name(&self) -> &'static str {
        match self {
            VoiceIntent::Accept => "accept",
            VoiceIntent::Decline => "decline",
            VoiceIntent::Stop => "stop",
            VoiceIntent::Repeat => "repeat",
            VoiceIntent::Traffic => "traffic",
            VoiceIntent::Distance => "distance",
            VoiceIntent::Eta => "eta",
            VoiceIntent::Suggest => "suggest",
            VoiceIntent::Help => "help",
            VoiceIntent::Unknown => "unknown",
        }
    }
}
