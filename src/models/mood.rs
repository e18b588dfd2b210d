use std::fmt;

/// Closed set of mood labels. Used both for manual selection and as detection
/// output; there is no dynamic extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Relaxed,
    Energetic,
    Romantic,
    Angry,
    Chill,
    Focused,
    Excited,
    Sleepy,
    Motivated,
}

impl Mood {
    pub const ALL: [Mood; 11] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Relaxed,
        Mood::Energetic,
        Mood::Romantic,
        Mood::Angry,
        Mood::Chill,
        Mood::Focused,
        Mood::Excited,
        Mood::Sleepy,
        Mood::Motivated,
    ];

    /// Subset the detector can produce.
    pub const DETECTABLE: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Relaxed,
        Mood::Energetic,
        Mood::Romantic,
        Mood::Chill,
        Mood::Focused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Relaxed => "relaxed",
            Mood::Energetic => "energetic",
            Mood::Romantic => "romantic",
            Mood::Angry => "angry",
            Mood::Chill => "chill",
            Mood::Focused => "focused",
            Mood::Excited => "excited",
            Mood::Sleepy => "sleepy",
            Mood::Motivated => "motivated",
        }
    }

    /// Comma-separated tag list the catalog understands for this mood.
    pub fn catalog_tags(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad,melancholic",
            Mood::Relaxed => "relaxing,calm",
            Mood::Energetic => "energetic,upbeat",
            Mood::Romantic => "romantic,love",
            Mood::Angry => "angry,intense",
            Mood::Chill => "chill,ambient",
            Mood::Focused => "focused,concentration",
            Mood::Excited => "exciting,uplifting",
            Mood::Sleepy => "sleep,lullaby",
            Mood::Motivated => "motivational,inspiring",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Relaxed => "😌",
            Mood::Energetic => "⚡",
            Mood::Romantic => "💖",
            Mood::Angry => "😠",
            Mood::Chill => "😎",
            Mood::Focused => "🧠",
            Mood::Excited => "🤩",
            Mood::Sleepy => "😴",
            Mood::Motivated => "💪",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mood::Happy => "Uplifting tunes to keep your spirits high",
            Mood::Sad => "Melancholic melodies for those reflective moments",
            Mood::Relaxed => "Gentle, calming sounds to help you unwind",
            Mood::Energetic => "High-tempo beats to boost your energy",
            Mood::Romantic => "Love-filled tunes for heartfelt moments",
            Mood::Angry => "Intense tracks to channel your emotions",
            Mood::Chill => "Laid-back vibes for easy listening",
            Mood::Focused => "Distraction-free audio to help you concentrate",
            Mood::Excited => "Thrilling tracks that capture your enthusiasm",
            Mood::Sleepy => "Soothing sounds to help you drift off",
            Mood::Motivated => "Empowering music to push you forward",
        }
    }

    /// Display label with an uppercase first letter.
    pub fn label(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mood_has_tags_and_metadata() {
        for mood in Mood::ALL {
            assert!(!mood.catalog_tags().is_empty());
            assert!(!mood.emoji().is_empty());
            assert!(!mood.description().is_empty());
        }
    }

    #[test]
    fn test_detectable_is_subset_of_all() {
        for mood in Mood::DETECTABLE {
            assert!(Mood::ALL.contains(&mood));
        }
    }

    #[test]
    fn test_label_capitalizes() {
        assert_eq!(Mood::Happy.label(), "Happy");
        assert_eq!(Mood::Energetic.to_string(), "energetic");
    }
}
