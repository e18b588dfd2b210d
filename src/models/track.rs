use super::Mood;

/// A playable catalog track. Identity is `id`; the struct is immutable once
/// fetched. Fallback tracks carry no audio URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
    pub duration: f32, // seconds
    pub audio_url: Option<String>,
    pub mood: Option<Mood>,
}

impl Track {
    pub fn is_streamable(&self) -> bool {
        self.audio_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}
